use serde::{Deserialize, Deserializer};

/// Reads a JSON `null` sequence as an empty `Vec`.
pub mod null_as_empty_vec {
    use super::*;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        let opt: Option<Vec<T>> = Option::deserialize(deserializer)?;
        Ok(opt.unwrap_or_default())
    }
}

/// Reads a JSON `null` string as an empty `String`. Pair with
/// `#[serde(default)]` so a missing key reads the same way.
pub mod null_as_empty_string {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt: Option<String> = Option::deserialize(deserializer)?;
        Ok(opt.unwrap_or_default())
    }
}
