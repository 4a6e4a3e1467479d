//! Authentication module for the Files client.
//!
//! Azure OpenAI resources accept the account key in the `Api-Key` header.

use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;

use crate::config::key_hint;
use crate::errors::FilesError;

/// Name of the header carrying the account key.
pub const API_KEY_HEADER: &str = "Api-Key";

/// Authentication provider trait.
///
/// Implementations add credentials to the headers of every request.
pub trait AuthProvider: Send + Sync {
    /// Apply authentication to request headers.
    fn apply_auth(&self, headers: &mut HashMap<String, String>);

    /// Validate the credentials.
    fn validate(&self) -> Result<(), FilesError>;
}

/// Account key authentication provider.
pub struct ApiKeyAuth {
    api_key: SecretString,
}

impl ApiKeyAuth {
    /// Creates a new key authentication provider.
    pub fn new(api_key: SecretString) -> Self {
        Self { api_key }
    }

    /// Creates from a string key.
    pub fn from_string(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
        }
    }

    /// Gets a hint of the key for debugging (last 4 characters).
    pub fn key_hint(&self) -> String {
        key_hint(self.api_key.expose_secret())
    }
}

impl AuthProvider for ApiKeyAuth {
    fn apply_auth(&self, headers: &mut HashMap<String, String>) {
        headers.insert(
            API_KEY_HEADER.to_string(),
            self.api_key.expose_secret().clone(),
        );
    }

    fn validate(&self) -> Result<(), FilesError> {
        let key = self.api_key.expose_secret();

        if key.is_empty() {
            return Err(FilesError::configuration("API key cannot be empty"));
        }

        if key.chars().any(|c| c.is_control() || c.is_whitespace()) {
            return Err(FilesError::configuration(
                "API key contains whitespace or control characters",
            ));
        }

        Ok(())
    }
}

impl std::fmt::Debug for ApiKeyAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyAuth")
            .field("api_key", &"[REDACTED]")
            .field("key_hint", &self.key_hint())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_auth_apply() {
        let auth = ApiKeyAuth::from_string("0123456789abcdef");
        let mut headers = HashMap::new();

        auth.apply_auth(&mut headers);

        assert_eq!(headers.get("Api-Key"), Some(&"0123456789abcdef".to_string()));
        assert!(!headers.contains_key("Authorization"));
    }

    #[test]
    fn test_validate() {
        assert!(ApiKeyAuth::from_string("0123456789abcdef").validate().is_ok());
        assert!(ApiKeyAuth::from_string("").validate().is_err());
        assert!(ApiKeyAuth::from_string("abc\ndef").validate().is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let auth = ApiKeyAuth::from_string("secret_key_value");
        let debug_str = format!("{:?}", auth);

        assert!(debug_str.contains("[REDACTED]"));
        assert!(!debug_str.contains("secret_key_value"));
    }
}
