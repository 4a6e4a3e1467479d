//! Sample service responses for unit tests and for consumers building their
//! own mocks (enable the `mocks` feature).

mod error_fixtures;
mod file_fixtures;

pub use error_fixtures::*;
pub use file_fixtures::*;
