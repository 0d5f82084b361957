//! Common error types for the album vote service

use thiserror::Error;

/// Common result type for album vote operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the service crates
///
/// The vote store and ranking engine never fail, so nothing here describes
/// tally errors. These cover bootstrap configuration only.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML config file could not be parsed
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML config could not be serialized
    #[error("TOML write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
