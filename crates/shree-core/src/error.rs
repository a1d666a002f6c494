use thiserror::Error;

/// Top-level error type for the Shree workspace.
///
/// Crates with richer failure modes (`shree-relay`, `shree-chat`) define their
/// own error enums; this one covers configuration, I/O and serialization
/// concerns shared by every crate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ShreeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for ShreeError {
    fn from(err: toml::de::Error) -> Self {
        ShreeError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for ShreeError {
    fn from(err: toml::ser::Error) -> Self {
        ShreeError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ShreeError {
    fn from(err: serde_json::Error) -> Self {
        ShreeError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Shree operations.
pub type Result<T> = std::result::Result<T, ShreeError>;
