//! Error types for modelshop

use thiserror::Error;

/// Main error type for modelshop
#[derive(Error, Debug)]
pub enum ShopError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Remote catalog store error
    #[error("Store error: {0}")]
    Store(String),

    /// API error
    #[error("API error: {0}")]
    Api(String),

    /// Model not found
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Unknown category name
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Upload draft failed validation
    #[error("Invalid upload draft: {0}")]
    InvalidDraft(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for modelshop operations
pub type ShopResult<T> = Result<T, ShopError>;

impl From<serde_json::Error> for ShopError {
    fn from(err: serde_json::Error) -> Self {
        ShopError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for ShopError {
    fn from(err: toml::de::Error) -> Self {
        ShopError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ShopError::Store("connection refused".to_string());
        assert_eq!(err.to_string(), "Store error: connection refused");

        let err = ShopError::ModelNotFound("abc".to_string());
        assert_eq!(err.to_string(), "Model not found: abc");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ShopError = io_err.into();
        assert!(matches!(err, ShopError::Io(_)));
    }
}
