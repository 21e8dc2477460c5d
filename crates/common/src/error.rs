//! Common error types for CPLB components.

use std::fmt;

/// A specialized Result type for CPLB operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for CPLB operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("NIC lookup error: {0}")]
    Nic(String),

    #[error("Unsupported platform: {0}")]
    Unsupported(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a new NIC lookup error.
    pub fn nic(msg: impl fmt::Display) -> Self {
        Error::Nic(msg.to_string())
    }

    /// Create a new unsupported-platform error.
    pub fn unsupported(msg: impl fmt::Display) -> Self {
        Error::Unsupported(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_messages() {
        assert_eq!(
            Error::nic("no default route").to_string(),
            "NIC lookup error: no default route"
        );
        assert_eq!(
            Error::unsupported("windows").to_string(),
            "Unsupported platform: windows"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
