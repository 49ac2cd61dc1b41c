//! Domain error types
//!
//! This module defines the error hierarchy for the converter. All errors are
//! domain-specific and don't expose third-party types beyond their messages.

use thiserror::Error;

/// Main error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error categories and provides context for error handling.
#[derive(Debug, Error)]
pub enum EdsanError {
    /// Configuration-related errors (missing file, invalid TOML, bad values)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Mapping-rule errors (missing mapping file, unknown target table)
    #[error("Mapping error: {0}")]
    Mapping(String),

    /// Extraction errors
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Consolidation errors (e.g. empty patient master table)
    #[error("Consolidation error: {0}")]
    Consolidation(String),

    /// Columnar storage errors (Arrow/Parquet read or write failures)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Data quality check errors
    #[error("Quality error: {0}")]
    Quality(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl From<std::io::Error> for EdsanError {
    fn from(err: std::io::Error) -> Self {
        EdsanError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for EdsanError {
    fn from(err: serde_json::Error) -> Self {
        EdsanError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for EdsanError {
    fn from(err: toml::de::Error) -> Self {
        EdsanError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<arrow::error::ArrowError> for EdsanError {
    fn from(err: arrow::error::ArrowError) -> Self {
        EdsanError::Storage(err.to_string())
    }
}

impl From<parquet::errors::ParquetError> for EdsanError {
    fn from(err: parquet::errors::ParquetError) -> Self {
        EdsanError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EdsanError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_consolidation_error_display() {
        let err = EdsanError::Consolidation("no patient rows".to_string());
        assert_eq!(err.to_string(), "Consolidation error: no patient rows");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: EdsanError = io_err.into();
        assert!(matches!(err, EdsanError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: EdsanError = json_err.into();
        assert!(matches!(err, EdsanError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: EdsanError = toml_err.into();
        assert!(matches!(err, EdsanError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let err = EdsanError::Quality("orphan rows".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
