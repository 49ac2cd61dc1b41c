//! Result type alias
//!
//! This module provides a convenient Result type alias that uses EdsanError
//! as the error type.

use super::errors::EdsanError;

/// Result type alias for converter operations
///
/// Use this throughout the codebase for fallible operations.
///
/// # Examples
///
/// ```
/// use edsan::domain::result::Result;
/// use edsan::domain::errors::EdsanError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(EdsanError::Extraction("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, EdsanError>;
