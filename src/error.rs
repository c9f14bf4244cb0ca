//! # Error Types
//!
//! This module defines all error types for the division engine.
//!
//! Errors fall into four groups:
//! - `ConfigurationError` - a callback was built from an invalid pattern, ratio list,
//!   count list or multiplier. Raised eagerly by the builders, never at call time.
//! - `InvalidOperation` / `AmbiguousSubtraction` - depend on the divisions passed in
//!   at call time. Callers may want to catch these.
//! - `PlanError` - a YAML division plan could not be read.
//! - `RenderError` - a report could not be serialized.
//!
//! Internal consistency checks (a split whose parts do not sum to the input) are
//! assertions, not errors.
//!
//! ## Usage
//! ```rust
//! use baca::{BacaError, Division};
//!
//! let a = Division::new(4, 1).with_start_offset(10);
//! let b = Division::new(2, 1);
//! match a.subtract(&b) {
//!     Err(BacaError::InvalidOperation(message)) => assert!(message.contains("start offset")),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BacaError {
    /// Invalid callback configuration.
    ///
    /// # Example
    /// ```
    /// # use baca::BacaError;
    /// let err = BacaError::ConfigurationError("ratio parts must be positive".to_string());
    /// assert_eq!(err.to_string(), "Invalid configuration: ratio parts must be positive");
    /// ```
    #[error("Invalid configuration: {0}")]
    ConfigurationError(String),

    /// Operation not defined for the given divisions.
    ///
    /// # Example
    /// ```
    /// # use baca::BacaError;
    /// let err = BacaError::InvalidOperation("division must be positive: 0/4".to_string());
    /// assert_eq!(err.to_string(), "Invalid operation: division must be positive: 0/4");
    /// ```
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Subtraction of two anchored divisions did not leave a single contiguous span.
    ///
    /// # Example
    /// ```
    /// # use baca::BacaError;
    /// let err = BacaError::AmbiguousSubtraction {
    ///     minuend: "4/1@10".to_string(),
    ///     subtrahend: "1/1@11".to_string(),
    ///     pieces: 2,
    /// };
    /// assert_eq!(err.to_string(), "Can not subtract 1/1@11 from 4/1@10: 2 pieces remain");
    /// ```
    #[error("Can not subtract {subtrahend} from {minuend}: {pieces} pieces remain")]
    AmbiguousSubtraction {
        minuend: String,
        subtrahend: String,
        pieces: usize,
    },

    /// Malformed division plan.
    #[error("Invalid plan: {0}")]
    PlanError(String),

    /// A report could not be written out.
    ///
    /// # Example
    /// ```
    /// # use baca::BacaError;
    /// let err = BacaError::RenderError("unsupported value".to_string());
    /// assert_eq!(err.to_string(), "Can not render report: unsupported value");
    /// ```
    #[error("Can not render report: {0}")]
    RenderError(String),
}
