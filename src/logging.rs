//! Failure records and reporters.
//!
//! # Examples
//!
//! ```rust,no_run
//! use zluvo::logging::{FailureLogger, MemoryReporter};
//! ```

#[cfg(feature = "logging")]
pub use zluvo_logging::*;
