//! # zluvo security
//!
//! Signed anti-forgery tokens proving that a submission comes from a form
//! this application rendered.
//!
//! ## Example
//!
//! ```
//! use zluvo_conf::Settings;
//! use zluvo_security::{HmacTokenGuard, TokenGuard};
//!
//! let settings = Settings::default().with_csrf_secret("s3cret");
//! let guard = HmacTokenGuard::from_settings(&settings).unwrap();
//!
//! let token = guard.generate();
//! assert!(guard.verify(&token));
//! assert!(!guard.verify("asdf.asdf"));
//! ```

pub mod token;

pub use token::{
	HmacTokenGuard, REASON_BAD_SIGNATURE, REASON_MALFORMED_TOKEN, REASON_TOKEN_MISSING,
	TOKEN_SEPARATOR, TokenGuard,
};

use thiserror::Error;

/// Result type for security operations
pub type SecurityResult<T> = Result<T, SecurityError>;

/// Security-related errors
#[derive(Debug, Error)]
pub enum SecurityError {
	/// Anti-forgery was requested but no signing secret is configured
	#[error("Anti-forgery signing secret is not configured (set ZLUVO_CSRF)")]
	MissingSecret,

	/// A submitted token did not verify
	#[error("Anti-forgery validation failed: {0}")]
	TokenRejected(String),
}
