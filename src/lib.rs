//! # zluvo
//!
//! Declarative form fields, validation and anti-forgery tokens.
//!
//! Declare fields with the builders in [`forms::field`], register them on a
//! [`Form`], and process submitted key/value pairs into a
//! [`ValidationResult`]: typed values when every field passes, the ordered
//! list of messages otherwise.
//!
//! ## Feature Flags
//!
//! - `forms` - Fields, strategies, the form aggregator and plugins
//! - `conf` - Layered settings (`ZLUVO_*` environment variables)
//! - `security` - Signed anti-forgery tokens
//! - `logging` - Failure records and reporters
//! - `minimal` - `forms` only
//! - `full` (default) - Everything
//!
//! ## Quick Example
//!
//! ```
//! use zluvo::prelude::*;
//!
//! # tokio_test::block_on(async {
//! let settings = Settings::default().with_csrf_secret("s3cret");
//! let form = Form::new("login")
//!     .with_fields([
//!         ("email", field::email("Email", "you@example.com").required()),
//!         ("password", field::password("Password", "").required()),
//!     ])
//!     .unwrap()
//!     .with_anti_forgery(&settings)
//!     .unwrap();
//!
//! // Render: the hidden token travels with the form
//! let token = form.token_field().unwrap();
//!
//! // Submit
//! let data = FormData::new()
//!     .with(token.name, token.value)
//!     .with("email", "jane@example.com")
//!     .with("password", "hunter22");
//! let result = form.process(&data).await.unwrap();
//!
//! assert_eq!(result.secure, Some(true));
//! assert!(result.valid);
//! # });
//! ```

#[cfg(feature = "conf")]
pub mod conf;
#[cfg(feature = "forms")]
pub mod forms;
#[cfg(feature = "logging")]
pub mod logging;
#[cfg(feature = "security")]
pub mod security;

#[cfg(feature = "forms")]
pub use zluvo_forms::{
	Field, FieldError, FieldType, FieldValue, Form, FormData, FormError, FormResult,
	ProcessContext, Submission, TokenPolicy, ValidationResult, field,
};

#[cfg(feature = "conf")]
pub use zluvo_conf::{ProjectInfo, Settings, SettingsError};

#[cfg(feature = "security")]
pub use zluvo_security::{HmacTokenGuard, SecurityError, TokenGuard};

#[cfg(feature = "logging")]
pub use zluvo_logging::{FailureLogger, FailureRecord, FailureReporter};

/// Prelude module for convenient imports
pub mod prelude {
	#[cfg(feature = "forms")]
	pub use crate::{
		Field, FieldType, FieldValue, Form, FormData, FormError, ProcessContext, Submission,
		TokenPolicy, ValidationResult, field,
	};
	#[cfg(feature = "forms")]
	pub use zluvo_forms::{FieldRule, Plugin, rule_fn};

	#[cfg(feature = "conf")]
	pub use crate::{ProjectInfo, Settings};

	#[cfg(feature = "security")]
	pub use crate::TokenGuard;

	#[cfg(feature = "logging")]
	pub use crate::FailureLogger;

	// External
	#[cfg(feature = "forms")]
	pub use async_trait::async_trait;
}
