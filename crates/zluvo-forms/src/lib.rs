//! # zluvo forms
//!
//! Declarative form fields with casting and validation.
//!
//! This crate provides:
//! - Field descriptors for text, textarea, password, email, tel, url, number
//!   and checkbox inputs, declared with the builders in [`field`]
//! - One casting and validation strategy per field type
//! - A [`Form`] aggregator that evaluates a [`Submission`] concurrently and
//!   reports a [`ValidationResult`]
//! - Optional anti-forgery tokens, failure recording and post-validation
//!   [`plugins`]
//!
//! ## Example
//!
//! ```
//! use zluvo_forms::{Form, FormData, field};
//!
//! # tokio_test::block_on(async {
//! let mut form = Form::new("newsletter");
//! form.register([
//!     ("email", field::email("Email", "you@example.com").required()),
//!     ("weekly", field::checkbox("Weekly digest", "")),
//! ])
//! .unwrap();
//!
//! let body = FormData::from_urlencoded("email=jane%40example.com&weekly=true").unwrap();
//! let result = form.process(&body).await.unwrap();
//!
//! assert!(result.valid);
//! assert_eq!(result.get("weekly").and_then(|v| v.as_bool()), Some(true));
//! # });
//! ```

pub mod field;
pub mod fields;
pub mod form;
pub mod metadata;
pub mod plugins;
pub mod result;
pub mod rules;
pub mod submission;
pub mod validators;

pub use field::{Field, FieldError, FieldResult, FieldType, FieldValue, messages};
pub use fields::FieldStrategy;
pub use form::{
	Form, FormError, FormResult, ProcessContext, RESERVED_NAMES, TOKEN_FIELD, TokenPolicy,
};
pub use metadata::{FieldMetadata, FormMetadata, HiddenField};
pub use plugins::{Plugin, PluginSet};
pub use result::{FormValues, ValidationResult};
pub use rules::{FieldRule, rule_fn};
pub use submission::{FormData, Submission};
