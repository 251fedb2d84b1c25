//! Field descriptors
//!
//! A [`Field`] describes one input of a form: its kind, presentation and
//! constraints. The free functions in this module ([`text`], [`number`],
//! [`email`], ...) are the usual way to declare one.

use crate::rules::FieldRule;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default error messages, one per failing constraint
pub mod messages {
	pub const REQUIRED: &str = "Field is required";
	pub const NUMBER: &str = "Value is not a valid number";
	pub const EMAIL: &str = "Value is not a valid email address";
	pub const URL: &str = "Value is not valid url";
	pub const CHECKBOX: &str = "Value is not true or false";
	pub const MAX_LENGTH: &str = "Value exceeds max length";
	pub const MIN: &str = "Value is smaller than minimum value";
	pub const MAX: &str = "Value is bigger than maximum value";
	pub const TELEPHONE: &str = "Invalid telephone number format.";
	pub const MIN_LENGTH: &str = "Value is shorter than minimum length";
	pub const TOKEN: &str = "Form token is missing or invalid";
}

/// A failed field constraint. Every variant carries the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
	#[error("{0}")]
	Required(String),
	#[error("{0}")]
	Number(String),
	#[error("{0}")]
	Email(String),
	#[error("{0}")]
	Url(String),
	#[error("{0}")]
	Checkbox(String),
	#[error("{0}")]
	MaxLength(String),
	#[error("{0}")]
	Min(String),
	#[error("{0}")]
	Max(String),
	#[error("{0}")]
	Format(String),
	#[error("{0}")]
	Custom(String),
}

impl FieldError {
	pub fn message(&self) -> &str {
		match self {
			FieldError::Required(m)
			| FieldError::Number(m)
			| FieldError::Email(m)
			| FieldError::Url(m)
			| FieldError::Checkbox(m)
			| FieldError::MaxLength(m)
			| FieldError::Min(m)
			| FieldError::Max(m)
			| FieldError::Format(m)
			| FieldError::Custom(m) => m,
		}
	}
}

pub type FieldResult<T> = Result<T, FieldError>;

/// Kind of input a field renders as, which also selects its validation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
	Text,
	#[serde(rename = "textarea")]
	TextArea,
	Email,
	Password,
	Tel,
	Url,
	Number,
	Checkbox,
}

impl FieldType {
	/// HTML input type name
	pub fn as_str(self) -> &'static str {
		match self {
			FieldType::Text => "text",
			FieldType::TextArea => "textarea",
			FieldType::Email => "email",
			FieldType::Password => "password",
			FieldType::Tel => "tel",
			FieldType::Url => "url",
			FieldType::Number => "number",
			FieldType::Checkbox => "checkbox",
		}
	}

	/// Whether the submitted value stays a string after casting
	pub fn is_text_like(self) -> bool {
		!matches!(self, FieldType::Number | FieldType::Checkbox)
	}
}

impl std::fmt::Display for FieldType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A cast field value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
	Bool(bool),
	Number(f64),
	Text(String),
}

impl FieldValue {
	pub fn as_str(&self) -> Option<&str> {
		match self {
			FieldValue::Text(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_f64(&self) -> Option<f64> {
		match self {
			FieldValue::Number(n) => Some(*n),
			_ => None,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			FieldValue::Bool(b) => Some(*b),
			_ => None,
		}
	}
}

/// Renders the value the way it would be submitted again
impl std::fmt::Display for FieldValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			FieldValue::Bool(b) => write!(f, "{}", b),
			FieldValue::Number(n) => write!(f, "{}", n),
			FieldValue::Text(s) => f.write_str(s),
		}
	}
}

impl From<&str> for FieldValue {
	fn from(value: &str) -> Self {
		FieldValue::Text(value.to_string())
	}
}

impl From<String> for FieldValue {
	fn from(value: String) -> Self {
		FieldValue::Text(value)
	}
}

impl From<f64> for FieldValue {
	fn from(value: f64) -> Self {
		FieldValue::Number(value)
	}
}

impl From<i32> for FieldValue {
	fn from(value: i32) -> Self {
		FieldValue::Number(f64::from(value))
	}
}

impl From<bool> for FieldValue {
	fn from(value: bool) -> Self {
		FieldValue::Bool(value)
	}
}

/// Declaration of a single form input
#[derive(Clone)]
pub struct Field {
	/// Empty until the field is registered on a form
	pub name: String,
	pub label: String,
	pub placeholder: String,
	pub field_type: FieldType,
	pub value: Option<FieldValue>,
	pub required: bool,
	pub max_length: Option<usize>,
	pub min: Option<f64>,
	pub max: Option<f64>,
	/// Replaces every message this field produces
	pub error_message: Option<String>,
	rule: Option<Arc<dyn FieldRule>>,
}

impl Field {
	/// Create an optional field without constraints
	///
	/// # Examples
	///
	/// ```
	/// use zluvo_forms::field::{Field, FieldType};
	///
	/// let field = Field::new(FieldType::Text, "Name", "Jane Doe");
	/// assert_eq!(field.label, "Name");
	/// assert!(field.name.is_empty());
	/// assert!(!field.required);
	/// ```
	pub fn new(
		field_type: FieldType,
		label: impl Into<String>,
		placeholder: impl Into<String>,
	) -> Self {
		Self {
			name: String::new(),
			label: label.into(),
			placeholder: placeholder.into(),
			field_type,
			value: None,
			required: false,
			max_length: None,
			min: None,
			max: None,
			error_message: None,
			rule: None,
		}
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	/// Maximum number of characters, honored by text-like fields
	pub fn with_max_length(mut self, max_length: usize) -> Self {
		self.max_length = Some(max_length);
		self
	}

	/// Lower bound, honored by number fields
	pub fn with_min(mut self, min: f64) -> Self {
		self.min = Some(min);
		self
	}

	/// Upper bound, honored by number fields
	pub fn with_max(mut self, max: f64) -> Self {
		self.max = Some(max);
		self
	}

	/// Use `message` for every error this field reports
	pub fn with_error(mut self, message: impl Into<String>) -> Self {
		self.error_message = Some(message.into());
		self
	}

	/// Initial value, also used when a submission omits the field
	pub fn with_value(mut self, value: impl Into<FieldValue>) -> Self {
		self.value = Some(value.into());
		self
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = name.into();
		self
	}

	/// Attach a custom rule evaluated alongside the built-in checks
	pub fn with_rule(mut self, rule: impl FieldRule + 'static) -> Self {
		self.rule = Some(Arc::new(rule));
		self
	}

	pub fn has_rule(&self) -> bool {
		self.rule.is_some()
	}

	/// The override message if one is set, `default` otherwise
	pub fn message(&self, default: &str) -> String {
		self.error_message
			.clone()
			.unwrap_or_else(|| default.to_string())
	}

	/// Cast a raw submitted value to this field's type
	///
	/// # Examples
	///
	/// ```
	/// use zluvo_forms::field::{self, FieldValue};
	///
	/// let age = field::number("Age", "42");
	/// assert_eq!(age.cast(Some("42")), Some(FieldValue::Number(42.0)));
	/// assert_eq!(age.cast(None), None);
	/// ```
	pub fn cast(&self, raw: Option<&str>) -> Option<FieldValue> {
		self.field_type.strategy().cast(raw)
	}

	/// Run the built-in checks for this field's type, stopping at the first failure
	///
	/// # Examples
	///
	/// ```
	/// use zluvo_forms::field::{self, FieldError};
	///
	/// let email = field::email("Email", "you@example.com").required();
	/// assert!(email.validate(Some("you@example.com")).is_ok());
	/// assert!(matches!(email.validate(None), Err(FieldError::Required(_))));
	/// assert!(matches!(email.validate(Some("nope")), Err(FieldError::Email(_))));
	/// ```
	pub fn validate(&self, raw: Option<&str>) -> FieldResult<Option<FieldValue>> {
		self.field_type.strategy().validate(self, raw)
	}

	/// Built-in checks plus the custom rule, if any.
	///
	/// Messages from both are merged in that order with duplicates dropped.
	pub async fn clean(&self, raw: Option<&str>) -> Result<Option<FieldValue>, Vec<String>> {
		let checked = self.validate(raw);
		let custom = match &self.rule {
			Some(rule) => rule.check(raw).await,
			None => Ok(()),
		};

		match (checked, custom) {
			(Ok(value), Ok(())) => Ok(value),
			(checked, custom) => {
				let mut errors = Vec::new();
				if let Err(error) = checked {
					errors.push(error.to_string());
				}
				if let Err(extra) = custom {
					for message in extra {
						let message = self.error_message.clone().unwrap_or(message);
						if !errors.contains(&message) {
							errors.push(message);
						}
					}
				}
				Err(errors)
			}
		}
	}
}

impl std::fmt::Debug for Field {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Field")
			.field("name", &self.name)
			.field("label", &self.label)
			.field("field_type", &self.field_type)
			.field("value", &self.value)
			.field("required", &self.required)
			.field("max_length", &self.max_length)
			.field("min", &self.min)
			.field("max", &self.max)
			.field("error_message", &self.error_message)
			.field("has_rule", &self.rule.is_some())
			.finish()
	}
}

pub fn text(label: impl Into<String>, placeholder: impl Into<String>) -> Field {
	Field::new(FieldType::Text, label, placeholder)
}

pub fn text_area(label: impl Into<String>, placeholder: impl Into<String>) -> Field {
	Field::new(FieldType::TextArea, label, placeholder)
}

pub fn password(label: impl Into<String>, placeholder: impl Into<String>) -> Field {
	Field::new(FieldType::Password, label, placeholder)
}

pub fn email(label: impl Into<String>, placeholder: impl Into<String>) -> Field {
	Field::new(FieldType::Email, label, placeholder)
}

/// Telephone field accepting `###-###-####`
pub fn telephone(label: impl Into<String>, placeholder: impl Into<String>) -> Field {
	Field::new(FieldType::Tel, label, placeholder)
}

pub fn url(label: impl Into<String>, placeholder: impl Into<String>) -> Field {
	Field::new(FieldType::Url, label, placeholder)
}

pub fn number(label: impl Into<String>, placeholder: impl Into<String>) -> Field {
	Field::new(FieldType::Number, label, placeholder)
}

/// Checkbox field; submitted values must be `true` or `false`
pub fn checkbox(label: impl Into<String>, placeholder: impl Into<String>) -> Field {
	Field::new(FieldType::Checkbox, label, placeholder)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::rules::rule_fn;
	use rstest::rstest;

	#[rstest]
	#[case(FieldType::Text, "text")]
	#[case(FieldType::TextArea, "textarea")]
	#[case(FieldType::Tel, "tel")]
	#[case(FieldType::Checkbox, "checkbox")]
	fn test_field_type_names(#[case] field_type: FieldType, #[case] expected: &str) {
		assert_eq!(field_type.as_str(), expected);
		assert_eq!(
			serde_json::to_value(field_type).unwrap(),
			serde_json::Value::String(expected.to_string())
		);
	}

	#[rstest]
	fn test_field_value_display_matches_submission_form() {
		assert_eq!(FieldValue::Number(3.0).to_string(), "3");
		assert_eq!(FieldValue::Number(2.5).to_string(), "2.5");
		assert_eq!(FieldValue::Bool(true).to_string(), "true");
		assert_eq!(FieldValue::from("abc").to_string(), "abc");
	}

	#[rstest]
	fn test_field_value_serializes_untagged() {
		let values = vec![
			FieldValue::Text("a".into()),
			FieldValue::Number(1.5),
			FieldValue::Bool(false),
		];
		assert_eq!(
			serde_json::to_string(&values).unwrap(),
			r#"["a",1.5,false]"#
		);
	}

	#[rstest]
	fn test_builders_set_constraints() {
		// Arrange & Act
		let field = number("Age", "")
			.required()
			.with_min(18.0)
			.with_max(99.0)
			.with_value(21)
			.with_name("age");

		// Assert
		assert!(field.required);
		assert_eq!(field.min, Some(18.0));
		assert_eq!(field.max, Some(99.0));
		assert_eq!(field.value, Some(FieldValue::Number(21.0)));
		assert_eq!(field.name, "age");
	}

	#[rstest]
	fn test_error_override_applies_to_builtin_messages() {
		let field = text("Name", "").required().with_error("Tell us your name");
		assert_eq!(
			field.validate(None),
			Err(FieldError::Required("Tell us your name".into()))
		);
	}

	#[rstest]
	#[tokio::test]
	async fn test_clean_merges_builtin_and_rule_messages() {
		// Arrange
		let field = text("Code", "")
			.with_max_length(2)
			.with_rule(rule_fn(|raw: Option<&str>| match raw {
				Some(v) if v.chars().all(|c| c.is_ascii_digit()) => Ok(()),
				_ => Err("Digits only".to_string()),
			}));

		// Act
		let errors = field.clean(Some("abc")).await.unwrap_err();

		// Assert
		assert_eq!(errors, vec![messages::MAX_LENGTH, "Digits only"]);
	}

	#[rstest]
	#[tokio::test]
	async fn test_clean_drops_duplicate_messages() {
		let field = text("Name", "")
			.required()
			.with_rule(rule_fn(|_| Err(messages::REQUIRED.to_string())));

		let errors = field.clean(None).await.unwrap_err();

		assert_eq!(errors, vec![messages::REQUIRED]);
	}

	#[rstest]
	#[tokio::test]
	async fn test_override_collapses_rule_and_builtin_messages() {
		let field = text("Name", "")
			.required()
			.with_error("Bad name")
			.with_rule(rule_fn(|_| Err("something else".to_string())));

		let errors = field.clean(None).await.unwrap_err();

		assert_eq!(errors, vec!["Bad name"]);
	}

	#[rstest]
	fn test_debug_reports_rule_presence() {
		let field = text("Name", "").with_rule(rule_fn(|_| Ok(())));
		assert!(format!("{:?}", field).contains("has_rule: true"));
	}
}
