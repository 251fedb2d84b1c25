//! Per-type casting and validation strategies
//!
//! Every [`FieldType`] maps to one stateless [`FieldStrategy`]. Strategies
//! stop at the first failing constraint.

pub mod checkbox_field;
pub mod email_field;
pub mod number_field;
pub mod tel_field;
pub mod text_field;
pub mod url_field;

pub use checkbox_field::CheckboxStrategy;
pub use email_field::EmailStrategy;
pub use number_field::NumberStrategy;
pub use tel_field::TelStrategy;
pub use text_field::TextStrategy;
pub use url_field::UrlStrategy;

use crate::field::{Field, FieldError, FieldResult, FieldType, FieldValue, messages};

/// Casting and built-in validation for one kind of field
pub trait FieldStrategy: Send + Sync {
	/// Convert the raw submitted value, `None` when it cannot be represented
	fn cast(&self, raw: Option<&str>) -> Option<FieldValue>;

	/// Check `raw` against the field's constraints and return the cast value
	fn validate(&self, field: &Field, raw: Option<&str>) -> FieldResult<Option<FieldValue>>;
}

impl FieldType {
	/// Strategy used for fields of this type
	///
	/// # Examples
	///
	/// ```
	/// use zluvo_forms::field::{FieldType, FieldValue};
	///
	/// let strategy = FieldType::Checkbox.strategy();
	/// assert_eq!(strategy.cast(Some("true")), Some(FieldValue::Bool(true)));
	/// assert_eq!(strategy.cast(Some("yes")), None);
	/// ```
	pub fn strategy(self) -> &'static dyn FieldStrategy {
		match self {
			FieldType::Text | FieldType::TextArea | FieldType::Password => &TextStrategy,
			FieldType::Email => &EmailStrategy,
			FieldType::Url => &UrlStrategy,
			FieldType::Tel => &TelStrategy,
			FieldType::Number => &NumberStrategy,
			FieldType::Checkbox => &CheckboxStrategy,
		}
	}
}

/// Presence check shared by every strategy.
///
/// Returns the raw value when it is non-empty, `None` when an optional field
/// was left blank.
pub(crate) fn require<'a>(field: &Field, raw: Option<&'a str>) -> FieldResult<Option<&'a str>> {
	match raw {
		Some(value) if !value.is_empty() => Ok(Some(value)),
		_ if field.required => Err(FieldError::Required(field.message(messages::REQUIRED))),
		_ => Ok(None),
	}
}
