use crate::field::{Field, FieldError, FieldResult, FieldValue, messages};
use crate::fields::{FieldStrategy, require};

/// Strategy for `checkbox` fields.
///
/// Only the literals `true` and `false` are accepted. A required checkbox
/// must be checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckboxStrategy;

impl FieldStrategy for CheckboxStrategy {
	fn cast(&self, raw: Option<&str>) -> Option<FieldValue> {
		match raw? {
			"true" => Some(FieldValue::Bool(true)),
			"false" => Some(FieldValue::Bool(false)),
			_ => None,
		}
	}

	fn validate(&self, field: &Field, raw: Option<&str>) -> FieldResult<Option<FieldValue>> {
		let Some(value) = require(field, raw)? else {
			return Ok(None);
		};

		match self.cast(Some(value)) {
			None => Err(FieldError::Checkbox(field.message(messages::CHECKBOX))),
			Some(FieldValue::Bool(false)) if field.required => {
				Err(FieldError::Required(field.message(messages::REQUIRED)))
			}
			checked => Ok(checked),
		}
	}
}
