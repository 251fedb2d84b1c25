use crate::field::{Field, FieldError, FieldResult, FieldValue, messages};
use crate::fields::{FieldStrategy, require};

/// Strategy for `text`, `textarea` and `password` fields
#[derive(Debug, Clone, Copy, Default)]
pub struct TextStrategy;

impl FieldStrategy for TextStrategy {
	fn cast(&self, raw: Option<&str>) -> Option<FieldValue> {
		raw.map(FieldValue::from)
	}

	fn validate(&self, field: &Field, raw: Option<&str>) -> FieldResult<Option<FieldValue>> {
		let Some(value) = require(field, raw)? else {
			return Ok(self.cast(raw));
		};

		// Length is counted in characters, not bytes
		if let Some(max_length) = field.max_length
			&& value.chars().count() > max_length
		{
			return Err(FieldError::MaxLength(field.message(messages::MAX_LENGTH)));
		}

		Ok(self.cast(Some(value)))
	}
}
