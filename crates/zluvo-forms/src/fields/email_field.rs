use crate::field::{Field, FieldResult, FieldValue, messages};
use crate::fields::{FieldStrategy, TextStrategy};
use crate::validators::EmailValidator;

/// Text rules followed by an email address pattern check
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailStrategy;

impl FieldStrategy for EmailStrategy {
	fn cast(&self, raw: Option<&str>) -> Option<FieldValue> {
		TextStrategy.cast(raw)
	}

	fn validate(&self, field: &Field, raw: Option<&str>) -> FieldResult<Option<FieldValue>> {
		let value = TextStrategy.validate(field, raw)?;
		if let Some(FieldValue::Text(address)) = &value
			&& !address.is_empty()
		{
			EmailValidator::new()
				.with_message(field.message(messages::EMAIL))
				.validate(address)?;
		}
		Ok(value)
	}
}
