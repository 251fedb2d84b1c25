use crate::field::{Field, FieldResult, FieldValue, messages};
use crate::fields::{FieldStrategy, TextStrategy};
use crate::validators::TelephoneValidator;

/// Text rules followed by a `###-###-####` format check
#[derive(Debug, Clone, Copy, Default)]
pub struct TelStrategy;

impl FieldStrategy for TelStrategy {
	fn cast(&self, raw: Option<&str>) -> Option<FieldValue> {
		TextStrategy.cast(raw)
	}

	fn validate(&self, field: &Field, raw: Option<&str>) -> FieldResult<Option<FieldValue>> {
		let value = TextStrategy.validate(field, raw)?;
		if let Some(FieldValue::Text(number)) = &value
			&& !number.is_empty()
		{
			TelephoneValidator::new()
				.with_message(field.message(messages::TELEPHONE))
				.validate(number)?;
		}
		Ok(value)
	}
}
