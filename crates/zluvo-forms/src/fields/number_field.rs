use crate::field::{Field, FieldError, FieldResult, FieldValue, messages};
use crate::fields::{FieldStrategy, require};

/// Strategy for `number` fields: parse, then check `min` and `max`
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberStrategy;

impl NumberStrategy {
	fn parse(raw: &str) -> Option<f64> {
		let n = raw.trim().parse::<f64>().ok()?;
		n.is_finite().then_some(n)
	}
}

impl FieldStrategy for NumberStrategy {
	fn cast(&self, raw: Option<&str>) -> Option<FieldValue> {
		raw.and_then(Self::parse).map(FieldValue::Number)
	}

	fn validate(&self, field: &Field, raw: Option<&str>) -> FieldResult<Option<FieldValue>> {
		let Some(value) = require(field, raw)? else {
			return Ok(None);
		};

		// NaN and infinities are not numbers a user can submit
		let n = Self::parse(value)
			.ok_or_else(|| FieldError::Number(field.message(messages::NUMBER)))?;

		if let Some(min) = field.min
			&& n < min
		{
			return Err(FieldError::Min(field.message(messages::MIN)));
		}

		if let Some(max) = field.max
			&& n > max
		{
			return Err(FieldError::Max(field.message(messages::MAX)));
		}

		Ok(Some(FieldValue::Number(n)))
	}
}
