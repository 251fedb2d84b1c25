use crate::field::{Field, FieldResult, FieldValue, messages};
use crate::fields::{FieldStrategy, TextStrategy};
use crate::validators::UrlValidator;

/// Text rules followed by an http(s) URL pattern check
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlStrategy;

impl FieldStrategy for UrlStrategy {
	fn cast(&self, raw: Option<&str>) -> Option<FieldValue> {
		TextStrategy.cast(raw)
	}

	fn validate(&self, field: &Field, raw: Option<&str>) -> FieldResult<Option<FieldValue>> {
		let value = TextStrategy.validate(field, raw)?;
		if let Some(FieldValue::Text(url)) = &value
			&& !url.is_empty()
		{
			UrlValidator::new()
				.with_message(field.message(messages::URL))
				.validate(url)?;
		}
		Ok(value)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::field::{self, FieldError};
	use rstest::rstest;

	#[rstest]
	fn test_valid_url_is_cast_to_text() {
		let site = field::url("Website", "").required();
		assert_eq!(
			UrlStrategy.validate(&site, Some("https://example.com")),
			Ok(Some(FieldValue::Text("https://example.com".into())))
		);
	}

	#[rstest]
	fn test_invalid_url_uses_override() {
		let site = field::url("Website", "").with_error("Enter your homepage");
		assert_eq!(
			UrlStrategy.validate(&site, Some("example")),
			Err(FieldError::Url("Enter your homepage".into()))
		);
	}
}
