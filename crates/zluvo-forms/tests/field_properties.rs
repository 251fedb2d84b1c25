//! Field Property-Based Tests
//!
//! # Properties Tested
//!
//! - Casting a cast value again yields the same value
//! - Number bounds are inclusive
//! - Required fields reject absent and empty input for every type
//! - Text length limits count characters

use proptest::prelude::*;
use zluvo_forms::{Field, FieldError, FieldType, FieldValue, field, messages};

// =============================================================================
// Strategy Definitions
// =============================================================================

fn field_type_strategy() -> impl Strategy<Value = FieldType> {
	prop_oneof![
		Just(FieldType::Text),
		Just(FieldType::TextArea),
		Just(FieldType::Email),
		Just(FieldType::Password),
		Just(FieldType::Tel),
		Just(FieldType::Url),
		Just(FieldType::Number),
		Just(FieldType::Checkbox),
	]
}

/// Raw input mixing numbers, booleans and arbitrary text
fn raw_strategy() -> impl Strategy<Value = String> {
	prop_oneof![
		any::<f64>().prop_map(|n| n.to_string()),
		any::<i32>().prop_map(|n| n.to_string()),
		Just("true".to_string()),
		Just("false".to_string()),
		".{0,20}",
	]
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
	/// Property: cast(display(cast(raw))) == cast(raw)
	#[test]
	fn test_cast_is_idempotent(field_type in field_type_strategy(), raw in raw_strategy()) {
		let strategy = field_type.strategy();

		let once = strategy.cast(Some(&raw));
		let again = once
			.as_ref()
			.and_then(|value| strategy.cast(Some(&value.to_string())));

		prop_assert_eq!(once, again);
	}

	/// Property: values on the bounds pass, values outside fail with the matching error
	#[test]
	fn test_number_bounds_are_inclusive(
		min in -1_000_000i32..1_000_000,
		span in 0i32..1_000_000,
	) {
		let min = f64::from(min);
		let max = min + f64::from(span);
		let amount = field::number("Amount", "").with_min(min).with_max(max);

		prop_assert_eq!(
			amount.validate(Some(&min.to_string())),
			Ok(Some(FieldValue::Number(min)))
		);
		prop_assert_eq!(
			amount.validate(Some(&max.to_string())),
			Ok(Some(FieldValue::Number(max)))
		);
		prop_assert_eq!(
			amount.validate(Some(&(min - 1.0).to_string())),
			Err(FieldError::Min(messages::MIN.to_string()))
		);
		prop_assert_eq!(
			amount.validate(Some(&(max + 1.0).to_string())),
			Err(FieldError::Max(messages::MAX.to_string()))
		);
	}

	/// Property: a required field of any type rejects absent and empty input
	#[test]
	fn test_required_rejects_blank(field_type in field_type_strategy()) {
		let input = Field::new(field_type, "Any", "").required();

		for raw in [None, Some("")] {
			prop_assert_eq!(
				input.validate(raw),
				Err(FieldError::Required(messages::REQUIRED.to_string()))
			);
		}
	}

	/// Property: text within the limit passes, one character more fails
	#[test]
	fn test_max_length_counts_characters(value in "\\PC{1,40}") {
		let limit = value.chars().count();
		let exact = field::text("Note", "").with_max_length(limit);
		let short = field::text("Note", "").with_max_length(limit - 1);

		prop_assert!(exact.validate(Some(&value)).is_ok());
		prop_assert_eq!(
			short.validate(Some(&value)),
			Err(FieldError::MaxLength(messages::MAX_LENGTH.to_string()))
		);
	}
}
