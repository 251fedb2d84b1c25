//! Outcome of processing a submission

use crate::field::FieldValue;
use indexmap::IndexMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};

// Largest magnitude an f64 holds without losing integer precision.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Cast values keyed by field name, in registration order
pub type FormValues = IndexMap<String, Option<FieldValue>>;

/// Result of [`Form::process`](crate::Form::process)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
	/// Anti-forgery outcome, `None` when anti-forgery is disabled
	#[serde(skip_serializing_if = "Option::is_none")]
	pub secure: Option<bool>,
	/// True exactly when `errors` is empty
	pub valid: bool,
	/// Every message produced, in field registration order
	pub errors: Vec<String>,
	/// Cast values; empty unless `valid`
	pub data: FormValues,
}

impl ValidationResult {
	pub(crate) fn new(secure: Option<bool>, errors: Vec<String>, data: FormValues) -> Self {
		let valid = errors.is_empty();
		Self {
			secure,
			valid,
			errors,
			data: if valid { data } else { FormValues::new() },
		}
	}

	pub fn is_valid(&self) -> bool {
		self.valid
	}

	/// False only when a token was checked and rejected
	pub fn is_secure(&self) -> bool {
		self.secure.unwrap_or(true)
	}

	/// Cast values in registration order; empty unless valid
	pub fn values(&self) -> Vec<Option<&FieldValue>> {
		self.data.values().map(Option::as_ref).collect()
	}

	pub fn get(&self, name: &str) -> Option<&FieldValue> {
		self.data.get(name).and_then(Option::as_ref)
	}

	/// Deserialize the cast values into a typed struct
	///
	/// Whole numbers are handed over as JSON integers, so number fields can
	/// land in integer struct fields as well as floats.
	///
	/// # Examples
	///
	/// ```
	/// use serde::Deserialize;
	/// use zluvo_forms::{Form, FormData, field};
	///
	/// #[derive(Deserialize)]
	/// struct Signup {
	///     name: String,
	///     age: Option<u32>,
	/// }
	///
	/// # tokio_test::block_on(async {
	/// let mut form = Form::new("signup");
	/// form.register([
	///     ("name", field::text("Name", "").required()),
	///     ("age", field::number("Age", "")),
	/// ])
	/// .unwrap();
	///
	/// let result = form
	///     .process(&FormData::new().with("name", "Jane").with("age", "41"))
	///     .await
	///     .unwrap();
	/// let signup: Signup = result.parse().unwrap();
	/// assert_eq!(signup.name, "Jane");
	/// assert_eq!(signup.age, Some(41));
	/// # });
	/// ```
	pub fn parse<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
		let object: Map<String, Value> = self
			.data
			.iter()
			.map(|(name, value)| (name.clone(), value.as_ref().map_or(Value::Null, json_value)))
			.collect();
		serde_json::from_value(Value::Object(object))
	}

	/// Split into the cast values or the error messages
	pub fn into_outcome(self) -> Result<FormValues, Vec<String>> {
		if self.valid {
			Ok(self.data)
		} else {
			Err(self.errors)
		}
	}
}

fn json_value(value: &FieldValue) -> Value {
	match value {
		FieldValue::Bool(b) => Value::Bool(*b),
		FieldValue::Text(s) => Value::String(s.clone()),
		FieldValue::Number(n) if n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER => {
			Value::from(*n as i64)
		}
		FieldValue::Number(n) => Number::from_f64(*n).map_or(Value::Null, Value::Number),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde::Deserialize;

	#[derive(Debug, Deserialize)]
	struct Person {
		name: String,
		age: u32,
	}

	#[derive(Debug, Deserialize)]
	struct Measurement {
		reading: f64,
		count: i64,
	}

	fn valid(entries: impl IntoIterator<Item = (&'static str, FieldValue)>) -> ValidationResult {
		let data = entries
			.into_iter()
			.map(|(name, value)| (name.to_string(), Some(value)))
			.collect();
		ValidationResult::new(None, Vec::new(), data)
	}

	#[rstest]
	fn test_parse_whole_number_into_integer() {
		// Arrange
		let result = valid([
			("name", FieldValue::from("Jane")),
			("age", FieldValue::Number(41.0)),
		]);

		// Act
		let person: Person = result.parse().unwrap();

		// Assert
		assert_eq!(person.name, "Jane");
		assert_eq!(person.age, 41);
	}

	#[rstest]
	fn test_parse_keeps_fractions_and_accepts_floats() {
		let result = valid([
			("reading", FieldValue::Number(2.5)),
			("count", FieldValue::Number(-3.0)),
		]);

		let measurement: Measurement = result.parse().unwrap();

		assert_eq!(measurement.reading, 2.5);
		assert_eq!(measurement.count, -3);
	}

	#[rstest]
	fn test_parse_rejects_fraction_for_integer() {
		let result = valid([
			("name", FieldValue::from("Jane")),
			("age", FieldValue::Number(41.5)),
		]);

		assert!(result.parse::<Person>().is_err());
	}

	#[rstest]
	fn test_invalid_result_has_no_values() {
		let mut data = FormValues::new();
		data.insert("name".into(), Some(FieldValue::from("x")));

		let result = ValidationResult::new(None, vec!["Field is required".into()], data);

		assert!(!result.is_valid());
		assert!(result.values().is_empty());
		assert_eq!(
			result.into_outcome(),
			Err(vec!["Field is required".to_string()])
		);
	}

	#[rstest]
	fn test_secure_is_omitted_when_unchecked() {
		let result = ValidationResult::new(None, Vec::new(), FormValues::new());
		let json = serde_json::to_value(&result).unwrap();

		assert!(json.get("secure").is_none());
		assert!(result.is_secure());
		assert_eq!(json["valid"], serde_json::json!(true));
	}

	#[rstest]
	fn test_values_follow_registration_order() {
		let mut data = FormValues::new();
		data.insert("b".into(), Some(FieldValue::Number(2.0)));
		data.insert("a".into(), None);

		let result = ValidationResult::new(Some(true), Vec::new(), data);

		assert_eq!(
			result.values(),
			vec![Some(&FieldValue::Number(2.0)), None]
		);
		assert_eq!(result.get("b"), Some(&FieldValue::Number(2.0)));
		assert_eq!(result.get("a"), None);
	}
}
