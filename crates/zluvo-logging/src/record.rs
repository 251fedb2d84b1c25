//! Failure records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zluvo_conf::ProjectInfo;

/// One rejected submission, as emitted to reporters and sent to the collector.
///
/// Serializes as `{time, project: {name, version}, form, errors}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureRecord {
	pub time: DateTime<Utc>,
	pub project: ProjectInfo,
	pub form: String,
	pub errors: Vec<String>,
}

impl FailureRecord {
	/// Create a record stamped with the current time
	///
	/// # Examples
	///
	/// ```
	/// use zluvo_conf::ProjectInfo;
	/// use zluvo_logging::FailureRecord;
	///
	/// let record = FailureRecord::new(
	///     ProjectInfo::new("shop", "1.2.0"),
	///     "Register Form",
	///     vec!["Field is required".to_string()],
	/// );
	/// assert_eq!(record.form, "Register Form");
	/// assert_eq!(record.errors.len(), 1);
	/// ```
	pub fn new(project: ProjectInfo, form: impl Into<String>, errors: Vec<String>) -> Self {
		Self {
			time: Utc::now(),
			project,
			form: form.into(),
			errors,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_record_serializes_expected_shape() {
		// Arrange
		let record = FailureRecord::new(
			ProjectInfo::new("shop", "1.2.0"),
			"Checkout",
			vec!["Value is not a valid email address".to_string()],
		);

		// Act
		let json = serde_json::to_value(&record).unwrap();

		// Assert
		assert_eq!(json["project"]["name"], "shop");
		assert_eq!(json["project"]["version"], "1.2.0");
		assert_eq!(json["form"], "Checkout");
		assert_eq!(json["errors"][0], "Value is not a valid email address");
		assert!(json["time"].is_string());
	}
}
