//! Custom field rules
//!
//! A [`FieldRule`] runs next to a field's built-in checks and may report
//! several messages at once. Rules are async so they can consult external
//! state (a user directory, a blocklist service).

use crate::field::messages;
use async_trait::async_trait;
use regex::Regex;

#[async_trait]
pub trait FieldRule: Send + Sync {
	/// Check the raw submitted value, returning every message that applies
	async fn check(&self, raw: Option<&str>) -> Result<(), Vec<String>>;
}

/// Rule backed by a synchronous closure
pub struct FnRule<F> {
	check: F,
}

/// Wrap a closure as a [`FieldRule`]
///
/// # Examples
///
/// ```
/// use zluvo_forms::field;
/// use zluvo_forms::rules::rule_fn;
///
/// let username = field::text("Username", "").with_rule(rule_fn(|raw: Option<&str>| {
///     match raw {
///         Some("admin") => Err("That name is taken".to_string()),
///         _ => Ok(()),
///     }
/// }));
/// assert!(username.has_rule());
/// ```
pub fn rule_fn<F>(check: F) -> FnRule<F>
where
	F: Fn(Option<&str>) -> Result<(), String> + Send + Sync,
{
	FnRule { check }
}

#[async_trait]
impl<F> FieldRule for FnRule<F>
where
	F: Fn(Option<&str>) -> Result<(), String> + Send + Sync,
{
	async fn check(&self, raw: Option<&str>) -> Result<(), Vec<String>> {
		(self.check)(raw).map_err(|message| vec![message])
	}
}

/// Minimum number of characters. Absent values count as empty.
#[derive(Debug, Clone)]
pub struct MinLength {
	min: usize,
	message: String,
}

impl MinLength {
	pub fn new(min: usize) -> Self {
		Self {
			min,
			message: messages::MIN_LENGTH.to_string(),
		}
	}

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = message.into();
		self
	}
}

#[async_trait]
impl FieldRule for MinLength {
	async fn check(&self, raw: Option<&str>) -> Result<(), Vec<String>> {
		if raw.unwrap_or_default().chars().count() < self.min {
			return Err(vec![self.message.clone()]);
		}
		Ok(())
	}
}

/// Value must match a regular expression. Absent values are left to the
/// field's required check.
#[derive(Debug, Clone)]
pub struct Pattern {
	regex: Regex,
	message: String,
}

impl Pattern {
	pub fn new(regex: Regex, message: impl Into<String>) -> Self {
		Self {
			regex,
			message: message.into(),
		}
	}
}

#[async_trait]
impl FieldRule for Pattern {
	async fn check(&self, raw: Option<&str>) -> Result<(), Vec<String>> {
		match raw {
			Some(value) if !self.regex.is_match(value) => Err(vec![self.message.clone()]),
			_ => Ok(()),
		}
	}
}

/// Every inner rule runs; their messages are concatenated in order
pub struct AllOf {
	rules: Vec<Box<dyn FieldRule>>,
}

impl AllOf {
	pub fn new() -> Self {
		Self { rules: Vec::new() }
	}

	pub fn and(mut self, rule: impl FieldRule + 'static) -> Self {
		self.rules.push(Box::new(rule));
		self
	}
}

impl Default for AllOf {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl FieldRule for AllOf {
	async fn check(&self, raw: Option<&str>) -> Result<(), Vec<String>> {
		let mut errors = Vec::new();
		for rule in &self.rules {
			if let Err(messages) = rule.check(raw).await {
				errors.extend(messages);
			}
		}
		if errors.is_empty() { Ok(()) } else { Err(errors) }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[tokio::test]
	async fn test_rule_fn_wraps_single_message() {
		let rule = rule_fn(|raw| match raw {
			Some(_) => Ok(()),
			None => Err("missing".to_string()),
		});

		assert_eq!(rule.check(Some("x")).await, Ok(()));
		assert_eq!(rule.check(None).await, Err(vec!["missing".to_string()]));
	}

	#[rstest]
	#[tokio::test]
	async fn test_min_length() {
		let rule = MinLength::new(2);

		assert!(rule.check(Some("ab")).await.is_ok());
		assert_eq!(
			rule.check(Some("a")).await,
			Err(vec![messages::MIN_LENGTH.to_string()])
		);
		assert!(rule.check(None).await.is_err());
	}

	#[rstest]
	#[tokio::test]
	async fn test_pattern_ignores_absent_values() {
		let rule = Pattern::new(Regex::new("^[a-z]+$").unwrap(), "Lowercase only");

		assert!(rule.check(None).await.is_ok());
		assert!(rule.check(Some("abc")).await.is_ok());
		assert_eq!(
			rule.check(Some("ABC")).await,
			Err(vec!["Lowercase only".to_string()])
		);
	}

	#[rstest]
	#[tokio::test]
	async fn test_all_of_collects_every_message() {
		// Arrange
		let rule = AllOf::new()
			.and(MinLength::new(5).with_message("Too short"))
			.and(Pattern::new(Regex::new("^[0-9]+$").unwrap(), "Digits only"));

		// Act
		let result = rule.check(Some("ab")).await;

		// Assert
		assert_eq!(
			result,
			Err(vec!["Too short".to_string(), "Digits only".to_string()])
		);
	}
}
