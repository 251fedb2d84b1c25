//! Submitted data
//!
//! Anything that maps a field name to its raw string value is a
//! [`Submission`]. [`FormData`] covers multi-valued `application/x-www-form-urlencoded`
//! bodies.

use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Read access to a submitted form body
pub trait Submission {
	/// Raw value for `name`, `None` when the field was not submitted
	fn get(&self, name: &str) -> Option<&str>;
}

impl<T: Submission + ?Sized> Submission for &T {
	fn get(&self, name: &str) -> Option<&str> {
		(**self).get(name)
	}
}

impl<S: BuildHasher> Submission for HashMap<String, String, S> {
	fn get(&self, name: &str) -> Option<&str> {
		HashMap::get(self, name).map(String::as_str)
	}
}

impl Submission for BTreeMap<String, String> {
	fn get(&self, name: &str) -> Option<&str> {
		BTreeMap::get(self, name).map(String::as_str)
	}
}

impl<S: BuildHasher> Submission for IndexMap<String, String, S> {
	fn get(&self, name: &str) -> Option<&str> {
		IndexMap::get(self, name).map(String::as_str)
	}
}

/// Ordered, possibly repeated name/value pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
	entries: Vec<(String, String)>,
}

impl FormData {
	pub fn new() -> Self {
		Self::default()
	}

	/// Parse an `application/x-www-form-urlencoded` body
	///
	/// # Examples
	///
	/// ```
	/// use zluvo_forms::{FormData, Submission};
	///
	/// let data = FormData::from_urlencoded("name=Jane+Doe&tag=a&tag=b").unwrap();
	/// assert_eq!(data.get("name"), Some("Jane Doe"));
	/// assert_eq!(data.get("tag"), Some("a"));
	/// assert_eq!(data.get_all("tag"), vec!["a", "b"]);
	/// ```
	pub fn from_urlencoded(body: &str) -> Result<Self, serde_urlencoded::de::Error> {
		let entries: Vec<(String, String)> = serde_urlencoded::from_str(body)?;
		Ok(Self { entries })
	}

	pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.entries.push((name.into(), value.into()));
	}

	/// Builder-style [`append`](Self::append)
	pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.append(name, value);
		self
	}

	pub fn get_all(&self, name: &str) -> Vec<&str> {
		self.entries
			.iter()
			.filter(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
			.collect()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Encode back to `application/x-www-form-urlencoded`
	pub fn to_urlencoded(&self) -> Result<String, serde_urlencoded::ser::Error> {
		serde_urlencoded::to_string(&self.entries)
	}
}

/// First value wins for repeated names
impl Submission for FormData {
	fn get(&self, name: &str) -> Option<&str> {
		self.entries
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			entries: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}
