//! JSON object type backed by a sorted map.

use super::{JsonValue, stringify::escape_json_string};
use anyhow::Result;
use std::collections::BTreeMap;

/// A JSON object, backed by a `BTreeMap<String, JsonValue>`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JsonObject(pub BTreeMap<String, JsonValue>);

impl JsonObject {
	/// Create a new, empty `JsonObject`.
	#[must_use]
	pub fn new() -> Self {
		Self(BTreeMap::new())
	}

	/// Number of entries.
	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Get a reference to the raw `JsonValue` for a key, if present.
	#[must_use]
	pub fn get(&self, key: &str) -> Option<&JsonValue> {
		self.0.get(key)
	}

	/// Retrieve a string value for a key; `None` if the key is missing.
	pub fn get_string(&self, key: &str) -> Result<Option<String>> {
		self
			.get(key)
			.map(|value| value.as_str().map(str::to_string))
			.transpose()
	}

	/// Retrieve a numeric value for a key; `None` if the key is missing.
	pub fn get_number(&self, key: &str) -> Result<Option<f64>> {
		self.get(key).map(JsonValue::as_number).transpose()
	}

	/// Set a key to a value, converting it into a `JsonValue`.
	pub fn set<T>(&mut self, key: &str, value: T)
	where
		JsonValue: From<T>,
	{
		self.0.insert(key.to_owned(), JsonValue::from(value));
	}

	/// Iterate over the keys in sorted order.
	pub fn keys(&self) -> impl Iterator<Item = &String> {
		self.0.keys()
	}

	/// Serialize into a compact JSON string.
	#[must_use]
	pub fn stringify(&self) -> String {
		let entries = self
			.0
			.iter()
			.map(|(key, value)| format!("\"{}\":{}", escape_json_string(key), value.stringify()))
			.collect::<Vec<_>>();
		format!("{{{}}}", entries.join(","))
	}
}

impl<K, V> FromIterator<(K, V)> for JsonObject
where
	K: Into<String>,
	JsonValue: From<V>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(
			iter
				.into_iter()
				.map(|(key, value)| (key.into(), JsonValue::from(value)))
				.collect(),
		)
	}
}

impl<K, V> From<Vec<(K, V)>> for JsonObject
where
	K: Into<String>,
	JsonValue: From<V>,
{
	fn from(input: Vec<(K, V)>) -> Self {
		input.into_iter().collect()
	}
}
