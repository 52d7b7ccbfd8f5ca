//! JSON array type.

use super::JsonValue;
use anyhow::Result;

/// A JSON array, backed by a `Vec<JsonValue>`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JsonArray(pub Vec<JsonValue>);

impl JsonArray {
	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Serialize into a compact JSON string.
	#[must_use]
	pub fn stringify(&self) -> String {
		let items = self.0.iter().map(JsonValue::stringify).collect::<Vec<_>>();
		format!("[{}]", items.join(","))
	}

	/// Convert all elements to numbers, failing if any element is not numeric.
	pub fn as_number_vec(&self) -> Result<Vec<f64>> {
		self.0.iter().map(JsonValue::as_number).collect()
	}
}

impl<T> From<Vec<T>> for JsonArray
where
	JsonValue: From<T>,
{
	fn from(input: Vec<T>) -> Self {
		Self(input.into_iter().map(JsonValue::from).collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_stringify() {
		let array = JsonArray::from(vec![1, 2, 3]);
		assert_eq!(array.stringify(), "[1,2,3]");
		assert_eq!(JsonArray::default().stringify(), "[]");
	}

	#[test]
	fn test_as_number_vec() {
		let array = JsonArray::from(vec![-120.5, 39.1]);
		assert_eq!(array.as_number_vec().unwrap(), vec![-120.5, 39.1]);

		let mixed = JsonArray(vec![JsonValue::from(1), JsonValue::from("x")]);
		assert!(mixed.as_number_vec().is_err());
	}
}
