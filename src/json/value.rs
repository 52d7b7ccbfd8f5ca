//! JSON value enum representing any valid JSON data.

use super::{JsonArray, JsonObject, parse::parse_json_str, stringify::stringify};
use anyhow::{Result, bail};
use std::fmt::{self, Debug};

/// Any JSON value: array, boolean, null, number, object or string.
#[derive(Clone, PartialEq)]
pub enum JsonValue {
	Array(JsonArray),
	Boolean(bool),
	Null,
	Number(f64),
	Object(JsonObject),
	String(String),
}

impl JsonValue {
	/// Parse a JSON string into a `JsonValue`.
	pub fn parse_str(json: &str) -> Result<JsonValue> {
		parse_json_str(json)
	}

	/// Return the JSON type as a lowercase string (`"array"`, `"object"`, ...).
	#[must_use]
	pub fn type_as_str(&self) -> &str {
		match self {
			JsonValue::Array(_) => "array",
			JsonValue::Boolean(_) => "boolean",
			JsonValue::Null => "null",
			JsonValue::Number(_) => "number",
			JsonValue::Object(_) => "object",
			JsonValue::String(_) => "string",
		}
	}

	/// Serialize to a compact JSON string without unnecessary whitespace.
	#[must_use]
	pub fn stringify(&self) -> String {
		stringify(self)
	}

	/// Borrow the `JsonObject` if this value is an object.
	pub fn as_object(&self) -> Result<&JsonObject> {
		if let JsonValue::Object(object) = self {
			Ok(object)
		} else {
			bail!("expected an object, found a {}", self.type_as_str())
		}
	}

	/// Consume the value and extract the `JsonObject` if it is an object.
	pub fn into_object(self) -> Result<JsonObject> {
		if let JsonValue::Object(object) = self {
			Ok(object)
		} else {
			bail!("expected an object, found a {}", self.type_as_str())
		}
	}

	/// Borrow the `JsonArray` if this value is an array.
	pub fn as_array(&self) -> Result<&JsonArray> {
		if let JsonValue::Array(array) = self {
			Ok(array)
		} else {
			bail!("expected an array, found a {}", self.type_as_str())
		}
	}

	/// Return a string slice if this value is a JSON string.
	pub fn as_str(&self) -> Result<&str> {
		if let JsonValue::String(text) = self {
			Ok(text)
		} else {
			bail!("expected a string, found a {}", self.type_as_str())
		}
	}

	/// Return the numeric value if this value is a JSON number.
	pub fn as_number(&self) -> Result<f64> {
		if let JsonValue::Number(value) = self {
			Ok(*value)
		} else {
			bail!("expected a number, found a {}", self.type_as_str())
		}
	}
}

impl Debug for JsonValue {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(&self.stringify())
	}
}

impl From<&str> for JsonValue {
	fn from(input: &str) -> Self {
		JsonValue::String(input.to_string())
	}
}

impl From<String> for JsonValue {
	fn from(input: String) -> Self {
		JsonValue::String(input)
	}
}

impl From<bool> for JsonValue {
	fn from(input: bool) -> Self {
		JsonValue::Boolean(input)
	}
}

impl From<f64> for JsonValue {
	fn from(input: f64) -> Self {
		JsonValue::Number(input)
	}
}

impl From<i32> for JsonValue {
	fn from(input: i32) -> Self {
		JsonValue::Number(f64::from(input))
	}
}

impl From<JsonObject> for JsonValue {
	fn from(input: JsonObject) -> Self {
		JsonValue::Object(input)
	}
}

impl From<JsonArray> for JsonValue {
	fn from(input: JsonArray) -> Self {
		JsonValue::Array(input)
	}
}

impl<T> From<Vec<T>> for JsonValue
where
	JsonValue: From<T>,
{
	fn from(input: Vec<T>) -> Self {
		JsonValue::Array(JsonArray(input.into_iter().map(JsonValue::from).collect()))
	}
}
