use super::JsonValue;

/// Serialize any [`JsonValue`] into a compact JSON string.
#[must_use]
pub fn stringify(json: &JsonValue) -> String {
	match json {
		JsonValue::Array(array) => array.stringify(),
		JsonValue::Boolean(b) => b.to_string(),
		JsonValue::Null => String::from("null"),
		JsonValue::Number(n) => n.to_string(),
		JsonValue::Object(object) => object.stringify(),
		JsonValue::String(s) => format!("\"{}\"", escape_json_string(s)),
	}
}

/// Escape a string for embedding in a JSON document (without quotes).
#[must_use]
pub fn escape_json_string(input: &str) -> String {
	input
		.chars()
		.map(|c| match c {
			'"' => "\\\"".to_string(),
			'\\' => "\\\\".to_string(),
			'\n' => "\\n".to_string(),
			'\r' => "\\r".to_string(),
			'\t' => "\\t".to_string(),
			'\u{08}' => "\\b".to_string(),
			'\u{0c}' => "\\f".to_string(),
			c if c.is_control() => format!("\\u{:04x}", c as u32),
			c => c.to_string(),
		})
		.collect()
}
