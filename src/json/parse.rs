//! Recursive-descent JSON parser over a [`ByteCursor`].

use super::{JsonArray, JsonObject, JsonValue};
use crate::cursor::ByteCursor;
use anyhow::{Context, Result};
use std::{collections::BTreeMap, io::Cursor};

/// Parse a complete JSON document from a string.
///
/// Fails on invalid JSON and on trailing non-whitespace characters.
pub fn parse_json_str(json: &str) -> Result<JsonValue> {
	let mut cursor = ByteCursor::new(Cursor::new(json.as_bytes()))?;
	let value = parse_json_value(&mut cursor).with_context(|| format!("while parsing JSON '{}'", abbreviate(json)))?;
	cursor.skip_whitespace()?;
	if cursor.peek().is_some() {
		return Err(cursor.format_error("unexpected trailing characters"));
	}
	Ok(value)
}

/// Parse one JSON value starting at the cursor position.
///
/// Leaves the cursor positioned directly after the value.
pub fn parse_json_value(cursor: &mut ByteCursor) -> Result<JsonValue> {
	cursor.skip_whitespace()?;
	match cursor.expect_peek()? {
		b'{' => parse_object(cursor),
		b'[' => parse_array(cursor),
		b'"' => Ok(JsonValue::String(parse_string(cursor)?)),
		b't' => parse_tag(cursor, "true").map(|()| JsonValue::Boolean(true)),
		b'f' => parse_tag(cursor, "false").map(|()| JsonValue::Boolean(false)),
		b'n' => parse_tag(cursor, "null").map(|()| JsonValue::Null),
		b'-' | b'0'..=b'9' => parse_number(cursor),
		c => Err(cursor.format_error(&format!("unexpected character '{}'", c as char))),
	}
}

fn parse_object(cursor: &mut ByteCursor) -> Result<JsonValue> {
	cursor.advance()?; // consume '{'

	let mut entries = BTreeMap::new();
	cursor.skip_whitespace()?;
	if cursor.expect_peek()? == b'}' {
		cursor.advance()?;
		return Ok(JsonValue::Object(JsonObject(entries)));
	}

	loop {
		cursor.skip_whitespace()?;
		if cursor.expect_peek()? != b'"' {
			return Err(cursor.format_error("parsing object, expected '\"'"));
		}
		let key = parse_string(cursor)?;

		cursor.skip_whitespace()?;
		if cursor.expect_next()? != b':' {
			return Err(cursor.format_error("expected ':'"));
		}

		let value = parse_json_value(cursor)?;
		entries.insert(key, value);

		cursor.skip_whitespace()?;
		match cursor.expect_next()? {
			b',' => {}
			b'}' => break,
			_ => return Err(cursor.format_error("parsing object, expected ',' or '}'")),
		}
	}
	Ok(JsonValue::Object(JsonObject(entries)))
}

fn parse_array(cursor: &mut ByteCursor) -> Result<JsonValue> {
	cursor.advance()?; // consume '['

	let mut items = Vec::new();
	cursor.skip_whitespace()?;
	if cursor.expect_peek()? == b']' {
		cursor.advance()?;
		return Ok(JsonValue::Array(JsonArray(items)));
	}

	loop {
		items.push(parse_json_value(cursor)?);
		cursor.skip_whitespace()?;
		match cursor.expect_next()? {
			b',' => {}
			b']' => break,
			_ => return Err(cursor.format_error("parsing array, expected ',' or ']'")),
		}
	}
	Ok(JsonValue::Array(JsonArray(items)))
}

fn parse_string(cursor: &mut ByteCursor) -> Result<String> {
	cursor.advance()?; // consume '"'

	let mut bytes = Vec::with_capacity(32);
	loop {
		match cursor.expect_next()? {
			b'"' => break,
			b'\\' => match cursor.expect_next()? {
				b'"' => bytes.push(b'"'),
				b'\\' => bytes.push(b'\\'),
				b'/' => bytes.push(b'/'),
				b'b' => bytes.push(b'\x08'),
				b'f' => bytes.push(b'\x0C'),
				b'n' => bytes.push(b'\n'),
				b'r' => bytes.push(b'\r'),
				b't' => bytes.push(b'\t'),
				b'u' => {
					let unit = parse_hex_unit(cursor)?;
					// high surrogates must be followed by a low surrogate escape
					let code_point = if (0xD800..=0xDBFF).contains(&unit) {
						if cursor.expect_next()? != b'\\' || cursor.expect_next()? != b'u' {
							return Err(cursor.format_error("expected a low surrogate escape"));
						}
						let low = parse_hex_unit(cursor)?;
						if !(0xDC00..=0xDFFF).contains(&low) {
							return Err(cursor.format_error("invalid low surrogate"));
						}
						0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00)
					} else {
						unit
					};
					let character =
						char::from_u32(code_point).ok_or_else(|| cursor.format_error("invalid unicode code point"))?;
					bytes.extend_from_slice(character.to_string().as_bytes());
				}
				_ => return Err(cursor.format_error("invalid escape sequence")),
			},
			c => bytes.push(c),
		}
	}
	String::from_utf8(bytes).map_err(|_| cursor.format_error("string is not valid UTF-8"))
}

fn parse_hex_unit(cursor: &mut ByteCursor) -> Result<u32> {
	let mut hex = [0u8; 4];
	for digit in &mut hex {
		*digit = cursor.expect_next()?;
	}
	std::str::from_utf8(&hex)
		.ok()
		.and_then(|h| u32::from_str_radix(h, 16).ok())
		.ok_or_else(|| cursor.format_error("invalid unicode escape"))
}

fn parse_number(cursor: &mut ByteCursor) -> Result<JsonValue> {
	let mut number = Vec::with_capacity(16);

	if cursor.peek() == Some(b'-') {
		number.push(cursor.expect_next()?);
	}

	let mut integer_digits = false;
	while let Some(b'0'..=b'9') = cursor.peek() {
		integer_digits = true;
		number.push(cursor.expect_next()?);
	}
	if !integer_digits {
		return Err(cursor.format_error("expected digits in number"));
	}

	if cursor.peek() == Some(b'.') {
		number.push(cursor.expect_next()?);
		let mut fraction_digits = false;
		while let Some(b'0'..=b'9') = cursor.peek() {
			fraction_digits = true;
			number.push(cursor.expect_next()?);
		}
		if !fraction_digits {
			return Err(cursor.format_error("expected digits after decimal point"));
		}
	}

	if let Some(b'e' | b'E') = cursor.peek() {
		number.push(cursor.expect_next()?);
		if let Some(b'+' | b'-') = cursor.peek() {
			number.push(cursor.expect_next()?);
		}
		let mut exponent_digits = false;
		while let Some(b'0'..=b'9') = cursor.peek() {
			exponent_digits = true;
			number.push(cursor.expect_next()?);
		}
		if !exponent_digits {
			return Err(cursor.format_error("expected digits in exponent"));
		}
	}

	String::from_utf8(number)
		.ok()
		.and_then(|text| text.parse::<f64>().ok())
		.map(JsonValue::Number)
		.ok_or_else(|| cursor.format_error("invalid number"))
}

fn parse_tag(cursor: &mut ByteCursor, tag: &str) -> Result<()> {
	for expected in tag.bytes() {
		if cursor.expect_next()? != expected {
			return Err(cursor.format_error(&format!("unexpected character while parsing '{tag}'")));
		}
	}
	Ok(())
}

fn abbreviate(json: &str) -> String {
	if json.len() > 48 {
		let cut = json.char_indices().map(|(i, _)| i).take_while(|i| *i <= 48).last().unwrap_or(0);
		format!("{}...", &json[..cut])
	} else {
		json.to_string()
	}
}
