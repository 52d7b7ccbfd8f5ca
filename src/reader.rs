//! Streaming access to GeoJSON-style feature collections.
//!
//! [`FeatureReader`] opens a JSON document shaped as
//! `{ <header fields>, "features": [ <feature>, ... ] }`, exposes the header
//! as a parsed [`JsonObject`] and then hands out one decoded feature per call
//! to [`FeatureReader::next_feature`]. The document is never materialized as a
//! whole: memory use is bounded by the size of the largest single feature.
//!
//! ```
//! use geojson_stream::FeatureReader;
//! use std::io::Cursor;
//!
//! let doc = r#"{"type":"FeatureCollection","features":[{"id":1},{"id":2}]}"#;
//! let mut reader = FeatureReader::new();
//! reader.open_source(Cursor::new(doc.as_bytes().to_vec()), "<memory>").unwrap();
//!
//! assert_eq!(reader.header().unwrap().get_string("type").unwrap().as_deref(), Some("FeatureCollection"));
//! let mut count = 0;
//! while let Some(feature) = reader.next_feature().unwrap() {
//! 	assert!(feature.get("id").is_some());
//! 	count += 1;
//! }
//! assert_eq!(count, 2);
//!
//! reader.rewind().unwrap();
//! assert!(reader.next_feature().unwrap().is_some());
//! reader.close();
//! ```

use crate::{
	cursor::{ByteCursor, ReadSeek},
	error::{ReaderError, Result},
	json::{JsonObject, parse_json_str},
};
use log::{debug, trace};
use std::{fmt, fs::File, io::ErrorKind, path::Path};

/// Default limit on object nesting inside a single feature.
///
/// Generous enough for any legitimate geometry (multi-polygons with holes stay
/// in single digits), still finite for runaway malformed input.
pub const DEFAULT_MAX_DEPTH: usize = 64;

const FEATURE_LIST_KEY: &[u8] = b"features";

/// A streaming reader for large GeoJSON feature collections.
///
/// The reader is single-threaded and blocking; it owns exclusive access to one
/// underlying stream. For parallel ingestion open independent readers.
pub struct FeatureReader {
	cursor: Option<ByteCursor<'static>>,
	source_name: String,
	header: Option<JsonObject>,
	feature_start: u64,
	max_depth: usize,
}

impl FeatureReader {
	/// Create a closed reader. Use [`open`](Self::open) to bind it to a file.
	#[must_use]
	pub fn new() -> Self {
		FeatureReader {
			cursor: None,
			source_name: String::new(),
			header: None,
			feature_start: 0,
			max_depth: DEFAULT_MAX_DEPTH,
		}
	}

	/// Create a reader and open the given file in one step.
	pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
		let mut reader = Self::new();
		reader.open(path)?;
		Ok(reader)
	}

	/// Limit the object nesting depth accepted inside a single feature.
	///
	/// This is a guard against corrupted documents, not a structural limit;
	/// see [`DEFAULT_MAX_DEPTH`].
	pub fn set_max_depth(&mut self, max_depth: usize) {
		self.max_depth = max_depth;
	}

	#[must_use]
	pub fn is_open(&self) -> bool {
		self.cursor.is_some()
	}

	/// Open a GeoJSON file and read its header.
	///
	/// Fails with [`ReaderError::AlreadyOpen`] if the reader holds another
	/// source and with [`ReaderError::SourceNotFound`] if the file does not
	/// exist. On success the cursor sits at the first feature.
	pub fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
		let path = path.as_ref();
		if self.is_open() {
			return Err(ReaderError::AlreadyOpen(self.source_name.clone()));
		}
		let file = File::open(path).map_err(|error| {
			if error.kind() == ErrorKind::NotFound {
				ReaderError::SourceNotFound {
					path: path.to_path_buf(),
					source: error,
				}
			} else {
				ReaderError::Stream(error)
			}
		})?;
		self.open_source(file, &path.display().to_string())
	}

	/// Open an arbitrary readable and seekable source, e.g. an in-memory
	/// buffer. `name` is only used in error messages and logs.
	pub fn open_source(&mut self, source: impl ReadSeek + 'static, name: &str) -> Result<()> {
		if self.is_open() {
			return Err(ReaderError::AlreadyOpen(self.source_name.clone()));
		}

		let mut cursor = ByteCursor::new(source)?;
		let header = read_header(&mut cursor)?;
		self.feature_start = cursor.position();

		debug!(
			"opened '{name}': {} header fields, feature list starts at byte {}",
			header.len(),
			self.feature_start
		);

		self.source_name = name.to_string();
		self.header = Some(header);
		self.cursor = Some(cursor);
		Ok(())
	}

	/// The header: all top-level fields preceding the feature list.
	pub fn header(&self) -> Result<&JsonObject> {
		self.header.as_ref().ok_or(ReaderError::NotOpen)
	}

	/// Read the next feature, or `Ok(None)` once the list is exhausted.
	///
	/// Repeated calls at the end of the list keep returning `Ok(None)`.
	pub fn next_feature(&mut self) -> Result<Option<JsonObject>> {
		let max_depth = self.max_depth;
		let cursor = self.cursor.as_mut().ok_or(ReaderError::NotOpen)?;

		let Some(raw) = scan_raw_feature(cursor, max_depth)? else {
			return Ok(None);
		};
		let feature = parse_json_str(&raw)
			.and_then(crate::json::JsonValue::into_object)
			.map_err(|error| ReaderError::malformed(&error))?;
		trace!("read one feature of {} bytes from '{}'", raw.len(), self.source_name);
		Ok(Some(feature))
	}

	/// Seek back to the start of the feature list so that
	/// [`next_feature`](Self::next_feature) replays every feature.
	///
	/// Not best-effort: if the seek fails the reader closes itself and returns
	/// [`ReaderError::Stream`]; it must be reopened.
	pub fn rewind(&mut self) -> Result<()> {
		let offset = self.feature_start;
		let cursor = self.cursor.as_mut().ok_or(ReaderError::NotOpen)?;
		if let Err(error) = cursor.seek_to(offset) {
			self.close();
			return Err(ReaderError::Stream(error));
		}
		trace!("rewound '{}' to byte {offset}", self.source_name);
		Ok(())
	}

	/// Release the underlying stream and reset all state.
	///
	/// Idempotent; the reader can be reused for a different source afterwards.
	pub fn close(&mut self) {
		if self.cursor.is_some() {
			debug!("closed '{}'", self.source_name);
		}
		self.cursor = None;
		self.header = None;
		self.feature_start = 0;
		self.source_name.clear();
	}
}

impl Default for FeatureReader {
	fn default() -> Self {
		Self::new()
	}
}

// the boxed stream is opaque, so Debug is written by hand
impl fmt::Debug for FeatureReader {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FeatureReader")
			.field("source", &self.source_name)
			.field("open", &self.is_open())
			.field("max_depth", &self.max_depth)
			.finish_non_exhaustive()
	}
}

/// Scan forward to the `"features"` key, parse everything before it as the
/// header and consume the `[` that opens the feature list.
///
/// The scan is structural: it tracks string literals (including escapes) and
/// nesting, so the match only fires on a top-level `"features"` key followed
/// by `:`. A `"features"` substring inside an earlier metadata string value
/// does not trigger it.
fn read_header(cursor: &mut ByteCursor) -> Result<JsonObject> {
	let mut raw: Vec<u8> = Vec::new();
	let mut depth = 0usize;
	let mut in_string = false;
	let mut escaped = false;
	// byte index in `raw` where the current string literal starts (after the quote)
	let mut string_start = 0usize;
	// index of the opening quote of a just-closed top-level "features" string
	let mut pending_key: Option<usize> = None;

	let key_start = loop {
		let Some(byte) = cursor.consume()? else {
			return Err(ReaderError::MalformedDocument(
				"no \"features\" list found".to_string(),
			));
		};
		raw.push(byte);

		if in_string {
			if escaped {
				escaped = false;
			} else if byte == b'\\' {
				escaped = true;
			} else if byte == b'"' {
				in_string = false;
				if depth == 1 && raw[string_start..raw.len() - 1] == *FEATURE_LIST_KEY {
					pending_key = Some(string_start - 1);
				}
			}
			continue;
		}

		match byte {
			b'"' => {
				in_string = true;
				string_start = raw.len();
				pending_key = None;
			}
			b'{' | b'[' => {
				depth += 1;
				pending_key = None;
			}
			b'}' | b']' => {
				depth = depth.saturating_sub(1);
				pending_key = None;
			}
			b':' if depth == 1 => {
				if let Some(key_start) = pending_key {
					break key_start;
				}
			}
			c if c.is_ascii_whitespace() => {}
			_ => pending_key = None,
		}
	};

	// everything before the key, with a trailing comma trimmed, is the header
	let mut end = key_start;
	while end > 0 && raw[end - 1].is_ascii_whitespace() {
		end -= 1;
	}
	if end > 0 && raw[end - 1] == b',' {
		end -= 1;
	}
	let mut header_bytes = raw[..end].to_vec();
	header_bytes.push(b'}');
	let header_text = String::from_utf8(header_bytes)
		.map_err(|_| ReaderError::MalformedDocument("header is not valid UTF-8".to_string()))?;
	let header = parse_json_str(&header_text)
		.and_then(crate::json::JsonValue::into_object)
		.map_err(|error| ReaderError::malformed(&error))?;

	cursor.skip_whitespace()?;
	if cursor.consume()? != Some(b'[') {
		return Err(ReaderError::MalformedDocument(
			"expected '[' after the \"features\" key".to_string(),
		));
	}

	Ok(header)
}

/// Scan the raw text of the next balanced feature object, or `None` at the end
/// of the feature list.
///
/// Iterative brace matching with an explicit depth counter; braces inside
/// string literals never count, escape sequences are honored. The closing `]`
/// of the feature list is left unconsumed so repeated calls stay at the end
/// and a later rewind replays the list.
fn scan_raw_feature(cursor: &mut ByteCursor, max_depth: usize) -> Result<Option<String>> {
	loop {
		match cursor.peek() {
			None | Some(b']') => return Ok(None),
			Some(b'{') => break,
			Some(_) => cursor.advance()?,
		}
	}

	let mut raw: Vec<u8> = Vec::new();
	let mut depth = 0usize;
	let mut in_string = false;
	let mut escaped = false;

	loop {
		let Some(byte) = cursor.consume()? else {
			return Err(ReaderError::MalformedDocument(
				"document ended inside a feature object".to_string(),
			));
		};
		raw.push(byte);

		if in_string {
			if escaped {
				escaped = false;
			} else if byte == b'\\' {
				escaped = true;
			} else if byte == b'"' {
				in_string = false;
			}
			continue;
		}

		match byte {
			b'"' => in_string = true,
			b'{' => {
				depth += 1;
				if depth > max_depth {
					return Err(ReaderError::MalformedDocument(format!(
						"feature object nested deeper than {max_depth} levels"
					)));
				}
			}
			b'}' => {
				depth -= 1;
				if depth == 0 {
					let text = String::from_utf8(raw)
						.map_err(|_| ReaderError::MalformedDocument("feature is not valid UTF-8".to_string()))?;
					return Ok(Some(text));
				}
			}
			_ => {}
		}
	}
}
