//! Streaming reader for large GeoJSON feature collections.
//!
//! Documents of the shape `{ <header fields>, "features": [ <feature>, ... ] }`
//! (such as the USGS wildfire perimeter datasets, hundreds of megabytes in
//! size) are read without ever being materialized in memory: the header is
//! parsed once on open, features are scanned and decoded one at a time, and
//! the stream can be rewound to replay the feature list. Memory use is bounded
//! by the largest single feature, not by the document size.
//!
//! ```
//! use geojson_stream::FeatureReader;
//! use std::io::Cursor;
//!
//! let doc = r#"{"type":"FeatureCollection","features":[{"id":1},{"id":2}]}"#;
//! let mut reader = FeatureReader::new();
//! reader.open_source(Cursor::new(doc.as_bytes().to_vec()), "<memory>")?;
//! assert_eq!(reader.features().count(), 2);
//! # Ok::<(), geojson_stream::ReaderError>(())
//! ```

mod cursor;
mod error;
mod iter;
mod json;
mod reader;

pub use cursor::{ByteCursor, ReadSeek};
pub use error::ReaderError;
pub use iter::{Features, load_features};
pub use json::{JsonArray, JsonObject, JsonValue, parse_json_str};
pub use reader::{DEFAULT_MAX_DEPTH, FeatureReader};
