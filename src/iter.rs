//! Iterator access to a feature stream and a convenience bulk loader.

use crate::{
	error::Result,
	json::JsonObject,
	reader::FeatureReader,
};
use log::{debug, info};
use std::path::Path;

/// Iterator over the remaining features of an open [`FeatureReader`].
///
/// Yields `Err` once on a failure; iteration should be stopped at that point,
/// since the reader gives no guarantees about resynchronizing after an error.
pub struct Features<'a> {
	reader: &'a mut FeatureReader,
}

impl Iterator for Features<'_> {
	type Item = Result<JsonObject>;

	fn next(&mut self) -> Option<Self::Item> {
		self.reader.next_feature().transpose()
	}
}

impl FeatureReader {
	/// Iterate over the remaining features.
	pub fn features(&mut self) -> Features<'_> {
		Features { reader: self }
	}
}

const PROGRESS_INTERVAL: usize = 1000;

/// Open a file, read its header and up to `limit` features in one call.
///
/// Progress is reported through the `log` facade. The document still streams
/// through a bounded buffer, but the returned `Vec` of course holds every
/// decoded feature, so use `limit` for very large files.
pub fn load_features<P: AsRef<Path>>(path: P, limit: Option<usize>) -> Result<(JsonObject, Vec<JsonObject>)> {
	let mut reader = FeatureReader::from_path(&path)?;
	let header = reader.header()?.clone();
	debug!("header keys: {:?}", header.keys().collect::<Vec<_>>());

	let mut features = Vec::new();
	while let Some(feature) = reader.next_feature()? {
		features.push(feature);
		if features.len() % PROGRESS_INTERVAL == 0 {
			info!("loaded {} features", features.len());
		}
		if limit.is_some_and(|limit| features.len() >= limit) {
			break;
		}
	}
	info!(
		"loaded {} features in total from '{}'",
		features.len(),
		path.as_ref().display()
	);

	reader.close();
	Ok((header, features))
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Cursor;

	#[test]
	fn test_features_iterator() {
		let doc = r#"{"features":[{"n":1},{"n":2},{"n":3}]}"#;
		let mut reader = FeatureReader::new();
		reader
			.open_source(Cursor::new(doc.as_bytes().to_vec()), "<test>")
			.unwrap();

		let numbers = reader
			.features()
			.map(|feature| feature.unwrap().get_number("n").unwrap().unwrap())
			.collect::<Vec<_>>();
		assert_eq!(numbers, vec![1.0, 2.0, 3.0]);

		// the adapter borrows the reader, a rewind afterwards still works
		reader.rewind().unwrap();
		assert_eq!(reader.features().count(), 3);
	}

	#[test]
	fn test_features_iterator_reports_errors() {
		let doc = r#"{"features":[{"ok":1},{"broken" 2}]}"#;
		let mut reader = FeatureReader::new();
		reader
			.open_source(Cursor::new(doc.as_bytes().to_vec()), "<test>")
			.unwrap();

		let results = reader.features().collect::<Vec<_>>();
		assert!(results[0].is_ok());
		assert!(results[1].is_err());
	}
}
