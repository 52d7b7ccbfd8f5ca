//! File-system level behavior of the feature reader.

use geojson_stream::{FeatureReader, JsonObject, ReaderError, load_features};
use rstest::rstest;
use std::{io::Write, path::PathBuf};
use tempfile::NamedTempFile;

fn init_logging() {
	let _ = env_logger::builder().is_test(true).try_init();
}

fn write_temp(content: &str) -> NamedTempFile {
	let mut file = NamedTempFile::new().unwrap();
	file.write_all(content.as_bytes()).unwrap();
	file.flush().unwrap();
	file
}

/// A small wildfire-perimeter style document, pretty-printed the way the USGS
/// exports are.
fn perimeter_doc(feature_count: usize) -> String {
	let features = (0..feature_count)
		.map(|index| {
			format!(
				r#"        {{
            "attributes": {{"OBJECTID": {index}, "FireName": "Fire {{{index}}}"}},
            "geometry": {{"rings": [[[-120.5, 39.1], [-120.4, 39.2], [-120.5, 39.1]]]}}
        }}"#
			)
		})
		.collect::<Vec<_>>()
		.join(",\n");
	format!(
		r#"{{
    "displayFieldName": "FireName",
    "fieldAliases": {{"OBJECTID": "OBJECTID"}},
    "features": [
{features}
    ]
}}"#
	)
}

#[test]
fn test_open_drain_and_rewind_file() {
	init_logging();
	let file = write_temp(&perimeter_doc(25));

	let mut reader = FeatureReader::from_path(file.path()).unwrap();
	assert_eq!(
		reader.header().unwrap().get_string("displayFieldName").unwrap(),
		Some("FireName".to_string())
	);

	let first_pass: Vec<JsonObject> = reader.features().map(Result::unwrap).collect();
	assert_eq!(first_pass.len(), 25);

	reader.rewind().unwrap();
	let second_pass: Vec<JsonObject> = reader.features().map(Result::unwrap).collect();
	assert_eq!(first_pass, second_pass);

	reader.close();
	assert!(!reader.is_open());
}

#[test]
fn test_feature_content_survives_round_trip() {
	let file = write_temp(&perimeter_doc(3));
	let mut reader = FeatureReader::from_path(file.path()).unwrap();

	let feature = reader.next_feature().unwrap().unwrap();
	let attributes = feature.get("attributes").unwrap().as_object().unwrap();
	assert_eq!(attributes.get_number("OBJECTID").unwrap(), Some(0.0));
	assert_eq!(attributes.get_string("FireName").unwrap(), Some("Fire {0}".to_string()));

	let geometry = feature.get("geometry").unwrap().as_object().unwrap();
	let rings = geometry.get("rings").unwrap().as_array().unwrap();
	assert_eq!(rings.len(), 1);
}

#[test]
fn test_open_missing_file() {
	let path = PathBuf::from("/no/such/dir/perimeters.json");
	let error = FeatureReader::from_path(&path).unwrap_err();
	match &error {
		ReaderError::SourceNotFound { path: reported, .. } => assert_eq!(reported, &path),
		other => panic!("expected SourceNotFound, got {other}"),
	}
	assert!(error.to_string().contains("/no/such/dir/perimeters.json"));
}

#[test]
fn test_open_twice_requires_close() {
	let file = write_temp(&perimeter_doc(1));
	let mut reader = FeatureReader::from_path(file.path()).unwrap();

	let error = reader.open(file.path()).unwrap_err();
	assert!(matches!(error, ReaderError::AlreadyOpen(_)));

	reader.close();
	reader.open(file.path()).unwrap();
	assert_eq!(reader.features().count(), 1);
}

#[test]
fn test_load_features_matches_manual_drain() {
	init_logging();
	let file = write_temp(&perimeter_doc(12));

	let (header, features) = load_features(file.path(), None).unwrap();
	assert_eq!(header.len(), 2);
	assert_eq!(features.len(), 12);

	let mut reader = FeatureReader::from_path(file.path()).unwrap();
	let manual: Vec<JsonObject> = reader.features().map(Result::unwrap).collect();
	assert_eq!(features, manual);
}

#[rstest]
#[case(None, 12)]
#[case(Some(5), 5)]
#[case(Some(100), 12)]
fn test_load_features_limit(#[case] limit: Option<usize>, #[case] expected: usize) {
	let file = write_temp(&perimeter_doc(12));
	let (_, features) = load_features(file.path(), limit).unwrap();
	assert_eq!(features.len(), expected);
}

#[test]
fn test_many_features_stream_through() {
	// the reader buffers one feature at a time; a few thousand features keep
	// the test fast while still crossing many internal buffer boundaries
	let file = write_temp(&perimeter_doc(3000));
	let mut reader = FeatureReader::from_path(file.path()).unwrap();
	assert_eq!(reader.features().count(), 3000);
	assert!(reader.next_feature().unwrap().is_none());
}

#[test]
fn test_truncated_file_reports_malformed() {
	let doc = perimeter_doc(8);
	// cut inside the last feature object
	let truncated = &doc[..doc.rfind("geometry").unwrap()];
	let file = write_temp(truncated);

	let mut reader = FeatureReader::from_path(file.path()).unwrap();
	let result = reader.features().collect::<Vec<_>>();
	let error = result.last().unwrap().as_ref().unwrap_err();
	assert!(matches!(error, ReaderError::MalformedDocument(_)));
}

#[test]
fn test_reader_reusable_across_files() {
	let file_a = write_temp(&perimeter_doc(2));
	let file_b = write_temp(&perimeter_doc(5));

	let mut reader = FeatureReader::new();
	reader.open(file_a.path()).unwrap();
	assert_eq!(reader.features().count(), 2);
	reader.close();

	reader.open(file_b.path()).unwrap();
	assert_eq!(reader.features().count(), 5);
	reader.close();
}
