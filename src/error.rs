//! Error taxonomy of the feature reader.
//!
//! Every failure is reported to the immediate caller; nothing is retried or
//! swallowed inside the reader. The benign "no more features" condition is not
//! an error but `Ok(None)` from `next_feature`.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Errors returned by [`FeatureReader`](crate::FeatureReader) operations.
#[derive(Debug, Error)]
pub enum ReaderError {
	/// The operation requires the reader to be open.
	#[error("reader is not open")]
	NotOpen,

	/// `open` was called while another source is still open.
	#[error("reader is already open with source '{0}'")]
	AlreadyOpen(String),

	/// The open target could not be located.
	#[error("could not find source '{}'", path.display())]
	SourceNotFound {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// The header or a feature failed to decode, or nesting exceeded the
	/// safety bound.
	#[error("malformed document: {0}")]
	MalformedDocument(String),

	/// Read or seek failure on the underlying stream. Terminal: the reader
	/// must be closed and reopened.
	#[error("stream failure: {0}")]
	Stream(#[from] io::Error),
}

impl ReaderError {
	/// Wrap a parse error (with its context chain) as a malformed document.
	#[must_use]
	pub fn malformed(error: &anyhow::Error) -> Self {
		Self::MalformedDocument(format!("{error:#}"))
	}
}

pub type Result<T> = std::result::Result<T, ReaderError>;

#[cfg(test)]
mod tests {
	use super::*;
	use anyhow::anyhow;

	#[test]
	fn test_display_messages() {
		assert_eq!(ReaderError::NotOpen.to_string(), "reader is not open");
		assert_eq!(
			ReaderError::AlreadyOpen("a.json".to_string()).to_string(),
			"reader is already open with source 'a.json'"
		);
		let error = ReaderError::SourceNotFound {
			path: PathBuf::from("missing.json"),
			source: io::Error::new(io::ErrorKind::NotFound, "gone"),
		};
		assert_eq!(error.to_string(), "could not find source 'missing.json'");
	}

	#[test]
	fn test_malformed_keeps_context_chain() {
		let error = anyhow!("bad digit").context("while parsing a number");
		let wrapped = ReaderError::malformed(&error);
		let text = wrapped.to_string();
		assert!(text.contains("while parsing a number"));
		assert!(text.contains("bad digit"));
	}
}
