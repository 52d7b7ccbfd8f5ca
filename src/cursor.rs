//! Buffered byte-level access to a seekable reader.
//!
//! [`ByteCursor`] wraps any `Read + Seek` source and hands out bytes one at a
//! time with a single byte of lookahead. It tracks the absolute offset of the
//! next unconsumed byte, so a caller can record a position and later jump back
//! to it with [`ByteCursor::seek_to`]. Read failures are reported to the
//! caller, never folded into end-of-stream.

use anyhow::{Error, anyhow};
use std::io::{Read, Result, Seek, SeekFrom};

const BUFFER_SIZE: usize = 8192;

/// A readable and seekable byte source.
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

/// A forward reader over a byte stream with one byte of lookahead.
///
/// The cursor maintains an internal read buffer, the currently peeked byte and
/// the absolute offset of that byte in the underlying stream.
pub struct ByteCursor<'a> {
	source: Box<dyn ReadSeek + 'a>,
	buffer: [u8; BUFFER_SIZE],
	buffer_len: usize,
	buffer_pos: usize,
	peeked_byte: Option<u8>,
	position: u64,
}

impl<'a> ByteCursor<'a> {
	/// Wraps a source and loads the first byte.
	pub fn new(source: impl ReadSeek + 'a) -> Result<Self> {
		let mut cursor = ByteCursor {
			source: Box::new(source),
			buffer: [0; BUFFER_SIZE],
			buffer_len: 0,
			buffer_pos: 0,
			peeked_byte: None,
			position: 0,
		};
		cursor.peeked_byte = cursor.next_byte()?;
		Ok(cursor)
	}

	fn fill_buffer(&mut self) -> Result<()> {
		self.buffer_len = self.source.read(&mut self.buffer)?;
		self.buffer_pos = 0;
		Ok(())
	}

	fn next_byte(&mut self) -> Result<Option<u8>> {
		if self.buffer_pos >= self.buffer_len {
			self.fill_buffer()?;
			if self.buffer_len == 0 {
				return Ok(None);
			}
		}
		let byte = self.buffer[self.buffer_pos];
		self.buffer_pos += 1;
		Ok(Some(byte))
	}

	/// Returns the absolute offset of the next unconsumed byte.
	#[inline]
	#[must_use]
	pub fn position(&self) -> u64 {
		self.position
	}

	/// Returns the next byte without consuming it.
	#[inline]
	#[must_use]
	pub fn peek(&self) -> Option<u8> {
		self.peeked_byte
	}

	/// Drops the peeked byte and loads the following one.
	#[inline]
	pub fn advance(&mut self) -> Result<()> {
		self.peeked_byte = self.next_byte()?;
		self.position += 1;
		Ok(())
	}

	/// Consumes and returns the current byte, or `None` at end of stream.
	#[inline]
	pub fn consume(&mut self) -> Result<Option<u8>> {
		let current_byte = self.peeked_byte;
		if current_byte.is_some() {
			self.advance()?;
		}
		Ok(current_byte)
	}

	/// Consumes and returns the current byte, failing at end of stream.
	#[inline]
	pub fn expect_next(&mut self) -> anyhow::Result<u8> {
		match self.consume()? {
			Some(byte) => Ok(byte),
			None => Err(self.format_error("unexpected end of input")),
		}
	}

	/// Returns the peeked byte, failing at end of stream.
	#[inline]
	pub fn expect_peek(&self) -> anyhow::Result<u8> {
		self
			.peeked_byte
			.ok_or_else(|| self.format_error("unexpected end of input"))
	}

	/// Advances past any ASCII whitespace.
	pub fn skip_whitespace(&mut self) -> Result<()> {
		while let Some(byte) = self.peeked_byte {
			if !byte.is_ascii_whitespace() {
				break;
			}
			self.advance()?;
		}
		Ok(())
	}

	/// Jumps to an absolute offset, discarding the read buffer.
	///
	/// After a successful seek the cursor behaves as if it had read forward to
	/// `offset` from the start of the stream.
	pub fn seek_to(&mut self, offset: u64) -> Result<()> {
		self.source.seek(SeekFrom::Start(offset))?;
		self.buffer_len = 0;
		self.buffer_pos = 0;
		self.position = offset;
		self.peeked_byte = self.next_byte()?;
		Ok(())
	}

	/// Builds an error message annotated with the current byte offset.
	#[must_use]
	pub fn format_error(&self, msg: &str) -> Error {
		anyhow!("{msg} at byte {}", self.position)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Cursor;

	fn cursor(text: &str) -> ByteCursor<'_> {
		ByteCursor::new(Cursor::new(text.as_bytes())).unwrap()
	}

	#[test]
	fn test_peek_and_consume() -> Result<()> {
		let mut c = cursor("abc");
		assert_eq!(c.peek(), Some(b'a'));
		assert_eq!(c.consume()?, Some(b'a'));
		assert_eq!(c.peek(), Some(b'b'));
		assert_eq!(c.consume()?, Some(b'b'));
		assert_eq!(c.consume()?, Some(b'c'));
		assert_eq!(c.consume()?, None);
		assert_eq!(c.peek(), None);
		Ok(())
	}

	#[test]
	fn test_position_tracking() -> Result<()> {
		let mut c = cursor("hello");
		assert_eq!(c.position(), 0);
		c.advance()?;
		c.advance()?;
		assert_eq!(c.position(), 2);
		assert_eq!(c.peek(), Some(b'l'));
		Ok(())
	}

	#[test]
	fn test_skip_whitespace() -> Result<()> {
		let mut c = cursor(" \t\n\r x");
		c.skip_whitespace()?;
		assert_eq!(c.consume()?, Some(b'x'));
		c.skip_whitespace()?;
		assert_eq!(c.peek(), None);
		Ok(())
	}

	#[test]
	fn test_seek_to_replays_bytes() -> Result<()> {
		let mut c = cursor("0123456789");
		while c.consume()?.is_some() {}
		c.seek_to(4)?;
		assert_eq!(c.position(), 4);
		assert_eq!(c.consume()?, Some(b'4'));
		assert_eq!(c.consume()?, Some(b'5'));
		c.seek_to(0)?;
		assert_eq!(c.consume()?, Some(b'0'));
		Ok(())
	}

	#[test]
	fn test_expect_next_at_end() {
		let mut c = cursor("a");
		assert_eq!(c.expect_next().unwrap(), b'a');
		let error = c.expect_next().unwrap_err();
		assert!(error.to_string().contains("unexpected end of input"));
	}

	#[test]
	fn test_format_error_contains_offset() -> Result<()> {
		let mut c = cursor("abcdef");
		c.advance()?;
		c.advance()?;
		c.advance()?;
		assert_eq!(c.format_error("oops").to_string(), "oops at byte 3");
		Ok(())
	}

	#[test]
	fn test_reads_across_buffer_boundary() -> Result<()> {
		let data = vec![b'x'; BUFFER_SIZE + 10];
		let mut c = ByteCursor::new(Cursor::new(data))?;
		let mut count = 0u64;
		while c.consume()?.is_some() {
			count += 1;
		}
		assert_eq!(count, (BUFFER_SIZE + 10) as u64);
		Ok(())
	}
}
