//! Layout decoder.
//!
//! A layout is a single line of ASCII digits alternating between file
//! lengths and free-space lengths, starting with a file:
//!
//! ```text
//! 2 3 3 3 1 3 ...
//! | | | | | +-- free after file 2
//! | | | | +---- file 2, length 1
//! | | | +------ free after file 1
//! | | +-------- file 1, length 3
//! | +---------- free after file 0
//! +------------ file 0, length 2
//! ```
//!
//! The line ends at `\n`, `\r\n` or end of input. Anything after the first
//! line terminator is ignored.

use crate::error::{CoreError, CoreResult};
use crate::layout::{Segment, SegmentList};
use crate::types::FileId;
use std::io::{BufRead, BufReader, Read};
use tracing::debug;

/// Decode a layout from raw bytes.
///
/// # Errors
///
/// Returns `MalformedInput` if a token is not a decimal digit, a file has
/// length zero, or the line contains no file at all.
pub fn decode_layout(input: &[u8]) -> CoreResult<SegmentList> {
    LayoutDecoder::new(input).decode()
}

/// Decode a layout from a string.
///
/// # Errors
///
/// See [`decode_layout`].
pub fn decode_str(input: &str) -> CoreResult<SegmentList> {
    decode_layout(input.as_bytes())
}

/// Decode a layout from the first line of a reader.
///
/// # Errors
///
/// Returns `Io` if reading fails, otherwise see [`decode_layout`].
pub fn decode_reader<R: Read>(reader: R) -> CoreResult<SegmentList> {
    let mut line = Vec::new();
    BufReader::new(reader).read_until(b'\n', &mut line)?;
    decode_layout(&line)
}

/// A single-pass layout decoder over a byte slice.
pub struct LayoutDecoder<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> LayoutDecoder<'a> {
    /// Create a new decoder for the given bytes.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Decode the whole line into a segment list.
    ///
    /// # Errors
    ///
    /// See [`decode_layout`]. No partial list is returned on failure.
    pub fn decode(&mut self) -> CoreResult<SegmentList> {
        let mut list = SegmentList::with_capacity(self.data.len() / 2 + 1);
        let mut next_id = 0u64;
        let mut expect_file = true;

        while let Some((offset, value)) = self.next_digit()? {
            if expect_file {
                if value == 0 {
                    return Err(CoreError::malformed_input(
                        offset,
                        format!("file {next_id} has length 0"),
                    ));
                }
                list.append(Segment::new(FileId::new(next_id), value, 0))?;
                next_id += 1;
            } else if let Some(tail) = list.tail() {
                list.set_trailing_free(tail, value)?;
            }
            expect_file = !expect_file;
        }

        if list.is_empty() {
            return Err(CoreError::malformed_input(
                self.pos,
                "layout contains no files",
            ));
        }

        debug!(
            files = list.len(),
            total_size = list.total_size(),
            "decoded layout"
        );
        Ok(list)
    }

    /// Returns the next digit and its offset, or `None` at the end of the line.
    fn next_digit(&mut self) -> CoreResult<Option<(usize, u64)>> {
        let Some(&byte) = self.data.get(self.pos) else {
            return Ok(None);
        };

        if self.at_line_end() {
            return Ok(None);
        }

        let offset = self.pos;
        if !byte.is_ascii_digit() {
            return Err(CoreError::malformed_input(
                offset,
                format!("expected a decimal digit, found {}", describe_byte(byte)),
            ));
        }

        self.pos += 1;
        Ok(Some((offset, u64::from(byte - b'0'))))
    }

    #[inline]
    fn at_line_end(&self) -> bool {
        matches!(
            self.data[self.pos..],
            [b'\n', ..] | [b'\r', b'\n', ..] | [b'\r']
        )
    }

    /// Number of bytes consumed so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }
}

fn describe_byte(byte: u8) -> String {
    if byte.is_ascii_graphic() || byte == b' ' {
        format!("'{}'", char::from(byte))
    } else {
        format!("byte 0x{byte:02x}")
    }
}
