//! Asynchronous line reader with batch interface
//!
//! Reads raw input lines in batches without blocking the runtime. Decoding is
//! left to the caller so a batch can be parsed on several workers while
//! evaluation stays sequential.
//!
//! # Architecture
//!
//! ```text
//! tokio file → AsyncReader → Batches of RawLines → json_format::parse_line
//! ```

use crate::types::VelocityError;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

/// One non-blank input line and its 1-based position in the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub line: u64,
    pub text: String,
}

/// Asynchronous line reader
///
/// Blank lines are skipped but still counted, so line numbers match the file.
pub struct AsyncReader<R: AsyncBufRead + Unpin> {
    lines: Lines<R>,
    line_num: u64,
}

impl<R: AsyncBufRead + Unpin> AsyncReader<R> {
    /// Create a new AsyncReader from a buffered async reader
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_num: 0,
        }
    }

    /// Read up to `batch_size` non-blank lines
    ///
    /// # Returns
    ///
    /// * `Ok(batch)` - Lines in input order; empty once the input is exhausted
    /// * `Err(VelocityError::IoError)` - The underlying read failed
    pub async fn read_batch(&mut self, batch_size: usize) -> Result<Vec<RawLine>, VelocityError> {
        let mut batch = Vec::with_capacity(batch_size);

        while batch.len() < batch_size {
            match self.lines.next_line().await? {
                Some(text) => {
                    self.line_num += 1;
                    if text.trim().is_empty() {
                        continue;
                    }
                    batch.push(RawLine {
                        line: self.line_num,
                        text,
                    });
                }
                None => break,
            }
        }

        Ok(batch)
    }
}
