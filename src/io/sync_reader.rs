//! Synchronous JSON lines reader with iterator interface
//!
//! Provides a streaming iterator over load attempts from a file with one JSON
//! record per line. Delegates format concerns to the json_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<LoadAttempt, VelocityError>` for each non-blank line:
//!
//! ```no_run
//! use velocity_limits::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::open(Path::new("input.txt")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(attempt) => println!("Evaluating load: {:?}", attempt),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found) are returned from `open()`
//! - Read failures are yielded as `IoError`
//! - Malformed lines are yielded as `ParseError` carrying the line number
//! - Blank lines are skipped silently

use crate::io::json_format::parse_line;
use crate::types::{LoadAttempt, VelocityError};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

/// Synchronous line reader
///
/// Reads one line at a time; memory use does not grow with the input size.
#[derive(Debug)]
pub struct SyncReader<R: BufRead = BufReader<File>> {
    lines: Lines<R>,
    line_num: u64,
}

impl SyncReader<BufReader<File>> {
    /// Open a file of JSON lines for streaming iteration
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReader)` if file opened successfully
    /// * `Err(VelocityError::FileNotFound)` if there is no such file
    /// * `Err(VelocityError::IoError)` for any other open failure
    pub fn open(path: &Path) -> Result<Self, VelocityError> {
        let file = File::open(path).map_err(|e| VelocityError::open_failed(path, e))?;

        Ok(Self::from_reader(BufReader::with_capacity(8 * 1024, file)))
    }
}

impl<R: BufRead> SyncReader<R> {
    /// Wrap any buffered reader
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_num: 0,
        }
    }
}

impl<R: BufRead> Iterator for SyncReader<R> {
    type Item = Result<LoadAttempt, VelocityError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_num += 1;

            if line.trim().is_empty() {
                continue;
            }

            let line_num = self.line_num;
            return Some(parse_line(&line).map_err(|e| e.at_line(line_num)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    const LOAD_1: &str = r#"{"id":"1","customer_id":"10","load_amount":"$100.00","time":"2000-01-01T00:00:00Z"}"#;
    const LOAD_2: &str = r#"{"id":"2","customer_id":"20","load_amount":"$50.00","time":"2000-01-02T00:00:00Z"}"#;
    const LOAD_3: &str = r#"{"id":"3","customer_id":"30","load_amount":"$75.00","time":"2000-01-03T00:00:00Z"}"#;

    /// Helper function to create a temporary input file for testing
    fn create_temp_input(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn read_all(content: &str) -> Vec<Result<LoadAttempt, VelocityError>> {
        SyncReader::from_reader(Cursor::new(content.to_string())).collect()
    }

    #[test]
    fn test_sync_reader_opens_file() {
        let file = create_temp_input(&format!("{}\n", LOAD_1));

        let records: Vec<_> = SyncReader::open(file.path()).unwrap().collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].as_ref().unwrap().amount_cents, 10_000);
    }

    #[test]
    fn test_sync_reader_fails_on_missing_file() {
        let result = SyncReader::open(Path::new("nonexistent.txt"));
        assert!(matches!(result, Err(VelocityError::FileNotFound { .. })));
    }

    #[test]
    fn test_sync_reader_preserves_order() {
        let records = read_all(&format!("{}\n{}\n{}\n", LOAD_1, LOAD_2, LOAD_3));

        let ids: Vec<_> = records
            .into_iter()
            .map(|r| r.unwrap().id)
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_sync_reader_skips_blank_lines() {
        let records = read_all(&format!("\n{}\n   \n\n{}\n", LOAD_1, LOAD_2));
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(Result::is_ok));
    }

    #[test]
    fn test_sync_reader_without_trailing_newline() {
        let records = read_all(LOAD_1);
        assert_eq!(records.len(), 1);
        assert!(records[0].is_ok());
    }

    #[test]
    fn test_sync_reader_handles_crlf() {
        let records = read_all(&format!("{}\r\n{}\r\n", LOAD_1, LOAD_2));
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(Result::is_ok));
    }

    #[test]
    fn test_sync_reader_includes_line_numbers_in_errors() {
        // Line 3 is malformed; the blank line 2 still counts
        let records = read_all(&format!("{}\n\nnot json\n{}\n", LOAD_1, LOAD_2));

        assert_eq!(records.len(), 3);
        assert!(records[0].is_ok());
        assert!(records[2].is_ok());

        let error = records[1].as_ref().unwrap_err();
        assert!(matches!(error, VelocityError::ParseError { line: Some(3), .. }));
    }

    #[test]
    fn test_sync_reader_reports_bad_amount_with_line() {
        let bad = r#"{"id":"9","customer_id":"1","load_amount":"$x","time":"2000-01-01T00:00:00Z"}"#;
        let records = read_all(&format!("{}\n{}\n", LOAD_1, bad));

        let error = records[1].as_ref().unwrap_err().to_string();
        assert!(error.contains("line 2"));
        assert!(error.contains("Invalid load amount"));
    }

    #[test]
    fn test_sync_reader_continues_after_error() {
        let records = read_all(&format!("{}\n{{\"id\":\n{}\n", LOAD_1, LOAD_3));

        assert_eq!(records.len(), 3);
        assert!(records[0].is_ok());
        assert!(records[1].is_err());
        assert!(records[2].is_ok());
    }

    #[test]
    fn test_sync_reader_empty_input() {
        assert!(read_all("").is_empty());
    }
}
