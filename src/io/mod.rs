//! I/O module
//!
//! Handles JSON lines parsing and output.
//!
//! # Components
//!
//! - `json_format` - Wire format handling (record conversion, money parsing, output serialization)
//! - `sync_reader` - Synchronous line reader with iterator interface
//! - `async_reader` - Asynchronous line reader with batch reading interface

pub mod async_reader;
pub mod json_format;
pub mod sync_reader;

pub use async_reader::{AsyncReader, RawLine};
pub use json_format::{parse_line, parse_money_cents, write_decision, JsonRecord};
pub use sync_reader::SyncReader;
