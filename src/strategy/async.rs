//! Asynchronous batch processing strategy
//!
//! This module provides an asynchronous implementation of the
//! ProcessingStrategy trait. Input is read in batches with tokio, each batch is
//! decoded on several blocking workers, and the decoded attempts are then fed
//! to one engine strictly in input order.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch line reading)
//!     ├── parse_batch (chunked decoding on spawn_blocking workers)
//!     └── VelocityEngine (sequential evaluation)
//! ```
//!
//! # Ordering
//!
//! Decoding has no side effects, so it can run in any order. Evaluation cannot:
//! the daily prime slot and every limit depend on which load came first. Parsed
//! chunks are therefore reassembled in input order before any of them reaches
//! the engine, and the output matches the sync strategy line for line.

use crate::core::VelocityEngine;
use crate::io::async_reader::{AsyncReader, RawLine};
use crate::io::json_format::parse_line;
use crate::strategy::{handle_record, ProcessingOptions, ProcessingStrategy, ProcessingSummary};
use crate::types::{LoadAttempt, VelocityError};
use std::io::Write;
use std::path::Path;

/// Configuration for batch processing
///
/// Controls how many lines are read per batch and how many workers decode a
/// batch in parallel.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of lines per batch
    pub batch_size: usize,
    /// Number of parallel decoding workers (and runtime threads)
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig with custom values
    ///
    /// Zero values fall back to the defaults with a warning.
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            log::warn!(
                "Invalid batch_size ({}), using default ({})",
                batch_size,
                default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            log::warn!(
                "Invalid max_concurrent_batches ({}), using default ({})",
                max_concurrent_batches,
                default.max_concurrent_batches
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    options: ProcessingOptions,
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy
    ///
    /// # Arguments
    ///
    /// * `options` - Rule switches and malformed-record policy
    /// * `config` - BatchConfig with batch_size and max_concurrent_batches
    pub fn new(options: ProcessingOptions, config: BatchConfig) -> Self {
        Self { options, config }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Process load attempts from input file and write decisions to output
    ///
    /// 1. Creates a tokio multi-threaded runtime
    /// 2. Reads lines in batches using AsyncReader
    /// 3. Decodes each batch in parallel chunks
    /// 4. Evaluates the decoded batch in order and writes each decision
    /// 5. Reads the next batch only after the current one is fully written
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ProcessingSummary, VelocityError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| VelocityError::IoError {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        runtime.block_on(async {
            let mut engine = VelocityEngine::new(self.options.rules);
            let mut summary = ProcessingSummary::default();

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| VelocityError::open_failed(input_path, e))?;
            let mut reader = AsyncReader::new(tokio::io::BufReader::new(file));

            loop {
                let batch = reader.read_batch(self.config.batch_size).await?;
                if batch.is_empty() {
                    break;
                }

                let records = parse_batch(batch, self.config.max_concurrent_batches).await?;
                for record in records {
                    handle_record(&mut engine, record, &self.options, &mut summary, output)?;
                }
            }

            output.flush()?;
            Ok(summary)
        })
    }
}

/// Decode a batch on up to `workers` blocking tasks
///
/// Results come back in the same order as the input lines.
async fn parse_batch(
    batch: Vec<RawLine>,
    workers: usize,
) -> Result<Vec<Result<LoadAttempt, VelocityError>>, VelocityError> {
    let chunk_size = batch.len().div_ceil(workers.max(1)).max(1);

    let mut chunks = Vec::new();
    let mut lines = batch.into_iter();
    loop {
        let chunk: Vec<RawLine> = lines.by_ref().take(chunk_size).collect();
        if chunk.is_empty() {
            break;
        }
        chunks.push(chunk);
    }

    let tasks = chunks.into_iter().map(|chunk| {
        tokio::task::spawn_blocking(move || {
            chunk
                .into_iter()
                .map(|raw| parse_line(&raw.text).map_err(|e| e.at_line(raw.line)))
                .collect::<Vec<_>>()
        })
    });

    let mut records = Vec::new();
    for joined in futures::future::join_all(tasks).await {
        let parsed = joined.map_err(|e| VelocityError::IoError {
            message: format!("Parse worker failed: {}", e),
        })?;
        records.extend(parsed);
    }

    Ok(records)
}
