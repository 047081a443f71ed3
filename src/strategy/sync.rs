//! Synchronous processing strategy
//!
//! This module provides a synchronous, single-threaded implementation of the
//! ProcessingStrategy trait. It orchestrates processing by coordinating
//! between the SyncReader (for input) and VelocityEngine (for rule evaluation).
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - Line decoding to `SyncReader` (iterator interface)
//! - Rule evaluation to `VelocityEngine`
//! - Output to `json_format::write_decision`
//!
//! # Memory Efficiency
//!
//! Lines are read and evaluated one at a time and each decision is written
//! immediately. Memory usage is O(customers × active days/weeks), not
//! O(input lines).

use crate::core::VelocityEngine;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{handle_record, ProcessingOptions, ProcessingStrategy, ProcessingSummary};
use crate::types::VelocityError;
use std::io::Write;
use std::path::Path;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use velocity_limits::strategy::{ProcessingOptions, ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new(ProcessingOptions::default());
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("input.txt"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncProcessingStrategy {
    options: ProcessingOptions,
}

impl SyncProcessingStrategy {
    pub fn new(options: ProcessingOptions) -> Self {
        Self { options }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ProcessingSummary, VelocityError> {
        let mut engine = VelocityEngine::new(self.options.rules);
        let mut summary = ProcessingSummary::default();

        let reader = SyncReader::open(input_path)?;

        for record in reader {
            handle_record(&mut engine, record, &self.options, &mut summary, output)?;
        }

        output.flush()?;
        Ok(summary)
    }
}
