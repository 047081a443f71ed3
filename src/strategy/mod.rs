//! Processing strategy module for load evaluation
//!
//! This module defines the Strategy pattern for complete processing pipelines,
//! encompassing input reading, rule evaluation and decision output. This allows
//! different implementations (synchronous, asynchronous batch) to be selected
//! at runtime. Every strategy evaluates attempts on a single engine in input
//! order, so all of them produce the same output for the same input.

use crate::cli::StrategyType;
use crate::core::{RuleConfig, VelocityEngine};
use crate::io::json_format::write_decision;
use crate::types::{LoadAttempt, VelocityError};
use std::fmt;
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Options shared by every strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingOptions {
    /// Rule switches for the engine
    pub rules: RuleConfig,

    /// Abort on the first malformed record instead of skipping it
    pub strict: bool,
}

/// Counts of what happened to each input record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingSummary {
    pub accepted: usize,
    pub declined: usize,
    /// Records skipped because they could not be decoded
    pub malformed: usize,
}

impl fmt::Display for ProcessingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} accepted, {} declined, {} malformed",
            self.accepted, self.declined, self.malformed
        )
    }
}

/// Processing strategy trait for complete load evaluation pipelines
pub trait ProcessingStrategy: Send + Sync {
    /// Process load attempts from input file and write one decision per attempt
    ///
    /// # Arguments
    ///
    /// * `input_path` - Path to the input file of JSON lines
    /// * `output` - Mutable reference to a writer for the decision lines
    ///
    /// # Returns
    ///
    /// * `Ok(ProcessingSummary)` if the whole input was processed
    /// * `Err(VelocityError)` if a fatal error occurred
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened (file not found, permission denied)
    /// - A fatal I/O error occurs during reading or writing
    /// - A record is malformed and strict mode is on
    ///
    /// Outside strict mode, malformed records are logged and skipped.
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ProcessingSummary, VelocityError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `options` - Rule switches and malformed-record policy
/// * `config` - Optional configuration for async batch processing (ignored for sync)
///
/// # Returns
///
/// A boxed trait object implementing the ProcessingStrategy trait
pub fn create_strategy(
    strategy_type: StrategyType,
    options: ProcessingOptions,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(options)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(options, config))
        }
    }
}

/// Evaluate one decoded record and write its decision
///
/// Shared by all strategies so that they handle malformed records the same way.
pub(crate) fn handle_record(
    engine: &mut VelocityEngine,
    record: Result<LoadAttempt, VelocityError>,
    options: &ProcessingOptions,
    summary: &mut ProcessingSummary,
    output: &mut dyn Write,
) -> Result<(), VelocityError> {
    match record {
        Ok(attempt) => {
            let decision = engine.evaluate(&attempt);
            if decision.accepted {
                summary.accepted += 1;
            } else {
                summary.declined += 1;
            }
            write_decision(&decision, output)
        }
        Err(e) if e.is_recoverable() && !options.strict => {
            log::warn!("Skipping malformed record: {}", e);
            summary.malformed += 1;
            Ok(())
        }
        Err(e) => Err(e),
    }
}
