use crate::core::RuleConfig;
use crate::strategy::{BatchConfig, ProcessingOptions};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Evaluate customer fund loads against velocity limits
#[derive(Parser, Debug)]
#[command(name = "velocity-limits")]
#[command(about = "Evaluate customer fund loads against velocity limits", long_about = None)]
pub struct CliArgs {
    /// Input file containing one JSON load attempt per line
    #[arg(
        value_name = "INPUT",
        default_value = "input.txt",
        help = "Path to the input file of JSON lines"
    )]
    pub input_file: PathBuf,

    /// Processing strategy to use for evaluating loads
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Processing strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    /// Number of lines per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of lines per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of parallel parse workers (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Number of parse workers per batch (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    #[arg(long = "disable-prime-rule", help = "Do not apply the prime-id rule")]
    pub disable_prime_rule: bool,

    #[arg(long = "disable-monday-rule", help = "Do not double amounts loaded on Mondays")]
    pub disable_monday_rule: bool,

    #[arg(long = "strict", help = "Abort on the first malformed input line")]
    pub strict: bool,
}

/// Available processing strategies
#[derive(Clone, Debug, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values fall back to the defaults; zero values are replaced with
    /// the defaults by `BatchConfig::new`, which logs a warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }

    pub fn to_rule_config(&self) -> RuleConfig {
        RuleConfig::new(!self.disable_prime_rule, !self.disable_monday_rule)
    }

    pub fn to_processing_options(&self) -> ProcessingOptions {
        ProcessingOptions {
            rules: self.to_rule_config(),
            strict: self.strict,
        }
    }
}
