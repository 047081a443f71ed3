//! Velocity Limits CLI
//!
//! Command-line interface for evaluating fund-load attempts from a JSON lines
//! file.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- input.txt > output.txt
//! cargo run -- --strategy async input.txt > output.txt
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 input.txt > output.txt
//! RUST_LOG=debug cargo run -- --disable-monday-rule input.txt > output.txt
//! ```
//!
//! One decision line is written to stdout per evaluated attempt, in input
//! order. Logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, file not readable, malformed line in strict mode, etc.)

use std::process;
use velocity_limits::cli;
use velocity_limits::strategy;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = cli::parse_args();

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy.clone(), args.to_processing_options(), config)
    };

    let mut output = std::io::stdout().lock();
    match strategy.process(&args.input_file, &mut output) {
        Ok(summary) => log::info!("Processed {}: {}", args.input_file.display(), summary),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
