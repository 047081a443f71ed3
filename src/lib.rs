//! Velocity Limits Library
//! # Overview
//!
//! This library evaluates a stream of customer fund-load attempts against
//! per-customer velocity limits and decides, for each attempt, whether it is
//! accepted. It ships a synchronous and an asynchronous processing strategy
//! that produce identical output.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (LoadAttempt, Decision, VelocityError)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::engine`] - Ordered rule evaluation and state commits
//!   - [`core::limit_tracker`] - Daily and weekly aggregates, prime-slot usage
//!   - [`core::calendar`] - UTC date and ISO-week keys
//!   - [`core::rules`] - Limit constants, rule switches, primality
//! - [`io`] - JSON lines decoding and decision encoding
//! - [`strategy`] - Complete read / evaluate / write pipelines
//!
//! # Rules
//!
//! Checks run in this order and the first failure declines the attempt:
//!
//! 1. A prime-id load when one was already accepted that UTC day (any customer)
//! 2. A prime-id load above $9,999.00
//! 3. Daily total above $5,000.00
//! 4. Weekly (ISO week) total above $20,000.00
//! 5. More than three accepted loads that day
//!
//! Loads made on a UTC Monday count double toward every amount check.
//! Declined attempts never change any state.

pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{LimitTracker, RuleConfig, VelocityEngine};
pub use io::write_decision;
pub use types::{Cents, CustomerId, Decision, DeclineReason, LoadAttempt, LoadId, VelocityError};
