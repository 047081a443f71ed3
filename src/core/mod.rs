//! Core business logic module
//!
//! This module contains the load velocity components:
//! - `calendar` - UTC date and ISO week keys
//! - `rules` - Limit constants, rule switches and the prime-id test
//! - `limit_tracker` - Per-customer daily/weekly aggregates and the global prime flag
//! - `engine` - Ordered rule evaluation and state commit

pub mod calendar;
pub mod engine;
pub mod limit_tracker;
pub mod rules;

pub use calendar::{DateKey, WeekKey};
pub use engine::VelocityEngine;
pub use limit_tracker::{DailyAggregate, LimitTracker, WeeklyAggregate};
pub use rules::RuleConfig;
