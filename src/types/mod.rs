//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `load`: Load attempts and the decisions made about them
//! - `error`: Error types for the velocity limits engine

pub mod error;
pub mod load;

pub use error::VelocityError;
pub use load::{Cents, CustomerId, Decision, DeclineReason, LoadAttempt, LoadId};
