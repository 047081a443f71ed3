//! Load-related types for the velocity limits engine
//!
//! This module defines the load attempt consumed by the engine and the
//! decision it produces for each attempt.

use chrono::{DateTime, Utc};
use std::fmt;

/// Load identifier
///
/// Kept as the raw string from the input record. Numeric identifiers take
/// part in the prime-id rule; anything else is an opaque label.
pub type LoadId = String;

/// Customer identifier
pub type CustomerId = String;

/// Monetary amount in integer cents
pub type Cents = u64;

/// A single fund-load attempt
///
/// Built from one decoded input line, evaluated exactly once and then
/// dropped. The engine never keeps a reference to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadAttempt {
    /// Identifier of the load, echoed back in the decision
    pub id: LoadId,

    /// The customer the load is credited to
    pub customer_id: CustomerId,

    /// Requested amount in cents, before any rule adjustment
    pub amount_cents: Cents,

    /// When the load was attempted, normalized to UTC
    ///
    /// Every calendar key (day, ISO week, weekday) is derived from this value.
    pub time: DateTime<Utc>,
}

/// Why an attempt was declined
///
/// Each variant corresponds to one guard of the rule pipeline. Only the first
/// failing guard is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclineReason {
    /// Another prime-id load was already accepted that calendar day
    PrimeAlreadyUsed,

    /// Prime-id load whose effective amount is above the prime ceiling
    PrimeAmountExceeded,

    /// The customer's daily total would go above the daily limit
    DailyLimitExceeded,

    /// The customer's ISO-week total would go above the weekly limit
    WeeklyLimitExceeded,

    /// The customer already has the maximum number of loads for the day
    DailyCountExceeded,
}

impl fmt::Display for DeclineReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DeclineReason::PrimeAlreadyUsed => "prime id already used today",
            DeclineReason::PrimeAmountExceeded => "prime id amount above ceiling",
            DeclineReason::DailyLimitExceeded => "daily amount limit exceeded",
            DeclineReason::WeeklyLimitExceeded => "weekly amount limit exceeded",
            DeclineReason::DailyCountExceeded => "daily load count exceeded",
        };
        f.write_str(text)
    }
}

/// Outcome of evaluating one load attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub id: LoadId,
    pub customer_id: CustomerId,
    pub accepted: bool,

    /// First failing rule, `None` when accepted
    ///
    /// Not part of the output record.
    pub reason: Option<DeclineReason>,
}

impl Decision {
    /// Build an accepting decision for the attempt
    pub fn accept(attempt: &LoadAttempt) -> Self {
        Decision {
            id: attempt.id.clone(),
            customer_id: attempt.customer_id.clone(),
            accepted: true,
            reason: None,
        }
    }

    /// Build a declining decision for the attempt
    pub fn decline(attempt: &LoadAttempt, reason: DeclineReason) -> Self {
        Decision {
            id: attempt.id.clone(),
            customer_id: attempt.customer_id.clone(),
            accepted: false,
            reason: Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn attempt() -> LoadAttempt {
        LoadAttempt {
            id: "15887".to_string(),
            customer_id: "528".to_string(),
            amount_cents: 358_731,
            time: Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_accept_echoes_identifiers() {
        let decision = Decision::accept(&attempt());
        assert_eq!(decision.id, "15887");
        assert_eq!(decision.customer_id, "528");
        assert!(decision.accepted);
        assert_eq!(decision.reason, None);
    }

    #[test]
    fn test_decline_carries_reason() {
        let decision = Decision::decline(&attempt(), DeclineReason::DailyCountExceeded);
        assert!(!decision.accepted);
        assert_eq!(decision.reason, Some(DeclineReason::DailyCountExceeded));
    }

    #[rstest]
    #[case::prime_used(DeclineReason::PrimeAlreadyUsed, "prime id already used today")]
    #[case::prime_amount(DeclineReason::PrimeAmountExceeded, "prime id amount above ceiling")]
    #[case::daily_limit(DeclineReason::DailyLimitExceeded, "daily amount limit exceeded")]
    #[case::weekly_limit(DeclineReason::WeeklyLimitExceeded, "weekly amount limit exceeded")]
    #[case::daily_count(DeclineReason::DailyCountExceeded, "daily load count exceeded")]
    fn test_decline_reason_display(#[case] reason: DeclineReason, #[case] expected: &str) {
        assert_eq!(reason.to_string(), expected);
    }
}
