//! Velocity rule engine
//!
//! This module provides the `VelocityEngine` that decides whether each load
//! attempt is accepted, reading and updating the `LimitTracker`.
//!
//! Rules are checked in a fixed order and the first failing rule declines the
//! attempt:
//! 1. Prime-id slot already claimed today (any customer)
//! 2. Prime-id effective amount above $9,999.00
//! 3. Daily amount limit ($5,000.00)
//! 4. Weekly amount limit ($20,000.00, ISO week)
//! 5. Daily load count (3)
//!
//! All checks use the effective amount, which is the requested amount doubled
//! on UTC Mondays when the Monday rule is enabled. A declined attempt leaves
//! the tracker untouched; an accepted one is committed in a single step after
//! every check has passed.

use crate::core::calendar::{DateKey, WeekKey};
use crate::core::limit_tracker::LimitTracker;
use crate::core::rules::{
    is_prime_id, RuleConfig, DAILY_COUNT_LIMIT, DAILY_LIMIT_CENTS, PRIME_AMOUNT_MAX_CENTS,
    WEEKLY_LIMIT_CENTS,
};
use crate::types::{Cents, Decision, DeclineReason, LoadAttempt};

/// Everything needed to commit an attempt that passed all checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Admission {
    date: DateKey,
    week: WeekKey,
    effective_cents: Cents,
    claims_prime_slot: bool,
}

/// Load velocity engine
///
/// Owns the tracker state for the whole input stream. Attempts must be fed in
/// input order: which load claims the daily prime slot, and when a customer
/// hits a limit, both depend on it.
#[derive(Debug, Default)]
pub struct VelocityEngine {
    config: RuleConfig,
    tracker: LimitTracker,
}

impl VelocityEngine {
    /// Create an engine with empty state and the given rule switches
    pub fn new(config: RuleConfig) -> Self {
        VelocityEngine {
            config,
            tracker: LimitTracker::new(),
        }
    }

    /// Decide on a single load attempt
    ///
    /// Commits the attempt to the tracker only when it is accepted.
    ///
    /// # Arguments
    ///
    /// * `attempt` - The load attempt to evaluate
    ///
    /// # Returns
    ///
    /// The decision, carrying the first failing rule when declined
    pub fn evaluate(&mut self, attempt: &LoadAttempt) -> Decision {
        match self.check(attempt) {
            Ok(admission) => {
                self.commit(attempt, admission);
                log::debug!(
                    "accepted load {} for customer {} ({} cents effective)",
                    attempt.id,
                    attempt.customer_id,
                    admission.effective_cents
                );
                Decision::accept(attempt)
            }
            Err(reason) => {
                log::debug!(
                    "declined load {} for customer {}: {}",
                    attempt.id,
                    attempt.customer_id,
                    reason
                );
                Decision::decline(attempt, reason)
            }
        }
    }

    /// Run the guards in order without touching state
    fn check(&self, attempt: &LoadAttempt) -> Result<Admission, DeclineReason> {
        let date = DateKey::from_time(&attempt.time);
        let week = date.week();
        let effective_cents = self.effective_amount(attempt, date);
        let customer = attempt.customer_id.as_str();

        let claims_prime_slot = self.config.enable_prime_rule && is_prime_id(&attempt.id);
        if claims_prime_slot {
            if self.tracker.prime_used(date) {
                return Err(DeclineReason::PrimeAlreadyUsed);
            }
            if effective_cents > PRIME_AMOUNT_MAX_CENTS {
                return Err(DeclineReason::PrimeAmountExceeded);
            }
        }

        let daily = self.tracker.daily(customer, date);
        if daily.total_cents.saturating_add(effective_cents) > DAILY_LIMIT_CENTS {
            return Err(DeclineReason::DailyLimitExceeded);
        }

        let weekly_total = self.tracker.weekly_total(customer, week);
        if weekly_total.saturating_add(effective_cents) > WEEKLY_LIMIT_CENTS {
            return Err(DeclineReason::WeeklyLimitExceeded);
        }

        if daily.count >= DAILY_COUNT_LIMIT {
            return Err(DeclineReason::DailyCountExceeded);
        }

        Ok(Admission {
            date,
            week,
            effective_cents,
            claims_prime_slot,
        })
    }

    fn commit(&mut self, attempt: &LoadAttempt, admission: Admission) {
        self.tracker.record(
            &attempt.customer_id,
            admission.date,
            admission.week,
            admission.effective_cents,
        );
        if admission.claims_prime_slot {
            self.tracker.mark_prime_used(admission.date);
        }
    }

    /// Requested amount, doubled on Mondays when the Monday rule is on
    fn effective_amount(&self, attempt: &LoadAttempt, date: DateKey) -> Cents {
        if self.config.enable_monday_rule && date.is_monday() {
            attempt.amount_cents.saturating_mul(2)
        } else {
            attempt.amount_cents
        }
    }

    /// Rule switches this engine was built with
    pub fn config(&self) -> RuleConfig {
        self.config
    }

    /// Read-only view of the accumulated state
    pub fn tracker(&self) -> &LimitTracker {
        &self.tracker
    }
}
