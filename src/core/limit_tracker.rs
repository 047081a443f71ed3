//! Velocity state storage
//!
//! This module provides the `LimitTracker` struct which holds the running
//! aggregates the rule engine checks against:
//! - Per-customer daily totals and load counts, keyed by UTC date
//! - Per-customer weekly totals, keyed by ISO week
//! - The set of dates on which a prime-id load was accepted (global, not per customer)
//!
//! The tracker has no business logic. Reads of absent keys return zero-valued
//! aggregates without inserting anything; entries are only materialized by
//! `record` and `mark_prime_used`.

use crate::core::calendar::{DateKey, WeekKey};
use crate::types::{Cents, CustomerId};
use std::collections::{HashMap, HashSet};

/// Accumulated loads for one customer on one UTC date
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DailyAggregate {
    /// Sum of accepted effective amounts
    pub total_cents: Cents,
    /// Number of accepted loads
    pub count: u32,
}

/// Accumulated loads for one customer in one ISO week
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeeklyAggregate {
    /// Sum of accepted effective amounts
    pub total_cents: Cents,
}

/// In-memory store of velocity aggregates
///
/// Lives as long as the engine that owns it. There is no reset other than
/// building a new tracker.
#[derive(Debug, Default)]
pub struct LimitTracker {
    // Nested by customer so lookups can borrow the id instead of cloning it
    daily: HashMap<CustomerId, HashMap<DateKey, DailyAggregate>>,
    weekly: HashMap<CustomerId, HashMap<WeekKey, WeeklyAggregate>>,
    prime_used: HashSet<DateKey>,
}

impl LimitTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Daily aggregate for a customer, zero if nothing was recorded
    pub fn daily(&self, customer: &str, date: DateKey) -> DailyAggregate {
        self.daily
            .get(customer)
            .and_then(|days| days.get(&date))
            .copied()
            .unwrap_or_default()
    }

    /// Weekly aggregate for a customer, zero if nothing was recorded
    pub fn weekly(&self, customer: &str, week: WeekKey) -> WeeklyAggregate {
        self.weekly
            .get(customer)
            .and_then(|weeks| weeks.get(&week))
            .copied()
            .unwrap_or_default()
    }

    /// Sum of accepted effective amounts for the customer on that date
    pub fn daily_total(&self, customer: &str, date: DateKey) -> Cents {
        self.daily(customer, date).total_cents
    }

    /// Number of accepted loads for the customer on that date
    pub fn daily_count(&self, customer: &str, date: DateKey) -> u32 {
        self.daily(customer, date).count
    }

    /// Sum of accepted effective amounts for the customer in that ISO week
    pub fn weekly_total(&self, customer: &str, week: WeekKey) -> Cents {
        self.weekly(customer, week).total_cents
    }

    /// Whether any customer had a prime-id load accepted on that date
    pub fn prime_used(&self, date: DateKey) -> bool {
        self.prime_used.contains(&date)
    }

    /// Record an accepted load
    ///
    /// Adds `cents` to the daily and weekly totals and bumps the daily count.
    /// Must be called exactly once per accepted attempt.
    pub fn record(&mut self, customer: &str, date: DateKey, week: WeekKey, cents: Cents) {
        let daily = self
            .daily
            .entry(customer.to_owned())
            .or_default()
            .entry(date)
            .or_default();
        daily.total_cents = daily.total_cents.saturating_add(cents);
        daily.count = daily.count.saturating_add(1);

        let weekly = self
            .weekly
            .entry(customer.to_owned())
            .or_default()
            .entry(week)
            .or_default();
        weekly.total_cents = weekly.total_cents.saturating_add(cents);
    }

    /// Claim the prime-id slot for a date
    pub fn mark_prime_used(&mut self, date: DateKey) {
        self.prime_used.insert(date);
    }

    /// Number of (customer, date) pairs with at least one accepted load
    pub fn daily_entries(&self) -> usize {
        self.daily.values().map(HashMap::len).sum()
    }

    /// Number of (customer, week) pairs with at least one accepted load
    pub fn weekly_entries(&self) -> usize {
        self.weekly.values().map(HashMap::len).sum()
    }
}
