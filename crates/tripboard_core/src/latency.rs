//! Simulated network latency for the in-memory access layer.
//!
//! # Responsibility
//! - Map every access operation to a weight and a fixed delay.
//! - Provide a zero-delay profile so tests run without waiting.
//!
//! # Invariants
//! - Latency is awaited before any collection lock is taken.
//! - A zero duration never touches the tokio timer.

use std::time::Duration;

/// Relative cost class of an access operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpWeight {
    /// Full collection read.
    List,
    /// Single-record read by id.
    Lookup,
    /// Filtered read or read-side aggregation.
    Filter,
    Create,
    Update,
    Delete,
}

/// Per-weight delay table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub list: Duration,
    pub lookup: Duration,
    pub filter: Duration,
    pub create: Duration,
    pub update: Duration,
    pub delete: Duration,
}

impl Latency {
    /// Delays the planner UI was tuned against.
    pub const fn simulated() -> Self {
        Self {
            list: Duration::from_millis(300),
            lookup: Duration::from_millis(200),
            filter: Duration::from_millis(250),
            create: Duration::from_millis(400),
            update: Duration::from_millis(350),
            delete: Duration::from_millis(250),
        }
    }

    /// Zero-delay profile for tests and batch tooling.
    pub const fn none() -> Self {
        Self {
            list: Duration::ZERO,
            lookup: Duration::ZERO,
            filter: Duration::ZERO,
            create: Duration::ZERO,
            update: Duration::ZERO,
            delete: Duration::ZERO,
        }
    }

    pub fn for_weight(&self, weight: OpWeight) -> Duration {
        match weight {
            OpWeight::List => self.list,
            OpWeight::Lookup => self.lookup,
            OpWeight::Filter => self.filter,
            OpWeight::Create => self.create,
            OpWeight::Update => self.update,
            OpWeight::Delete => self.delete,
        }
    }

    pub fn is_none(&self) -> bool {
        *self == Self::none()
    }

    /// Suspends the caller for the delay mapped to `weight`.
    pub async fn wait(&self, weight: OpWeight) {
        let delay = self.for_weight(weight);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::simulated()
    }
}

#[cfg(test)]
mod tests {
    use super::{Latency, OpWeight};
    use std::time::Duration;

    #[test]
    fn simulated_profile_orders_writes_above_reads() {
        let latency = Latency::simulated();
        assert_eq!(latency.for_weight(OpWeight::Lookup), Duration::from_millis(200));
        assert!(latency.for_weight(OpWeight::Create) > latency.for_weight(OpWeight::List));
    }

    #[test]
    fn none_profile_is_detected() {
        assert!(Latency::none().is_none());
        assert!(!Latency::default().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn wait_sleeps_for_mapped_duration() {
        let started = tokio::time::Instant::now();
        Latency::simulated().wait(OpWeight::Update).await;
        assert!(started.elapsed() >= Duration::from_millis(350));
    }
}
