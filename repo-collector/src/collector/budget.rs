//! Collection budget.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Tracks how many repositories have been handed off against an optional
/// target. The processed count is the sole authority for early termination.
#[derive(Debug)]
pub struct CollectionBudget {
    target: usize,
    processed: AtomicUsize,
}

impl CollectionBudget {
    /// Creates a budget; `target` of 0 means unlimited.
    #[must_use]
    pub fn new(target: usize) -> Self {
        Self {
            target,
            processed: AtomicUsize::new(0),
        }
    }

    /// Records one handed-off repository and returns the running count.
    pub fn record(&self) -> usize {
        self.processed.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether a running count of `processed` satisfies the target.
    #[must_use]
    pub fn is_exhausted(&self, processed: usize) -> bool {
        self.target > 0 && processed >= self.target
    }

    /// Total repositories recorded so far.
    #[must_use]
    pub fn processed(&self) -> usize {
        self.processed.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_budget_never_exhausts() {
        let budget = CollectionBudget::new(0);
        for _ in 0..10_000 {
            let count = budget.record();
            assert!(!budget.is_exhausted(count));
        }
        assert_eq!(budget.processed(), 10_000);
    }

    #[test]
    fn target_exhausts_at_exact_count() {
        let budget = CollectionBudget::new(3);
        assert!(!budget.is_exhausted(budget.record()));
        assert!(!budget.is_exhausted(budget.record()));
        assert!(budget.is_exhausted(budget.record()));
    }
}
