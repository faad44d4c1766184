//! Stock incompatibility checkers.

use super::entities::{Hash, PoolTransaction};
use crate::ports::IncompatibilityChecker;
use std::collections::HashSet;

/// Accepts every candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysCompatible;

impl<T> IncompatibilityChecker<T> for AlwaysCompatible {
    fn has_conflict(&self, _candidate: &T, _pooled: &[&T]) -> bool {
        false
    }
}

/// Rejects a candidate that spends an id already spent by a pooled
/// transaction, or that spends the same id twice itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleSpendChecker;

impl<T: PoolTransaction> IncompatibilityChecker<T> for DoubleSpendChecker {
    fn has_conflict(&self, candidate: &T, pooled: &[&T]) -> bool {
        let spent = candidate.spent_ids();
        let mut unique: HashSet<Hash> = HashSet::with_capacity(spent.len());
        if !spent.iter().all(|id| unique.insert(*id)) {
            return true;
        }
        pooled
            .iter()
            .any(|tx| tx.spent_ids().iter().any(|id| unique.contains(id)))
    }
}
