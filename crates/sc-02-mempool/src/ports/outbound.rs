//! Outbound (Driven) ports for the Mempool subsystem.
//!
//! The pool never decides on its own whether two transactions conflict: it
//! asks the checker supplied by the candidate's transaction kind.

/// Decides whether a candidate may join a pool.
pub trait IncompatibilityChecker<T>: Send + Sync {
    /// Returns true if `candidate` conflicts with any of `pooled`.
    ///
    /// `pooled` is the full contents of the snapshot being extended,
    /// including transactions admitted earlier in the same batch.
    fn has_conflict(&self, candidate: &T, pooled: &[&T]) -> bool;
}
