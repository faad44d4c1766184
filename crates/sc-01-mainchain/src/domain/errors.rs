//! Mainchain header error types.
//!
//! Parsing and validation fail with distinct types: a `ParseError` means the
//! bytes are not a header at all, a `HeaderValidationError` means a well-formed
//! header breaks a consensus rule.

use thiserror::Error;

/// Failure to decode a header from raw bytes. No partial header is ever built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Fewer bytes remain than the next field (or the fixed-size floor) needs.
    #[error("Truncated header: need {needed} bytes at offset {offset}, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Non-minimal CompactSize encoding.
    #[error("Invalid variable-length integer at offset {offset}")]
    InvalidVarInt { offset: usize },

    /// Declared solution length above `MAX_SOLUTION_SIZE`.
    #[error("Solution length {length} exceeds maximum {max}")]
    OutOfRange { length: u64, max: usize },
}

/// Reason a parsed header failed semantic validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderValidationError {
    #[error("Equihash solution length {actual} does not match expected {expected}")]
    SolutionLengthMismatch { expected: usize, actual: usize },

    #[error("Header timestamp is zero")]
    ZeroTimestamp,

    #[error("Header timestamp {time} is later than {max_allowed}")]
    TimestampTooFarInFuture { time: u32, max_allowed: u64 },

    /// Compact target is negative, overflows 256 bits or decodes to zero.
    #[error("Invalid difficulty bits {bits:#010x}")]
    InvalidDifficultyBits { bits: u32 },

    #[error("Target from bits {bits:#010x} is above the network proof-of-work limit")]
    TargetAboveLimit { bits: u32 },

    #[error("Header hash is above the target from bits {bits:#010x}")]
    HashAboveTarget { bits: u32 },

    #[error("Equihash solution verification failed")]
    InvalidEquihashSolution,
}

/// Inconsistent network consensus parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    #[error("Invalid Equihash parameters n={n}, k={k}")]
    InvalidEquihashParams { n: u32, k: u32 },

    #[error("Configured solution length {configured} does not match {expected} derived from (n, k)")]
    SolutionLengthMismatch { expected: usize, configured: usize },
}
