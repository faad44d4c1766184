//! # Mainchain Header Semantic Validation
//!
//! Checks run in order and stop at the first failure:
//!
//! 1. **Structure**: hash fields and nonce are fixed 32-byte arrays by
//!    construction; the solution must have exactly
//!    `params.equihash_solution_length` bytes.
//! 2. **Timestamp**: `0 < time <= now + MAX_FUTURE_BLOCK_TIME`.
//! 3. **Target**: the header hash, read as a big-endian integer, must not
//!    exceed the target decoded from `bits` (nor may that target exceed the
//!    network limit, when one is configured).
//! 4. **Equihash**: the external verifier accepts the solution for the header
//!    bytes without the solution.
//!
//! `semantic_validity` is the boolean view; `validate` keeps the reason.

use super::difficulty::target_from_bits;
use super::errors::HeaderValidationError;
use super::header::MainchainHeader;
use super::params::NetworkConsensusParams;
use crate::ports::{ProofOfWorkVerifier, SystemTimeSource, TimeSource};
use primitive_types::U256;
use shared_types::short_hex;

/// Allowed forward clock drift for header timestamps (seconds).
pub const MAX_FUTURE_BLOCK_TIME: u64 = 2 * 60 * 60;

/// Stateless validator over a proof-of-work verifier and a clock.
#[derive(Debug, Clone)]
pub struct MainchainHeaderValidator<V, T = SystemTimeSource> {
    verifier: V,
    time_source: T,
}

impl<V: ProofOfWorkVerifier> MainchainHeaderValidator<V, SystemTimeSource> {
    /// Creates a validator using the system clock.
    pub fn new(verifier: V) -> Self {
        Self {
            verifier,
            time_source: SystemTimeSource,
        }
    }
}

impl<V: ProofOfWorkVerifier, T: TimeSource> MainchainHeaderValidator<V, T> {
    pub fn with_time_source(verifier: V, time_source: T) -> Self {
        Self {
            verifier,
            time_source,
        }
    }

    /// Returns true if the header passes every check.
    pub fn semantic_validity(&self, header: &MainchainHeader, params: &NetworkConsensusParams) -> bool {
        self.validate(header, params).is_ok()
    }

    /// Validates the header, reporting the first failing check.
    pub fn validate(
        &self,
        header: &MainchainHeader,
        params: &NetworkConsensusParams,
    ) -> Result<(), HeaderValidationError> {
        let result = self.run_checks(header, params);
        if let Err(err) = &result {
            tracing::debug!(
                "[sc-01] Rejected mainchain header {}: {}",
                short_hex(&header.hash()),
                err
            );
        }
        result
    }

    fn run_checks(
        &self,
        header: &MainchainHeader,
        params: &NetworkConsensusParams,
    ) -> Result<(), HeaderValidationError> {
        check_structure(header, params)?;
        check_timestamp(header, self.time_source.now())?;
        check_target(header, params)?;
        self.check_equihash(header, params)
    }

    fn check_equihash(
        &self,
        header: &MainchainHeader,
        params: &NetworkConsensusParams,
    ) -> Result<(), HeaderValidationError> {
        let valid = self.verifier.verify(
            header.header_bytes_without_solution(),
            header.solution(),
            params.equihash_n,
            params.equihash_k,
        );
        if !valid {
            return Err(HeaderValidationError::InvalidEquihashSolution);
        }
        Ok(())
    }
}

fn check_structure(
    header: &MainchainHeader,
    params: &NetworkConsensusParams,
) -> Result<(), HeaderValidationError> {
    if header.solution().len() != params.equihash_solution_length {
        return Err(HeaderValidationError::SolutionLengthMismatch {
            expected: params.equihash_solution_length,
            actual: header.solution().len(),
        });
    }
    Ok(())
}

fn check_timestamp(header: &MainchainHeader, now: u64) -> Result<(), HeaderValidationError> {
    if header.time() == 0 {
        return Err(HeaderValidationError::ZeroTimestamp);
    }
    let max_allowed = now.saturating_add(MAX_FUTURE_BLOCK_TIME);
    if u64::from(header.time()) > max_allowed {
        return Err(HeaderValidationError::TimestampTooFarInFuture {
            time: header.time(),
            max_allowed,
        });
    }
    Ok(())
}

fn check_target(
    header: &MainchainHeader,
    params: &NetworkConsensusParams,
) -> Result<(), HeaderValidationError> {
    let bits = header.bits();
    let target = target_from_bits(bits).ok_or(HeaderValidationError::InvalidDifficultyBits { bits })?;

    if matches!(params.pow_limit, Some(limit) if target > limit) {
        return Err(HeaderValidationError::TargetAboveLimit { bits });
    }

    if U256::from_big_endian(&header.hash()) > target {
        return Err(HeaderValidationError::HashAboveTarget { bits });
    }
    Ok(())
}
