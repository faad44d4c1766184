//! Network consensus parameters consumed by header validation.

use super::errors::ParamsError;
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// Read-only consensus configuration of the parent chain.
///
/// Loaded by the node wiring (JSON/TOML); `pow_limit` is optional so
/// configurations that predate it still deserialize.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConsensusParams {
    /// Equihash `n` (bit length of the collision space).
    pub equihash_n: u32,
    /// Equihash `k` (number of collision rounds).
    pub equihash_k: u32,
    /// Exact byte length every header solution must have.
    pub equihash_solution_length: usize,
    /// Easiest target a header may claim.
    #[serde(default)]
    pub pow_limit: Option<U256>,
}

impl NetworkConsensusParams {
    pub fn mainnet() -> Self {
        Self {
            equihash_n: 200,
            equihash_k: 9,
            equihash_solution_length: 1344,
            pow_limit: Some(U256::MAX >> 13),
        }
    }

    pub fn testnet() -> Self {
        Self {
            equihash_n: 200,
            equihash_k: 9,
            equihash_solution_length: 1344,
            pow_limit: Some(U256::MAX >> 5),
        }
    }

    pub fn regtest() -> Self {
        Self {
            equihash_n: 48,
            equihash_k: 5,
            equihash_solution_length: 36,
            pow_limit: Some(regtest_pow_limit()),
        }
    }

    /// Checks that (n, k) is a usable Equihash instance and that the
    /// configured solution length matches it.
    pub fn validate(&self) -> Result<(), ParamsError> {
        let expected = equihash_solution_length_for(self.equihash_n, self.equihash_k)?;
        if expected != self.equihash_solution_length {
            return Err(ParamsError::SolutionLengthMismatch {
                expected,
                configured: self.equihash_solution_length,
            });
        }
        Ok(())
    }
}

impl Default for NetworkConsensusParams {
    fn default() -> Self {
        Self::mainnet()
    }
}

/// Byte length of an Equihash (n, k) solution: `2^k` indices of
/// `n / (k + 1) + 1` bits each.
pub fn equihash_solution_length_for(n: u32, k: u32) -> Result<usize, ParamsError> {
    let invalid = ParamsError::InvalidEquihashParams { n, k };
    if k == 0 || k >= n || n % 8 != 0 || n % (k + 1) != 0 || k > 20 {
        return Err(invalid);
    }
    let index_bits = (n / (k + 1) + 1) as usize;
    Ok((1usize << k) * index_bits / 8)
}

/// `0x0f0f0f...0f` over 32 bytes.
fn regtest_pow_limit() -> U256 {
    U256::from_big_endian(&[0x0f; 32])
}
