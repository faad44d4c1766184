//! # Mainchain Subsystem
//!
//! Parses and validates parent-chain ("mainchain") block headers so the
//! sidechain can anchor itself to proof-of-work history.
//!
//! ## Flow
//!
//! ```text
//! raw bytes ──parse──→ MainchainHeader ──validate──→ accepted / rejected
//!                        │                    │
//!                        └── hash() ──────────┤ target check (bits)
//!                                             └─→ ProofOfWorkVerifier (Equihash)
//! ```
//!
//! ## Guarantees
//!
//! | Property | Enforcement |
//! |----------|-------------|
//! | No partially built headers | `MainchainHeader::parse` returns `ParseError` |
//! | Hash over the exact parsed bytes | `canonical_bytes` + `OnceLock` memo |
//! | Version-conditional SC map field | `SC_MAP_BLOCK_VERSION` |
//! | Boolean validity with a reason on demand | `semantic_validity` / `validate` |
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ports/outbound.rs - ProofOfWorkVerifier, TimeSource            │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  domain/header.rs     - codec                                   │
//! │  domain/validator.rs  - semantic checks                         │
//! │  domain/difficulty.rs - compact targets                         │
//! │  domain/params.rs     - NetworkConsensusParams                  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod domain;
pub mod ports;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use domain::*;
pub use ports::*;
