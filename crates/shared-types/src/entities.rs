//! # Core Identifiers
//!
//! ## Clusters
//!
//! - **Chain**: `Hash`, `BlockId`
//! - **Mempool**: `TxId`
//! - **State & Storage**: `VersionId`, `NULL_VERSION`, `StorageKey`, `StorageValue`

/// A 32-byte hash (double SHA-256 for mainchain headers).
pub type Hash = [u8; 32];

/// Identifier of a sidechain block.
pub type BlockId = [u8; 32];

/// Identifier of a pooled transaction.
pub type TxId = [u8; 32];

/// Identifier of a committed storage state.
///
/// Application state versions are tied one-to-one to sidechain blocks, so a
/// version is always the id of the block that produced it.
pub type VersionId = BlockId;

/// Version reported for a store that has no committed history yet.
pub const NULL_VERSION: VersionId = [0u8; 32];

/// Raw key in a versioned key/value store.
pub type StorageKey = Vec<u8>;

/// Raw value in a versioned key/value store.
pub type StorageValue = Vec<u8>;

/// Full lowercase hex encoding of a 32-byte identifier.
pub fn to_hex(id: &[u8; 32]) -> String {
    hex::encode(id)
}

/// First four bytes of an identifier in hex, for log lines.
pub fn short_hex(id: &[u8; 32]) -> String {
    hex::encode(&id[..4])
}

/// Returns true if `version` is the null (never committed) version.
pub fn is_null_version(version: &VersionId) -> bool {
    *version == NULL_VERSION
}
