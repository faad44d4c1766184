//! # Mainchain Header Codec
//!
//! Parses parent-chain block headers and keeps the exact bytes they came from.
//!
//! ## Wire Layout
//!
//! ```text
//! field                     | bytes | encoding
//! --------------------------|-------|------------------------------------
//! version                   | 4     | little-endian i32
//! hash_prev_block           | 32    | reversed
//! hash_merkle_root          | 32    | reversed
//! hash_reserved             | 32    | reversed
//! hash_sc_merkle_roots_map  | 32    | raw, ONLY if version == 0xFFFFFFFC
//! time                      | 4     | little-endian u32
//! bits                      | 4     | little-endian u32
//! nonce                     | 32    | reversed
//! solution length           | 1-9   | CompactSize
//! solution                  | len   | raw
//! ```
//!
//! ## Invariants
//!
//! - A header only exists as the result of a successful parse (or of the
//!   builder, which emits the same canonical encoding).
//! - `hash() == reverse(sha256(sha256(canonical_bytes)))`; hashing and
//!   re-emission always use `canonical_bytes`, never a re-encoding.

use super::errors::ParseError;
use super::varint::{read_varint, varint_size, write_varint};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shared_types::Hash;
use std::sync::OnceLock;

/// Size of the fixed fields of a header without the SC map field.
pub const HEADER_SIZE: usize = 140;

/// Version value that carries the sidechain merkle-roots-map field.
pub const SC_MAP_BLOCK_VERSION: i32 = 0xFFFF_FFFCu32 as i32;

/// Upper bound on the declared solution length.
pub const MAX_SOLUTION_SIZE: usize = 0x10000;

/// A parsed parent-chain block header.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct MainchainHeader {
    version: i32,
    hash_prev_block: Hash,
    hash_merkle_root: Hash,
    hash_reserved: Hash,
    hash_sc_merkle_roots_map: Hash,
    time: u32,
    bits: u32,
    nonce: [u8; 32],
    solution: Vec<u8>,
    canonical_bytes: Vec<u8>,
    hash: OnceLock<Hash>,
}

impl MainchainHeader {
    /// Parses a header starting at `offset`.
    ///
    /// # Errors
    /// - `Truncated` if fewer than `HEADER_SIZE` bytes remain, or any later
    ///   field (SC map, solution) runs past the end of `bytes`
    /// - `InvalidVarInt` for a non-minimal solution length prefix
    /// - `OutOfRange` if the declared solution length exceeds `MAX_SOLUTION_SIZE`
    pub fn parse(bytes: &[u8], offset: usize) -> Result<Self, ParseError> {
        let available = bytes.len().saturating_sub(offset);
        if available < HEADER_SIZE {
            return Err(ParseError::Truncated {
                offset,
                needed: HEADER_SIZE,
                available,
            });
        }

        let mut reader = ByteReader::new(bytes, offset);

        let version = i32::from_le_bytes(reader.read_array()?);
        let hash_prev_block = reader.read_reversed()?;
        let hash_merkle_root = reader.read_reversed()?;
        let hash_reserved = reader.read_reversed()?;
        let hash_sc_merkle_roots_map = if version == SC_MAP_BLOCK_VERSION {
            reader.read_array()?
        } else {
            [0u8; 32]
        };
        let time = u32::from_le_bytes(reader.read_array()?);
        let bits = u32::from_le_bytes(reader.read_array()?);
        let nonce = reader.read_reversed()?;

        let solution_len = reader.read_varint()?;
        let solution_len = usize::try_from(solution_len)
            .ok()
            .filter(|len| *len <= MAX_SOLUTION_SIZE)
            .ok_or(ParseError::OutOfRange {
                length: solution_len,
                max: MAX_SOLUTION_SIZE,
            })?;
        let solution = reader.read_slice(solution_len)?.to_vec();

        Ok(Self {
            version,
            hash_prev_block,
            hash_merkle_root,
            hash_reserved,
            hash_sc_merkle_roots_map,
            time,
            bits,
            nonce,
            solution,
            canonical_bytes: bytes[offset..reader.position()].to_vec(),
            hash: OnceLock::new(),
        })
    }

    /// Header hash, computed on first access.
    pub fn hash(&self) -> Hash {
        *self
            .hash
            .get_or_init(|| double_sha256_reversed(&self.canonical_bytes))
    }

    /// The exact bytes this header was parsed from.
    pub fn bytes(&self) -> &[u8] {
        &self.canonical_bytes
    }

    /// Number of bytes the header occupied in its source buffer.
    pub fn size(&self) -> usize {
        self.canonical_bytes.len()
    }

    /// Width of the CompactSize prefix in front of the solution.
    pub fn solution_prefix_len(&self) -> usize {
        varint_size(self.solution.len() as u64)
    }

    /// Equihash input: the canonical bytes without the solution and its prefix.
    pub fn header_bytes_without_solution(&self) -> &[u8] {
        let tail = self.solution_prefix_len() + self.solution.len();
        &self.canonical_bytes[..self.canonical_bytes.len() - tail]
    }

    /// Re-encodes the header from its fields.
    ///
    /// Equal to `bytes()` for every header this codec produced.
    pub fn serialize(&self) -> Vec<u8> {
        encode(
            self.version,
            &self.hash_prev_block,
            &self.hash_merkle_root,
            &self.hash_reserved,
            &self.hash_sc_merkle_roots_map,
            self.time,
            self.bits,
            &self.nonce,
            &self.solution,
        )
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn has_sc_map(&self) -> bool {
        self.version == SC_MAP_BLOCK_VERSION
    }

    pub fn hash_prev_block(&self) -> &Hash {
        &self.hash_prev_block
    }

    pub fn hash_merkle_root(&self) -> &Hash {
        &self.hash_merkle_root
    }

    pub fn hash_reserved(&self) -> &Hash {
        &self.hash_reserved
    }

    pub fn hash_sc_merkle_roots_map(&self) -> &Hash {
        &self.hash_sc_merkle_roots_map
    }

    pub fn time(&self) -> u32 {
        self.time
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn nonce(&self) -> &[u8; 32] {
        &self.nonce
    }

    pub fn solution(&self) -> &[u8] {
        &self.solution
    }
}

impl PartialEq for MainchainHeader {
    fn eq(&self, other: &Self) -> bool {
        // every field is a function of the canonical bytes
        self.canonical_bytes == other.canonical_bytes
    }
}

impl Eq for MainchainHeader {}

impl TryFrom<&[u8]> for MainchainHeader {
    type Error = ParseError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::parse(bytes, 0)
    }
}

impl TryFrom<Vec<u8>> for MainchainHeader {
    type Error = ParseError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::parse(&bytes, 0)
    }
}

impl From<MainchainHeader> for Vec<u8> {
    fn from(header: MainchainHeader) -> Self {
        header.canonical_bytes
    }
}

/// Parses a run of back-to-back headers covering all of `bytes`.
pub fn parse_headers(bytes: &[u8]) -> Result<Vec<MainchainHeader>, ParseError> {
    let mut headers = Vec::new();
    let mut offset = 0;
    while offset < bytes.len() {
        let header = MainchainHeader::parse(bytes, offset)?;
        offset += header.size();
        headers.push(header);
    }
    Ok(headers)
}

/// `reverse(sha256(sha256(data)))`
pub fn double_sha256_reversed(data: &[u8]) -> Hash {
    let mut hash: Hash = Sha256::digest(Sha256::digest(data)).into();
    hash.reverse();
    hash
}

#[allow(clippy::too_many_arguments)]
fn encode(
    version: i32,
    hash_prev_block: &Hash,
    hash_merkle_root: &Hash,
    hash_reserved: &Hash,
    hash_sc_merkle_roots_map: &Hash,
    time: u32,
    bits: u32,
    nonce: &[u8; 32],
    solution: &[u8],
) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_SIZE + 32 + 9 + solution.len());
    out.extend_from_slice(&version.to_le_bytes());
    extend_reversed(&mut out, hash_prev_block);
    extend_reversed(&mut out, hash_merkle_root);
    extend_reversed(&mut out, hash_reserved);
    if version == SC_MAP_BLOCK_VERSION {
        out.extend_from_slice(hash_sc_merkle_roots_map);
    }
    out.extend_from_slice(&time.to_le_bytes());
    out.extend_from_slice(&bits.to_le_bytes());
    extend_reversed(&mut out, nonce);
    write_varint(solution.len() as u64, &mut out);
    out.extend_from_slice(solution);
    out
}

fn extend_reversed(out: &mut Vec<u8>, bytes: &[u8; 32]) {
    out.extend(bytes.iter().rev());
}

/// Forward-only cursor over the input buffer.
struct ByteReader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> ByteReader<'a> {
    fn new(bytes: &'a [u8], position: usize) -> Self {
        Self { bytes, position }
    }

    fn position(&self) -> usize {
        self.position
    }

    fn read_slice(&mut self, len: usize) -> Result<&'a [u8], ParseError> {
        let end = self.position.checked_add(len);
        let slice = end
            .and_then(|end| self.bytes.get(self.position..end))
            .ok_or(ParseError::Truncated {
                offset: self.position,
                needed: len,
                available: self.bytes.len().saturating_sub(self.position),
            })?;
        self.position += len;
        Ok(slice)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], ParseError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_slice(N)?);
        Ok(out)
    }

    fn read_reversed(&mut self) -> Result<[u8; 32], ParseError> {
        let mut out: [u8; 32] = self.read_array()?;
        out.reverse();
        Ok(out)
    }

    fn read_varint(&mut self) -> Result<u64, ParseError> {
        let varint = read_varint(self.bytes, self.position)?;
        self.position += varint.size;
        Ok(varint.value)
    }
}

/// Builds canonical header bytes from field values.
///
/// Fields are given in their logical (display) order; the builder applies the
/// wire byte reversals. The SC map field is dropped unless the version is
/// `SC_MAP_BLOCK_VERSION`.
#[derive(Clone, Debug)]
pub struct MainchainHeaderBuilder {
    version: i32,
    hash_prev_block: Hash,
    hash_merkle_root: Hash,
    hash_reserved: Hash,
    hash_sc_merkle_roots_map: Hash,
    time: u32,
    bits: u32,
    nonce: [u8; 32],
    solution: Vec<u8>,
}

impl Default for MainchainHeaderBuilder {
    fn default() -> Self {
        Self {
            version: 4,
            hash_prev_block: [0u8; 32],
            hash_merkle_root: [0u8; 32],
            hash_reserved: [0u8; 32],
            hash_sc_merkle_roots_map: [0u8; 32],
            time: 0,
            bits: 0,
            nonce: [0u8; 32],
            solution: Vec::new(),
        }
    }
}

impl MainchainHeaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(mut self, version: i32) -> Self {
        self.version = version;
        self
    }

    pub fn hash_prev_block(mut self, hash: Hash) -> Self {
        self.hash_prev_block = hash;
        self
    }

    pub fn hash_merkle_root(mut self, hash: Hash) -> Self {
        self.hash_merkle_root = hash;
        self
    }

    pub fn hash_reserved(mut self, hash: Hash) -> Self {
        self.hash_reserved = hash;
        self
    }

    pub fn hash_sc_merkle_roots_map(mut self, hash: Hash) -> Self {
        self.hash_sc_merkle_roots_map = hash;
        self
    }

    pub fn time(mut self, time: u32) -> Self {
        self.time = time;
        self
    }

    pub fn bits(mut self, bits: u32) -> Self {
        self.bits = bits;
        self
    }

    pub fn nonce(mut self, nonce: [u8; 32]) -> Self {
        self.nonce = nonce;
        self
    }

    pub fn solution(mut self, solution: Vec<u8>) -> Self {
        self.solution = solution;
        self
    }

    /// Canonical wire bytes for the configured fields.
    pub fn to_bytes(&self) -> Vec<u8> {
        encode(
            self.version,
            &self.hash_prev_block,
            &self.hash_merkle_root,
            &self.hash_reserved,
            &self.hash_sc_merkle_roots_map,
            self.time,
            self.bits,
            &self.nonce,
            &self.solution,
        )
    }

    /// Encodes and parses the header.
    ///
    /// # Errors
    /// `OutOfRange` if the solution is longer than `MAX_SOLUTION_SIZE`.
    pub fn build(&self) -> Result<MainchainHeader, ParseError> {
        MainchainHeader::parse(&self.to_bytes(), 0)
    }
}
