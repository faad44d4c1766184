//! Header fixtures for tests in this and downstream crates.

use crate::domain::{target_from_bits, MainchainHeader, MainchainHeaderBuilder};
use primitive_types::U256;

/// Regtest genesis difficulty (`0x0f0f0f * 256^29`).
pub const REGTEST_BITS: u32 = 0x200f0f0f;

/// Regtest-shaped header: 36-byte solution, regtest bits, non-zero hashes.
pub fn regtest_header_builder() -> MainchainHeaderBuilder {
    MainchainHeaderBuilder::new()
        .version(4)
        .hash_prev_block([0x11; 32])
        .hash_merkle_root([0x22; 32])
        .hash_reserved([0x33; 32])
        .bits(REGTEST_BITS)
        .solution(vec![0xA5; 36])
}

/// Grinds the nonce until the header hash meets the target of its own bits.
///
/// Invalid bits have no target to meet; the header is returned as built.
pub fn mine_header(builder: MainchainHeaderBuilder) -> MainchainHeader {
    let unmined = builder.build().expect("fixture header encodes");
    let Some(target) = target_from_bits(unmined.bits()) else {
        return unmined;
    };

    (0u64..)
        .map(|counter| {
            let mut nonce = [0u8; 32];
            nonce[..8].copy_from_slice(&counter.to_le_bytes());
            builder
                .clone()
                .nonce(nonce)
                .build()
                .expect("fixture header encodes")
        })
        .find(|header| U256::from_big_endian(&header.hash()) <= target)
        .expect("unbounded nonce search")
}

/// Builds and mines a regtest chain of `count` headers starting after `prev`.
pub fn mine_chain(prev: [u8; 32], count: usize, start_time: u32) -> Vec<MainchainHeader> {
    let mut headers = Vec::with_capacity(count);
    let mut prev = prev;
    for i in 0..count {
        let header = mine_header(
            regtest_header_builder()
                .hash_prev_block(prev)
                .time(start_time + i as u32 * 150),
        );
        prev = header.hash();
        headers.push(header);
    }
    headers
}
