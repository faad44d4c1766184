//! # Compact Difficulty Targets
//!
//! `bits` packs a 256-bit target as `size` (high byte) and a 23-bit mantissa
//! with a sign bit:
//!
//! ```text
//! target = mantissa * 256^(size - 3)
//! ```
//!
//! A set sign bit with a non-zero mantissa is a negative target and a
//! mantissa shifted past bit 255 overflows. Both are invalid for proof of work.

use primitive_types::U256;

const MANTISSA_MASK: u32 = 0x007f_ffff;
const SIGN_BIT: u32 = 0x0080_0000;

/// Result of decoding a compact target, with its validity flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompactTarget {
    pub target: U256,
    pub negative: bool,
    pub overflow: bool,
}

impl CompactTarget {
    /// A target usable for proof-of-work comparison.
    pub fn is_valid(&self) -> bool {
        !self.negative && !self.overflow && !self.target.is_zero()
    }
}

/// Decodes `bits` into a target.
pub fn decode_compact(bits: u32) -> CompactTarget {
    let size = bits >> 24;
    let mantissa = bits & MANTISSA_MASK;

    let negative = mantissa != 0 && bits & SIGN_BIT != 0;
    let overflow = mantissa != 0
        && (size > 34 || (mantissa > 0xff && size > 33) || (mantissa > 0xffff && size > 32));

    let target = if mantissa == 0 || overflow {
        U256::zero()
    } else if size <= 3 {
        U256::from(mantissa >> (8 * (3 - size)))
    } else {
        U256::from(mantissa) << (8 * (size as usize - 3))
    };

    CompactTarget {
        target,
        negative,
        overflow,
    }
}

/// Decodes `bits`, returning `None` for negative, overflowing or zero targets.
pub fn target_from_bits(bits: u32) -> Option<U256> {
    let compact = decode_compact(bits);
    compact.is_valid().then_some(compact.target)
}

/// Encodes `target` into its compact form.
pub fn encode_compact(target: U256) -> u32 {
    let mut size = (target.bits() + 7) / 8;
    let mut mantissa = if size <= 3 {
        (target.low_u64() << (8 * (3 - size))) as u32
    } else {
        (target >> (8 * (size - 3))).low_u64() as u32
    };

    // keep the sign bit clear
    if mantissa & SIGN_BIT != 0 {
        mantissa >>= 8;
        size += 1;
    }

    mantissa | ((size as u32) << 24)
}
