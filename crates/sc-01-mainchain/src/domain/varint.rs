//! # CompactSize Variable-Length Integers
//!
//! Length prefix of the header's Equihash solution.
//!
//! ```text
//! first byte  | value
//! ------------|------------------------------------
//! 0x00..=0xFC | the byte itself
//! 0xFD        | next 2 bytes, little-endian (u16)
//! 0xFE        | next 4 bytes, little-endian (u32)
//! 0xFF        | next 8 bytes, little-endian (u64)
//! ```
//!
//! Multi-byte payloads are stored byte-reversed relative to their natural
//! (big-endian) order. Encodings must be minimal: a value that fits a shorter
//! form is rejected as `InvalidVarInt`.

use super::errors::ParseError;

const PREFIX_U16: u8 = 0xFD;
const PREFIX_U32: u8 = 0xFE;
const PREFIX_U64: u8 = 0xFF;

/// A decoded CompactSize value and the number of bytes it occupied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VarInt {
    pub value: u64,
    pub size: usize,
}

/// Decodes a CompactSize integer starting at `offset`.
pub fn read_varint(bytes: &[u8], offset: usize) -> Result<VarInt, ParseError> {
    let first = *bytes.get(offset).ok_or(ParseError::Truncated {
        offset,
        needed: 1,
        available: 0,
    })?;

    let (width, minimum) = match first {
        PREFIX_U16 => (2, u64::from(PREFIX_U16)),
        PREFIX_U32 => (4, 0x1_0000),
        PREFIX_U64 => (8, 0x1_0000_0000),
        value => {
            return Ok(VarInt {
                value: u64::from(value),
                size: 1,
            })
        }
    };

    let start = offset + 1;
    let payload = bytes
        .get(start..start + width)
        .ok_or(ParseError::Truncated {
            offset: start,
            needed: width,
            available: bytes.len().saturating_sub(start),
        })?;

    let mut buf = [0u8; 8];
    buf[..width].copy_from_slice(payload);
    let value = u64::from_le_bytes(buf);

    if value < minimum {
        return Err(ParseError::InvalidVarInt { offset });
    }

    Ok(VarInt {
        value,
        size: 1 + width,
    })
}

/// Number of bytes `value` occupies when encoded.
pub fn varint_size(value: u64) -> usize {
    match value {
        0..=0xFC => 1,
        0xFD..=0xFFFF => 3,
        0x1_0000..=0xFFFF_FFFF => 5,
        _ => 9,
    }
}

/// Appends the minimal encoding of `value` to `out`.
pub fn write_varint(value: u64, out: &mut Vec<u8>) {
    match varint_size(value) {
        1 => out.push(value as u8),
        3 => {
            out.push(PREFIX_U16);
            out.extend_from_slice(&(value as u16).to_le_bytes());
        }
        5 => {
            out.push(PREFIX_U32);
            out.extend_from_slice(&(value as u32).to_le_bytes());
        }
        _ => {
            out.push(PREFIX_U64);
            out.extend_from_slice(&value.to_le_bytes());
        }
    }
}
