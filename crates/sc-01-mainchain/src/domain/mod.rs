//! # Domain Layer - Mainchain Subsystem
//!
//! ## Components
//!
//! - `header`: MainchainHeader codec (parse, canonical bytes, memoized hash)
//! - `varint`: CompactSize length prefixes
//! - `difficulty`: compact `bits` <-> 256-bit target
//! - `params`: NetworkConsensusParams and network presets
//! - `validator`: MainchainHeaderValidator
//! - `errors`: ParseError, HeaderValidationError, ParamsError

pub mod difficulty;
pub mod errors;
pub mod header;
pub mod params;
pub mod validator;
pub mod varint;

pub use difficulty::*;
pub use errors::*;
pub use header::*;
pub use params::*;
pub use validator::*;
pub use varint::{read_varint, varint_size, write_varint, VarInt};
