//! Ports layer for the Mempool subsystem.

pub mod outbound;

pub use outbound::*;
