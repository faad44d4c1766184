//! Ports (Hexagonal Architecture) for the mainchain subsystem.

pub mod outbound;

pub use outbound::*;
