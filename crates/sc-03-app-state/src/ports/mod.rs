//! Ports layer for the Application State subsystem.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
