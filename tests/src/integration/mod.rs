//! Cross-subsystem integration: a simulated block-processing driver and the
//! flows run against it.

mod flows;

pub use driver::*;
