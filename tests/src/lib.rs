//! # Sidechain Core Test Suite
//!
//! Unified test crate exercising the subsystems together.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── driver.rs   # BlockProcessor: the block-processing loop of a node
//!     └── flows.rs    # End-to-end scenarios (apply, reject, crash, reorg)
//!
//! tests/benches/
//! └── subsystem_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sc-tests
//! RUST_LOG=debug cargo test -p sc-tests integration:: -- --nocapture
//! cargo bench -p sc-tests
//! ```

pub mod integration;

use std::sync::Once;

static TRACING: Once = Once::new();

/// Installs a test-friendly `tracing` subscriber honouring `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
