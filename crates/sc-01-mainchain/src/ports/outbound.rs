//! Outbound (Driven) ports for mainchain header validation.
//!
//! The Equihash solver/verifier and the wall clock live outside this crate.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Unix time in seconds.
pub type UnixTime = u64;

/// Equihash solution verifier.
///
/// Implementations wrap a concrete Equihash library; this crate only decides
/// what is verified (header bytes without the solution) and with which (n, k).
pub trait ProofOfWorkVerifier: Send + Sync {
    /// Returns true if `solution` is a valid (n, k) solution for `message`.
    fn verify(&self, message: &[u8], solution: &[u8], n: u32, k: u32) -> bool;
}

impl<V: ProofOfWorkVerifier + ?Sized> ProofOfWorkVerifier for Arc<V> {
    fn verify(&self, message: &[u8], solution: &[u8], n: u32, k: u32) -> bool {
        (**self).verify(message, solution, n, k)
    }
}

/// Time source for the future-timestamp check.
///
/// Abstracted to allow testing with deterministic time.
pub trait TimeSource: Send + Sync {
    /// Returns the current Unix time in seconds.
    fn now(&self) -> UnixTime;
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> UnixTime {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

/// Mock time source for testing.
#[derive(Debug, Default)]
pub struct MockTimeSource {
    time: AtomicU64,
}

impl MockTimeSource {
    pub fn new(initial: UnixTime) -> Self {
        Self {
            time: AtomicU64::new(initial),
        }
    }

    pub fn advance(&self, secs: u64) {
        self.time.fetch_add(secs, Ordering::SeqCst);
    }

    pub fn set(&self, time: UnixTime) {
        self.time.store(time, Ordering::SeqCst);
    }
}

impl TimeSource for MockTimeSource {
    fn now(&self) -> UnixTime {
        self.time.load(Ordering::SeqCst)
    }
}

/// Arguments of one `verify` call seen by `MockPowVerifier`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyCall {
    pub message: Vec<u8>,
    pub solution: Vec<u8>,
    pub n: u32,
    pub k: u32,
}

/// Mock Equihash verifier with a fixed answer that records its calls.
#[derive(Debug, Default)]
pub struct MockPowVerifier {
    accept: bool,
    calls: Mutex<Vec<VerifyCall>>,
}

impl MockPowVerifier {
    pub fn accepting() -> Self {
        Self {
            accept: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            accept: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<VerifyCall> {
        self.calls.lock().clone()
    }
}

impl ProofOfWorkVerifier for MockPowVerifier {
    fn verify(&self, message: &[u8], solution: &[u8], n: u32, k: u32) -> bool {
        self.calls.lock().push(VerifyCall {
            message: message.to_vec(),
            solution: solution.to_vec(),
            n,
            k,
        });
        self.accept
    }
}
