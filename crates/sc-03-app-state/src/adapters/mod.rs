//! Adapters layer: concrete VersionedStore implementations.

pub mod memory_store;

pub use memory_store::InMemoryVersionedStore;
