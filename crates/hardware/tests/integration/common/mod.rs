//! Shared helpers for integration tests.

/// Simulator harness with deterministic mappings.
pub mod harness;
