//! Two-level TLB simulator library.
//!
//! This crate models hardware-assisted virtual-to-physical address translation
//! for a memory-hierarchy teaching simulator:
//! 1. **Core:** a small, fast L1 TLB backed by a larger, slower L2 TLB, both fully
//!    associative with strict LRU replacement, dirty tracking and a write-back
//!    cascade from L1 into L2 and from L2 into the backing store.
//! 2. **System:** the collaborators the TLB consumes (simulated clock, page-table
//!    walker, DRAM write-back sink) as traits, with simple reference implementations.
//! 3. **Simulation:** `Simulator` (owns the clock, TLB and collaborators), trace
//!    parsing, configuration and statistics.

/// Common types (addresses, access types, page geometry).
pub mod common;
/// Simulator configuration (defaults, JSON loading, validation).
pub mod config;
/// Translation hardware: TLB levels and the translation engine.
pub mod core;
/// Simulation: `Simulator` and memory trace parsing.
pub mod sim;
/// Hit/miss/invalidation counters and reporting.
pub mod stats;
/// External collaborators: clock, page table, backing store.
pub mod system;

/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// The translation engine.
pub use crate::core::mmu::TlbHierarchy;
/// Top-level simulator; owns the clock, TLB, page table and DRAM sink.
pub use crate::sim::simulator::Simulator;
