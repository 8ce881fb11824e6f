//! # Simulation Unit Tests
//!
//! Reference collaborators (clock, page table, DRAM) and trace parsing.

/// Trace file parsing.
pub mod trace;
