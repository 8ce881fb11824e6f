//! Collaborators consumed by the TLB.
//!
//! The translation engine never owns these: callers pass them in per
//! operation, which keeps every simulator instance independent.

/// Simulated nanosecond clock.
pub mod clock;
/// Backing store receiving flushed dirty pages.
pub mod memory;
/// Page-table walker resolving full TLB misses.
pub mod page_table;

pub use self::clock::{Clock, SimClock};
pub use self::memory::{Dram, WritebackSink};
pub use self::page_table::{PageTable, PageTableWalker, WalkError};
