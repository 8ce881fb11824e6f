//! Common types shared by the TLB, its collaborators and the simulator.

/// Virtual/physical address newtypes and page geometry.
pub mod addr;

pub use self::addr::{AccessType, PageGeometry, PhysAddr, VirtAddr};
