//! Page-table walker.
//!
//! The TLB only sees the [`PageTableWalker`] trait. [`PageTable`] is a flat
//! reference implementation: explicit mappings plus optional demand paging
//! that hands out frames in order. It does not model eviction of frames or a
//! multi-level table layout.

use std::collections::HashMap;

use thiserror::Error;

use super::clock::Clock;
use crate::common::{AccessType, PageGeometry, PhysAddr, VirtAddr};
use crate::config::MemoryConfig;

/// Resolves a virtual address that missed in every TLB level.
pub trait PageTableWalker {
    type Error;

    /// Translates `vaddr`; may advance `clock` by its own latency.
    fn resolve(
        &mut self,
        vaddr: VirtAddr,
        access: AccessType,
        clock: &mut dyn Clock,
    ) -> Result<PhysAddr, Self::Error>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalkError {
    #[error("page fault: {0:#x} is not mapped")]
    Unmapped(u64),
    #[error("protection fault: write to read-only page at {0:#x}")]
    ProtectionViolation(u64),
    #[error("out of physical frames resolving {0:#x}")]
    OutOfFrames(u64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Mapping {
    ppn: u64,
    writable: bool,
}

pub struct PageTable {
    geometry: PageGeometry,
    mappings: HashMap<u64, Mapping>,
    walk_latency: u64,
    fault_latency: u64,
    demand_paging: bool,
    next_frame: u64,
    frame_count: u64,
    walks: u64,
    faults: u64,
}

impl PageTable {
    pub fn new(geometry: PageGeometry, config: &MemoryConfig) -> Self {
        Self {
            geometry,
            mappings: HashMap::new(),
            walk_latency: config.page_walk_latency_ns,
            fault_latency: config.page_fault_latency_ns,
            demand_paging: config.demand_paging,
            next_frame: 0,
            frame_count: config.frame_count,
            walks: 0,
            faults: 0,
        }
    }

    /// Installs (or replaces) the mapping for `vpn`.
    pub fn map(&mut self, vpn: u64, ppn: u64, writable: bool) {
        self.mappings.insert(vpn, Mapping { ppn, writable });
    }

    pub fn unmap(&mut self, vpn: u64) -> bool {
        self.mappings.remove(&vpn).is_some()
    }

    pub fn lookup(&self, vpn: u64) -> Option<u64> {
        self.mappings.get(&vpn).map(|m| m.ppn)
    }

    /// Number of resolves performed.
    pub fn walks(&self) -> u64 {
        self.walks
    }

    /// Number of frames allocated by demand paging.
    pub fn faults(&self) -> u64 {
        self.faults
    }

    pub fn reset(&mut self) {
        self.mappings.clear();
        self.next_frame = 0;
        self.walks = 0;
        self.faults = 0;
    }

    fn allocate(&mut self, vpn: u64, vaddr: VirtAddr) -> Result<Mapping, WalkError> {
        if !self.demand_paging {
            return Err(WalkError::Unmapped(vaddr.val()));
        }
        if self.next_frame >= self.frame_count {
            return Err(WalkError::OutOfFrames(vaddr.val()));
        }
        let mapping = Mapping {
            ppn: self.next_frame,
            writable: true,
        };
        self.next_frame += 1;
        self.faults += 1;
        self.mappings.insert(vpn, mapping);
        log::debug!("demand-mapped vpn {:#x} -> ppn {:#x}", vpn, mapping.ppn);
        Ok(mapping)
    }
}

impl PageTableWalker for PageTable {
    type Error = WalkError;

    fn resolve(
        &mut self,
        vaddr: VirtAddr,
        access: AccessType,
        clock: &mut dyn Clock,
    ) -> Result<PhysAddr, WalkError> {
        clock.advance(self.walk_latency);
        self.walks += 1;

        let vpn = self.geometry.vpn(vaddr);
        let mapping = match self.mappings.get(&vpn) {
            Some(&m) => m,
            None => {
                let m = self.allocate(vpn, vaddr)?;
                clock.advance(self.fault_latency);
                m
            }
        };

        if access.is_write() && !mapping.writable {
            return Err(WalkError::ProtectionViolation(vaddr.val()));
        }

        Ok(self.geometry.compose(mapping.ppn, self.geometry.offset(vaddr)))
    }
}
