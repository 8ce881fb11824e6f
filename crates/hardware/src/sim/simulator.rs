//! Top-level simulator.
//!
//! Bundles one [`TlbHierarchy`] with its own clock, page table and DRAM sink so
//! that independent instances never share state.

use serde::Serialize;

use super::trace::TraceOp;
use crate::common::{AccessType, PhysAddr, VirtAddr};
use crate::config::{Config, ConfigError};
use crate::core::mmu::TlbHierarchy;
use crate::stats::TlbStats;
use crate::system::{Clock, Dram, PageTable, SimClock, WalkError};

pub struct Simulator {
    pub clock: SimClock,
    pub tlb: TlbHierarchy,
    pub page_table: PageTable,
    pub dram: Dram,
}

/// Outcome of running a trace.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub accesses: u64,
    pub invalidations: u64,
    /// Accesses rejected by the page table.
    pub faults: u64,
    pub elapsed_ns: u64,
    pub writebacks: u64,
    pub page_walks: u64,
    pub tlb: TlbStats,
}

impl Simulator {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let tlb = TlbHierarchy::new(&config.tlb)?;
        let page_table = PageTable::new(*tlb.geometry(), &config.memory);
        Ok(Self {
            clock: SimClock::new(),
            tlb,
            page_table,
            dram: if config.memory.record_writebacks {
                Dram::with_history(config.memory.dram_write_latency_ns)
            } else {
                Dram::new(config.memory.dram_write_latency_ns)
            },
        })
    }

    /// Resets the TLB, clock and collaborators to their initial state.
    pub fn reset(&mut self) {
        self.tlb.init();
        self.clock.reset();
        self.page_table.reset();
        self.dram.reset();
    }

    pub fn access(&mut self, vaddr: VirtAddr, access: AccessType) -> Result<PhysAddr, WalkError> {
        self.tlb.translate(
            vaddr,
            access,
            &mut self.clock,
            &mut self.page_table,
            &mut self.dram,
        )
    }

    pub fn read(&mut self, vaddr: u64) -> Result<PhysAddr, WalkError> {
        self.access(VirtAddr::new(vaddr), AccessType::Read)
    }

    pub fn write(&mut self, vaddr: u64) -> Result<PhysAddr, WalkError> {
        self.access(VirtAddr::new(vaddr), AccessType::Write)
    }

    pub fn invalidate(&mut self, vpn: u64) {
        self.tlb.invalidate(vpn, &mut self.clock, &mut self.dram);
    }

    pub fn elapsed_ns(&self) -> u64 {
        self.clock.now()
    }

    /// Replays `ops` in order. Faulting accesses are counted and skipped.
    pub fn run(&mut self, ops: &[TraceOp]) -> RunSummary {
        let mut summary = RunSummary::default();
        for op in ops {
            match *op {
                TraceOp::Access(vaddr, access) => {
                    summary.accesses += 1;
                    if let Err(e) = self.access(vaddr, access) {
                        log::warn!("{}", e);
                        summary.faults += 1;
                    }
                }
                TraceOp::Invalidate(vpn) => {
                    summary.invalidations += 1;
                    self.invalidate(vpn);
                }
            }
        }
        summary.elapsed_ns = self.elapsed_ns();
        summary.writebacks = self.dram.writeback_count();
        summary.page_walks = self.page_table.walks();
        summary.tlb = self.tlb.stats();
        summary
    }
}
