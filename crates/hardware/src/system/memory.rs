use super::clock::Clock;
use crate::common::PhysAddr;

/// Receives pages whose translation was dirty when it left the TLB.
///
/// Write-backs are fire-and-forget: the TLB does not inspect any result.
pub trait WritebackSink {
    fn write_back(&mut self, page_base: PhysAddr, clock: &mut dyn Clock);
}

/// DRAM model that charges a fixed write latency per flushed page.
pub struct Dram {
    write_latency: u64,
    writeback_count: u64,
    /// Flushed page bases, kept only when history was requested.
    history: Option<Vec<PhysAddr>>,
}

impl Dram {
    /// Counts write-backs without remembering which pages were flushed.
    pub fn new(write_latency: u64) -> Self {
        Self {
            write_latency,
            writeback_count: 0,
            history: None,
        }
    }

    /// Like [`Dram::new`], but also records every flushed page base.
    pub fn with_history(write_latency: u64) -> Self {
        Self {
            history: Some(Vec::new()),
            ..Self::new(write_latency)
        }
    }

    /// Page bases flushed so far, oldest first. Empty unless built with
    /// [`Dram::with_history`].
    pub fn writebacks(&self) -> &[PhysAddr] {
        self.history.as_deref().unwrap_or(&[])
    }

    pub fn writeback_count(&self) -> u64 {
        self.writeback_count
    }

    pub fn reset(&mut self) {
        self.writeback_count = 0;
        if let Some(history) = self.history.as_mut() {
            history.clear();
        }
    }
}

impl WritebackSink for Dram {
    fn write_back(&mut self, page_base: PhysAddr, clock: &mut dyn Clock) {
        clock.advance(self.write_latency);
        log::debug!("DRAM write-back of page {:#x}", page_base.val());
        self.writeback_count += 1;
        if let Some(history) = self.history.as_mut() {
            history.push(page_base);
        }
    }
}
