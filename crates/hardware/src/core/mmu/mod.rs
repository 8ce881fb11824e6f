//! Two-level translation engine.
//!
//! Lookups go L1 → L2 → page-table walker. Both levels are fully associative
//! and share the same LRU victim selection. Dirtiness is tracked per level:
//!
//! - a write hit in L1 dirties only the L1 entry;
//! - a dirty L1 victim is absorbed by L2 (the only way an L2 entry becomes dirty);
//! - a dirty L2 victim is flushed to the backing store at `ppn << page_bits`;
//! - an L2 hit promotes the translation into L1 and leaves the L2 copy clean.
//!
//! Entries may be resident in both levels at once. Every lookup charges its
//! fixed latency to the clock before anything else happens: L1 first, then L2
//! on an L1 miss, then whatever the walker charges.

pub mod tlb;

use log::Level;

use self::tlb::{Tlb, TlbEntry};
use crate::common::{AccessType, PageGeometry, PhysAddr, VirtAddr};
use crate::config::{ConfigError, TlbConfig};
use crate::stats::{LevelStats, TlbStats};
use crate::system::{Clock, PageTableWalker, WritebackSink};

const LOOKUP_LOG_LEVEL: Level = if cfg!(feature = "always-trace") {
    Level::Info
} else {
    Level::Trace
};

pub struct TlbHierarchy {
    l1: Tlb,
    l2: Tlb,
    geometry: PageGeometry,
    l1_latency: u64,
    l2_latency: u64,
    l1_stats: LevelStats,
    l2_stats: LevelStats,
}

impl TlbHierarchy {
    /// Builds an initialized engine, rejecting geometries that would leave a
    /// level without slots.
    pub fn new(config: &TlbConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            l1: Tlb::new(config.l1_entries),
            l2: Tlb::new(config.l2_entries),
            geometry: config.geometry(),
            l1_latency: config.l1_latency_ns,
            l2_latency: config.l2_latency_ns,
            l1_stats: LevelStats::default(),
            l2_stats: LevelStats::default(),
        })
    }

    /// Empties both levels and zeroes every counter.
    pub fn init(&mut self) {
        self.l1.reset();
        self.l2.reset();
        self.l1_stats = LevelStats::default();
        self.l2_stats = LevelStats::default();
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn l1(&self) -> &Tlb {
        &self.l1
    }

    pub fn l2(&self) -> &Tlb {
        &self.l2
    }

    /// Translates `vaddr`, filling both levels from `walker` on a full miss.
    ///
    /// A walker error is returned untouched and leaves both levels as they
    /// were after the lookups (counters and clock included).
    pub fn translate<W>(
        &mut self,
        vaddr: VirtAddr,
        access: AccessType,
        clock: &mut dyn Clock,
        walker: &mut W,
        sink: &mut dyn WritebackSink,
    ) -> Result<PhysAddr, W::Error>
    where
        W: PageTableWalker + ?Sized,
    {
        clock.advance(self.l1_latency);
        let vaddr = self.geometry.mask(vaddr);
        let vpn = self.geometry.vpn(vaddr);
        let offset = self.geometry.offset(vaddr);

        if let Some(slot) = self.l1.find(vpn) {
            self.l1_stats.hits += 1;
            self.l1.touch(slot, clock.now());
            if access.is_write() {
                self.l1.set_dirty(slot, true);
            }
            let ppn = self.l1.entry(slot).ppn;
            log::log!(LOOKUP_LOG_LEVEL, "L1 hit vpn={:#x} slot={}", vpn, slot);
            return Ok(self.geometry.compose(ppn, offset));
        }

        self.l1_stats.misses += 1;
        clock.advance(self.l2_latency);

        if let Some(slot) = self.l2.find(vpn) {
            self.l2_stats.hits += 1;
            self.l2.touch(slot, clock.now());
            self.l2.set_dirty(slot, false);
            let ppn = self.l2.entry(slot).ppn;
            log::log!(LOOKUP_LOG_LEVEL, "L2 hit vpn={:#x} slot={}", vpn, slot);

            self.insert_l1(vpn, ppn, access.is_write(), clock, sink);
            return Ok(self.geometry.compose(ppn, offset));
        }

        self.l2_stats.misses += 1;
        log::log!(LOOKUP_LOG_LEVEL, "TLB miss vpn={:#x}, walking page table", vpn);

        let paddr = walker.resolve(vaddr, access, clock)?;
        let ppn = self.geometry.ppn(paddr);

        self.insert_l2(vpn, ppn, false, clock, sink);
        self.insert_l1(vpn, ppn, access.is_write(), clock, sink);

        Ok(paddr)
    }

    /// Drops any translation for `vpn` from both levels.
    ///
    /// A dirty L1 line is flushed to the backing store before it is dropped;
    /// the L2 copy is dropped as is. Unknown VPNs are ignored, but both lookup
    /// latencies are still charged.
    pub fn invalidate(&mut self, vpn: u64, clock: &mut dyn Clock, sink: &mut dyn WritebackSink) {
        clock.advance(self.l1_latency);
        if let Some(slot) = self.l1.find(vpn) {
            let entry = self.l1.invalidate(slot);
            if entry.dirty {
                self.flush(&entry, clock, sink);
            }
            self.l1_stats.invalidations += 1;
            log::debug!("L1 invalidate vpn={:#x} slot={}", vpn, slot);
        }

        clock.advance(self.l2_latency);
        if let Some(slot) = self.l2.find(vpn) {
            self.l2.invalidate(slot);
            self.l2_stats.invalidations += 1;
            log::debug!("L2 invalidate vpn={:#x} slot={}", vpn, slot);
        }
    }

    fn insert_l1(
        &mut self,
        vpn: u64,
        ppn: u64,
        dirty: bool,
        clock: &mut dyn Clock,
        sink: &mut dyn WritebackSink,
    ) {
        let victim = self.l1.select_victim();
        if let Some(evicted) = victim.writeback {
            log::debug!(
                "L1 evicts dirty vpn={:#x} from slot {}",
                evicted.vpn,
                victim.slot
            );
            self.absorb_into_l2(evicted.vpn, evicted.ppn, clock, sink);
        }
        self.l1.fill(victim.slot, dirty, vpn, ppn, clock.now());
    }

    fn insert_l2(
        &mut self,
        vpn: u64,
        ppn: u64,
        dirty: bool,
        clock: &mut dyn Clock,
        sink: &mut dyn WritebackSink,
    ) {
        let victim = self.l2.select_victim();
        if let Some(evicted) = victim.writeback {
            log::debug!(
                "L2 evicts dirty vpn={:#x} from slot {}",
                evicted.vpn,
                victim.slot
            );
            self.flush(&evicted, clock, sink);
        }
        self.l2.fill(victim.slot, dirty, vpn, ppn, clock.now());
    }

    /// Write-back path for a dirty L1 victim.
    fn absorb_into_l2(
        &mut self,
        vpn: u64,
        ppn: u64,
        clock: &mut dyn Clock,
        sink: &mut dyn WritebackSink,
    ) {
        match self.l2.find(vpn) {
            // The PPN is not re-checked; both levels were filled from the same walk.
            Some(slot) => {
                self.l2.set_dirty(slot, true);
                self.l2.touch(slot, clock.now());
            }
            None => self.insert_l2(vpn, ppn, true, clock, sink),
        }
    }

    fn flush(&self, entry: &TlbEntry, clock: &mut dyn Clock, sink: &mut dyn WritebackSink) {
        sink.write_back(self.geometry.page_base(entry.ppn), clock);
    }

    pub fn stats(&self) -> TlbStats {
        TlbStats {
            l1: self.l1_stats,
            l2: self.l2_stats,
        }
    }

    pub fn l1_hits(&self) -> u64 {
        self.l1_stats.hits
    }

    pub fn l1_misses(&self) -> u64 {
        self.l1_stats.misses
    }

    pub fn l1_invalidations(&self) -> u64 {
        self.l1_stats.invalidations
    }

    pub fn l2_hits(&self) -> u64 {
        self.l2_stats.hits
    }

    pub fn l2_misses(&self) -> u64 {
        self.l2_stats.misses
    }

    pub fn l2_invalidations(&self) -> u64 {
        self.l2_stats.invalidations
    }
}
