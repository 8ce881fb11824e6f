//! A single fully associative TLB level.
//!
//! Slots are allocated once and reused; a slot is occupied when `valid` is set.
//! Replacement is strict LRU on `last_access`, preferring free slots.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TlbEntry {
    pub valid: bool,
    /// The mapped page was written since its last flush.
    pub dirty: bool,
    /// Simulated time of the last translation through this slot.
    pub last_access: u64,
    pub vpn: u64,
    pub ppn: u64,
}

/// Slot chosen for replacement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Victim {
    pub slot: usize,
    /// Set when the slot held a dirty translation that must be written back
    /// before the slot is refilled.
    pub writeback: Option<TlbEntry>,
}

pub struct Tlb {
    entries: Vec<TlbEntry>,
}

impl Tlb {
    pub fn new(size: usize) -> Self {
        Self {
            entries: vec![TlbEntry::default(); size],
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[TlbEntry] {
        &self.entries
    }

    pub fn entry(&self, slot: usize) -> &TlbEntry {
        &self.entries[slot]
    }

    /// Number of valid slots.
    pub fn occupancy(&self) -> usize {
        self.entries.iter().filter(|e| e.valid).count()
    }

    pub fn find(&self, vpn: u64) -> Option<usize> {
        self.entries.iter().position(|e| e.valid && e.vpn == vpn)
    }

    /// Picks the slot to fill next: the first free slot, otherwise the least
    /// recently used one (lowest index on equal timestamps).
    pub fn select_victim(&self) -> Victim {
        if let Some(slot) = self.entries.iter().position(|e| !e.valid) {
            return Victim {
                slot,
                writeback: None,
            };
        }

        let mut slot = 0;
        let mut oldest = u64::MAX;
        for (i, e) in self.entries.iter().enumerate() {
            if e.last_access < oldest {
                oldest = e.last_access;
                slot = i;
            }
        }

        let entry = self.entries[slot];
        Victim {
            slot,
            writeback: (entry.valid && entry.dirty).then_some(entry),
        }
    }

    pub fn fill(&mut self, slot: usize, dirty: bool, vpn: u64, ppn: u64, now: u64) {
        self.entries[slot] = TlbEntry {
            valid: true,
            dirty,
            last_access: now,
            vpn,
            ppn,
        };
    }

    /// Refreshes the LRU timestamp of an occupied slot.
    #[inline]
    pub fn touch(&mut self, slot: usize, now: u64) {
        self.entries[slot].last_access = now;
    }

    pub fn set_dirty(&mut self, slot: usize, dirty: bool) {
        self.entries[slot].dirty = dirty;
    }

    /// Empties `slot`, returning what it held.
    pub fn invalidate(&mut self, slot: usize) -> TlbEntry {
        std::mem::take(&mut self.entries[slot])
    }

    pub fn reset(&mut self) {
        self.entries.fill(TlbEntry::default());
    }
}
