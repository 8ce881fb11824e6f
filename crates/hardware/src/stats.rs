//! TLB statistics.

use serde::Serialize;

/// Counters for a single TLB level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LevelStats {
    pub hits: u64,
    pub misses: u64,
    pub invalidations: u64,
}

impl LevelStats {
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of lookups that hit, or 0 when the level was never consulted.
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.lookups();
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }
}

/// Snapshot of both levels' counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TlbStats {
    pub l1: LevelStats,
    pub l2: LevelStats,
}

impl TlbStats {
    pub fn print(&self) {
        println!("\n==========================================================");
        println!("TLB STATISTICS");
        println!("==========================================================");
        for (name, level) in [("L1", &self.l1), ("L2", &self.l2)] {
            println!(
                "  {name} hits: {:<12} misses: {:<12} invalidations: {:<8} hit rate: {:>6.2}%",
                level.hits,
                level.misses,
                level.invalidations,
                level.hit_rate() * 100.0
            );
        }
        println!("==========================================================");
    }
}
