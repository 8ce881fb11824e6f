use tlbsim::common::PhysAddr;
use tlbsim::config::{Config, MemoryConfig, TlbConfig};
use tlbsim::Simulator;

pub const PAGE_BITS: u32 = 12;
pub const MAPPED_PAGES: u64 = 64;

pub struct TestHarness {
    pub sim: Simulator,
}

impl TestHarness {
    /// Simulator with `l1`/`l2` slots and VPNs `0..MAPPED_PAGES` mapped to
    /// `ppn_of(vpn)`.
    pub fn new(l1_entries: usize, l2_entries: usize) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let config = Config {
            tlb: TlbConfig {
                l1_entries,
                l2_entries,
                page_bits: PAGE_BITS,
                va_bits: 32,
                l1_latency_ns: 1,
                l2_latency_ns: 4,
            },
            memory: MemoryConfig {
                page_walk_latency_ns: 100,
                page_fault_latency_ns: 0,
                dram_write_latency_ns: 50,
                frame_count: 0,
                demand_paging: false,
                record_writebacks: true,
            },
        };
        let mut sim = Simulator::new(&config).expect("valid test config");
        for vpn in 0..MAPPED_PAGES {
            sim.page_table.map(vpn, ppn_of(vpn), true);
        }
        Self { sim }
    }

    pub fn addr(vpn: u64, offset: u64) -> u64 {
        (vpn << PAGE_BITS) | offset
    }

    pub fn read(&mut self, vpn: u64) -> PhysAddr {
        self.sim.read(Self::addr(vpn, 0)).expect("mapped page")
    }

    pub fn write(&mut self, vpn: u64) -> PhysAddr {
        self.sim.write(Self::addr(vpn, 0)).expect("mapped page")
    }
}

pub fn ppn_of(vpn: u64) -> u64 {
    0x8_0000 + vpn * 3
}

pub fn page_base(vpn: u64) -> PhysAddr {
    PhysAddr(ppn_of(vpn) << PAGE_BITS)
}
