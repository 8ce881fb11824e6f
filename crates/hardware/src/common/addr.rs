use serde::Serialize;

/// A virtual address as issued by the simulated program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct VirtAddr(pub u64);

/// A physical (DRAM) address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PhysAddr(pub u64);

impl VirtAddr {
    #[inline(always)]
    pub fn new(addr: u64) -> Self {
        Self(addr)
    }

    #[inline(always)]
    pub fn val(&self) -> u64 {
        self.0
    }
}

impl PhysAddr {
    #[inline(always)]
    pub fn new(addr: u64) -> Self {
        Self(addr)
    }

    #[inline(always)]
    pub fn val(&self) -> u64 {
        self.0
    }
}

/// Kind of memory operation driving a translation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum AccessType {
    Read,
    Write,
}

impl AccessType {
    #[inline(always)]
    pub fn is_write(self) -> bool {
        self == AccessType::Write
    }
}

/// Bit layout of the virtual address space.
///
/// A virtual address of `va_bits` width is split into a virtual page number
/// (the upper `va_bits - page_bits` bits) and a page offset (the low
/// `page_bits` bits).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageGeometry {
    page_bits: u32,
    va_mask: u64,
    page_index_mask: u64,
    offset_mask: u64,
}

impl PageGeometry {
    /// Builds the masks for a `va_bits`-wide address space with `2^page_bits` byte pages.
    ///
    /// Callers are expected to have validated `page_bits < va_bits <= 64`.
    pub fn new(page_bits: u32, va_bits: u32) -> Self {
        let va_mask = low_mask(va_bits);
        Self {
            page_bits,
            va_mask,
            page_index_mask: low_mask(va_bits.saturating_sub(page_bits)),
            offset_mask: low_mask(page_bits),
        }
    }

    #[inline(always)]
    pub fn page_bits(&self) -> u32 {
        self.page_bits
    }

    #[inline(always)]
    pub fn page_size(&self) -> u64 {
        1 << self.page_bits
    }

    /// Drops any address bits outside the virtual address space.
    #[inline(always)]
    pub fn mask(&self, vaddr: VirtAddr) -> VirtAddr {
        VirtAddr(vaddr.0 & self.va_mask)
    }

    #[inline(always)]
    pub fn vpn(&self, vaddr: VirtAddr) -> u64 {
        (vaddr.0 >> self.page_bits) & self.page_index_mask
    }

    #[inline(always)]
    pub fn offset(&self, vaddr: VirtAddr) -> u64 {
        vaddr.0 & self.offset_mask
    }

    /// Physical page number of a physical address.
    #[inline(always)]
    pub fn ppn(&self, paddr: PhysAddr) -> u64 {
        paddr.0 >> self.page_bits
    }

    /// Base address of physical page `ppn`.
    #[inline(always)]
    pub fn page_base(&self, ppn: u64) -> PhysAddr {
        PhysAddr(ppn << self.page_bits)
    }

    /// Physical address of `offset` within physical page `ppn`.
    #[inline(always)]
    pub fn compose(&self, ppn: u64, offset: u64) -> PhysAddr {
        PhysAddr((ppn << self.page_bits) | offset)
    }
}

fn low_mask(bits: u32) -> u64 {
    if bits >= 64 { u64::MAX } else { (1u64 << bits) - 1 }
}
