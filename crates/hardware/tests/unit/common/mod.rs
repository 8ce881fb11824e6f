//! Page geometry tests.

use rstest::rstest;
use tlbsim::common::{PageGeometry, PhysAddr, VirtAddr};

#[rstest]
#[case(12, 48, 0x0000_7fff_1234_5678, 0x7_fff1_2345, 0x678)]
#[case(12, 32, 0xdead_beef_0000_1abc, 0x1, 0xabc)]
#[case(16, 32, 0x0012_3456, 0x12, 0x3456)]
#[case(12, 64, u64::MAX, (1u64 << 52) - 1, 0xfff)]
fn decomposes_virtual_address(
    #[case] page_bits: u32,
    #[case] va_bits: u32,
    #[case] raw: u64,
    #[case] vpn: u64,
    #[case] offset: u64,
) {
    let geo = PageGeometry::new(page_bits, va_bits);
    let va = geo.mask(VirtAddr::new(raw));
    assert_eq!(geo.vpn(va), vpn);
    assert_eq!(geo.offset(va), offset);
}

#[test]
fn mask_drops_bits_above_address_space() {
    let geo = PageGeometry::new(12, 32);
    assert_eq!(geo.mask(VirtAddr(0xffff_ffff_8000_0001)), VirtAddr(0x8000_0001));
}

#[test]
fn compose_and_page_base() {
    let geo = PageGeometry::new(12, 48);
    assert_eq!(geo.page_base(0x1234), PhysAddr(0x123_4000));
    assert_eq!(geo.compose(0x1234, 0x56), PhysAddr(0x123_4056));
    assert_eq!(geo.ppn(PhysAddr(0x123_4fff)), 0x1234);
    assert_eq!(geo.page_size(), 4096);
}
