use super::{DRAM_LATENCY, Fixture, L1_LATENCY, L2_LATENCY, page_base};

#[test]
fn invalidated_page_misses_both_levels() {
    let mut fx = Fixture::new(2, 4);
    fx.read(1);
    fx.invalidate(1);

    assert_eq!(fx.tlb.l1_invalidations(), 1);
    assert_eq!(fx.tlb.l2_invalidations(), 1);

    fx.read(1);
    assert_eq!(fx.tlb.l1_misses(), 2);
    assert_eq!(fx.tlb.l2_misses(), 2);
    assert_eq!(fx.page_table.walks(), 2);
}

#[test]
fn l2_only_copy_is_invalidated() {
    let mut fx = Fixture::new(1, 4);
    fx.read(1);
    fx.read(2);
    assert!(fx.l1_slot(1).is_none());

    fx.invalidate(1);
    assert_eq!(fx.tlb.l1_invalidations(), 0);
    assert_eq!(fx.tlb.l2_invalidations(), 1);
    assert!(fx.l2_slot(1).is_none());
    assert!(fx.l2_slot(2).is_some());
}

#[test]
fn unknown_page_is_a_no_op_but_still_costs_lookups() {
    let mut fx = Fixture::new(2, 2);
    fx.read(1);
    let before = fx.now();

    fx.invalidate(42);

    assert_eq!(fx.now() - before, L1_LATENCY + L2_LATENCY);
    assert_eq!(fx.tlb.l1_invalidations(), 0);
    assert_eq!(fx.tlb.l2_invalidations(), 0);
    assert_eq!(fx.tlb.l1().occupancy(), 1);
}

#[test]
fn dirty_l1_line_is_flushed_before_invalidation() {
    let mut fx = Fixture::new(2, 2);
    fx.write(1);
    let before = fx.now();

    fx.invalidate(1);

    assert_eq!(fx.dram.writebacks(), &[page_base(1)]);
    assert_eq!(fx.now() - before, L1_LATENCY + L2_LATENCY + DRAM_LATENCY);
    assert_eq!(fx.tlb.l1().occupancy(), 0);
}

#[test]
fn clean_line_is_dropped_silently() {
    let mut fx = Fixture::new(2, 2);
    fx.read(1);
    fx.invalidate(1);
    assert!(fx.dram.writebacks().is_empty());
}

#[test]
fn dirty_l2_copy_is_dropped_without_writeback() {
    let mut fx = Fixture::new(1, 2);
    fx.write(1);
    // The cascade leaves page 1 dirty in L2 only.
    fx.read(2);
    assert!(fx.l2_dirty(1));
    assert!(fx.l1_slot(1).is_none());
    let before = fx.now();

    fx.invalidate(1);

    assert!(fx.dram.writebacks().is_empty());
    assert_eq!(fx.now() - before, L1_LATENCY + L2_LATENCY);
    assert_eq!(fx.tlb.l2_invalidations(), 1);
    assert!(fx.l2_slot(1).is_none());
}
