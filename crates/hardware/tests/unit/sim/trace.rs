use pretty_assertions::assert_eq;
use rstest::rstest;
use std::io::Write;
use tlbsim::common::{AccessType, VirtAddr};
use tlbsim::sim::trace::{TraceError, TraceOp, load_trace, parse_trace};

#[test]
fn parses_all_operations() {
    let input = "\
# warm-up
R 0x1000
w 4096   # store

I 0x1
W 0xdead_b000
";
    assert_eq!(
        parse_trace(input).unwrap(),
        vec![
            TraceOp::Access(VirtAddr(0x1000), AccessType::Read),
            TraceOp::Access(VirtAddr(4096), AccessType::Write),
            TraceOp::Invalidate(0x1),
            TraceOp::Access(VirtAddr(0xdead_b000), AccessType::Write),
        ]
    );
}

#[rstest]
#[case("X 0x10", 1)]
#[case("R", 1)]
#[case("R 0x10 extra", 1)]
#[case("R 0x10\nW zz", 2)]
#[case("# header\n\nR 0xfffffffffffffffff", 3)]
fn reports_offending_line(#[case] input: &str, #[case] expected: usize) {
    match parse_trace(input) {
        Err(TraceError::Malformed { line, .. }) => assert_eq!(line, expected),
        other => panic!("expected malformed trace, got {:?}", other),
    }
}

#[test]
fn loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "R 0x2000").unwrap();
    writeln!(file, "I 2").unwrap();

    let ops = load_trace(file.path()).unwrap();
    assert_eq!(ops.len(), 2);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        load_trace(dir.path().join("missing.trace")),
        Err(TraceError::Io { .. })
    ));
}
