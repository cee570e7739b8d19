//! Integration tests for decoding, compaction and checksums.

use defrag_core::{
    checksum, compact_input, decode_layout, decode_str, dump, CompactionConfig, CompactionMode,
    Compactor, CoreError, SegmentList,
};
use proptest::prelude::*;

const EXAMPLE: &str = "2333133121414131402";

fn compacted(digits: &str, config: CompactionConfig) -> SegmentList {
    let mut list = decode_str(digits).unwrap();
    Compactor::new(config).compact(&mut list).unwrap();
    list
}

fn digits_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec((1u8..=9, 0u8..=9), 1..40).prop_map(|pairs| {
        pairs
            .iter()
            .flat_map(|(file, free)| [char::from(b'0' + file), char::from(b'0' + free)])
            .collect()
    })
}

#[test]
fn example_whole_file() {
    let outcome = compact_input(b"2333133121414131402\n", CompactionConfig::new()).unwrap();
    assert_eq!(outcome.checksum, 2858);
    assert_eq!(outcome.report.files_relocated, 4);
    assert_eq!(outcome.report.size_before, 42);
    assert_eq!(outcome.report.size_after, 40);
}

#[test]
fn example_fragment() {
    let outcome = compact_input(EXAMPLE.as_bytes(), CompactionConfig::fragmenting()).unwrap();
    assert_eq!(outcome.checksum, 1928);
    assert_eq!(outcome.layout.occupied(), 28);
}

#[test]
fn unmovable_layout_keeps_checksum() {
    let before = checksum(&decode_str("12345").unwrap()).unwrap();
    let after = checksum(&compacted("12345", CompactionConfig::new())).unwrap();
    assert_eq!(before, 132);
    assert_eq!(after, 132);
}

#[test]
fn single_file_is_untouched() {
    let outcome = compact_input(b"5", CompactionConfig::new()).unwrap();
    assert_eq!(outcome.checksum, 0);
    assert_eq!(outcome.report.iterations, 0);
    assert_eq!(outcome.layout.total_size(), 5);
}

#[test]
fn line_endings_are_accepted() {
    for input in [&b"12345"[..], b"12345\n", b"12345\r\n", b"12345\r"] {
        let list = decode_layout(input).unwrap();
        assert_eq!(list.total_size(), 15);
    }
}

#[test]
fn malformed_input_is_rejected() {
    for input in [&b"12a45"[..], b"", b"\n", b"1203", b"12 3", b"\r\n"] {
        let err = decode_layout(input).unwrap_err();
        assert!(
            matches!(err, CoreError::MalformedInput { .. }),
            "expected malformed input for {:?}, got {err}",
            String::from_utf8_lossy(input)
        );
    }
}

#[test]
fn dump_addresses_are_increasing() {
    let list = compacted(EXAMPLE, CompactionConfig::new());
    let records: Vec<_> = dump(&list).collect();
    for pair in records.windows(2) {
        assert_eq!(
            pair[1].address,
            pair[0].address + pair[0].length + pair[0].trailing_free
        );
    }
    let ids: Vec<u64> = records.iter().map(|r| r.id.as_u64()).collect();
    assert_eq!(ids, vec![0, 9, 2, 1, 7, 4, 3, 5, 6, 8]);
}

#[test]
fn verified_pass_succeeds() {
    for mode in [CompactionMode::WholeFile, CompactionMode::Fragment] {
        let config = CompactionConfig::new().mode(mode).verify_layout(true);
        let outcome = compact_input(EXAMPLE.as_bytes(), config).unwrap();
        assert!(outcome.layout.validate().is_ok());
    }
}

proptest! {
    #[test]
    fn compaction_conserves_units(digits in digits_strategy(), fragment in any::<bool>()) {
        let config = if fragment {
            CompactionConfig::fragmenting()
        } else {
            CompactionConfig::new()
        };
        let original = decode_str(&digits).unwrap();
        let list = compacted(&digits, config);

        prop_assert!(list.validate().is_ok());
        prop_assert_eq!(list.occupied(), original.occupied());
        prop_assert!(list.total_size() <= original.total_size());
    }

    #[test]
    fn whole_files_stay_whole(digits in digits_strategy()) {
        let original = decode_str(&digits).unwrap();
        let list = compacted(&digits, CompactionConfig::new());

        let mut lengths: Vec<(u64, u64)> =
            list.walk().map(|s| (s.id().as_u64(), s.length())).collect();
        lengths.sort_unstable();
        let expected: Vec<(u64, u64)> =
            original.walk().map(|s| (s.id().as_u64(), s.length())).collect();
        prop_assert_eq!(lengths, expected);
    }

    #[test]
    fn second_pass_changes_nothing(digits in digits_strategy(), fragment in any::<bool>()) {
        let compactor = Compactor::new(CompactionConfig::new().mode(if fragment {
            CompactionMode::Fragment
        } else {
            CompactionMode::WholeFile
        }));
        let mut list = decode_str(&digits).unwrap();
        compactor.compact(&mut list).unwrap();
        let first = checksum(&list).unwrap();

        let report = compactor.compact(&mut list).unwrap();
        prop_assert_eq!(report.moves(), 0);
        prop_assert_eq!(checksum(&list).unwrap(), first);
    }
}
