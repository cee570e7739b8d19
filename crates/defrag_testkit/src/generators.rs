//! Property-based test generators using proptest.
//!
//! Provides strategies for generating layouts that satisfy the input
//! contract: digits only, and every file length at least 1.

use defrag_core::{FileId, Segment, SegmentList};
use proptest::prelude::*;

/// Strategy for a single `(file length, free length)` pair.
pub fn run_pair_strategy() -> impl Strategy<Value = (u8, u8)> {
    (1u8..=9, 0u8..=9)
}

/// Strategy for layout strings with between `min_files` and `max_files` files.
///
/// About half of the generated strings omit the final free-space digit.
pub fn layout_digits_strategy(min_files: usize, max_files: usize) -> impl Strategy<Value = String> {
    (
        prop::collection::vec(run_pair_strategy(), min_files.max(1)..=max_files.max(1)),
        any::<bool>(),
    )
        .prop_map(|(pairs, drop_last_free)| {
            let mut digits = String::with_capacity(pairs.len() * 2);
            for (file, free) in &pairs {
                digits.push(char::from(b'0' + file));
                digits.push(char::from(b'0' + free));
            }
            if drop_last_free {
                digits.pop();
            }
            digits
        })
}

/// Strategy for layouts dominated by small gaps, where most files cannot
/// move.
pub fn tight_layout_strategy(max_files: usize) -> impl Strategy<Value = String> {
    prop::collection::vec((1u8..=9, 0u8..=2), 1..=max_files.max(1)).prop_map(|pairs| {
        pairs
            .iter()
            .flat_map(|(file, free)| [char::from(b'0' + file), char::from(b'0' + free)])
            .collect()
    })
}

/// Strategy for segment lists built directly, bypassing the decoder.
pub fn segment_list_strategy(max_files: usize) -> impl Strategy<Value = SegmentList> {
    prop::collection::vec(run_pair_strategy(), 1..=max_files.max(1)).prop_map(|pairs| {
        let mut list = SegmentList::with_capacity(pairs.len());
        for (id, (file, free)) in pairs.into_iter().enumerate() {
            list.append(Segment::new(
                FileId::new(id as u64),
                u64::from(file),
                u64::from(free),
            ))
            .expect("single-digit segments never overflow");
        }
        list
    })
}

/// Environment variable that switches property tests to
/// [`PropTestConfig::thorough`].
pub const THOROUGH_ENV: &str = "DEFRAG_THOROUGH";

/// Case budget for compactor property tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropTestConfig {
    /// Generated layouts per property.
    pub cases: u32,
    /// Upper bound on shrinking steps after a failure.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Small budget for properties that run on every `cargo test`.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Large budget for cross-checking against the reference model.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 4096,
            max_shrink_iters: 10_000,
        }
    }

    /// [`thorough`](Self::thorough) if [`THOROUGH_ENV`] is set, otherwise
    /// the default budget.
    #[must_use]
    pub fn from_env() -> Self {
        Self::select(std::env::var_os(THOROUGH_ENV).is_some())
    }

    fn select(thorough: bool) -> Self {
        if thorough {
            Self::thorough()
        } else {
            Self::default()
        }
    }

    /// Converts to a proptest runner config.
    #[must_use]
    pub fn to_proptest_config(self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thorough_budget_is_selected_by_flag() {
        assert_eq!(PropTestConfig::select(true), PropTestConfig::thorough());
        assert_eq!(PropTestConfig::select(false), PropTestConfig::default());
        assert!(PropTestConfig::thorough().cases > PropTestConfig::default().cases);
        assert_eq!(PropTestConfig::thorough().to_proptest_config().cases, 4096);
    }

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn layout_digits_are_valid(digits in layout_digits_strategy(1, 20)) {
            prop_assert!(!digits.is_empty());
            prop_assert!(digits.bytes().all(|b| b.is_ascii_digit()));
            // Every even position is a file length and must not be zero
            prop_assert!(digits.bytes().step_by(2).all(|b| b != b'0'));
        }

        #[test]
        fn tight_layouts_have_small_gaps(digits in tight_layout_strategy(20)) {
            prop_assert!(digits.bytes().skip(1).step_by(2).all(|b| b <= b'2'));
        }

        #[test]
        fn segment_lists_are_valid(list in segment_list_strategy(20)) {
            prop_assert!(list.validate().is_ok());
            prop_assert!(!list.is_empty());
        }
    }
}
