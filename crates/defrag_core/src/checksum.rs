//! Position-weighted layout checksum.
//!
//! Every occupied unit contributes `address * file_id`. A segment of
//! `length` units starting at `p` therefore contributes
//! `id * (p + (p + 1) + ... + (p + length - 1))`, which is computed in
//! closed form.

use crate::error::{CoreError, CoreResult};
use crate::layout::SegmentList;

/// Computes the checksum of a layout.
///
/// # Errors
///
/// Returns `CorruptLayout` if the sum does not fit in a `u64`.
pub fn checksum(list: &SegmentList) -> CoreResult<u64> {
    list.placements().try_fold(0u64, |total, (address, segment)| {
        span_sum(address, segment.length())
            .and_then(|sum| sum.checked_mul(segment.id().as_u64()))
            .and_then(|weighted| total.checked_add(weighted))
            .ok_or_else(|| {
                CoreError::corrupt_layout(format!(
                    "checksum overflow at address {address} ({})",
                    segment.id()
                ))
            })
    })
}

/// Sum of the addresses `start..start + length`, or `None` on overflow.
#[must_use]
pub fn span_sum(start: u64, length: u64) -> Option<u64> {
    if length == 0 {
        return Some(0);
    }
    let last = start.checked_add(length - 1)?;
    // One of `length` and `start + last` is always even.
    let doubled = length.checked_mul(start.checked_add(last)?)?;
    Some(doubled / 2)
}
