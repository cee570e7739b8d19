//! Sweep cursors with incrementally maintained addresses.
//!
//! Both cursors are plain slot indices into the list arena plus the address
//! of the segment they point at. Neither ever re-walks from the head: the
//! free cursor only moves right, adding footprints as it goes, and the file
//! cursor only moves left, subtracting its predecessor's footprint.

use crate::error::{CoreError, CoreResult};
use crate::layout::SegmentList;
use crate::types::SlotId;

/// Left-most segment known to have free space after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FreeCursor {
    pub slot: Option<SlotId>,
    pub pos: u64,
}

impl FreeCursor {
    /// Positions the cursor on the first segment with free space.
    pub fn start(list: &SegmentList) -> CoreResult<Self> {
        let mut cursor = Self {
            slot: list.head(),
            pos: 0,
        };
        cursor.skip_exhausted(list)?;
        Ok(cursor)
    }

    /// Advances past every segment whose free space is used up.
    pub fn skip_exhausted(&mut self, list: &SegmentList) -> CoreResult<()> {
        while let Some(slot) = self.slot {
            let segment = list.segment(slot)?;
            if segment.has_free_space() {
                break;
            }
            self.pos = self
                .pos
                .checked_add(segment.footprint())
                .ok_or_else(|| CoreError::corrupt_layout("free cursor address overflow"))?;
            self.slot = segment.next();
        }
        Ok(())
    }
}

/// File currently considered for relocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FileCursor {
    pub slot: Option<SlotId>,
    pub pos: u64,
}

impl FileCursor {
    /// Positions the cursor on the tail, derived from the total size.
    pub fn at_tail(list: &SegmentList) -> CoreResult<Self> {
        let Some(tail) = list.tail() else {
            return Ok(Self { slot: None, pos: 0 });
        };
        let pos = list
            .total_size()
            .checked_sub(list.segment(tail)?.footprint())
            .ok_or_else(|| CoreError::corrupt_layout("tail extends past total size"))?;
        Ok(Self {
            slot: Some(tail),
            pos,
        })
    }

    /// Returns a cursor on the predecessor of the current segment.
    ///
    /// Must be taken before the predecessor's footprint changes.
    pub fn predecessor(&self, list: &SegmentList) -> CoreResult<Self> {
        let Some(slot) = self.slot else {
            return Ok(*self);
        };
        let Some(prev) = list.segment(slot)?.prev() else {
            return Ok(Self { slot: None, pos: 0 });
        };
        let pos = self
            .pos
            .checked_sub(list.segment(prev)?.footprint())
            .ok_or_else(|| {
                CoreError::corrupt_layout(format!("{prev} would start before address 0"))
            })?;
        Ok(Self {
            slot: Some(prev),
            pos,
        })
    }
}

/// Whether the cursors still enclose a region worth sweeping.
///
/// Returns the two slots while the free cursor is strictly left of the file
/// cursor.
pub(crate) fn enclosed(free: &FreeCursor, file: &FileCursor) -> Option<(SlotId, SlotId)> {
    match (free.slot, file.slot) {
        (Some(left), Some(right)) if free.pos < file.pos => Some((left, right)),
        _ => None,
    }
}
