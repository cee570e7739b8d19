//! A single file and the free run that follows it.

use crate::types::{FileId, SlotId};

/// One file occupying the medium, plus its trailing free space.
///
/// `next`/`prev` are positional links into the owning
/// [`SegmentList`](super::SegmentList) arena; they never imply ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub(crate) id: FileId,
    pub(crate) length: u64,
    pub(crate) trailing_free: u64,
    pub(crate) slot: SlotId,
    pub(crate) prev: Option<SlotId>,
    pub(crate) next: Option<SlotId>,
    pub(crate) live: bool,
}

impl Segment {
    /// Creates a detached segment ready to be appended to a list.
    #[must_use]
    pub fn new(id: FileId, length: u64, trailing_free: u64) -> Self {
        Self {
            id,
            length,
            trailing_free,
            slot: SlotId(0),
            prev: None,
            next: None,
            live: false,
        }
    }

    /// The file this segment stores.
    #[must_use]
    pub fn id(&self) -> FileId {
        self.id
    }

    /// Number of occupied storage units.
    #[must_use]
    pub fn length(&self) -> u64 {
        self.length
    }

    /// Number of free units following the file.
    #[must_use]
    pub fn trailing_free(&self) -> u64 {
        self.trailing_free
    }

    /// `length + trailing_free`.
    ///
    /// A segment only enters a list if this sum fits in a `u64`; for a
    /// detached segment it saturates.
    #[must_use]
    pub fn footprint(&self) -> u64 {
        self.length.saturating_add(self.trailing_free)
    }

    /// `length + trailing_free`, or `None` on overflow.
    #[must_use]
    pub fn checked_footprint(&self) -> Option<u64> {
        self.length.checked_add(self.trailing_free)
    }

    /// Arena slot holding this segment.
    #[must_use]
    pub fn slot(&self) -> SlotId {
        self.slot
    }

    /// Previous segment in address order.
    #[must_use]
    pub fn prev(&self) -> Option<SlotId> {
        self.prev
    }

    /// Next segment in address order.
    #[must_use]
    pub fn next(&self) -> Option<SlotId> {
        self.next
    }

    /// Whether the segment is still part of the walk order.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Whether the segment has any free space after it.
    #[must_use]
    pub fn has_free_space(&self) -> bool {
        self.trailing_free > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_segment_is_detached() {
        let segment = Segment::new(FileId::new(3), 4, 2);
        assert_eq!(segment.id(), FileId::new(3));
        assert_eq!(segment.footprint(), 6);
        assert!(segment.has_free_space());
        assert!(!segment.is_live());
        assert!(segment.prev().is_none());
        assert!(segment.next().is_none());
    }

    #[test]
    fn oversized_footprint_saturates() {
        let segment = Segment::new(FileId::new(1), u64::MAX, 1);
        assert_eq!(segment.footprint(), u64::MAX);
        assert_eq!(segment.checked_footprint(), None);
        assert_eq!(Segment::new(FileId::new(1), 2, 3).checked_footprint(), Some(5));
    }
}
