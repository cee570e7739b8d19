//! Arena-backed doubly-linked segment list.

use super::segment::Segment;
use crate::error::{CoreError, CoreResult};
use crate::types::{FileId, SlotId};
use std::collections::HashSet;

/// Ordered sequence of segments describing the whole medium.
///
/// Segments live in an arena and link to each other by [`SlotId`]. Walking
/// the list from the head and summing `length + trailing_free` yields every
/// segment's address; there are no gaps other than trailing free runs.
///
/// ## Invariants
///
/// - Every live segment has `length >= 1`
/// - `total_size` equals the sum of live footprints
/// - Slots are never reused; a vacated slot stays detached
/// - Segments are only removed through [`vacate`](Self::vacate) or
///   [`unlink_tail`](Self::unlink_tail), neither of which shifts the address
///   of any other segment
#[derive(Debug, Clone, Default)]
pub struct SegmentList {
    slots: Vec<Segment>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
    total_size: u64,
    live: usize,
    settled: HashSet<FileId>,
}

impl SegmentList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty list with room for `capacity` segments.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Adds a segment at the tail and returns its slot.
    ///
    /// # Errors
    ///
    /// Returns `CorruptLayout` if the segment's footprint or the new total
    /// size does not fit in a `u64`.
    pub fn append(&mut self, mut segment: Segment) -> CoreResult<SlotId> {
        let total_size = segment
            .checked_footprint()
            .and_then(|footprint| self.total_size.checked_add(footprint))
            .ok_or_else(|| {
                CoreError::corrupt_layout(format!("{} overflows total size on append", segment.id))
            })?;

        let slot = SlotId(self.slots.len());
        segment.slot = slot;
        segment.prev = self.tail;
        segment.next = None;
        segment.live = true;

        match self.tail {
            Some(tail) => self.slots[tail.0].next = Some(slot),
            None => self.head = Some(slot),
        }

        self.tail = Some(slot);
        self.total_size = total_size;
        self.live += 1;
        self.slots.push(segment);
        Ok(slot)
    }

    /// Splices a segment immediately after `at`.
    ///
    /// # Errors
    ///
    /// Returns `CorruptLayout` if `at` is not a live segment of this list.
    pub fn insert_after(&mut self, at: SlotId, mut segment: Segment) -> CoreResult<SlotId> {
        let at_next = self.segment(at)?.next;
        let total_size = segment
            .checked_footprint()
            .and_then(|footprint| self.total_size.checked_add(footprint))
            .ok_or_else(|| CoreError::corrupt_layout("total size overflow on insert"))?;

        let slot = SlotId(self.slots.len());
        segment.slot = slot;
        segment.prev = Some(at);
        segment.next = at_next;
        segment.live = true;

        self.slots[at.0].next = Some(slot);
        match at_next {
            Some(next) => self.slots[next.0].prev = Some(slot),
            None => self.tail = Some(slot),
        }

        self.slots.push(segment);
        self.total_size = total_size;
        self.live += 1;
        Ok(slot)
    }

    /// Removes the current tail, shrinking the total size by its footprint.
    ///
    /// # Errors
    ///
    /// Returns `CorruptLayout` if `slot` is not the tail.
    pub fn unlink_tail(&mut self, slot: SlotId) -> CoreResult<()> {
        if self.tail != Some(slot) {
            return Err(CoreError::corrupt_layout(format!(
                "{slot} is not the tail segment"
            )));
        }

        let segment = &mut self.slots[slot.0];
        let prev = segment.prev;
        let footprint = segment.footprint();
        segment.live = false;
        segment.prev = None;
        segment.next = None;

        match prev {
            Some(prev) => self.slots[prev.0].next = None,
            None => self.head = None,
        }
        self.tail = prev;

        self.total_size = self
            .total_size
            .checked_sub(footprint)
            .ok_or_else(|| CoreError::corrupt_layout("total size underflow on unlink"))?;
        self.live -= 1;
        Ok(())
    }

    /// Detaches a segment whose file has moved elsewhere.
    ///
    /// The predecessor absorbs the vacated footprint into its trailing free
    /// space so later fit searches see one merged gap. A vacated tail is
    /// unlinked instead and the total size shrinks.
    ///
    /// # Errors
    ///
    /// Returns `CorruptLayout` if `slot` is not live or is the head.
    pub fn vacate(&mut self, slot: SlotId) -> CoreResult<()> {
        let segment = self.segment(slot)?;
        let (prev, next, footprint) = (segment.prev, segment.next, segment.footprint());

        let Some(prev) = prev else {
            return Err(CoreError::corrupt_layout(format!(
                "cannot vacate head segment {slot}"
            )));
        };
        let Some(next) = next else {
            return self.unlink_tail(slot);
        };

        let merged = self.slots[prev.0]
            .trailing_free
            .checked_add(footprint)
            .ok_or_else(|| CoreError::corrupt_layout("free space overflow on coalesce"))?;

        self.slots[prev.0].trailing_free = merged;
        self.slots[prev.0].next = Some(next);
        self.slots[next.0].prev = Some(prev);

        let segment = &mut self.slots[slot.0];
        segment.live = false;
        segment.prev = None;
        segment.next = None;
        self.live -= 1;
        Ok(())
    }

    /// Replaces a segment's trailing free space, keeping the total in step.
    ///
    /// # Errors
    ///
    /// Returns `CorruptLayout` if `slot` is not live or the total overflows.
    pub fn set_trailing_free(&mut self, slot: SlotId, trailing_free: u64) -> CoreResult<()> {
        let old = self.segment(slot)?.trailing_free;
        self.total_size = self
            .total_size
            .checked_sub(old)
            .and_then(|t| t.checked_add(trailing_free))
            .ok_or_else(|| CoreError::corrupt_layout("total size out of range"))?;
        self.slots[slot.0].trailing_free = trailing_free;
        Ok(())
    }

    /// Turns the last `units` occupied units of a segment into free space.
    ///
    /// Returns the remaining length, which may be zero; a zero-length
    /// segment must be vacated before the list is walked again.
    ///
    /// # Errors
    ///
    /// Returns `CorruptLayout` if `units` exceeds the segment length.
    pub fn shrink(&mut self, slot: SlotId, units: u64) -> CoreResult<u64> {
        let segment = self.segment(slot)?;
        let length = segment.length.checked_sub(units).ok_or_else(|| {
            CoreError::corrupt_layout(format!(
                "cannot shrink {} by {units} units (length {})",
                segment.id, segment.length
            ))
        })?;
        let trailing_free = segment
            .trailing_free
            .checked_add(units)
            .ok_or_else(|| CoreError::corrupt_layout("free space overflow on shrink"))?;

        let segment = &mut self.slots[slot.0];
        segment.length = length;
        segment.trailing_free = trailing_free;
        Ok(length)
    }

    /// Returns the segment in `slot`, live or not.
    #[must_use]
    pub fn get(&self, slot: SlotId) -> Option<&Segment> {
        self.slots.get(slot.0)
    }

    /// Returns the live segment in `slot`.
    ///
    /// # Errors
    ///
    /// Returns `CorruptLayout` if the slot is unknown or has been vacated.
    pub fn segment(&self, slot: SlotId) -> CoreResult<&Segment> {
        match self.slots.get(slot.0) {
            Some(segment) if segment.live => Ok(segment),
            Some(_) => Err(CoreError::corrupt_layout(format!(
                "{slot} has been vacated"
            ))),
            None => Err(CoreError::corrupt_layout(format!("{slot} does not exist"))),
        }
    }

    /// First segment in address order.
    #[must_use]
    pub fn head(&self) -> Option<SlotId> {
        self.head
    }

    /// Last segment in address order.
    #[must_use]
    pub fn tail(&self) -> Option<SlotId> {
        self.tail
    }

    /// Sum of `length + trailing_free` over live segments.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Number of live segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns true if there are no live segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of arena slots ever allocated, including vacated ones.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Sum of occupied units over live segments.
    #[must_use]
    pub fn occupied(&self) -> u64 {
        self.walk().map(Segment::length).sum()
    }

    /// Walks live segments in address order.
    ///
    /// Each call starts a fresh walk from the head.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            list: self,
            cursor: self.head,
        }
    }

    /// Walks live segments in address order together with their addresses.
    #[must_use]
    pub fn placements(&self) -> Placements<'_> {
        Placements {
            walk: self.walk(),
            address: 0,
        }
    }

    /// Records that a sweep has decided the fate of `id`.
    ///
    /// Returns false if the file was already settled.
    pub fn settle(&mut self, id: FileId) -> bool {
        self.settled.insert(id)
    }

    /// Whether a sweep has already decided the fate of `id`.
    #[must_use]
    pub fn is_settled(&self, id: FileId) -> bool {
        self.settled.contains(&id)
    }

    /// Number of settled files.
    #[must_use]
    pub fn settled_count(&self) -> usize {
        self.settled.len()
    }

    /// Checks every structural invariant of the list.
    ///
    /// # Errors
    ///
    /// Returns `CorruptLayout` describing the first violation found.
    pub fn validate(&self) -> CoreResult<()> {
        let mut prev: Option<SlotId> = None;
        let mut cursor = self.head;
        let mut count = 0usize;
        let mut footprint_sum = 0u64;

        while let Some(slot) = cursor {
            let segment = self.segment(slot)?;

            if segment.prev != prev {
                return Err(CoreError::corrupt_layout(format!(
                    "{slot} links back to {:?}, expected {:?}",
                    segment.prev, prev
                )));
            }
            if segment.length == 0 {
                return Err(CoreError::corrupt_layout(format!(
                    "{} at {slot} has zero length",
                    segment.id
                )));
            }

            footprint_sum = footprint_sum
                .checked_add(segment.footprint())
                .ok_or_else(|| CoreError::corrupt_layout("footprint sum overflow"))?;
            count += 1;
            if count > self.slots.len() {
                return Err(CoreError::corrupt_layout("cycle in segment links"));
            }

            prev = Some(slot);
            cursor = segment.next;
        }

        if self.tail != prev {
            return Err(CoreError::corrupt_layout(format!(
                "tail is {:?} but walk ended at {:?}",
                self.tail, prev
            )));
        }
        if count != self.live {
            return Err(CoreError::corrupt_layout(format!(
                "walk visited {count} segments, expected {}",
                self.live
            )));
        }
        if footprint_sum != self.total_size {
            return Err(CoreError::corrupt_layout(format!(
                "total size {} does not match walked footprint {footprint_sum}",
                self.total_size
            )));
        }

        Ok(())
    }
}

/// Iterator over live segments in address order.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    list: &'a SegmentList,
    cursor: Option<SlotId>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Segment;

    fn next(&mut self) -> Option<Self::Item> {
        let segment = self.list.get(self.cursor?)?;
        self.cursor = segment.next;
        Some(segment)
    }
}

/// Iterator over `(address, segment)` pairs in address order.
#[derive(Debug, Clone)]
pub struct Placements<'a> {
    walk: Walk<'a>,
    address: u64,
}

impl<'a> Iterator for Placements<'a> {
    type Item = (u64, &'a Segment);

    fn next(&mut self) -> Option<Self::Item> {
        let segment = self.walk.next()?;
        let address = self.address;
        self.address += segment.footprint();
        Some((address, segment))
    }
}
