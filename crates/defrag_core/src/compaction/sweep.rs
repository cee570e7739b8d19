//! The two-pointer sweeps.

use super::cursor::{enclosed, FileCursor, FreeCursor};
use super::report::CompactionReport;
use crate::error::{CoreError, CoreResult};
use crate::layout::{Segment, SegmentList};
use crate::types::SlotId;
use tracing::trace;

/// What happened to a file that found a fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relocation {
    /// The fit was the file's direct predecessor; the file slid left.
    Shifted,
    /// A copy was spliced after the fit and the original vacated.
    Moved,
}

/// Moves whole files, right-most first, into the left-most gap that holds them.
///
/// Every file the sweep reaches is settled in the list's ledger whether or
/// not it moves, so a copy met again further left is skipped, and so is
/// every file on a later sweep over the same list.
pub(super) fn whole_files(list: &mut SegmentList, report: &mut CompactionReport) -> CoreResult<()> {
    let mut free = FreeCursor::start(list)?;
    let mut file = FileCursor::at_tail(list)?;

    while let Some((left, right)) = enclosed(&free, &file) {
        report.iterations += 1;

        let current = list.segment(right)?;
        let (id, length) = (current.id(), current.length());
        let predecessor = file.predecessor(list)?;

        if !list.settle(id) {
            report.files_skipped += 1;
            file = predecessor;
            continue;
        }
        report.files_examined += 1;

        match find_fit(list, left, right, length)? {
            Some(fit) => {
                match relocate(list, fit, right)? {
                    Relocation::Shifted => report.files_shifted += 1,
                    Relocation::Moved => {
                        report.files_relocated += 1;
                        report.segments_vacated += 1;
                    }
                }
                report.units_moved += length;
                trace!(%id, length, from = file.pos, "relocated file");
                free.skip_exhausted(list)?;
            }
            None => {
                report.files_left_in_place += 1;
                trace!(%id, length, "no fit");
            }
        }

        file = predecessor;
    }

    Ok(())
}

/// Fills gaps left to right with units taken off the end of the right-most file.
pub(super) fn fragments(list: &mut SegmentList, report: &mut CompactionReport) -> CoreResult<()> {
    let mut free = FreeCursor::start(list)?;
    let mut file = FileCursor::at_tail(list)?;

    while let Some((left, right)) = enclosed(&free, &file) {
        report.iterations += 1;

        let gap = list.segment(left)?.trailing_free();
        let current = list.segment(right)?;
        let (id, length) = (current.id(), current.length());
        let units = gap.min(length);

        list.insert_after(left, Segment::new(id, units, gap - units))?;
        list.set_trailing_free(left, 0)?;
        report.pieces_split += 1;
        report.units_moved += units;
        trace!(%id, units, to = free.pos, "split piece");

        if list.shrink(right, units)? == 0 {
            let predecessor = file.predecessor(list)?;
            list.vacate(right)?;
            report.segments_vacated += 1;
            file = predecessor;
        }

        free.skip_exhausted(list)?;
    }

    Ok(())
}

/// Scans forward from `from` for the first segment before `before` whose
/// trailing free space can hold `length` units.
fn find_fit(
    list: &SegmentList,
    from: SlotId,
    before: SlotId,
    length: u64,
) -> CoreResult<Option<SlotId>> {
    let mut cursor = Some(from);

    while let Some(slot) = cursor {
        if slot == before {
            return Ok(None);
        }
        let segment = list.segment(slot)?;
        if segment.trailing_free() >= length {
            return Ok(Some(slot));
        }
        cursor = segment.next();
    }

    Err(CoreError::corrupt_layout(format!(
        "{before} is not reachable from free cursor {from}"
    )))
}

/// Relocates the file in `right` into the gap after `fit`.
fn relocate(list: &mut SegmentList, fit: SlotId, right: SlotId) -> CoreResult<Relocation> {
    let fit_segment = list.segment(fit)?;
    let (gap, fit_next) = (fit_segment.trailing_free(), fit_segment.next());
    let current = list.segment(right)?;
    let (id, length, trailing_free) = (current.id(), current.length(), current.trailing_free());

    if fit_next == Some(right) {
        let widened = trailing_free
            .checked_add(gap)
            .ok_or_else(|| CoreError::corrupt_layout("free space overflow on shift"))?;
        list.set_trailing_free(fit, 0)?;
        list.set_trailing_free(right, widened)?;
        return Ok(Relocation::Shifted);
    }

    let remaining = gap.checked_sub(length).ok_or_else(|| {
        CoreError::corrupt_layout(format!(
            "{id} of length {length} does not fit in gap of {gap}"
        ))
    })?;

    list.insert_after(fit, Segment::new(id, length, remaining))?;
    list.set_trailing_free(fit, 0)?;
    list.vacate(right)?;
    Ok(Relocation::Moved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompactionMode;
    use crate::decoder::decode_str;

    fn shape(list: &SegmentList) -> Vec<(u64, u64, u64)> {
        list.walk()
            .map(|s| (s.id().as_u64(), s.length(), s.trailing_free()))
            .collect()
    }

    fn sweep_whole(input: &str) -> (SegmentList, CompactionReport) {
        let mut list = decode_str(input).unwrap();
        let mut report = CompactionReport::new(CompactionMode::WholeFile, list.total_size());
        whole_files(&mut list, &mut report).unwrap();
        list.validate().unwrap();
        (list, report)
    }

    fn sweep_fragments(input: &str) -> (SegmentList, CompactionReport) {
        let mut list = decode_str(input).unwrap();
        let mut report = CompactionReport::new(CompactionMode::Fragment, list.total_size());
        fragments(&mut list, &mut report).unwrap();
        list.validate().unwrap();
        (list, report)
    }

    #[test]
    fn file_moves_into_first_gap_and_coalesces() {
        // 0.....11.2 -> 0211......
        let (list, report) = sweep_whole("152111");

        assert_eq!(shape(&list), vec![(0, 1, 0), (2, 1, 0), (1, 2, 5)]);
        assert_eq!(report.files_relocated, 1);
        assert_eq!(report.files_shifted, 1);
        assert_eq!(report.files_left_in_place, 0);
    }

    #[test]
    fn vacated_middle_segment_merges_into_predecessor() {
        // 0...1.22.333333333 -> 0221.....333333333
        let (list, report) = sweep_whole("1311219");

        assert_eq!(
            shape(&list),
            vec![(0, 1, 0), (2, 2, 0), (1, 1, 5), (3, 9, 0)]
        );
        assert_eq!(report.files_relocated, 1);
        assert_eq!(report.files_shifted, 1);
        assert_eq!(report.files_left_in_place, 1);
        assert_eq!(list.total_size(), 18);
    }

    #[test]
    fn adjacent_fit_shifts_file_left() {
        // 0...11
        let (list, report) = sweep_whole("132");

        assert_eq!(shape(&list), vec![(0, 1, 0), (1, 2, 3)]);
        assert_eq!(report.files_shifted, 1);
        assert_eq!(report.files_relocated, 0);
        assert_eq!(report.segments_vacated, 0);
    }

    #[test]
    fn unmovable_file_stays() {
        let (list, report) = sweep_whole("12345");

        assert_eq!(shape(&list), vec![(0, 1, 2), (1, 3, 4), (2, 5, 0)]);
        assert_eq!(report.files_left_in_place, 2);
        assert_eq!(report.moves(), 0);
    }

    #[test]
    fn tail_move_shrinks_total_size() {
        // 0...1.2 -> 021...
        let (list, report) = sweep_whole("13111");

        assert_eq!(shape(&list), vec![(0, 1, 0), (2, 1, 0), (1, 1, 3)]);
        assert_eq!(list.total_size(), 6);
        assert_eq!(report.segments_vacated, 1);
    }

    #[test]
    fn single_file_terminates_immediately() {
        let (list, report) = sweep_whole("5");

        assert_eq!(shape(&list), vec![(0, 5, 0)]);
        assert_eq!(report.iterations, 0);
    }

    #[test]
    fn second_sweep_skips_settled_files() {
        let mut list = decode_str("2333133121414131402").unwrap();
        let mut first = CompactionReport::default();
        whole_files(&mut list, &mut first).unwrap();
        let after_first = shape(&list);

        let mut second = CompactionReport::default();
        whole_files(&mut list, &mut second).unwrap();

        assert!(first.moves() > 0);
        assert_eq!(second.moves(), 0);
        assert_eq!(second.files_examined, 0);
        assert_eq!(shape(&list), after_first);
    }

    #[test]
    fn fragments_fill_every_gap() {
        // 0..111....22222 -> 022111222......
        let (list, report) = sweep_fragments("12345");

        assert_eq!(
            shape(&list),
            vec![(0, 1, 0), (2, 2, 0), (1, 3, 0), (2, 3, 1)]
        );
        assert_eq!(list.occupied(), 9);
        assert_eq!(list.total_size(), 10);
        assert_eq!(report.pieces_split, 2);
        assert_eq!(report.units_moved, 5);
    }

    #[test]
    fn fragments_vacate_emptied_files() {
        // 0...1 -> 01
        let (list, report) = sweep_fragments("131");

        assert_eq!(shape(&list), vec![(0, 1, 0), (1, 1, 2)]);
        assert_eq!(report.segments_vacated, 1);
    }

    #[test]
    fn find_fit_stops_before_file() {
        // 0.11..222
        let list = decode_str("11223").unwrap();
        let head = list.head().unwrap();
        let tail = list.tail().unwrap();

        assert_eq!(find_fit(&list, head, tail, 3).unwrap(), None);
        let fit = find_fit(&list, head, tail, 2).unwrap().unwrap();
        assert_eq!(list.segment(fit).unwrap().id().as_u64(), 1);
    }

    #[test]
    fn find_fit_reports_unreachable_file() {
        let list = decode_str("11213").unwrap();
        let head = list.head().unwrap();
        let tail = list.tail().unwrap();

        let err = find_fit(&list, tail, head, 9).unwrap_err();
        assert!(err.is_corrupt_layout());
    }
}
