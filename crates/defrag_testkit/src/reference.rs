//! Brute-force reference model.
//!
//! Expands a layout into one cell per storage unit and compacts it the slow,
//! obvious way. Property tests compare the segment-list compactor against
//! this model.

use defrag_core::{CompactionMode, SegmentList};

/// A layout expanded to one cell per storage unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockModel {
    cells: Vec<Option<u64>>,
}

impl BlockModel {
    /// Expands a layout string. Stops at the first non-digit.
    #[must_use]
    pub fn from_digits(digits: &str) -> Self {
        let mut cells = Vec::new();
        for (index, byte) in digits.bytes().take_while(u8::is_ascii_digit).enumerate() {
            let run = usize::from(byte - b'0');
            let cell = if index % 2 == 0 {
                Some(index as u64 / 2)
            } else {
                None
            };
            cells.extend(std::iter::repeat(cell).take(run));
        }
        Self { cells }
    }

    /// Expands a segment list.
    #[must_use]
    pub fn from_list(list: &SegmentList) -> Self {
        let mut cells = Vec::new();
        for segment in list.walk() {
            let length = usize::try_from(segment.length()).expect("length fits usize");
            let free = usize::try_from(segment.trailing_free()).expect("free fits usize");
            cells.extend(std::iter::repeat(Some(segment.id().as_u64())).take(length));
            cells.extend(std::iter::repeat(None).take(free));
        }
        Self { cells }
    }

    /// Compacts using the given mode.
    pub fn compact(&mut self, mode: CompactionMode) {
        match mode {
            CompactionMode::WholeFile => self.compact_whole_files(),
            CompactionMode::Fragment => self.compact_fragments(),
        }
    }

    /// Moves each file, highest ID first, into the left-most run of free
    /// cells that can hold it and starts before the file.
    pub fn compact_whole_files(&mut self) {
        let Some(max_id) = self.cells.iter().flatten().copied().max() else {
            return;
        };

        for id in (0..=max_id).rev() {
            let Some(start) = self.cells.iter().position(|c| *c == Some(id)) else {
                continue;
            };
            let length = self.cells[start..]
                .iter()
                .take_while(|c| **c == Some(id))
                .count();

            let mut run = 0;
            for index in 0..start {
                run = if self.cells[index].is_none() { run + 1 } else { 0 };
                if run == length {
                    let target = index + 1 - length;
                    for offset in 0..length {
                        self.cells[target + offset] = Some(id);
                        self.cells[start + offset] = None;
                    }
                    break;
                }
            }
        }
    }

    /// Moves single cells from the right end into the left-most free cell
    /// until no free cell precedes an occupied one.
    pub fn compact_fragments(&mut self) {
        if self.cells.is_empty() {
            return;
        }
        let (mut left, mut right) = (0, self.cells.len() - 1);
        loop {
            while left < self.cells.len() && self.cells[left].is_some() {
                left += 1;
            }
            while right > 0 && self.cells[right].is_none() {
                right -= 1;
            }
            if left >= right {
                break;
            }
            self.cells.swap(left, right);
        }
    }

    /// Sum of `address * id` over occupied cells.
    #[must_use]
    pub fn checksum(&self) -> u64 {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(address, cell)| cell.map(|id| address as u64 * id))
            .sum()
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Renders the model as `0..111` style text; IDs above 9 wrap.
    #[must_use]
    pub fn render(&self) -> String {
        self.cells
            .iter()
            .map(|cell| match cell {
                Some(id) => char::from(b'0' + (id % 10) as u8),
                None => '.',
            })
            .collect()
    }
}

/// Checksum the reference model produces for `digits` in `mode`.
#[must_use]
pub fn reference_checksum(digits: &str, mode: CompactionMode) -> u64 {
    let mut model = BlockModel::from_digits(digits);
    model.compact(mode);
    model.checksum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "2333133121414131402";

    #[test]
    fn renders_example() {
        let model = BlockModel::from_digits(EXAMPLE);
        assert_eq!(model.render(), "00...111...2...333.44.5555.6666.777.888899");
    }

    #[test]
    fn whole_file_example() {
        let mut model = BlockModel::from_digits(EXAMPLE);
        model.compact_whole_files();
        assert_eq!(model.render(), "00992111777.44.333....5555.6666.....8888..");
        assert_eq!(model.checksum(), 2858);
    }

    #[test]
    fn fragment_example() {
        let mut model = BlockModel::from_digits(EXAMPLE);
        model.compact_fragments();
        assert_eq!(model.render(), "0099811188827773336446555566..............");
        assert_eq!(model.checksum(), 1928);
    }

    #[test]
    fn occupied_is_conserved() {
        let mut model = BlockModel::from_digits(EXAMPLE);
        let before = model.occupied();
        model.compact_whole_files();
        assert_eq!(model.occupied(), before);
    }
}
