//! Board representation and the pure slide transformation.

use crate::error::EngineError;
use crate::game::Direction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side length of the board.
pub const SIZE: usize = 4;

/// Raw cell layout, row-major.
pub type Cells = [[u32; SIZE]; SIZE];

/// A cell position on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// Row, 0 at the top.
    pub row: usize,
    /// Column, 0 at the left.
    pub col: usize,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Position of the `pos`-th cell of line `line` when read toward `direction`.
///
/// Position 0 is the far end, the cell tiles slide into.
const fn line_coord(direction: Direction, line: usize, pos: usize) -> Coord {
    let along = if direction.is_reversed() {
        SIZE - 1 - pos
    } else {
        pos
    };

    if direction.is_vertical() {
        Coord::new(along, line)
    } else {
        Coord::new(line, along)
    }
}

/// Returns true for 0 and for powers of two of at least 2.
#[must_use]
pub const fn is_valid_cell(value: u32) -> bool {
    value == 0 || (value >= 2 && value.is_power_of_two())
}

/// Whether two cells merge: equal tiles whose sum still fits in a cell.
const fn can_merge(a: u32, b: u32) -> bool {
    a != 0 && a == b && a.checked_mul(2).is_some()
}

/// Slide and merge a single line toward index 0.
///
/// Returns the new line and the score gained, which is the sum of every
/// merged tile created. A tile produced by a merge does not merge again in
/// the same pass, so `[2, 2, 2, 2]` becomes `[4, 4, 0, 0]`.
#[must_use]
pub fn slide_line(line: [u32; SIZE]) -> ([u32; SIZE], u32) {
    let mut out = [0u32; SIZE];
    let mut len = 0;
    let mut last_merged = false;
    let mut gained = 0u32;

    for value in line.into_iter().filter(|&v| v != 0) {
        // Tiles at u32's top bit stay put rather than overflow.
        if len > 0 && !last_merged && can_merge(out[len - 1], value) {
            let merged = value * 2;
            out[len - 1] = merged;
            gained = gained.saturating_add(merged);
            last_merged = true;
        } else {
            out[len] = value;
            len += 1;
            last_merged = false;
        }
    }

    (out, gained)
}

/// A 4×4 grid of tiles.
///
/// Every cell is 0 (empty) or a power of two of at least 2. The only ways to
/// build a board from outside the crate are [`Board::empty`] and the
/// validating [`Board::from_rows`], so the invariant holds for every value of
/// this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Cells", into = "Cells")]
pub struct Board {
    cells: Cells,
}

impl Board {
    /// A board with no tiles.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            cells: [[0; SIZE]; SIZE],
        }
    }

    /// Build a board from rows, validating every cell.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidCell`] for the first cell that is not 0
    /// or a power of two of at least 2.
    pub fn from_rows(cells: Cells) -> Result<Self, EngineError> {
        for (row, values) in cells.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                if !is_valid_cell(value) {
                    return Err(EngineError::InvalidCell { row, col, value });
                }
            }
        }
        Ok(Self { cells })
    }

    /// The cells, row-major.
    #[must_use]
    pub const fn rows(&self) -> &Cells {
        &self.cells
    }

    /// Value at `coord`, or `None` if it lies outside the board.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<u32> {
        self.cells.get(coord.row)?.get(coord.col).copied()
    }

    /// Place a tile. Callers guarantee `coord` is in range and `value` valid.
    pub(crate) fn set(&mut self, coord: Coord, value: u32) {
        debug_assert!(is_valid_cell(value));
        self.cells[coord.row][coord.col] = value;
    }

    /// Extract line `index` ordered from the far end of `direction`.
    #[must_use]
    pub fn line(&self, direction: Direction, index: usize) -> [u32; SIZE] {
        std::array::from_fn(|pos| {
            let coord = line_coord(direction, index, pos);
            self.cells[coord.row][coord.col]
        })
    }

    fn set_line(&mut self, direction: Direction, index: usize, values: [u32; SIZE]) {
        for (pos, value) in values.into_iter().enumerate() {
            let coord = line_coord(direction, index, pos);
            self.cells[coord.row][coord.col] = value;
        }
    }

    /// Slide every line toward `direction`.
    ///
    /// Returns the resulting board and the score gained. The board is
    /// unchanged by this call; compare the result with `self` to find out
    /// whether the move does anything.
    #[must_use]
    pub fn slide(&self, direction: Direction) -> (Self, u32) {
        let mut next = *self;
        let mut gained = 0u32;

        for index in 0..SIZE {
            let (line, line_gain) = slide_line(self.line(direction, index));
            next.set_line(direction, index, line);
            gained = gained.saturating_add(line_gain);
        }

        (next, gained)
    }

    /// Whether sliding toward `direction` changes the board.
    #[must_use]
    pub fn can_slide(&self, direction: Direction) -> bool {
        self.slide(direction).0 != *self
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, values)| {
            values
                .iter()
                .enumerate()
                .filter(|&(_, &value)| value == 0)
                .map(move |(col, _)| Coord::new(row, col))
        })
    }

    /// Number of empty cells.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&v| v == 0).count()
    }

    /// Number of tiles on the board.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        SIZE * SIZE - self.empty_count()
    }

    /// Largest tile, or 0 on an empty board.
    #[must_use]
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Sum of all tile values.
    #[must_use]
    pub fn tile_sum(&self) -> u64 {
        self.cells.iter().flatten().map(|&v| u64::from(v)).sum()
    }

    /// Whether two horizontally or vertically adjacent cells hold tiles that
    /// can merge.
    #[must_use]
    pub fn has_adjacent_pair(&self) -> bool {
        let horizontal = self
            .cells
            .iter()
            .any(|row| row.windows(2).any(|pair| can_merge(pair[0], pair[1])));

        let vertical = self.cells.windows(2).any(|rows| {
            rows[0]
                .iter()
                .zip(rows[1].iter())
                .any(|(&above, &below)| can_merge(above, below))
        });

        horizontal || vertical
    }

    /// Whether no move can change this board.
    ///
    /// True iff the board is full and has no adjacent pair that can merge.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.empty_count() == 0 && !self.has_adjacent_pair()
    }
}

impl TryFrom<Cells> for Board {
    type Error = EngineError;

    fn try_from(cells: Cells) -> Result<Self, Self::Error> {
        Self::from_rows(cells)
    }
}

impl From<Board> for Cells {
    fn from(board: Board) -> Self {
        board.cells
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let mut first = true;
            for &value in row {
                if !first {
                    f.write_str(" ")?;
                }
                first = false;
                if value == 0 {
                    write!(f, "{:>6}", ".")?;
                } else {
                    write!(f, "{value:>6}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(cells: Cells) -> Board {
        Board::from_rows(cells).unwrap()
    }

    #[test]
    fn test_slide_line_non_chaining() {
        assert_eq!(slide_line([2, 2, 2, 2]), ([4, 4, 0, 0], 8));
    }

    #[test]
    fn test_slide_line_gaps() {
        assert_eq!(slide_line([0, 2, 0, 2]), ([4, 0, 0, 0], 4));
    }

    #[test]
    fn test_slide_line_merge_after_distinct() {
        assert_eq!(slide_line([4, 2, 2, 0]), ([4, 4, 0, 0], 4));
    }

    #[test]
    fn test_slide_line_merged_tile_does_not_absorb_next() {
        assert_eq!(slide_line([2, 2, 4, 0]), ([4, 4, 0, 0], 4));
        assert_eq!(slide_line([4, 4, 8, 8]), ([8, 16, 0, 0], 24));
    }

    #[test]
    fn test_slide_line_no_change() {
        assert_eq!(slide_line([2, 4, 8, 16]), ([2, 4, 8, 16], 0));
        assert_eq!(slide_line([0, 0, 0, 0]), ([0, 0, 0, 0], 0));
    }

    #[test]
    fn test_slide_line_top_tile_does_not_overflow() {
        let top = 1u32 << 31;
        assert_eq!(slide_line([top, top, 0, 0]), ([top, top, 0, 0], 0));
    }

    #[test]
    fn test_from_rows_rejects_invalid_cells() {
        let mut cells = [[0; SIZE]; SIZE];
        cells[2][3] = 6;
        assert_eq!(
            Board::from_rows(cells),
            Err(EngineError::InvalidCell {
                row: 2,
                col: 3,
                value: 6
            })
        );

        cells[2][3] = 1;
        assert!(Board::from_rows(cells).is_err());
    }

    #[test]
    fn test_slide_left_row() {
        let b = board([[4, 2, 2, 0], [0; 4], [0; 4], [0; 4]]);
        let (next, gained) = b.slide(Direction::Left);
        assert_eq!(next.rows()[0], [4, 4, 0, 0]);
        assert_eq!(gained, 4);
    }

    #[test]
    fn test_slide_right_reverses_reading_order() {
        let b = board([[4, 2, 2, 0], [2, 2, 2, 2], [0; 4], [0; 4]]);
        let (next, gained) = b.slide(Direction::Right);
        assert_eq!(next.rows()[0], [0, 0, 4, 4]);
        assert_eq!(next.rows()[1], [0, 0, 4, 4]);
        assert_eq!(gained, 12);
    }

    #[test]
    fn test_slide_up_and_down_columns() {
        let b = board([[2, 0, 0, 0], [2, 0, 0, 4], [4, 0, 0, 0], [0, 0, 0, 4]]);

        let (up, gained_up) = b.slide(Direction::Up);
        assert_eq!(
            *up.rows(),
            [[4, 0, 0, 8], [4, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]
        );
        assert_eq!(gained_up, 12);

        let (down, gained_down) = b.slide(Direction::Down);
        assert_eq!(
            *down.rows(),
            [[0, 0, 0, 0], [0, 0, 0, 0], [4, 0, 0, 0], [4, 0, 0, 8]]
        );
        assert_eq!(gained_down, 12);
    }

    #[test]
    fn test_slide_noop_detected() {
        let b = board([[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert!(!b.can_slide(Direction::Left));
        assert!(!b.can_slide(Direction::Up));
        assert!(b.can_slide(Direction::Right));
        assert!(b.can_slide(Direction::Down));
    }

    #[test]
    fn test_checkerboard_is_terminal() {
        let b = board([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(b.is_terminal());
        for direction in Direction::ALL {
            assert!(!b.can_slide(direction));
        }
    }

    #[test]
    fn test_full_board_with_pair_is_not_terminal() {
        let b = board([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 4]]);
        assert!(!b.is_terminal());

        let vertical = board([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [2, 8, 16, 32]]);
        assert!(!vertical.is_terminal());
    }

    #[test]
    fn test_top_tiles_do_not_merge() {
        let top = 1u32 << 31;
        assert_eq!(slide_line([top, top, 0, 0]), ([top, top, 0, 0], 0));
        assert_eq!(
            slide_line([0, 1 << 30, 1 << 30, 2]),
            ([top, 2, 0, 0], top)
        );
    }

    #[test]
    fn test_full_board_of_top_pair_is_terminal() {
        let top = 1u32 << 31;
        let b = board([[top, top, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4]]);
        assert!(!b.has_adjacent_pair());
        assert!(b.is_terminal());
        assert!(Direction::ALL.iter().all(|&d| !b.can_slide(d)));
    }

    #[test]
    fn test_board_with_empty_cell_is_not_terminal() {
        let b = board([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 0]]);
        assert!(!b.is_terminal());
    }

    #[test]
    fn test_empty_cells_row_major() {
        let b = board([[2, 0, 2, 2], [2, 2, 2, 2], [2, 2, 2, 0], [2, 2, 2, 2]]);
        let empty: Vec<Coord> = b.empty_cells().collect();
        assert_eq!(empty, vec![Coord::new(0, 1), Coord::new(2, 3)]);
        assert_eq!(b.empty_count(), 2);
        assert_eq!(b.tile_count(), 14);
    }

    #[test]
    fn test_get_out_of_range() {
        let b = Board::empty();
        assert_eq!(b.get(Coord::new(0, 0)), Some(0));
        assert_eq!(b.get(Coord::new(SIZE, 0)), None);
    }

    #[test]
    fn test_serde_validates_cells() {
        let b = board([[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 1024]]);
        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(json, "[[2,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,1024]]");
        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), b);

        let bad = "[[3,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]]";
        assert!(serde_json::from_str::<Board>(bad).is_err());
    }

    #[test]
    fn test_display_renders_rows() {
        let b = board([[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 2048]]);
        let text = b.to_string();
        assert_eq!(text.lines().count(), SIZE);
        assert!(text.lines().next().unwrap().trim_start().starts_with('2'));
        assert!(text.contains("2048"));
    }
}
