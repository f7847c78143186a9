//! Cell coordinates and the predicates built on top of them.
//!
//! Grounded on `original_source/Sudoku/Sudoku/Location.h` and
//! `Location_Utilities.h`: a `Location` is an element index with derived
//! row/column/block accessors, ordered by that index, plus a set of free
//! functions for deciding whether two (or more) locations share a row,
//! column, or block.

use crate::engine::error::SudokuErrors;
use crate::engine::size::Size;

/// A cell's coordinates on a board of a given [`Size`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    elem: usize,
    base: usize,
    index: usize,
}

/// An alternative constructor for [`Location`] in terms of block
/// coordinates, losslessly convertible to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLocation {
    elem: usize,
    base: usize,
    block: usize,
    block_elem: usize,
}

impl Location {
    /// Build a `Location` from a flat element index.
    ///
    /// # Errors
    /// [`SudokuErrors::InvalidLocation`] if `index >= size.full()`.
    pub fn new(size: Size, index: usize) -> Result<Self, SudokuErrors> {
        if index >= size.full() {
            return Err(SudokuErrors::InvalidLocation);
        }
        Ok(Self {
            elem: size.elem(),
            base: size.base(),
            index,
        })
    }

    /// Build a `Location` from `(row, col)`.
    ///
    /// # Errors
    /// [`SudokuErrors::InvalidLocation`] if either coordinate is out of
    /// range.
    pub fn from_row_col(size: Size, row: usize, col: usize) -> Result<Self, SudokuErrors> {
        if row >= size.elem() || col >= size.elem() {
            return Err(SudokuErrors::InvalidLocation);
        }
        Self::new(size, row * size.elem() + col)
    }

    /// Flat element index, `0..full`.
    #[must_use]
    pub fn element(&self) -> usize {
        self.index
    }

    /// Row index, `0..elem`.
    #[must_use]
    pub fn row(&self) -> usize {
        self.index / self.elem
    }

    /// Column index, `0..elem`.
    #[must_use]
    pub fn col(&self) -> usize {
        self.index % self.elem
    }

    /// Block index, `0..elem`.
    #[must_use]
    pub fn block(&self) -> usize {
        (self.row() / self.base) * self.base + (self.col() / self.base)
    }

    /// Row-within-block, `0..base`.
    #[must_use]
    pub fn block_row(&self) -> usize {
        self.row() % self.base
    }

    /// Column-within-block, `0..base`.
    #[must_use]
    pub fn block_col(&self) -> usize {
        self.col() % self.base
    }

    /// Position within the block, `0..elem`, row-major.
    #[must_use]
    pub fn block_elem(&self) -> usize {
        self.block_row() * self.base + self.block_col()
    }

    /// Whether `self` and `other` share a row.
    #[must_use]
    pub fn same_row(&self, other: &Self) -> bool {
        self.row() == other.row()
    }

    /// Whether `self` and `other` share a column.
    #[must_use]
    pub fn same_col(&self, other: &Self) -> bool {
        self.col() == other.col()
    }

    /// Whether `self` and `other` share a block.
    #[must_use]
    pub fn same_block(&self, other: &Self) -> bool {
        self.block() == other.block()
    }
}

impl BlockLocation {
    /// Build from `(block, elem-in-block)`.
    ///
    /// # Errors
    /// [`SudokuErrors::InvalidLocation`] if either is out of range.
    pub fn new(size: Size, block: usize, block_elem: usize) -> Result<Self, SudokuErrors> {
        if block >= size.elem() || block_elem >= size.elem() {
            return Err(SudokuErrors::InvalidLocation);
        }
        Ok(Self {
            elem: size.elem(),
            base: size.base(),
            block,
            block_elem,
        })
    }

    /// Build from `(block, block_row, block_col)`.
    ///
    /// # Errors
    /// [`SudokuErrors::InvalidLocation`] if any coordinate is out of
    /// range for `size`.
    pub fn from_block_row_col(
        size: Size,
        block: usize,
        block_row: usize,
        block_col: usize,
    ) -> Result<Self, SudokuErrors> {
        if block_row >= size.base() || block_col >= size.base() {
            return Err(SudokuErrors::InvalidLocation);
        }
        Self::new(size, block, block_row * size.base() + block_col)
    }

    /// Convert losslessly to a [`Location`].
    #[must_use]
    pub fn to_location(&self) -> Location {
        let block_row_top = (self.block / self.base) * self.base;
        let block_col_left = (self.block % self.base) * self.base;
        let row = block_row_top + self.block_elem / self.base;
        let col = block_col_left + self.block_elem % self.base;
        Location {
            elem: self.elem,
            base: self.base,
            index: row * self.elem + col,
        }
    }
}

/// Whether every location in `begin..end` (inclusive of both ends, by
/// element index order as produced by a section iterator) shares a row.
#[must_use]
pub fn is_same_row(locs: &[Location]) -> bool {
    match locs.split_first() {
        None => true,
        Some((first, rest)) => rest.iter().all(|l| l.same_row(first)),
    }
}

/// Whether every location in `locs` shares a column.
#[must_use]
pub fn is_same_col(locs: &[Location]) -> bool {
    match locs.split_first() {
        None => true,
        Some((first, rest)) => rest.iter().all(|l| l.same_col(first)),
    }
}

/// Whether every location in `locs` shares a block.
#[must_use]
pub fn is_same_block(locs: &[Location]) -> bool {
    match locs.split_first() {
        None => true,
        Some((first, rest)) => rest.iter().all(|l| l.same_block(first)),
    }
}

/// Filter `locs` down to those sharing `pivot`'s row.
#[must_use]
pub fn get_same_row(pivot: Location, locs: &[Location]) -> Vec<Location> {
    locs.iter().filter(|l| l.same_row(&pivot)).copied().collect()
}

/// Filter `locs` down to those sharing `pivot`'s column.
#[must_use]
pub fn get_same_col(pivot: Location, locs: &[Location]) -> Vec<Location> {
    locs.iter().filter(|l| l.same_col(&pivot)).copied().collect()
}

/// Filter `locs` down to those sharing `pivot`'s block.
#[must_use]
pub fn get_same_block(pivot: Location, locs: &[Location]) -> Vec<Location> {
    locs.iter().filter(|l| l.same_block(&pivot)).copied().collect()
}

/// Whether the row/column that `loc` would be a member of, intersects
/// the block containing `block_loc`. Used by locked-candidate reasoning
/// when eliminating outside a pointing pair's block.
#[must_use]
pub fn intersects_block(loc: Location, block_loc: Location) -> bool {
    loc.block() == block_loc.block()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size9() -> Size {
        Size::new(3).unwrap()
    }

    #[test]
    fn row_col_roundtrip() {
        let size = size9();
        let loc = Location::from_row_col(size, 4, 7).unwrap();
        assert_eq!(loc.row(), 4);
        assert_eq!(loc.col(), 7);
        assert_eq!(loc.element(), 4 * 9 + 7);
    }

    #[test]
    fn element_roundtrip() {
        let size = size9();
        let loc = Location::new(size, 42).unwrap();
        assert_eq!(loc.element(), 42);
        assert_eq!(loc.row(), 4);
        assert_eq!(loc.col(), 6);
    }

    #[test]
    fn block_derivations() {
        let size = size9();
        // Row 4, Col 7 -> block row 1, block col 2 -> block 1*3+2 = 5
        let loc = Location::from_row_col(size, 4, 7).unwrap();
        assert_eq!(loc.block(), 5);
        assert_eq!(loc.block_row(), 1);
        assert_eq!(loc.block_col(), 1);
        assert_eq!(loc.block_elem(), 1 * 3 + 1);
    }

    #[test]
    fn out_of_range_rejected() {
        let size = size9();
        assert_eq!(
            Location::new(size, 81),
            Err(SudokuErrors::InvalidLocation)
        );
        assert_eq!(
            Location::from_row_col(size, 9, 0),
            Err(SudokuErrors::InvalidLocation)
        );
    }

    #[test]
    fn block_location_converts_losslessly() {
        let size = size9();
        for idx in 0..size.full() {
            let loc = Location::new(size, idx).unwrap();
            let bl = BlockLocation::new(size, loc.block(), loc.block_elem()).unwrap();
            assert_eq!(bl.to_location(), loc);
        }
    }

    #[test]
    fn same_section_predicates() {
        let size = size9();
        let a = Location::from_row_col(size, 2, 3).unwrap();
        let b = Location::from_row_col(size, 2, 5).unwrap();
        let c = Location::from_row_col(size, 5, 5).unwrap();
        assert!(a.same_row(&b));
        assert!(!a.same_row(&c));
        assert!(is_same_row(&[a, b]));
        assert!(!is_same_row(&[a, b, c]));
    }

    #[test]
    fn get_same_row_filters() {
        let size = size9();
        let pivot = Location::from_row_col(size, 0, 0).unwrap();
        let locs: Vec<_> = (0..9)
            .map(|c| Location::from_row_col(size, 0, c).unwrap())
            .chain(std::iter::once(
                Location::from_row_col(size, 1, 0).unwrap(),
            ))
            .collect();
        let filtered = get_same_row(pivot, &locs);
        assert_eq!(filtered.len(), 9);
    }
}
