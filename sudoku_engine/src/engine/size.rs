//! Compile-time-shaped, runtime-checked board dimensions.
//!
//! The original source (`Sudoku::Size<N>`) is a template; this crate keeps
//! `N` as a runtime value so that one process can work with several board
//! sizes without monomorphizing a full engine per size. `Options`'s backing
//! bitmask is
//! still fixed-width (`bitvec::BitArray<[u32; 1]>`), which is what bounds
//! `base` from above.

use crate::engine::error::SudokuErrors;

/// The largest `base` whose `elem = base*base` candidates plus the
/// unsolved flag still fit in a 32-bit `Options` bitmask.
pub const MAX_BASE: usize = 5; // elem = 25, elem + 1 = 26 bits used of 32

/// `base`/`elem`/`full` for a board, validated once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    base: usize,
    elem: usize,
    full: usize,
}

impl Size {
    /// Build a `Size` from a base (block side length).
    ///
    /// # Errors
    /// Returns [`SudokuErrors::BadSize`] if `base < 2` or `base` is too
    /// large for the fixed-width `Options` bitmask.
    pub fn new(base: usize) -> Result<Self, SudokuErrors> {
        if base < 2 || base > MAX_BASE {
            return Err(SudokuErrors::BadSize);
        }
        let elem = base * base;
        let full = elem * elem;
        Ok(Self { base, elem, full })
    }

    /// Build a `Size` from the side length of the board (`elem`), e.g.
    /// `9` for a standard 9x9 sudoku.
    ///
    /// # Errors
    /// Returns [`SudokuErrors::BadSize`] if `elem` isn't a perfect square
    /// of a valid base.
    pub fn from_elem(elem: usize) -> Result<Self, SudokuErrors> {
        #[allow(clippy::cast_precision_loss, clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let base = f64::sqrt(elem as f64) as usize;
        if base * base != elem {
            return Err(SudokuErrors::BadSize);
        }
        Self::new(base)
    }

    /// Block side length (`N`).
    #[must_use]
    pub fn base(&self) -> usize {
        self.base
    }

    /// Board side length (`N^2`), also the range of valid values.
    #[must_use]
    pub fn elem(&self) -> usize {
        self.elem
    }

    /// Total number of cells (`N^4`).
    #[must_use]
    pub fn full(&self) -> usize {
        self.full
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_size() {
        let s = Size::new(3).unwrap();
        assert_eq!(s.base(), 3);
        assert_eq!(s.elem(), 9);
        assert_eq!(s.full(), 81);
    }

    #[test]
    fn from_elem_roundtrip() {
        let s = Size::from_elem(9).unwrap();
        assert_eq!(s.base(), 3);
        assert_eq!(Size::from_elem(10), Err(SudokuErrors::BadSize));
    }

    #[test]
    fn rejects_bad_base() {
        assert_eq!(Size::new(1), Err(SudokuErrors::BadSize));
        assert_eq!(Size::new(MAX_BASE + 1), Err(SudokuErrors::BadSize));
    }
}
