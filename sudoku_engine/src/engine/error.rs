//! Errors raised while building or solving a puzzle.

use std::fmt;
use std::num::TryFromIntError;

/// Errors that can cross the `sudoku_engine` boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SudokuErrors {
    /// Input wasn't a perfect square, or a decoded digit didn't fit the
    /// board.
    Domain,

    /// A checked coordinate access was out of range for the board
    /// (`Board::at`/`at_mut`).
    InvalidLocation,

    /// Attempted to build an `Options` value or `Value` out of the
    /// range `1..=elem`.
    InvalidOption,

    /// The puzzle, as given, has no completion under these rules.
    Contradiction,

    /// The puzzle has more completions than the caller asked to see.
    MultipleSolutions,

    /// Attempted to make a non-square board, or one whose `base` is
    /// too large for the internal bitmask width.
    BadSize,
}

impl fmt::Display for SudokuErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain => write!(f, "input value or length outside the board's domain"),
            Self::InvalidLocation => write!(f, "location out of bounds for this board"),
            Self::InvalidOption => write!(f, "value outside 1..=elem for this board"),
            Self::Contradiction => write!(f, "puzzle has no solution under these rules"),
            Self::MultipleSolutions => write!(f, "puzzle has more than one solution"),
            Self::BadSize => write!(f, "board size is invalid for this representation"),
        }
    }
}

impl std::error::Error for SudokuErrors {}

impl From<TryFromIntError> for SudokuErrors {
    fn from(_: TryFromIntError) -> Self {
        Self::Domain
    }
}

impl From<Contradiction> for SudokuErrors {
    fn from(_: Contradiction) -> Self {
        Self::Contradiction
    }
}

/// Internal marker that a board has no candidates left somewhere.
///
/// Propagation and search catch this to prune a branch; it
/// only escapes to `SudokuErrors::Contradiction` when the caller's
/// starting board is itself inconsistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contradiction(pub(crate) ());

impl Contradiction {
    pub(crate) fn new() -> Self {
        Self(())
    }
}
