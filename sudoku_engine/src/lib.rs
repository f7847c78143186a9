//! A constraint-propagation sudoku solver for square boards of order `N`
//! (side length `N^2`, `N^4` cells total).
//!
//! The engine (see [`engine`]) is laid out in dependency order:
//! size/location primitives, an option-set algebra, a dense board with
//! row/column/block section views, find/appearance utilities, option-removal
//! and option-setting primitives, propagation rules, and a search driver.
//! This top-level module exposes only the external interface — a dense
//! cell-value sequence in, zero or more completed boards out.

#![warn(missing_docs)]

pub mod engine;

pub use engine::board::{Board, Section, SectionKind, SectionMut};
pub use engine::error::SudokuErrors;
pub use engine::location::{BlockLocation, Location};
pub use engine::options::Options;
pub use engine::search::Solver;
pub use engine::size::Size;
pub use engine::value::Value;

use engine::remove::remove_option;
use engine::search::solve_from_values;
use engine::set::single_option_value;

/// Parse a dense digit string into a `(Size, Vec<Value>)` pair.
/// The string's length must be `N^4` for some valid `N`; digits are read in
/// base 16 so boards up to `elem = 15` can still be expressed one character
/// per cell. Any character that isn't a valid base-16 digit (commonly `.`
/// or `0`) is read as an unknown cell, matching how puzzle text files
/// conventionally mark blanks.
///
/// # Errors
/// [`SudokuErrors::Domain`] if the length isn't `N^4` for a valid `N`, or a
/// digit exceeds `elem`.
pub fn from_string(repr: &str) -> Result<(Size, Vec<Value>), SudokuErrors> {
    let full = repr.len();
    #[allow(clippy::cast_precision_loss, clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    let elem = f64::sqrt(full as f64) as usize;
    if elem * elem != full {
        return Err(SudokuErrors::Domain);
    }
    let size = Size::from_elem(elem)?;

    let mut values = Vec::with_capacity(full);
    for c in repr.chars() {
        let value = match c.to_digit(16) {
            Some(digit) => usize::try_from(digit)?,
            None => 0,
        };
        if value > size.elem() {
            return Err(SudokuErrors::Domain);
        }
        values.push(Value(value));
    }
    Ok((size, values))
}

/// Solve the puzzle encoded by `repr`, collecting up to `max_answers`
/// completions. See [`from_string`] for the input format and
/// [`Solver::new`] for `max_answers`'s sign convention.
///
/// # Errors
/// [`SudokuErrors::Domain`] on a malformed `repr`.
/// [`SudokuErrors::Contradiction`] if the givens themselves are inconsistent.
pub fn solve(repr: &str, max_answers: i64) -> Result<Vec<Board<Value>>, SudokuErrors> {
    let (size, values) = from_string(repr)?;
    solve_from_values(size, &values, max_answers)
}

/// Solve `repr`, requiring exactly one completion.
///
/// # Errors
/// [`SudokuErrors::Contradiction`] if there is no completion.
/// [`SudokuErrors::MultipleSolutions`] if there is more than one.
pub fn solve_unique(repr: &str) -> Result<Board<Value>, SudokuErrors> {
    let mut answers = solve(repr, 2)?;
    match answers.len() {
        0 => Err(SudokuErrors::Contradiction),
        1 => Ok(answers.remove(0)),
        _ => Err(SudokuErrors::MultipleSolutions),
    }
}

/// Commit `value` as the answer at flat index `idx` of `board`, propagating
/// to its row, column, and block.
///
/// # Errors
/// [`SudokuErrors::InvalidLocation`] if `idx` is out of range.
/// [`SudokuErrors::Contradiction`] if `value` isn't currently a candidate at
/// `idx`, or committing it empties out a peer cell.
pub fn assign(board: &mut Board<Options>, idx: usize, value: usize) -> Result<(), SudokuErrors> {
    let loc = Location::new(board.size(), idx).map_err(|_| SudokuErrors::InvalidLocation)?;
    if !board.at(loc).test(value) {
        return Err(SudokuErrors::Contradiction);
    }
    single_option_value(board, loc, value).map(|_| ()).map_err(Into::into)
}

/// Remove `value` as a candidate at flat index `idx` of `board`.
///
/// # Errors
/// [`SudokuErrors::InvalidLocation`] if `idx` is out of range.
/// [`SudokuErrors::Contradiction`] if this empties the cell out.
pub fn eliminate(board: &mut Board<Options>, idx: usize, value: usize) -> Result<(), SudokuErrors> {
    let loc = Location::new(board.size(), idx).map_err(|_| SudokuErrors::InvalidLocation)?;
    remove_option(board, loc, value).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_string_roundtrip() {
        let repr = "1...5.3..9.2..........3.4...8.....4..7..........6..81.6..2.8.........5.7.....1..9";
        let (size, values) = from_string(repr).unwrap();
        assert_eq!(size.elem(), 9);
        assert_eq!(values.len(), 81);
        assert_eq!(values[0], Value(1));
        assert_eq!(values[1], Value(0));
    }

    #[test]
    fn from_string_rejects_bad_length() {
        assert_eq!(from_string("12345678"), Err(SudokuErrors::Domain));
    }

    #[test]
    fn solve_unique_rejects_contradiction() {
        let mut repr = "0".repeat(81);
        repr.replace_range(0..1, "5");
        repr.replace_range(1..2, "5");
        assert_eq!(solve_unique(&repr), Err(SudokuErrors::Contradiction));
    }

    #[test]
    fn assign_and_eliminate_wrappers() {
        let (size, _) = from_string(&"0".repeat(81)).unwrap();
        let mut board = Board::all_options(size).unwrap();
        assign(&mut board, 11, 6).unwrap();
        assert_eq!(assign(&mut board, 11, 1), Err(SudokuErrors::Contradiction));
        assert_eq!(
            assign(&mut board, 1111, 6),
            Err(SudokuErrors::InvalidLocation)
        );

        eliminate(&mut board, 20, 7).unwrap();
        assert!(!board.at(Location::new(size, 20).unwrap()).test(7));
    }
}
