//! Option-setting primitives.
//!
//! Grounded on `original_source/Sudoku/Solvers_set_option.h`'s `set_Value`
//! for the plain, non-propagating commit ([`set_value`]), and on
//! `original_source/Sudoku/Solver.h`'s pair of `single_option` overloads
//! (cell-implicit and explicit-value) for the propagating commit: the
//! source conditionally calls `setValue` only when the cell doesn't
//! already hold that answer, then unconditionally removes `value` from
//! the rest of the cell's row, column, and block. Every caller that
//! wants the cascade — the hidden-single rule, the search driver's
//! guesses, and initial puzzle loading — goes through [`single_option_value`]
//! instead of reimplementing it.

use crate::engine::board::{Board, SectionKind};
use crate::engine::error::{Contradiction, SudokuErrors};
use crate::engine::location::Location;
use crate::engine::options::Options;
use crate::engine::remove::remove_option;
use crate::engine::value::Value;

/// Commit `loc` to `value` and nothing else: replaces its `Options` with
/// the single answer, touching no other cell. Returns how many
/// candidates that discarded (`count_all() - 1`, the answer itself
/// excluded).
///
/// # Errors
/// [`Contradiction`] if `value` isn't currently a live candidate at
/// `loc`.
pub fn set_value(
    board: &mut Board<Options>,
    loc: Location,
    value: usize,
) -> Result<usize, Contradiction> {
    let cell = board.at(loc);
    if !cell.test(value) {
        return Err(Contradiction::new());
    }
    let elem = cell.elem();
    let discarded = cell.count_all() - 1;
    let answer = Options::from_value(value, elem).map_err(|_| Contradiction::new())?;
    *board.at_mut(loc) = answer;
    Ok(discarded)
}

/// If `cell` has exactly one remaining candidate and is still unsolved,
/// that candidate — a naked single waiting to be committed via
/// [`single_option_value`].
#[must_use]
pub fn sole_candidate(cell: &Options) -> Option<Value> {
    if cell.count() == 1 {
        Some(cell.get_answer())
    } else {
        None
    }
}

fn section_id(loc: Location, kind: SectionKind) -> usize {
    match kind {
        SectionKind::Row => loc.row(),
        SectionKind::Col => loc.col(),
        SectionKind::Block => loc.block(),
    }
}

/// Remove `value` from every cell of the given section except `ignore`,
/// returning how many cells actually lost it. The counting sibling of
/// [`crate::engine::remove::remove_option_section_except`], needed here
/// so [`single_option_value`] can report its total elimination count the
/// way the source's `single_option` sums `changes` across all three
/// peer sections.
fn remove_from_peers(
    board: &mut Board<Options>,
    kind: SectionKind,
    id: usize,
    value: usize,
    ignore: Location,
) -> Result<usize, Contradiction> {
    let section = match kind {
        SectionKind::Row => board.row(id),
        SectionKind::Col => board.col(id),
        SectionKind::Block => board.block(id),
    };
    let locs: Vec<Location> = section.iter().map(|(loc, _)| loc).collect();
    let mut changes = 0;
    for loc in locs {
        if loc == ignore || !board.at(loc).test(value) {
            continue;
        }
        remove_option(board, loc, value)?;
        changes += 1;
    }
    Ok(changes)
}

/// Commit `loc` to `value` if it isn't already that answer, then
/// unconditionally cascade: remove `value` as a candidate from the rest
/// of `loc`'s row, column, and block. Returns the total number of
/// candidates eliminated by the commit and the cascade together.
///
/// # Errors
/// [`Contradiction`] if `value` isn't a live candidate at `loc`, or if
/// eliminating it from a peer empties that peer out.
pub fn single_option_value(
    board: &mut Board<Options>,
    loc: Location,
    value: usize,
) -> Result<usize, Contradiction> {
    let mut changes = if board.at(loc).is_answer_value(value) {
        0
    } else {
        set_value(board, loc, value)?
    };

    for kind in [SectionKind::Row, SectionKind::Col, SectionKind::Block] {
        changes += remove_from_peers(board, kind, section_id(loc, kind), value, loc)?;
    }
    Ok(changes)
}

/// Cell-implicit overload of [`single_option_value`]: reads `loc`'s
/// already-committed answer, or its sole remaining candidate, and
/// cascades that value the same way.
///
/// # Errors
/// [`Contradiction`] if `loc` is neither answered nor down to exactly
/// one candidate, or if the cascade empties a peer out.
pub fn single_option(board: &mut Board<Options>, loc: Location) -> Result<usize, Contradiction> {
    let cell = board.at(loc);
    let value = if cell.is_answer() {
        cell.get_answer().0
    } else {
        sole_candidate(cell).ok_or_else(Contradiction::new)?.0
    };
    single_option_value(board, loc, value)
}

/// Seed a fresh all-candidates board from a dense row-major sequence of
/// givens. `Value::UNKNOWN` entries are left as open candidates.
///
/// # Errors
/// [`SudokuErrors::Domain`] if `values.len() != size.full()`.
/// [`SudokuErrors::Contradiction`] if the givens are already
/// inconsistent (e.g. two `5`s in one row).
pub fn seed_board(
    size: crate::engine::size::Size,
    values: &[Value],
) -> Result<Board<Options>, SudokuErrors> {
    if values.len() != size.full() {
        return Err(SudokuErrors::Domain);
    }
    let mut board = Board::all_options(size)?;
    for (idx, value) in values.iter().enumerate() {
        if value.is_unknown() {
            continue;
        }
        if value.0 > size.elem() {
            return Err(SudokuErrors::Domain);
        }
        let loc = Location::new(size, idx)?;
        single_option_value(&mut board, loc, value.0)?;
    }
    Ok(board)
}
