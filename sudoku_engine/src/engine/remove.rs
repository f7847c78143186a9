//! Option-removal primitives.
//!
//! Grounded on `original_source/Sudoku/Solvers_remove_option.h`.
//! `remove_option` cascades into
//! [`crate::engine::set::single_option_value`] the moment a removal
//! leaves a cell with exactly one candidate, the same way the source's
//! `remove_option` calls `single_option` inline rather than leaving the
//! commit for a later pass.

use crate::engine::board::{Board, SectionKind};
use crate::engine::error::Contradiction;
use crate::engine::location::Location;
use crate::engine::options::Options;
use crate::engine::set::{single_option_value, sole_candidate};

/// Remove `value` from the cell at `loc`. A no-op if `value` was already
/// absent. If this leaves exactly one candidate, commits it as the
/// answer and cascades that commitment to the cell's row, column, and
/// block.
///
/// # Errors
/// [`Contradiction`] if the cell has no candidates left afterward, or if
/// the resulting cascade empties a peer cell out.
pub fn remove_option(
    board: &mut Board<Options>,
    loc: Location,
    value: usize,
) -> Result<(), Contradiction> {
    {
        let cell = board.at_mut(loc);
        cell.remove(value).map_err(|_| Contradiction::new())?;
        if cell.is_empty() {
            return Err(Contradiction::new());
        }
    }
    if let Some(answer) = sole_candidate(board.at(loc)) {
        single_option_value(board, loc, answer.0)?;
    }
    Ok(())
}

/// Remove every candidate bit set in `mask` from the cell at `loc`.
///
/// # Errors
/// [`Contradiction`] if the cell has no candidates left afterward.
pub fn remove_mask(
    board: &mut Board<Options>,
    loc: Location,
    mask: &Options,
) -> Result<(), Contradiction> {
    let elem = mask.elem();
    for value in 1..=elem {
        if mask.test(value) {
            remove_option(board, loc, value)?;
        }
    }
    Ok(())
}

fn section_locations(board: &Board<Options>, kind: SectionKind, id: usize) -> Vec<Location> {
    let section = match kind {
        SectionKind::Row => board.row(id),
        SectionKind::Col => board.col(id),
        SectionKind::Block => board.block(id),
    };
    section.iter().map(|(loc, _)| loc).collect()
}

/// Remove `value` from every cell of the given section.
///
/// # Errors
/// [`Contradiction`] if any cell empties out.
pub fn remove_option_section(
    board: &mut Board<Options>,
    kind: SectionKind,
    id: usize,
    value: usize,
) -> Result<(), Contradiction> {
    for loc in section_locations(board, kind, id) {
        remove_option(board, loc, value)?;
    }
    Ok(())
}

/// Remove `value` from every cell of the section except those listed in
/// `ignore` — used when a naked subset's own member cells must be left
/// untouched.
///
/// # Errors
/// [`Contradiction`] if any non-ignored cell empties out.
pub fn remove_option_section_except(
    board: &mut Board<Options>,
    kind: SectionKind,
    id: usize,
    value: usize,
    ignore: &[Location],
) -> Result<(), Contradiction> {
    for loc in section_locations(board, kind, id) {
        if ignore.contains(&loc) {
            continue;
        }
        remove_option(board, loc, value)?;
    }
    Ok(())
}

/// Remove every value in `values` from every cell of the section except
/// those listed in `ignore` — the multi-value sibling of
/// [`remove_option_section_except`], used when a naked subset spans
/// several values at once and its own member cells must be spared.
///
/// # Errors
/// [`Contradiction`] if any non-ignored cell empties out.
pub fn remove_option_section_values(
    board: &mut Board<Options>,
    kind: SectionKind,
    id: usize,
    ignore: &[Location],
    values: &[usize],
) -> Result<(), Contradiction> {
    for loc in section_locations(board, kind, id) {
        if ignore.contains(&loc) {
            continue;
        }
        for &value in values {
            remove_option(board, loc, value)?;
        }
    }
    Ok(())
}

/// Remove `value` from every cell of `block` that does NOT lie in
/// `row_or_col` of the given kind (`SectionKind::Row` or
/// `SectionKind::Col`) — the box-line reduction half of locked-candidate
/// elimination: when `value`'s remaining cells
/// within a row/column are confined to one block, it can be dropped from
/// the rest of that block.
///
/// Returns whether any candidate was actually removed.
///
/// # Errors
/// [`Contradiction`] if any cell empties out.
pub fn remove_option_outside_block(
    board: &mut Board<Options>,
    block: usize,
    keep: SectionKind,
    keep_id: usize,
    value: usize,
) -> Result<bool, Contradiction> {
    let mut progress = false;
    for loc in section_locations(board, SectionKind::Block, block) {
        let belongs = match keep {
            SectionKind::Row => loc.row() == keep_id,
            SectionKind::Col => loc.col() == keep_id,
            SectionKind::Block => true,
        };
        if belongs || !board.at(loc).test(value) {
            continue;
        }
        remove_option(board, loc, value)?;
        progress = true;
    }
    Ok(progress)
}
