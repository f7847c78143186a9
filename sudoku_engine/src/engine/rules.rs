//! Constraint-propagation rules.
//!
//! Each rule here looks at one section (or, for locked candidates, a
//! block against its crossing rows/columns) and removes candidates it
//! can prove are impossible. They return `Ok(true)` when they changed
//! the board, so [`crate::engine::search::propagate`] can keep calling
//! the set of rules until a pass makes no progress.
//!
//! Grounded on `original_source/Sudoku/Solver.h`, which holds all four
//! of `unique_in_section`, `dual_option`, `multi_option`, and
//! `section_exclusive` in one place; the `itertools::combinations` idiom
//! used in [`multi_option`] follows an existing `naked_tuples`
//! implementation in the same family of crates.

use itertools::Itertools;

use crate::engine::board::{Board, SectionKind};
use crate::engine::error::Contradiction;
use crate::engine::find::{appearance_once, appearance_sets, locations_with_option};
use crate::engine::location::{is_same_block, is_same_col, is_same_row, Location};
use crate::engine::options::Options;
use crate::engine::remove::{remove_option, remove_option_outside_block};
use crate::engine::set::single_option_value;

fn section_locations(board: &Board<Options>, kind: SectionKind, id: usize) -> Vec<Location> {
    let section = match kind {
        SectionKind::Row => board.row(id),
        SectionKind::Col => board.col(id),
        SectionKind::Block => board.block(id),
    };
    section.iter().map(|(loc, _)| loc).collect()
}

/// Hidden single: a value with exactly one possible cell left in the
/// section gets committed there.
///
/// # Errors
/// [`Contradiction`] if a value has no remaining cell in the section.
pub fn unique_in_section(
    board: &mut Board<Options>,
    kind: SectionKind,
    id: usize,
) -> Result<bool, Contradiction> {
    let elem = board.size().elem();
    let mut progress = false;
    for value in 1..=elem {
        let section = match kind {
            SectionKind::Row => board.row(id),
            SectionKind::Col => board.col(id),
            SectionKind::Block => board.block(id),
        };
        if let Some(loc) = appearance_once(&section, value)? {
            single_option_value(board, loc, value)?;
            progress = true;
        }
    }
    Ok(progress)
}

/// Naked pair: two unsolved cells in the section sharing exactly the
/// same two candidates let those candidates be removed from every other
/// cell in the section.
///
/// # Errors
/// [`Contradiction`] if a removal empties another cell out.
pub fn dual_option(
    board: &mut Board<Options>,
    kind: SectionKind,
    id: usize,
) -> Result<bool, Contradiction> {
    multi_option(board, kind, id, 2)
}

/// Naked k-subset: `k` unsolved cells in the section whose candidates,
/// union together, total exactly `k` values, let those values be removed
/// from every other cell in the section (`k == 2` is the naked pair,
/// [`dual_option`]).
///
/// # Errors
/// [`Contradiction`] if a removal empties another cell out.
pub fn multi_option(
    board: &mut Board<Options>,
    kind: SectionKind,
    id: usize,
    k: usize,
) -> Result<bool, Contradiction> {
    let elem = board.size().elem();
    let locs = section_locations(board, kind, id);
    let unsolved: Vec<Location> = locs
        .iter()
        .copied()
        .filter(|&loc| !board.at(loc).is_answer())
        .collect();
    if unsolved.len() < k {
        return Ok(false);
    }

    let mut progress = false;
    for combo in unsolved.iter().copied().combinations(k) {
        let mut union = Options::empty(elem);
        for &loc in &combo {
            union = union.union(board.at(loc));
        }
        if union.count_all() != k {
            continue;
        }
        for &loc in &locs {
            if combo.contains(&loc) {
                continue;
            }
            for value in 1..=elem {
                if union.test(value) && board.at(loc).test(value) {
                    remove_option(board, loc, value)?;
                    progress = true;
                }
            }
        }
    }
    Ok(progress)
}

/// Locked candidates (pointing pairs / box-line reduction). Using
/// `appearance_sets` to find values confined to exactly `k` cells of a
/// section (`2 <= k <= base`): if `section` is a row or column and
/// those `k` cells all lie in one block, `value` is removed from the
/// rest of that block; if `section` is a block and those `k` cells all
/// lie in one row (or column), `value` is removed from the rest of that
/// row (or column). Every successful elimination restarts the scan for
/// that section, since prior counts are now stale.
///
/// # Errors
/// [`Contradiction`] if a removal empties another cell out, or if
/// `appearance_sets` finds a value missing from a section entirely.
pub fn section_exclusive(board: &mut Board<Options>) -> Result<bool, Contradiction> {
    let elem = board.size().elem();
    let base = board.size().base();
    let mut progress = false;

    for kind in [SectionKind::Row, SectionKind::Col, SectionKind::Block] {
        for id in 0..elem {
            loop {
                let section = match kind {
                    SectionKind::Row => board.row(id),
                    SectionKind::Col => board.col(id),
                    SectionKind::Block => board.block(id),
                };
                let sets = appearance_sets(&section)?;

                let mut acted = false;
                'values: for k in 2..=base {
                    for value in 1..=elem {
                        if !sets[k].test(value) {
                            continue;
                        }
                        let section = match kind {
                            SectionKind::Row => board.row(id),
                            SectionKind::Col => board.col(id),
                            SectionKind::Block => board.block(id),
                        };
                        let locs = locations_with_option(&section, value);
                        if locs.len() != k {
                            continue;
                        }
                        let changed = eliminate_locked(board, kind, id, &locs, value)?;
                        if changed {
                            progress = true;
                            acted = true;
                            break 'values;
                        }
                    }
                }
                if !acted {
                    break;
                }
            }
        }
    }

    Ok(progress)
}

/// Apply one locked-candidates elimination once `locs` — the `k`
/// remaining cells for `value` in `section` (kind `id`) — are confined
/// to a single crossing section.
fn eliminate_locked(
    board: &mut Board<Options>,
    kind: SectionKind,
    id: usize,
    locs: &[Location],
    value: usize,
) -> Result<bool, Contradiction> {
    match kind {
        SectionKind::Row | SectionKind::Col => {
            if is_same_block(locs) {
                remove_option_outside_block(board, locs[0].block(), kind, id, value)
            } else {
                Ok(false)
            }
        }
        SectionKind::Block => {
            if is_same_row(locs) {
                remove_outside_block_in(board, SectionKind::Row, locs[0].row(), id, value)
            } else if is_same_col(locs) {
                remove_outside_block_in(board, SectionKind::Col, locs[0].col(), id, value)
            } else {
                Ok(false)
            }
        }
    }
}

/// Remove `value` from the row (or column) `cross_id` outside block
/// `block`: the other half of the box-line reduction, used when a
/// value's occurrences within a block are confined to one row/column.
fn remove_outside_block_in(
    board: &mut Board<Options>,
    cross_kind: SectionKind,
    cross_id: usize,
    block: usize,
    value: usize,
) -> Result<bool, Contradiction> {
    let locs = section_locations(board, cross_kind, cross_id);
    let mut changed = false;
    for loc in locs {
        if loc.block() != block && board.at(loc).test(value) {
            remove_option(board, loc, value)?;
            changed = true;
        }
    }
    Ok(changed)
}
