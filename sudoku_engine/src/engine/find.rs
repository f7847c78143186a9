//! Search and appearance utilities over a [`Section`].
//!
//! Grounded on `original_source/Sudoku/Sudoku/Solvers_find.h`: these are
//! read-only queries used by the propagation rules in [`crate::engine::rules`]
//! to locate candidate cells before committing to a removal or an answer.

use crate::engine::board::Section;
use crate::engine::error::Contradiction;
use crate::engine::location::Location;
use crate::engine::options::Options;

/// Locations in `section` for which `value` is still a live candidate.
#[must_use]
pub fn locations_with_option(section: &Section<'_, Options>, value: usize) -> Vec<Location> {
    section
        .iter()
        .filter(|(_, opts)| opts.is_option(value))
        .map(|(loc, _)| loc)
        .collect()
}

/// Locations in `section` whose candidate set is exactly `target` —
/// the building block of naked-pair and naked-k-subset detection.
#[must_use]
pub fn locations_equal(section: &Section<'_, Options>, target: &Options) -> Vec<Location> {
    section
        .iter()
        .filter(|(_, opts)| *opts == *target)
        .map(|(loc, _)| loc)
        .collect()
}

/// Locations in `section` (excluding answered cells) whose candidate set
/// is a non-empty subset of `target`.
#[must_use]
pub fn locations_subset_of(section: &Section<'_, Options>, target: &Options) -> Vec<Location> {
    section
        .iter()
        .filter(|(_, opts)| !opts.is_answer() && !opts.is_empty() && opts.shared(target) == *opts)
        .map(|(loc, _)| loc)
        .collect()
}

/// Locations in `section` sharing at least one candidate bit with `mask`.
#[must_use]
pub fn locations_with_any(section: &Section<'_, Options>, mask: &Options) -> Vec<Location> {
    section
        .iter()
        .filter(|(_, opts)| !opts.shared(mask).is_empty())
        .map(|(loc, _)| loc)
        .collect()
}

/// The single location in `section` where `value` is still a live
/// candidate, if there is exactly one (a hidden single).
///
/// # Errors
/// [`Contradiction`] if `value` appears nowhere in the section — every
/// value must appear as either a candidate or a committed answer in a
/// consistent section.
pub fn appearance_once(
    section: &Section<'_, Options>,
    value: usize,
) -> Result<Option<Location>, Contradiction> {
    let mut found = None;
    let mut count = 0;
    for (loc, opts) in section.iter() {
        if opts.is_answer_value(value) {
            return Ok(None); // already committed elsewhere in the section
        }
        if opts.is_option(value) {
            count += 1;
            found = Some(loc);
        }
    }
    if count == 0 {
        return Err(Contradiction::new());
    }
    Ok(if count == 1 { found } else { None })
}

/// Collect candidate values by how many cells of `section` they appear
/// in, for appearance counts `0..=base`. The returned `Vec` has length
/// `base + 1`; entry `k` is an [`Options`]-shaped mask whose bit `v` is
/// set iff value `v` appears as a candidate (or committed answer) in
/// exactly `k` cells of the section.
///
/// This is the complementary view to a cell's own `Options`: a cell's
/// bits index candidate values, `appearance_sets`' bits also index
/// values but group them by position count rather than by cell. It's
/// the multi-subset detector behind locked-candidate reasoning: "which
/// values are confined to exactly `k` cells of this section" is what
/// decides whether those cells all share a block (or row/column).
///
/// Algorithm (carry-propagate, then decumulate): walk the section once,
/// maintaining `worker[0..=base]` so that after the walk `worker[i]`
/// holds the values that appeared in *more than* `i` cells; an answered
/// cell's value is folded into every level unconditionally (it has, in
/// effect, already appeared). Flipping every level turns "more than i"
/// into "at most i"; XORing each level against the one below cancels
/// out the lower counts, leaving "exactly i" (level 1 needs no XOR,
/// since "at most 1" and "exactly 1" already coincide once level 0 is
/// known to be empty). Entry 0 must be empty in a well-formed section —
/// every value appears somewhere — so its non-emptiness signals a
/// section already broken by an earlier illegal removal.
///
/// # Errors
/// [`Contradiction`] if any value `1..=elem` appears in no cell of the
/// section at all.
pub fn appearance_sets(section: &Section<'_, Options>) -> Result<Vec<Options>, Contradiction> {
    let elem = section.size();
    let base = section.board_size().base();
    let mut worker = vec![Options::empty(elem); base + 1];

    for (_, opts) in section.iter() {
        if opts.is_answer() {
            for level in &mut worker {
                *level = level.union(opts);
            }
        } else {
            for i in (1..=base).rev() {
                let carried = worker[i - 1].shared(opts);
                worker[i] = worker[i].union(&carried);
            }
            worker[0] = worker[0].union(opts);
        }
    }

    for level in &mut worker {
        level.flip();
    }

    if worker[0].count_all() != 0 {
        return Err(Contradiction::new());
    }

    for i in (2..=base).rev() {
        let prev = worker[i - 1];
        worker[i] = worker[i].xor(&prev);
        worker[i].force_unsolved();
    }
    worker[0].force_unsolved();
    if base >= 1 {
        worker[1].force_unsolved();
    }

    Ok(worker)
}
