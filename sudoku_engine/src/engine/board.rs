//! The dense cell container, generic over cell type so it
//! can hold either `Options` (the engine's working representation) or
//! `Value` (the external input/output representation).
//!
//! Keeps data that doesn't change across a guess-fork (`size`, `regions`)
//! separate from the `Vec` of per-cell state that does: [`Board`] holds an
//! `Arc<Meta>` plus a `Vec<T>`, so `Board::clone()` — called on every
//! branch in the search driver — is a `Vec` clone and an
//! `Arc` bump, not a re-derivation of the region table.
//!
//! Cells are reachable forward (`iter`) and in reverse (`iter_rev`), each
//! with a mutable counterpart, and a row/column/block can be viewed
//! read-only ([`Section`]) or exclusively-mutable ([`SectionMut`]); a
//! `SectionMut` has no conversion back to `Section`, only the other way.

use std::sync::Arc;

use crate::engine::error::SudokuErrors;
use crate::engine::location::{BlockLocation, Location};
use crate::engine::options::Options;
use crate::engine::size::Size;
use crate::engine::value::Value;

#[derive(Debug, PartialEq)]
struct Meta {
    size: Size,
    /// Block membership: `regions[block][block_elem] == flat index`.
    /// Defaults to the standard N x N square blocks; may be overridden
    /// for irregular sudoku.
    regions: Vec<Vec<usize>>,
}

fn default_regions(size: Size) -> Vec<Vec<usize>> {
    let elem = size.elem();
    let mut regions = vec![vec![0usize; elem]; elem];
    for idx in 0..size.full() {
        let loc = Location::new(size, idx).expect("idx < full");
        regions[loc.block()][loc.block_elem()] = idx;
    }
    regions
}

/// Dense `N^4`-cell board, indexed by [`Location`] or `(row, col)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Board<T> {
    meta: Arc<Meta>,
    cells: Vec<T>,
}

/// The kind of section a [`Section`] view stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// A row of the board.
    Row,
    /// A column of the board.
    Col,
    /// A block (region) of the board.
    Block,
}

impl<T: Clone> Board<T> {
    /// Build a board of `size` with every cell set to `fill`.
    pub fn new(size: Size, fill: T) -> Self {
        let full = size.full();
        Self {
            meta: Arc::new(Meta {
                size,
                regions: default_regions(size),
            }),
            cells: vec![fill; full],
        }
    }

    /// Build a board with a custom region table instead of the default
    /// square blocks (irregular sudoku).
    ///
    /// # Errors
    /// [`SudokuErrors::BadSize`] if `regions` doesn't have exactly
    /// `elem` regions of `elem` cells each.
    pub fn with_regions(size: Size, fill: T, regions: Vec<Vec<usize>>) -> Result<Self, SudokuErrors> {
        let elem = size.elem();
        if regions.len() != elem || regions.iter().any(|r| r.len() != elem) {
            return Err(SudokuErrors::BadSize);
        }
        let full = size.full();
        Ok(Self {
            meta: Arc::new(Meta { size, regions }),
            cells: vec![fill; full],
        })
    }

    /// The board's dimensions.
    #[must_use]
    pub fn size(&self) -> Size {
        self.meta.size
    }

    /// Number of cells (`N^4`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the board has any cells (only false for a degenerate
    /// zero-size board, which [`Size::new`] already rejects).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Unchecked access by flat index. Internal-only contract: callers
    /// must have already validated `index`.
    pub(crate) fn get(&self, index: usize) -> &T {
        &self.cells[index]
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> &mut T {
        &mut self.cells[index]
    }

    /// Access by [`Location`].
    #[must_use]
    pub fn at(&self, loc: Location) -> &T {
        self.get(loc.element())
    }

    /// Mutable access by [`Location`].
    pub fn at_mut(&mut self, loc: Location) -> &mut T {
        self.get_mut(loc.element())
    }

    /// Checked access by flat index.
    ///
    /// # Errors
    /// [`SudokuErrors::InvalidLocation`] if `index` is out of range.
    pub fn checked(&self, index: usize) -> Result<&T, SudokuErrors> {
        self.cells.get(index).ok_or(SudokuErrors::InvalidLocation)
    }

    /// Access by `(row, col)`.
    ///
    /// # Errors
    /// [`SudokuErrors::InvalidLocation`] if either coordinate is out of
    /// range.
    pub fn at_row_col(&self, row: usize, col: usize) -> Result<&T, SudokuErrors> {
        let loc = Location::from_row_col(self.size(), row, col)?;
        Ok(self.at(loc))
    }

    /// A row view.
    #[must_use]
    pub fn row(&self, id: usize) -> Section<'_, T> {
        Section::new(self, SectionKind::Row, id)
    }

    /// A column view.
    #[must_use]
    pub fn col(&self, id: usize) -> Section<'_, T> {
        Section::new(self, SectionKind::Col, id)
    }

    /// A block view.
    #[must_use]
    pub fn block(&self, id: usize) -> Section<'_, T> {
        Section::new(self, SectionKind::Block, id)
    }

    /// Iterate all cells with their [`Location`], in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Location, &T)> {
        let size = self.size();
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, v)| (Location::new(size, i).expect("i < full"), v))
    }

    /// Mutable version of [`Board::iter`].
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Location, &mut T)> {
        let size = self.size();
        self.cells
            .iter_mut()
            .enumerate()
            .map(move |(i, v)| (Location::new(size, i).expect("i < full"), v))
    }

    /// Reverse version of [`Board::iter`], last cell first.
    pub fn iter_rev(&self) -> impl Iterator<Item = (Location, &T)> {
        let size = self.size();
        self.cells
            .iter()
            .enumerate()
            .rev()
            .map(move |(i, v)| (Location::new(size, i).expect("i < full"), v))
    }

    /// Reverse version of [`Board::iter_mut`], last cell first.
    pub fn iter_mut_rev(&mut self) -> impl Iterator<Item = (Location, &mut T)> {
        let size = self.size();
        self.cells
            .iter_mut()
            .enumerate()
            .rev()
            .map(move |(i, v)| (Location::new(size, i).expect("i < full"), v))
    }

    /// A mutable row view. Exclusive for its lifetime: the row cannot be
    /// read or written through any other view while this one is live.
    pub fn row_mut(&mut self, id: usize) -> SectionMut<'_, T> {
        SectionMut::new(&self.meta, &mut self.cells, SectionKind::Row, id)
    }

    /// A mutable column view.
    pub fn col_mut(&mut self, id: usize) -> SectionMut<'_, T> {
        SectionMut::new(&self.meta, &mut self.cells, SectionKind::Col, id)
    }

    /// A mutable block view.
    pub fn block_mut(&mut self, id: usize) -> SectionMut<'_, T> {
        SectionMut::new(&self.meta, &mut self.cells, SectionKind::Block, id)
    }

    pub(crate) fn region(&self, block: usize) -> &[usize] {
        &self.meta.regions[block]
    }
}

impl<T: Clone + Default> Board<T> {
    /// Reset every cell to `T::default()`.
    pub fn clear(&mut self) {
        for c in &mut self.cells {
            *c = T::default();
        }
    }
}

impl<T: PartialEq> PartialEq for Board<T> {
    fn eq(&self, other: &Self) -> bool {
        self.meta.size == other.meta.size && self.cells == other.cells
    }
}
impl<T: Eq> Eq for Board<T> {}

impl Board<Options> {
    /// A board with every cell holding the all-candidates `Options`.
    ///
    /// # Errors
    /// See [`Options::new`].
    pub fn all_options(size: Size) -> Result<Self, SudokuErrors> {
        Ok(Self::new(size, Options::new(size.elem())?))
    }

    /// Project onto a `Board<Value>` using each cell's [`Options::get_answer`]
    ///. Unsolved cells read as
    /// `Value::UNKNOWN`.
    #[must_use]
    pub fn to_values(&self) -> Board<Value> {
        let mut out = Board::blank(self.size());
        for (loc, opts) in self.iter() {
            *out.at_mut(loc) = opts.get_answer();
        }
        out
    }
}

impl Board<Value> {
    /// A board with every cell `Value::UNKNOWN`.
    #[must_use]
    pub fn blank(size: Size) -> Self {
        Self::new(size, Value::UNKNOWN)
    }
}

/// Shared by [`Section`] and [`SectionMut`]: the `Location` of the `i`-th
/// cell of a `kind`/`id` section, going through the region table for a
/// block section rather than the geometric default, so both view types
/// stay correct on an irregular board.
fn section_location(
    meta: &Meta,
    kind: SectionKind,
    id: usize,
    i: usize,
) -> Result<Location, SudokuErrors> {
    let size = meta.size;
    if i >= size.elem() {
        return Err(SudokuErrors::InvalidLocation);
    }
    match kind {
        SectionKind::Row => Location::from_row_col(size, id, i),
        SectionKind::Col => Location::from_row_col(size, i, id),
        SectionKind::Block => {
            let flat = meta.regions[id][i];
            Location::new(size, flat)
        }
    }
}

/// A read-only view onto one row, column, or block of a [`Board`].
///
/// The teacher's source has two parallel section hierarchies (one using
/// virtual `location(int)`, one parametrised by a kind enum);
/// flags this as redundant in a non-virtual-dispatch language, so there's
/// a single `Section` type here, parametrised by [`SectionKind`].
#[derive(Debug, Clone, Copy)]
pub struct Section<'b, T> {
    board: &'b Board<T>,
    kind: SectionKind,
    id: usize,
}

impl<'b, T: Clone> Section<'b, T> {
    fn new(board: &'b Board<T>, kind: SectionKind, id: usize) -> Self {
        Self { board, kind, id }
    }

    /// Number of cells in the section (`elem`).
    #[must_use]
    pub fn size(&self) -> usize {
        self.board.size().elem()
    }

    /// The section's own id, `0..elem`.
    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Which kind of section this is.
    #[must_use]
    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    /// The full `Size` of the board this section is a view onto — used
    /// by callers (e.g. `find::appearance_sets`) that need `base` as
    /// well as `elem`.
    #[must_use]
    pub fn board_size(&self) -> Size {
        self.board.size()
    }

    /// The [`Location`] of the `i`-th cell of this section.
    ///
    /// # Panics
    /// Panics if `i >= self.size()`; see [`Section::checked_location`]
    /// for a non-panicking variant.
    #[must_use]
    pub fn location(&self, i: usize) -> Location {
        self.checked_location(i).expect("index within section")
    }

    /// Checked version of [`Section::location`].
    ///
    /// # Errors
    /// [`SudokuErrors::InvalidLocation`] if `i >= self.size()`.
    pub fn checked_location(&self, i: usize) -> Result<Location, SudokuErrors> {
        section_location(&self.board.meta, self.kind, self.id, i)
    }

    /// Value of the `i`-th cell.
    #[must_use]
    pub fn at(&self, i: usize) -> &'b T {
        self.board.at(self.location(i))
    }

    /// First cell.
    #[must_use]
    pub fn front(&self) -> &'b T {
        self.at(0)
    }

    /// Last cell.
    #[must_use]
    pub fn back(&self) -> &'b T {
        self.at(self.size() - 1)
    }

    /// Iterate this section's cells in order, each paired with its
    /// [`Location`].
    pub fn iter(&self) -> impl Iterator<Item = (Location, &'b T)> + '_ {
        (0..self.size()).map(move |i| (self.location(i), self.at(i)))
    }

    /// Reverse iterator over this section's cells.
    pub fn iter_rev(&self) -> impl Iterator<Item = (Location, &'b T)> + '_ {
        (0..self.size()).rev().map(move |i| (self.location(i), self.at(i)))
    }

    /// Given a pivot element index of this section, build the
    /// orthogonal row/column view passing through it: e.g. from a row
    /// and a pivot column, the column through that cell.
    #[must_use]
    pub fn cross(&self, pivot: usize, kind: SectionKind) -> Section<'b, T> {
        let loc = self.location(pivot);
        let id = match kind {
            SectionKind::Row => loc.row(),
            SectionKind::Col => loc.col(),
            SectionKind::Block => loc.block(),
        };
        Section::new(self.board, kind, id)
    }

    /// Whether `loc` is a member of this section. Goes through the
    /// region table for a block section rather than comparing
    /// `loc.block()` directly, so it stays correct on an irregular board.
    #[must_use]
    pub fn is_same_section(&self, loc: Location) -> bool {
        match self.kind {
            SectionKind::Row => loc.row() == self.id,
            SectionKind::Col => loc.col() == self.id,
            SectionKind::Block => self.board.region(self.id).contains(&loc.element()),
        }
    }

    /// Whether every location in `locs` is a member of this section.
    #[must_use]
    pub fn is_same_section_all(&self, locs: &[Location]) -> bool {
        locs.iter().all(|&loc| self.is_same_section(loc))
    }

    /// Whether this row or column view passes through the block
    /// containing `block_loc`: i.e. whether any of its cells shares a
    /// block with `block_loc`. Used by locked-candidate reasoning to
    /// decide which block a row/column's confined value points into.
    #[must_use]
    pub fn intersects_block(&self, block_loc: Location) -> bool {
        debug_assert!(self.kind != SectionKind::Block);
        self.iter().any(|(loc, _)| loc.block() == block_loc.block())
    }
}

/// A mutable view onto one row, column, or block of a [`Board`], returned
/// by [`Board::row_mut`]/[`Board::col_mut`]/[`Board::block_mut`].
///
/// Holds its own `Arc<Meta>` clone rather than `&'b Board<T>` — the `Vec`
/// it borrows mutably lives inside the board it was built from, so it
/// cannot also hold a shared reference to that same board. Converting a
/// `Section` into a `SectionMut` isn't offered, only the reverse
/// direction (build a `Section` by re-borrowing a `SectionMut`'s board
/// shared), matching the const-correctness rule that mutable access
/// implies read access but not the other way round.
pub struct SectionMut<'b, T> {
    meta: Arc<Meta>,
    cells: &'b mut Vec<T>,
    kind: SectionKind,
    id: usize,
}

impl<'b, T: Clone> SectionMut<'b, T> {
    fn new(meta: &Arc<Meta>, cells: &'b mut Vec<T>, kind: SectionKind, id: usize) -> Self {
        Self { meta: Arc::clone(meta), cells, kind, id }
    }

    /// Number of cells in the section (`elem`).
    #[must_use]
    pub fn size(&self) -> usize {
        self.meta.size.elem()
    }

    /// The section's own id, `0..elem`.
    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Which kind of section this is.
    #[must_use]
    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    /// The [`Location`] of the `i`-th cell of this section.
    ///
    /// # Panics
    /// Panics if `i >= self.size()`; see [`SectionMut::checked_location`]
    /// for a non-panicking variant.
    #[must_use]
    pub fn location(&self, i: usize) -> Location {
        self.checked_location(i).expect("index within section")
    }

    /// Checked version of [`SectionMut::location`].
    ///
    /// # Errors
    /// [`SudokuErrors::InvalidLocation`] if `i >= self.size()`.
    pub fn checked_location(&self, i: usize) -> Result<Location, SudokuErrors> {
        section_location(&self.meta, self.kind, self.id, i)
    }

    /// Read-only value of the `i`-th cell.
    #[must_use]
    pub fn at(&self, i: usize) -> &T {
        let idx = self.location(i).element();
        &self.cells[idx]
    }

    /// Mutable access to the `i`-th cell.
    pub fn at_mut(&mut self, i: usize) -> &mut T {
        let idx = self.location(i).element();
        &mut self.cells[idx]
    }

    /// Iterate this section's cells in order, each paired with its
    /// [`Location`].
    pub fn iter(&self) -> impl Iterator<Item = (Location, &T)> + '_ {
        (0..self.size()).map(move |i| (self.location(i), self.at(i)))
    }

    /// Mutable version of [`SectionMut::iter`]. The section's member
    /// indices aren't contiguous for a block view, so this splits
    /// `self.cells` at each member index in ascending order to hand out
    /// disjoint `&mut T` borrows, then restores section order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Location, &mut T)> + '_ {
        let locations: Vec<Location> = (0..self.size()).map(|i| self.location(i)).collect();
        let mut by_index: Vec<(usize, usize)> =
            locations.iter().enumerate().map(|(pos, loc)| (pos, loc.element())).collect();
        by_index.sort_by_key(|&(_, idx)| idx);

        let mut refs: Vec<(usize, &mut T)> = Vec::with_capacity(by_index.len());
        let mut rest = self.cells.as_mut_slice();
        let mut consumed = 0;
        for (pos, idx) in by_index {
            let local = idx - consumed;
            let (left, right) = rest.split_at_mut(local + 1);
            refs.push((pos, &mut left[local]));
            rest = right;
            consumed = idx + 1;
        }
        refs.sort_by_key(|&(pos, _)| pos);
        refs.into_iter().map(move |(pos, cell)| (locations[pos], cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size9() -> Size {
        Size::new(3).unwrap()
    }

    #[test]
    fn row_col_block_sections_are_uniform() {
        let board = Board::new(size9(), Value(0));
        for e in 0..9 {
            assert_eq!(board.row(0).location(e).row(), 0);
            assert_eq!(board.col(0).location(e).col(), 0);
            assert_eq!(board.block(0).location(e).block(), 0);
        }
    }

    #[test]
    fn section_identity_law() {
        let board = Board::new(size9(), Value(3));
        for kind in [SectionKind::Row, SectionKind::Col, SectionKind::Block] {
            for id in 0..9 {
                let section = match kind {
                    SectionKind::Row => board.row(id),
                    SectionKind::Col => board.col(id),
                    SectionKind::Block => board.block(id),
                };
                for e in 0..9 {
                    assert_eq!(*section.at(e), *board.at(section.location(e)));
                }
            }
        }
    }

    #[test]
    fn clear_resets_to_default() {
        let mut board = Board::new(size9(), Value(5));
        board.clear();
        for (_, v) in board.iter() {
            assert_eq!(*v, Value(0));
        }
    }

    #[test]
    fn cross_section_construction() {
        let board = Board::new(size9(), Value(0));
        let row2 = board.row(2);
        let col_through = row2.cross(5, SectionKind::Col);
        assert_eq!(col_through.id(), 5);
        assert_eq!(col_through.location(2).row(), 2);
    }

    #[test]
    fn checked_access_out_of_range() {
        let board = Board::new(size9(), Value(0));
        assert_eq!(board.checked(81), Err(SudokuErrors::InvalidLocation));
        assert!(board.checked(80).is_ok());
    }

    #[test]
    fn irregular_regions_override_geometric_blocks() {
        let size = size9();
        let mut regions = default_regions(size);
        // Swap one cell between the first two regions to build an
        // irregular board.
        let a = regions[0][8];
        let b = regions[1][8];
        regions[0][8] = b;
        regions[1][8] = a;
        let board = Board::with_regions(size, Value(0), regions).unwrap();
        assert_eq!(board.block(0).location(8).element(), b);
        assert_eq!(board.block(1).location(8).element(), a);
    }

    #[test]
    fn is_same_section_checks_membership() {
        let board = Board::new(size9(), Value(0));
        let loc = Location::from_row_col(size9(), 4, 4).unwrap();
        assert!(board.row(4).is_same_section(loc));
        assert!(!board.row(5).is_same_section(loc));
        assert!(board.col(4).is_same_section(loc));
        assert!(board.block(4).is_same_section(loc));
        assert!(!board.block(0).is_same_section(loc));
    }

    #[test]
    fn is_same_section_all_requires_every_location() {
        let board = Board::new(size9(), Value(0));
        let same_row = [
            Location::from_row_col(size9(), 0, 0).unwrap(),
            Location::from_row_col(size9(), 0, 8).unwrap(),
        ];
        let mixed = [
            Location::from_row_col(size9(), 0, 0).unwrap(),
            Location::from_row_col(size9(), 1, 0).unwrap(),
        ];
        assert!(board.row(0).is_same_section_all(&same_row));
        assert!(!board.row(0).is_same_section_all(&mixed));
    }

    #[test]
    fn intersects_block_true_when_row_passes_through() {
        let board = Board::new(size9(), Value(0));
        let loc_in_block0 = Location::from_row_col(size9(), 1, 1).unwrap();
        assert!(board.row(0).intersects_block(loc_in_block0));
        assert!(!board.row(3).intersects_block(loc_in_block0));
    }

    #[test]
    fn iter_rev_visits_cells_in_reverse_index_order() {
        let board = Board::new(size9(), Value(0));
        let forward: Vec<Location> = board.iter().map(|(loc, _)| loc).collect();
        let reverse: Vec<Location> = board.iter_rev().map(|(loc, _)| loc).collect();
        let mut expected = forward.clone();
        expected.reverse();
        assert_eq!(reverse, expected);
    }

    #[test]
    fn iter_mut_rev_writes_reach_the_same_cells_as_iter_rev() {
        let mut board = Board::new(size9(), Value(0));
        for (i, (_, v)) in board.iter_mut_rev().enumerate() {
            v.0 = i;
        }
        let values: Vec<usize> = board.iter_rev().map(|(_, v)| v.0).collect();
        assert_eq!(values, (0..81).collect::<Vec<_>>());
    }

    #[test]
    fn row_mut_writes_are_visible_through_row() {
        let mut board = Board::new(size9(), Value(0));
        {
            let mut row = board.row_mut(0);
            for i in 0..row.size() {
                *row.at_mut(i) = Value(i + 1);
            }
        }
        for (i, (_, v)) in board.row(0).iter().enumerate() {
            assert_eq!(*v, Value(i + 1));
        }
    }

    #[test]
    fn block_mut_writes_go_through_the_region_table() {
        let mut board = Board::new(size9(), Value(0));
        {
            let mut block = board.block_mut(0);
            for (i, (_, v)) in block.iter_mut().enumerate() {
                v.0 = i + 1;
            }
        }
        let seen: Vec<usize> = board.block(0).iter().map(|(_, v)| v.0).collect();
        assert_eq!(seen, (1..=9).collect::<Vec<_>>());
    }

    #[test]
    fn section_mut_location_matches_section_location() {
        let mut board = Board::new(size9(), Value(0));
        let expected: Vec<Location> = board.block(2).iter().map(|(loc, _)| loc).collect();
        let block = board.block_mut(2);
        let actual: Vec<Location> = (0..block.size()).map(|i| block.location(i)).collect();
        assert_eq!(actual, expected);
    }
}
