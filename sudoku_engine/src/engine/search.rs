//! The search scheduler: a LIFO queue of work items, a
//! propagate-to-fixed-point pass between branch points, and most-constrained-
//! variable branching, bounded to collect at most `max_answers` completions.
//!
//! Grounded on `original_source/Sudoku/Solver.h`'s main loop for the
//! branch-selection heuristic; an existing `solution_count_helper` /
//! `solution_count` pair on `Board` in the same family of crates
//! (`degustaf-sudoku_solver`'s `sudoku_engine::types::board`) is the
//! model for [`Solver::count_solutions_max`].

use rayon::prelude::*;
use tokio::sync::mpsc::{self, error::TrySendError, Sender};
use tokio_util::sync::CancellationToken;

use crate::engine::board::{Board, SectionKind};
use crate::engine::error::{Contradiction, SudokuErrors};
use crate::engine::location::Location;
use crate::engine::options::Options;
use crate::engine::rules::{dual_option, multi_option, section_exclusive, unique_in_section};
use crate::engine::set::{seed_board, single_option_value};
use crate::engine::size::Size;
use crate::engine::value::Value;

const SECTION_KINDS: [SectionKind; 3] = [SectionKind::Row, SectionKind::Col, SectionKind::Block];

fn is_solved(board: &Board<Options>) -> bool {
    board.iter().all(|(_, opts)| opts.is_answer())
}

fn pick_location(board: &Board<Options>) -> Option<Location> {
    let mut best: Option<(Location, usize)> = None;
    for (loc, opts) in board.iter() {
        if opts.is_answer() {
            continue;
        }
        let count = opts.count();
        match best {
            Some((_, best_count)) if count >= best_count => {}
            _ => best = Some((loc, count)),
        }
    }
    best.map(|(loc, _)| loc)
}

/// Run every propagation rule to a fixed point between branch points.
/// Running the full battery here, rather than hidden-single alone, shrinks
/// the search tree and gives naked-subset and locked-candidate reasoning a
/// call site outside of branching.
///
/// # Errors
/// [`Contradiction`] if any rule would empty a cell out.
fn propagate(board: &mut Board<Options>) -> Result<(), Contradiction> {
    let elem = board.size().elem();
    loop {
        let mut progress = false;
        for kind in SECTION_KINDS {
            for id in 0..elem {
                progress |= unique_in_section(board, kind, id)?;
            }
        }
        if is_solved(board) {
            return Ok(());
        }
        for kind in SECTION_KINDS {
            for id in 0..elem {
                progress |= dual_option(board, kind, id)?;
            }
        }
        for k in 3..=(elem / 2) {
            for kind in SECTION_KINDS {
                for id in 0..elem {
                    progress |= multi_option(board, kind, id, k)?;
                }
            }
        }
        progress |= section_exclusive(board)?;
        if is_solved(board) || !progress {
            return Ok(());
        }
    }
}

/// The search driver. Owns its work-item
/// stack and answer list exclusively; a fresh `Solver` is built per call.
pub struct Solver {
    max_answers: i64,
    queue: Vec<Board<Options>>,
    answers: Vec<Board<Value>>,
}

impl Solver {
    /// Build a solver. `max_answers`: positive caps the answer list at that
    /// many boards; `0` collects none (search still runs to exhaustion or
    /// first contradiction); negative collects every completion found.
    #[must_use]
    pub fn new(max_answers: i64) -> Self {
        Self {
            max_answers,
            queue: Vec::new(),
            answers: Vec::new(),
        }
    }

    fn wants_more(&self) -> bool {
        self.max_answers < 0 || (self.answers.len() as i64) < self.max_answers
    }

    fn record(&mut self, board: &Board<Options>) {
        if self.max_answers == 0 {
            return;
        }
        if !self.wants_more() {
            return;
        }
        self.answers.push(board.to_values());
        if !self.wants_more() {
            self.queue.clear();
        }
    }

    fn guess(&mut self, board: &Board<Options>) {
        let Some(loc) = pick_location(board) else {
            return;
        };
        let candidates: Vec<Value> = board.at(loc).available().collect();
        for value in candidates {
            let mut branch = board.clone();
            if single_option_value(&mut branch, loc, value.0).is_ok() {
                self.queue.push(branch);
            }
        }
    }

    /// Run the main loop starting from `board`, returning
    /// every completed board found, up to `max_answers`. Consumes `self`
    /// because a `Solver`'s queue and answer list are single-use.
    #[must_use]
    pub fn run(mut self, board: Board<Options>) -> Vec<Board<Value>> {
        self.queue.push(board);
        while let Some(mut item) = self.queue.pop() {
            if is_solved(&item) {
                self.record(&item);
                continue;
            }
            if propagate(&mut item).is_err() {
                continue;
            }
            if is_solved(&item) {
                self.record(&item);
                continue;
            }
            if !self.wants_more() && self.max_answers > 0 {
                continue;
            }
            self.guess(&item);
        }
        self.answers
    }

    fn count_solutions_helper(
        board: &mut Board<Options>,
        token: &CancellationToken,
        tx: &Sender<usize>,
    ) -> usize {
        if token.is_cancelled() {
            return 0;
        }
        if propagate(board).is_err() {
            return 0;
        }
        if is_solved(board) {
            return 1;
        }
        let Some(loc) = pick_location(board) else {
            return 0;
        };
        let candidates: Vec<Value> = board.at(loc).available().collect();
        let count = candidates
            .par_iter()
            .panic_fuse()
            .fold(
                || 0usize,
                |acc, value| {
                    let mut branch = board.clone();
                    let n = match single_option_value(&mut branch, loc, value.0) {
                        Ok(_) => Self::count_solutions_helper(&mut branch, token, tx),
                        Err(_) => 0,
                    };
                    acc + n
                },
            )
            .sum::<usize>();
        if count > 500 {
            while let Err(TrySendError::Full(_)) = tx.try_send(count) {
                if token.is_cancelled() {
                    return count;
                }
            }
            0
        } else {
            count
        }
    }

    /// Count completions of `board`, stopping early once the count exceeds
    /// `max_count`. A supplement alongside the answer-collecting
    /// [`Solver::run`], grounded on `degustaf-sudoku_solver`'s
    /// `sudoku_engine::types::board::Board::solution_count`.
    #[tokio::main(flavor = "current_thread")]
    pub async fn count_solutions_max(board: Board<Options>, max_count: usize) -> usize {
        let (tx, mut rx) = mpsc::channel::<usize>(100);
        let token = CancellationToken::new();
        let mut b = board;
        let token_clone = token.clone();
        rayon::spawn(move || {
            let n = Self::count_solutions_helper(&mut b, &token_clone, &tx);
            let _ = tx.try_send(n);
        });
        let mut count = 0;
        while let Some(n) = rx.recv().await {
            count += n;
            if count > max_count {
                token.cancel();
                break;
            }
        }
        count
    }
}

/// Solve a dense row-major sequence of givens, seeding the row-0
/// identity permutation when the board is entirely blank so a
/// `max_answers` of 1 on an empty board still terminates on a genuine
/// completion instead of enumerating `elem!` symmetric ones.
///
/// # Errors
/// [`SudokuErrors::Domain`] if `values` isn't exactly `size.full()` long or
/// contains an out-of-range digit. [`SudokuErrors::Contradiction`] if the
/// givens themselves are inconsistent (two equal values sharing a section).
pub fn solve_from_values(
    size: Size,
    values: &[Value],
    max_answers: i64,
) -> Result<Vec<Board<Value>>, SudokuErrors> {
    let mut board = seed_board(size, values)?;
    if board == Board::all_options(size)? {
        seed_identity_row(&mut board)?;
    }
    Ok(Solver::new(max_answers).run(board))
}

fn seed_identity_row(board: &mut Board<Options>) -> Result<(), SudokuErrors> {
    let size = board.size();
    for col in 0..size.elem() {
        let loc = Location::from_row_col(size, 0, col)?;
        single_option_value(board, loc, col + 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::value::Value;

    fn size9() -> Size {
        Size::new(3).unwrap()
    }

    fn assert_completeness(board: &Board<Value>) {
        let size = board.size();
        for kind in SECTION_KINDS {
            for id in 0..size.elem() {
                let section = match kind {
                    SectionKind::Row => board.row(id),
                    SectionKind::Col => board.col(id),
                    SectionKind::Block => board.block(id),
                };
                let mut seen = vec![false; size.elem() + 1];
                for (_, value) in section.iter() {
                    assert!(value.0 >= 1 && value.0 <= size.elem());
                    assert!(!seen[value.0], "duplicate value in a section");
                    seen[value.0] = true;
                }
            }
        }
    }

    #[test]
    fn inconsistent_input_yields_no_answers() {
        let mut values = vec![Value(0); 81];
        values[0] = Value(5);
        values[1] = Value(5);
        assert_eq!(
            solve_from_values(size9(), &values, 1),
            Err(SudokuErrors::Contradiction)
        );
    }

    #[test]
    fn empty_board_seeds_identity_row_and_terminates() {
        let values = vec![Value(0); 81];
        let answers = solve_from_values(size9(), &values, 1).unwrap();
        assert_eq!(answers.len(), 1);
        for col in 0..9 {
            assert_eq!(
                answers[0].at(Location::from_row_col(size9(), 0, col).unwrap()),
                &Value(col + 1)
            );
        }
        assert_completeness(&answers[0]);
    }

    #[test]
    fn zero_max_answers_collects_nothing() {
        // `max_answers = 0` makes `record` a no-op and disables `run`'s
        // early-exit guard, so the driver runs the search to genuine
        // exhaustion. A blank 9x9 board has far too many completions for
        // that to finish in a test; a blank 4x4 board's tree is tiny.
        let values = vec![Value(0); 16];
        let answers = solve_from_values(Size::new(2).unwrap(), &values, 0).unwrap();
        assert!(answers.is_empty());
    }

    #[test]
    fn count_solutions_matches_run_for_small_board() {
        let values = vec![Value(0); 16];
        let size = Size::new(2).unwrap();
        let board = seed_board(size, &values).unwrap();
        let count = Solver::count_solutions_max(board, 1_000_000);
        assert!(count > 0);
    }
}
