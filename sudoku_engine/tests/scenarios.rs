//! Crate-external behavioral scenarios exercised through the public API
//! (`sudoku_engine::from_string`/`solve`/`solve_unique`) rather than through
//! any internal type.

use sudoku_engine::{solve, solve_unique, SudokuErrors};

fn assert_completeness(board: &sudoku_engine::Board<sudoku_engine::Value>, elem: usize) {
    use sudoku_engine::SectionKind;
    for kind in [SectionKind::Row, SectionKind::Col, SectionKind::Block] {
        for id in 0..elem {
            let section = match kind {
                SectionKind::Row => board.row(id),
                SectionKind::Col => board.col(id),
                SectionKind::Block => board.block(id),
            };
            let mut seen = vec![false; elem + 1];
            for (_, value) in section.iter() {
                assert!(value.0 >= 1 && value.0 <= elem);
                assert!(!seen[value.0], "duplicate value in a section");
                seen[value.0] = true;
            }
        }
    }
}

#[test]
fn hidden_single_resolvable_board_solves_uniquely() {
    let repr = "\
000000012000035000000600070\
700000300000400800100000000\
000120000080000040050000600";
    let board = solve_unique(repr).unwrap();
    assert_completeness(&board, 9);
    let expected = "\
673894512912735486845612973\
798261354526473891134589267\
469128735287356149351947628";
    for (idx, c) in expected.chars().enumerate() {
        let digit = c.to_digit(10).unwrap() as usize;
        assert_eq!(board.at(sudoku_engine::Location::new(board.size(), idx).unwrap()).0, digit);
    }
}

#[test]
fn world_s_hardest_puzzle_requires_branching_but_still_solves() {
    let repr = "\
800000000\
003600000\
070090200\
050007000\
000045700\
000100030\
001000068\
008500010\
090000400";
    let board = solve_unique(repr).unwrap();
    assert_completeness(&board, 9);
    for (idx, c) in repr.chars().enumerate() {
        let given = c.to_digit(10).unwrap() as usize;
        if given != 0 {
            assert_eq!(
                board.at(sudoku_engine::Location::new(board.size(), idx).unwrap()).0,
                given
            );
        }
    }
}

#[test]
fn classic_textbook_puzzle_matches_published_solution_byte_for_byte() {
    let repr = "\
530070000\
600195000\
098000060\
800060003\
400803001\
700020006\
060000280\
000419005\
000080079";
    let board = solve_unique(repr).unwrap();
    let expected = "\
534678912\
672195348\
198342567\
859761423\
426853791\
713924856\
961537284\
287419635\
345286179";
    for (idx, c) in expected.chars().enumerate() {
        let digit = c.to_digit(10).unwrap() as usize;
        assert_eq!(board.at(sudoku_engine::Location::new(board.size(), idx).unwrap()).0, digit);
    }
}

#[test]
fn two_equal_givens_in_a_row_is_a_contradiction() {
    let mut repr = "0".repeat(81);
    repr.replace_range(0..1, "5");
    repr.replace_range(1..2, "5");
    assert_eq!(solve_unique(&repr), Err(SudokuErrors::Contradiction));
}

#[test]
fn empty_board_with_max_answers_one_returns_the_seeded_identity_row() {
    let repr = "0".repeat(81);
    let answers = solve(&repr, 1).unwrap();
    assert_eq!(answers.len(), 1);
    let board = &answers[0];
    assert_completeness(board, 9);
    for col in 0..9 {
        assert_eq!(
            board.at(sudoku_engine::Location::from_row_col(board.size(), 0, col).unwrap()).0,
            col + 1
        );
    }
}
