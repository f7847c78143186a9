//! A command line utility for solving sudoku.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use sudoku_engine::{solve, Board, SudokuErrors, Value};

#[derive(Subcommand)]
enum Command {
    /// Take a string representation of a grid from the command line and solve it.
    Solve { repr: String },

    /// Treat each line of a file as an individual puzzle, and solve all of them.
    FromFile { path: PathBuf },
}

/// Render a solved board as one line per row, digits only.
fn render(board: &Board<Value>) -> String {
    let size = board.size();
    let mut out = String::with_capacity(size.full() + size.elem());
    for row in 0..size.elem() {
        for (_, value) in board.row(row).iter() {
            let _ = write!(out, "{}", value.0);
        }
        out.push('\n');
    }
    out
}

/// Render a board as a bordered ASCII grid: `o`-cornered bars between
/// block rows, `|` between block columns, one right-aligned cell per
/// column, blanks left as spaces. Grounded on `original_source`'s
/// `Console/Console.h` `Console::print_board(Board<int, N>)`, using its
/// `display` delimiter set (`-`/`|`/`o`) rather than its plain/CSV ones.
fn render_pretty(board: &Board<Value>) -> String {
    let size = board.size();
    let elem = size.elem();
    let base = size.base();
    let cell_width = elem.to_string().len() + 1;
    let segment_width = cell_width * base + 1;

    let mut bar = String::from("o");
    for _ in 0..base {
        bar.extend(std::iter::repeat('-').take(segment_width));
        bar.push('o');
    }

    let mut out = String::new();
    out.push_str(&bar);
    out.push('\n');
    for row in 0..elem {
        out.push('|');
        for col in 0..elem {
            let value = *board.at_row_col(row, col).expect("row/col within bounds");
            if value.is_unknown() {
                let _ = write!(out, "{:>width$}", "", width = cell_width);
            } else {
                let _ = write!(out, "{:>width$}", value.0, width = cell_width);
            }
            if (col + 1) % base == 0 {
                out.push_str(" |");
            }
        }
        out.push('\n');
        if (row + 1) % base == 0 {
            out.push_str(&bar);
            out.push('\n');
        }
    }
    out
}

fn solve_puzzle(repr: &str, max_answers: i64, time: bool, pretty: bool) {
    let start = Instant::now();
    match solve(repr, max_answers) {
        Ok(answers) if answers.is_empty() => {
            eprintln!("Error: {}", SudokuErrors::Contradiction);
        }
        Ok(answers) => {
            for board in &answers {
                print!("{}", if pretty { render_pretty(board) } else { render(board) });
            }
            if time {
                println!("solved {} board(s) in {:?}", answers.len(), start.elapsed());
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
        }
    }
}

fn solve_file(path: &Path, max_answers: i64, time: bool, pretty: bool) {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Error: {e}");
            return;
        }
    };
    let data = BufReader::new(file);
    let start = Instant::now();
    let mut solved = 0usize;

    for (i, line) in data.lines().enumerate() {
        let repr = match line {
            Ok(repr) => repr,
            Err(e) => {
                eprintln!("Error on line {i}: {e}");
                return;
            }
        };
        if repr.trim().is_empty() {
            continue;
        }
        match solve(&repr, max_answers) {
            Ok(answers) if answers.is_empty() => {
                eprintln!("Error on line {i}: {}", SudokuErrors::Contradiction);
            }
            Ok(answers) => {
                for board in &answers {
                    print!("{}", if pretty { render_pretty(board) } else { render(board) });
                }
                solved += 1;
            }
            Err(e) => {
                eprintln!("Error on line {i}: {e}");
            }
        }
    }
    if time {
        println!("solved {solved} puzzle(s) in {:?}", start.elapsed());
    }
}

#[derive(Parser)]
#[command(author, version, about, name = "sudoku_solver")]
struct Args {
    #[command(subcommand)]
    cmd: Command,

    /// Maximum number of completions to collect. Positive caps the count,
    /// zero searches without collecting any, negative collects every
    /// completion found.
    #[arg(long, default_value_t = 1)]
    max_answers: i64,

    /// Print how long the solve took.
    #[arg(long)]
    time: bool,

    /// Render solved boards as a bordered ASCII grid instead of one
    /// digit-string line per row.
    #[arg(long)]
    pretty: bool,
}

fn main() {
    let args = Args::parse();

    match args.cmd {
        Command::Solve { repr } => solve_puzzle(&repr, args.max_answers, args.time, args.pretty),
        Command::FromFile { path } => {
            solve_file(&path, args.max_answers, args.time, args.pretty)
        }
    }
}
