#![allow(clippy::print_stdout)]

//! Reads a Sudoku from stdin and prints its solution.
//!
//! ```text
//! $ printf '4 _ _ 1\n_ 1 3 _\n_ 4 1 _\n1 _ _ 3\n' | cargo run --example sudoku
//! 4 3 2 1
//! 2 1 3 4
//! 3 4 1 2
//! 1 2 4 3
//! ```

use std::io::{self, Read};
use std::process::ExitCode;

use dancing_links::sudoku::SudokuSolver;

fn main() -> ExitCode {
    let mut input = String::new();
    if let Err(error) = io::stdin().read_to_string(&mut input) {
        println!("Error: {error}");
        return ExitCode::FAILURE;
    }

    let mut solver = match SudokuSolver::parse(&input) {
        Ok(solver) => solver,
        Err(error) => {
            println!("Error: {error}");
            return ExitCode::FAILURE;
        }
    };

    match solver.solve() {
        Some(solution) => {
            print!("{solution}");
            ExitCode::SUCCESS
        }
        None => {
            println!("No valid Sudoku solution found");
            ExitCode::FAILURE
        }
    }
}
