//! Sudoku puzzles as exact cover problems.
//!
//! A puzzle with digit range `D` has `4 * D * D` conditions, one matrix
//! column each, in four groups:
//!
//! 1. every cell holds a number,
//! 2. every row holds every number,
//! 3. every column holds every number,
//! 4. every box holds every number.
//!
//! Every possible placement of a number in a cell is one matrix row
//! touching exactly one condition of each group.
use std::fmt;

use log::debug;

use crate::{Error, HeaderId, Matrix, NodeId, Result, Solver};

/// Conditions per cell, row, column and box.
const CONDITION_TYPES: usize = 4;

/// Marks an empty cell in puzzle text.
pub const EMPTY_CELL: char = '_';

/// The supported grid sizes. Each digit range is a perfect square.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SudokuSize {
    /// 4 x 4, boxes of 2 x 2.
    Four,
    /// 9 x 9, boxes of 3 x 3.
    Nine,
    /// 16 x 16, boxes of 4 x 4, printed with digits `0..F`.
    Sixteen,
}

impl SudokuSize {
    pub const fn digit_range(self) -> usize {
        match self {
            Self::Four => 4,
            Self::Nine => 9,
            Self::Sixteen => 16,
        }
    }

    pub const fn box_size(self) -> usize {
        match self {
            Self::Four => 2,
            Self::Nine => 3,
            Self::Sixteen => 4,
        }
    }

    pub const fn from_digit_range(range: usize) -> Option<Self> {
        match range {
            4 => Some(Self::Four),
            9 => Some(Self::Nine),
            16 => Some(Self::Sixteen),
            _ => None,
        }
    }
}

/// A number in a specific cell. All values are 1-based.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    pub row: usize,
    pub column: usize,
    pub number: usize,
}

fn cell_condition(size: SudokuSize, row: usize, column: usize) -> usize {
    let range = size.digit_range();
    (row - 1) * range + (column - 1)
}

fn row_condition(size: SudokuSize, row: usize, number: usize) -> usize {
    let range = size.digit_range();
    range * range + (row - 1) * range + (number - 1)
}

fn column_condition(size: SudokuSize, column: usize, number: usize) -> usize {
    let range = size.digit_range();
    2 * range * range + (column - 1) * range + (number - 1)
}

fn box_condition(size: SudokuSize, row: usize, column: usize, number: usize) -> usize {
    let range = size.digit_range();
    let box_size = size.box_size();
    let index = (column - 1) / box_size + (row - 1) / box_size * box_size;
    3 * range * range + index * range + (number - 1)
}

fn placement_index(size: SudokuSize, placement: Placement) -> usize {
    let range = size.digit_range();
    (placement.row - 1) * range * range + (placement.column - 1) * range + (placement.number - 1)
}

/// Solves a Sudoku of a given size from a set of given cells.
pub struct SudokuSolver {
    size: SudokuSize,
    solver: Solver<Placement>,
    /// Row root of every placement, see `placement_index`.
    placements: Vec<NodeId>,
}

impl SudokuSolver {
    pub fn new(size: SudokuSize) -> Self {
        let range = size.digit_range();
        let mut matrix = Matrix::with_columns(range * range * CONDITION_TYPES);
        let columns: Vec<HeaderId> = matrix.columns().to_vec();
        let mut placements = Vec::with_capacity(range * range * range);

        for row in 1..=range {
            for column in 1..=range {
                for number in 1..=range {
                    let headers = [
                        columns[cell_condition(size, row, column)],
                        columns[row_condition(size, row, number)],
                        columns[column_condition(size, column, number)],
                        columns[box_condition(size, row, column, number)],
                    ];
                    let placement = Placement { row, column, number };
                    placements.push(matrix.push_row(&headers, placement));
                }
            }
        }

        debug!(
            "built {range}x{range} sudoku matrix with {} conditions and {} placements",
            columns.len(),
            placements.len()
        );

        Self {
            size,
            solver: Solver::new(matrix),
            placements,
        }
    }

    /// Reads a puzzle, one grid row per line.
    ///
    /// Whitespace inside a line is ignored. The first line decides the size,
    /// `_` marks an empty cell and digits are hexadecimal; a 16 x 16 grid
    /// uses `0..F` for the numbers 1 to 16. Lines after the grid are
    /// ignored.
    pub fn parse(input: &str) -> Result<Self> {
        let mut lines = input.lines();
        let mut line = lines.next().ok_or(Error::EmptyInput)?;

        let first: String = line.chars().filter(|c| !c.is_whitespace()).collect();
        let range = first.chars().count();
        let size = SudokuSize::from_digit_range(range).ok_or(Error::UnrecognizedSize(range))?;

        let mut solver = Self::new(size);

        for row in 1..=range {
            let cells: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != range {
                return Err(Error::UnevenLine {
                    read: cells.len(),
                    expected: range,
                });
            }

            for (column, token) in (1..).zip(cells) {
                if token != EMPTY_CELL {
                    let number = parse_digit(token, size)?;
                    solver.set_input(row, column, number)?;
                }
            }

            if row < range {
                line = lines.next().ok_or(Error::MissingLines {
                    read: row,
                    expected: range,
                })?;
            }
        }

        Ok(solver)
    }

    pub fn size(&self) -> SudokuSize {
        self.size
    }

    /// Fixes `number` in the cell at `row`, `column`.
    pub fn set_input(&mut self, row: usize, column: usize, number: usize) -> Result<()> {
        let range = self.size.digit_range();
        let in_range = |value: usize| (1..=range).contains(&value);
        if !(in_range(row) && in_range(column) && in_range(number)) {
            return Err(Error::PlacementOutOfRange {
                row,
                column,
                number,
                range,
            });
        }

        let placement = Placement { row, column, number };
        let node = self.placements[placement_index(self.size, placement)];
        self.solver.cover_row(node)
    }

    /// Finds a grid that completes the given cells.
    pub fn solve(&mut self) -> Option<Solution> {
        let nodes = self.solver.solve()?;
        let matrix = self.solver.matrix();
        let placements = nodes.iter().filter_map(|&node| matrix.data(node).copied());

        Some(Solution::new(self.size, placements))
    }
}

fn parse_digit(token: char, size: SudokuSize) -> Result<usize> {
    let number = token
        .to_digit(16)
        .and_then(|digit| usize::try_from(digit).ok())
        .ok_or(Error::InvalidDigit(token))?;

    Ok(if size == SudokuSize::Sixteen {
        number + 1
    } else {
        number
    })
}

fn format_digit(number: usize, size: SudokuSize) -> char {
    let value = if size == SudokuSize::Sixteen {
        number.checked_sub(1)
    } else {
        Some(number)
    };

    value
        .and_then(|value| u32::try_from(value).ok())
        .and_then(|value| char::from_digit(value, 16))
        .map_or(EMPTY_CELL, |c| c.to_ascii_uppercase())
}

/// A completely filled grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    size: SudokuSize,
    /// Row by row, 0 where nothing was placed.
    grid: Vec<usize>,
}

impl Solution {
    fn new(size: SudokuSize, placements: impl IntoIterator<Item = Placement>) -> Self {
        let range = size.digit_range();
        let mut grid = vec![0; range * range];

        for placement in placements {
            grid[(placement.row - 1) * range + placement.column - 1] = placement.number;
        }

        Self { size, grid }
    }

    pub fn size(&self) -> SudokuSize {
        self.size
    }

    /// The number at `row`, `column`, both 1-based.
    pub fn cell(&self, row: usize, column: usize) -> usize {
        self.grid[(row - 1) * self.size.digit_range() + column - 1]
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.grid.chunks(self.size.digit_range()) {
            for &number in row {
                write!(f, "{} ", format_digit(number, self.size))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_valid(solution: &Solution) {
        let range = solution.size().digit_range();
        let box_size = solution.size().box_size();
        let full: Vec<usize> = (1..=range).collect();
        let check = |mut numbers: Vec<usize>| {
            numbers.sort_unstable();
            assert_eq!(numbers, full);
        };

        for i in 1..=range {
            check((1..=range).map(|j| solution.cell(i, j)).collect());
            check((1..=range).map(|j| solution.cell(j, i)).collect());

            let top = (i - 1) / box_size * box_size;
            let left = (i - 1) % box_size * box_size;
            check(
                (0..range)
                    .map(|k| solution.cell(top + k / box_size + 1, left + k % box_size + 1))
                    .collect(),
            );
        }
    }

    #[test]
    fn condition_columns_do_not_overlap() {
        let size = SudokuSize::Nine;
        let mut seen = vec![0; 4 * 81];
        for row in 1..=9 {
            for column in 1..=9 {
                seen[cell_condition(size, row, column)] += 1;
                for number in 1..=9 {
                    seen[row_condition(size, row, number)] += 1;
                    seen[column_condition(size, column, number)] += 1;
                    seen[box_condition(size, row, column, number)] += 1;
                }
            }
        }

        // every cell condition is hit once per cell, the others once per
        // (unit, number) pair, 9 times over the loops above
        assert!(seen[..81].iter().all(|&n| n == 1));
        assert!(seen[81..].iter().all(|&n| n == 9));
    }

    #[test]
    fn every_column_has_one_row_per_number() {
        let solver = SudokuSolver::new(SudokuSize::Four);
        let matrix = solver.solver.matrix();

        assert_eq!(matrix.columns().len(), 64);
        assert_eq!(matrix.rows().len(), 64);
        assert!(matrix.columns().iter().all(|&h| matrix.count(h) == 4));
    }

    #[test]
    fn solves_small_sudoku() {
        let mut solver = SudokuSolver::parse(
            "4 _ _ 1
             _ 1 3 _
             _ 4 1 _
             1 _ _ 3",
        )
        .unwrap();

        let solution = solver.solve().unwrap();

        assert_eq!(
            solution.to_string(),
            "4 3 2 1 \n2 1 3 4 \n3 4 1 2 \n1 2 4 3 \n"
        );
        assert_valid(&solution);
    }

    #[test]
    fn solves_nine_by_nine() {
        let puzzle = "\
            53__7____
            6__195___
            _98____6_
            8___6___3
            4__8_3__1
            7___2___6
            _6____28_
            ___419__5
            ____8__79";
        let mut solver = SudokuSolver::parse(puzzle).unwrap();

        let solution = solver.solve().unwrap();

        assert_valid(&solution);
        assert_eq!(
            solution.to_string(),
            "5 3 4 6 7 8 9 1 2 \n\
             6 7 2 1 9 5 3 4 8 \n\
             1 9 8 3 4 2 5 6 7 \n\
             8 5 9 7 6 1 4 2 3 \n\
             4 2 6 8 5 3 7 9 1 \n\
             7 1 3 9 2 4 8 5 6 \n\
             9 6 1 5 3 7 2 8 4 \n\
             2 8 7 4 1 9 6 3 5 \n\
             3 4 5 2 8 6 1 7 9 \n"
        );
    }

    #[test]
    fn empty_grid_has_a_solution() {
        let mut solver = SudokuSolver::new(SudokuSize::Four);
        let solution = solver.solve().unwrap();
        assert_valid(&solution);
    }

    #[test]
    fn givens_are_kept() {
        let mut solver = SudokuSolver::new(SudokuSize::Nine);
        solver.set_input(2, 3, 7).unwrap();
        solver.set_input(9, 9, 1).unwrap();

        let solution = solver.solve().unwrap();

        assert_eq!(solution.cell(2, 3), 7);
        assert_eq!(solution.cell(9, 9), 1);
        assert_valid(&solution);
    }

    #[test]
    fn conflicting_givens_are_rejected() {
        let mut solver = SudokuSolver::new(SudokuSize::Four);
        solver.set_input(1, 1, 2).unwrap();

        assert_eq!(solver.set_input(1, 4, 2), Err(Error::ConflictingRow));
        assert_eq!(solver.set_input(3, 1, 2), Err(Error::ConflictingRow));
        assert_eq!(solver.set_input(2, 2, 2), Err(Error::ConflictingRow));
        assert_eq!(solver.set_input(1, 1, 3), Err(Error::ConflictingRow));
        assert_eq!(solver.set_input(4, 4, 2), Ok(()));
    }

    #[test]
    fn unsolvable_puzzle() {
        // the first cell needs a 4, but its column already has one
        let mut solver = SudokuSolver::parse("_123\n____\n4___\n____").unwrap();
        assert_eq!(solver.solve(), None);
    }

    #[test]
    fn out_of_range_input() {
        let mut solver = SudokuSolver::new(SudokuSize::Four);
        assert_eq!(
            solver.set_input(1, 5, 1),
            Err(Error::PlacementOutOfRange {
                row: 1,
                column: 5,
                number: 1,
                range: 4
            })
        );
        assert!(solver.set_input(0, 1, 1).is_err());
        assert!(solver.set_input(1, 1, 0).is_err());
    }

    #[test]
    fn parse_errors() {
        let error = |input: &str| SudokuSolver::parse(input).err();

        assert_eq!(error(""), Some(Error::EmptyInput));
        assert_eq!(error("12345"), Some(Error::UnrecognizedSize(5)));
        assert_eq!(
            error("1___\n__\n____\n____"),
            Some(Error::UnevenLine {
                read: 2,
                expected: 4
            })
        );
        assert_eq!(
            error("1___\n____"),
            Some(Error::MissingLines {
                read: 2,
                expected: 4
            })
        );
        assert_eq!(error("1x__\n____\n____\n____"), Some(Error::InvalidDigit('x')));
        assert_eq!(
            error("9___\n____\n____\n____"),
            Some(Error::PlacementOutOfRange {
                row: 1,
                column: 1,
                number: 9,
                range: 4
            })
        );
    }

    #[test]
    fn sixteen_uses_zero_based_digits() {
        assert_eq!(parse_digit('0', SudokuSize::Sixteen), Ok(1));
        assert_eq!(parse_digit('F', SudokuSize::Sixteen), Ok(16));
        assert_eq!(parse_digit('f', SudokuSize::Sixteen), Ok(16));
        assert_eq!(parse_digit('9', SudokuSize::Nine), Ok(9));
        assert_eq!(format_digit(1, SudokuSize::Sixteen), '0');
        assert_eq!(format_digit(16, SudokuSize::Sixteen), 'F');
        assert_eq!(format_digit(9, SudokuSize::Nine), '9');
        assert_eq!(format_digit(0, SudokuSize::Sixteen), EMPTY_CELL);
    }

    #[test]
    fn trailing_lines_are_ignored() {
        let mut solver = SudokuSolver::parse("12__\n____\n____\n____\nnot a grid").unwrap();
        let solution = solver.solve().unwrap();
        assert_eq!(solution.cell(1, 1), 1);
        assert_eq!(solution.cell(1, 2), 2);
    }
}
