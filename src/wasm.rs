#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

use js_sys::Array;
use wasm_bindgen::prelude::*;

use crate::{sudoku::SudokuSolver, Matrix, NodeId};

#[wasm_bindgen]
#[derive(Default)]
pub struct SolverBuilder {
    rows: Vec<Vec<usize>>,
    initial_rows: Vec<usize>,
}

#[wasm_bindgen]
impl SolverBuilder {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&mut self, row: Vec<usize>) {
        self.rows.push(row);
    }

    /// Indices of rows that every solution must contain.
    pub fn set_initial_rows(&mut self, initial_rows: Vec<usize>) {
        self.initial_rows = initial_rows;
    }

    pub fn build(self) -> Result<Solver, JsError> {
        let columns = self
            .rows
            .iter()
            .flatten()
            .max()
            .map_or(0, |&column| column + 1);
        let matrix = Matrix::from_rows(columns, &self.rows)?;

        let mut solver = crate::Solver::new(matrix);
        for &index in &self.initial_rows {
            let row = solver
                .matrix()
                .rows()
                .get(index)
                .copied()
                .ok_or_else(|| JsError::new(&format!("no row with index {index}")))?;
            solver.cover_row(row)?;
        }

        Ok(Solver { solver })
    }
}

#[wasm_bindgen]
pub struct Solver {
    solver: crate::Solver<usize>,
}

#[wasm_bindgen]
impl Solver {
    pub fn next_solution(&mut self) -> Array {
        let next_solution = self.solver.next();
        into_js_array(self.row_indices(next_solution.unwrap_or_default()))
    }

    pub async fn all_solutions(mut self) -> Array {
        let mut solutions = vec![];
        while let Some(solution) = self.solver.next() {
            solutions.push(self.row_indices(solution));
        }
        solutions.into_iter().map(into_js_array).collect()
    }

    fn row_indices(&self, solution: Vec<NodeId>) -> Vec<usize> {
        let matrix = self.solver.matrix();
        solution
            .into_iter()
            .filter_map(|node| matrix.data(node).copied())
            .collect()
    }
}

/// Solves a puzzle written one grid row per line, `_` for empty cells.
#[wasm_bindgen]
pub fn solve_sudoku(puzzle: &str) -> Result<Option<String>, JsError> {
    let mut solver = SudokuSolver::parse(puzzle)?;
    Ok(solver.solve().map(|solution| solution.to_string()))
}

fn into_js_array<T>(vec: Vec<T>) -> Array
where
    JsValue: From<T>,
{
    vec.into_iter().map(JsValue::from).collect()
}
