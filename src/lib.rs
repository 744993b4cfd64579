//! Toroidal [dancing links](https://en.wikipedia.org/wiki/Dancing_Links) and an
//! implementation of [Knuth's Algorithm X](https://en.wikipedia.org/wiki/Knuth%27s_Algorithm_X)
//! for solving the [exact cover](https://en.wikipedia.org/wiki/Exact_cover) problem.
//!
//! [`DancingLinks`] is the arena of headers and nodes with the O(1)
//! remove/reinsert primitives, [`Matrix`] wires columns and rows together,
//! and [`Solver`] enumerates exact covers on top of it. The [`sudoku`] module
//! models Sudoku puzzles as exact cover problems.
mod error;
mod links;
mod matrix;
mod node;
pub mod sudoku;

#[cfg(target_arch = "wasm32")]
mod wasm;

use log::{debug, trace};

pub use error::{Error, Result};
pub use links::{DancingLinks, Walk};
pub use matrix::Matrix;
pub use node::{HeaderId, NodeId};

struct Step {
    node: NodeId,
    backtracking: bool,
}

/// Enumerates the exact covers of a [`Matrix`].
///
/// Every solution lists the preselected rows first, followed by the chosen
/// row nodes in the order the search picked them. The payload of each node
/// identifies its row.
pub struct Solver<T> {
    matrix: Matrix<T>,

    step_stack: Vec<Step>,
    solution: Vec<NodeId>,
    started: bool,
}

impl<T> Solver<T> {
    pub fn new(matrix: Matrix<T>) -> Self {
        Self {
            matrix,
            step_stack: vec![],
            solution: vec![],
            started: false,
        }
    }

    pub fn matrix(&self) -> &Matrix<T> {
        &self.matrix
    }

    pub fn into_matrix(self) -> Matrix<T> {
        self.matrix
    }

    /// Marks the row containing `row` as part of every solution, covering
    /// all of its columns.
    ///
    /// Fails if the search has already started, or if the row shares a
    /// column with a row selected earlier. The matrix is untouched on
    /// failure.
    pub fn cover_row(&mut self, row: NodeId) -> Result<()> {
        if self.started {
            return Err(Error::SearchStarted);
        }

        let conflict = std::iter::once(row)
            .chain(self.matrix.iter_right(row))
            .any(|node| !self.matrix.is_active(self.matrix.header(node)));
        if conflict {
            return Err(Error::ConflictingRow);
        }

        debug!("preselecting row {row:?}");

        self.solution.push(row);
        self.cover(self.matrix.header(row));

        let mut current = self.matrix.right(row);
        while current != row {
            self.cover(self.matrix.header(current));
            current = self.matrix.right(current);
        }

        Ok(())
    }

    /// Returns the next solution, if any.
    pub fn solve(&mut self) -> Option<Vec<NodeId>> {
        self.next()
    }

    pub fn is_completed(&self) -> bool {
        self.started && self.step_stack.is_empty()
    }

    fn start(&mut self) -> Option<Vec<NodeId>> {
        self.started = true;

        if self.matrix.is_exhausted() {
            return Some(self.solution.clone());
        }

        self.push_column();
        None
    }

    /// The active column with the fewest rows. Ties go to the leftmost one.
    fn choose_column(&self) -> Option<HeaderId> {
        let mut best_column = None;
        let mut best_size = usize::MAX;

        for node in self.matrix.iter_right(self.matrix.root()) {
            let header = self.matrix.header(node);
            let size = self.matrix.count(header);
            if size < best_size {
                best_column = Some(header);
                best_size = size;
            }
        }

        best_column
    }

    fn push_column(&mut self) {
        if let Some(header) = self.choose_column() {
            trace!(
                "choosing {header:?} with {} rows",
                self.matrix.count(header)
            );

            self.step_stack.push(Step {
                node: self.matrix.down(header),
                backtracking: false,
            });
        }
    }

    fn step(&mut self) -> Option<Vec<NodeId>> {
        let Step { node, backtracking } = self.step_stack.pop()?;

        if self.matrix.is_header(node) {
            trace!("dead end at {node:?}");
            return None;
        }

        if backtracking {
            self.step_backward(node);
        } else {
            self.step_forward(node);
        }

        if self.matrix.is_exhausted() {
            debug!("found solution with {} rows", self.solution.len());
            Some(self.solution.clone())
        } else {
            None
        }
    }

    fn step_forward(&mut self, node: NodeId) {
        self.solution.push(node);

        let mut current = node;
        loop {
            self.cover(self.matrix.header(current));

            current = self.matrix.right(current);
            if current == node {
                break;
            }
        }

        self.step_stack.push(Step {
            node,
            backtracking: true,
        });

        self.push_column();
    }

    fn step_backward(&mut self, node: NodeId) {
        self.solution.pop();

        let mut current = self.matrix.left(node);
        loop {
            self.uncover(self.matrix.header(current));

            if current == node {
                break;
            }
            current = self.matrix.left(current);
        }

        let next = self.matrix.down(node);
        if next != self.matrix.header(node) {
            self.step_stack.push(Step {
                node: next,
                backtracking: false,
            });
        }
    }

    /// Takes `header` out of the header row and detaches every row in its
    /// column from the other columns it touches.
    fn cover(&mut self, header: HeaderId) {
        let matrix = &mut self.matrix;
        matrix.remove_horizontal(header);

        let mut row = matrix.down(header);
        while row != header {
            let mut node = matrix.right(row);
            while node != row {
                matrix.remove_vertical(node);
                let column = matrix.header(node);
                matrix.dec_count(column);
                node = matrix.right(node);
            }
            row = matrix.down(row);
        }
    }

    fn uncover(&mut self, header: HeaderId) {
        let matrix = &mut self.matrix;

        let mut row = matrix.up(header);
        while row != header {
            let mut node = matrix.left(row);
            while node != row {
                matrix.reinsert_vertical(node);
                let column = matrix.header(node);
                matrix.inc_count(column);
                node = matrix.left(node);
            }
            row = matrix.up(row);
        }

        matrix.reinsert_horizontal(header);
    }
}

impl<T> Iterator for Solver<T> {
    type Item = Vec<NodeId>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            let solution = self.start();
            if solution.is_some() {
                return solution;
            }
        }

        while !self.step_stack.is_empty() {
            let step = self.step();

            if step.is_some() {
                return step;
            }
        }

        None
    }
}
