use std::ops::{Deref, DerefMut};

use log::debug;

use crate::error::{Error, Result};
use crate::links::DancingLinks;
use crate::node::{HeaderId, NodeId};

/// Sparse 0/1 matrix built on a [`DancingLinks`] arena.
///
/// The root header heads the header row: its horizontal cycle holds every
/// column that is still to be covered. Each row is a horizontal cycle of
/// nodes, one per column it touches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix<T> {
    links: DancingLinks<T>,
    root: HeaderId,
    columns: Vec<HeaderId>,
    rows: Vec<NodeId>,
}

impl<T> Default for Matrix<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Matrix<T> {
    /// Creates a matrix consisting of only the root header.
    pub fn new() -> Self {
        let mut links = DancingLinks::new();
        let root = links.new_header();

        Self {
            links,
            root,
            columns: vec![],
            rows: vec![],
        }
    }

    pub fn with_columns(count: usize) -> Self {
        let mut matrix = Self::new();
        for _ in 0..count {
            matrix.new_header();
        }
        matrix
    }

    /// Appends a column header to the end of the header row, so that
    /// afterwards `left(root) == header`.
    pub fn new_header(&mut self) -> HeaderId {
        let header = self.links.new_header();
        self.links.insert_left_of(header, self.root);
        self.columns.push(header);
        header
    }

    pub fn root(&self) -> HeaderId {
        self.root
    }

    /// Column headers in creation order.
    pub fn columns(&self) -> &[HeaderId] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<HeaderId> {
        self.columns.get(index).copied()
    }

    /// Row roots in insertion order.
    pub fn rows(&self) -> &[NodeId] {
        &self.rows
    }

    /// Whether every column has been covered.
    pub fn is_exhausted(&self) -> bool {
        self.links.right(self.root) == self.root
    }

    /// Whether `header` is still linked into the header row.
    pub fn is_active(&self, header: HeaderId) -> bool {
        self.links.right(self.links.left(header)) == header
    }

    /// Adds a row touching `columns`, in that order. Every node of the row
    /// carries a clone of `data`. Returns the first node, which roots the
    /// row's horizontal cycle.
    ///
    /// Nothing is added if the row is rejected.
    pub fn add_row(&mut self, columns: &[usize], data: T) -> Result<NodeId>
    where
        T: Clone,
    {
        if columns.is_empty() {
            return Err(Error::EmptyRow);
        }

        for (i, &column) in columns.iter().enumerate() {
            if column >= self.columns.len() {
                return Err(Error::ColumnOutOfRange {
                    column,
                    columns: self.columns.len(),
                });
            }
            if columns[..i].contains(&column) {
                return Err(Error::DuplicateColumn(column));
            }
        }

        let headers: Vec<HeaderId> = columns.iter().map(|&column| self.columns[column]).collect();
        Ok(self.push_row(&headers, data))
    }

    /// Adds a row without validation. `headers` must be distinct columns of
    /// this matrix, and there must be at least one.
    pub(crate) fn push_row(&mut self, headers: &[HeaderId], data: T) -> NodeId
    where
        T: Clone,
    {
        debug_assert!(!headers.is_empty());

        let nodes: Vec<NodeId> = headers
            .iter()
            .map(|&header| self.links.new_node(header))
            .collect();
        self.links.make_row(&nodes);

        for &node in &nodes {
            self.links.set_data(node, data.clone());
        }

        self.rows.push(nodes[0]);
        nodes[0]
    }
}

impl Matrix<usize> {
    /// Builds a matrix with `columns` columns whose rows carry their index
    /// as payload.
    pub fn from_rows<R>(columns: usize, rows: impl IntoIterator<Item = R>) -> Result<Self>
    where
        R: AsRef<[usize]>,
    {
        let mut matrix = Self::with_columns(columns);
        for (index, row) in rows.into_iter().enumerate() {
            matrix.add_row(row.as_ref(), index)?;
        }

        debug!(
            "built matrix with {} columns, {} rows and {} nodes",
            matrix.columns.len(),
            matrix.rows.len(),
            matrix.links.len() - matrix.columns.len() - 1
        );

        Ok(matrix)
    }
}

impl<T> Deref for Matrix<T> {
    type Target = DancingLinks<T>;

    fn deref(&self) -> &Self::Target {
        &self.links
    }
}

impl<T> DerefMut for Matrix<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.links
    }
}
