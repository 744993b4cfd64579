use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("A row must touch at least one column")]
    EmptyRow,

    #[error("Column {column} is out of range, the matrix has {columns} columns")]
    ColumnOutOfRange { column: usize, columns: usize },

    #[error("Column {0} appears more than once in the same row")]
    DuplicateColumn(usize),

    #[error("Row touches a column that is already covered")]
    ConflictingRow,

    #[error("Rows can only be preselected before the search starts")]
    SearchStarted,

    #[error("Input is empty")]
    EmptyInput,

    #[error("Unrecognized Sudoku size: {0}. Valid sizes are: 4, 9, 16")]
    UnrecognizedSize(usize),

    #[error("All lines should be of equal size. Read: {read}, expected: {expected}")]
    UnevenLine { read: usize, expected: usize },

    #[error("Read {read} lines, expected to read {expected} lines instead")]
    MissingLines { read: usize, expected: usize },

    #[error("Invalid digit: {0:?}")]
    InvalidDigit(char),

    #[error("Placement ({row}, {column}) = {number} is outside the range 1..={range}")]
    PlacementOutOfRange {
        row: usize,
        column: usize,
        number: usize,
        range: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
