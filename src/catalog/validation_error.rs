use thiserror::Error;

/// Errors raised when a grammatically valid statement is inconsistent with
/// the bound schema
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("unknown table: {0}")]
    UnknownTable(String),
    #[error("unknown column {column} on table {table}")]
    UnknownColumn { table: String, column: String },
    #[error("row {row} of INSERT into {table} supplies {found} value(s), expected {expected}")]
    ArityMismatch {
        table: String,
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("column {column} of table {table} is assigned by the backing store and cannot be written")]
    AutoGeneratedColumnWrite { table: String, column: String },
    #[error("column {column} assigned more than once in statement against {table}")]
    DuplicateAssignmentColumn { table: String, column: String },
}

/// Schema validation result
pub type SchemaResult<T> = Result<T, SchemaError>;

/// A [`SchemaError`] located at its statement's position in a batch
#[derive(Error, Debug, Clone, PartialEq)]
#[error("statement {statement}: {error}")]
pub struct BatchValidationError {
    /// Zero-based index of the failing statement within the batch
    pub statement: usize,
    #[source]
    pub error: SchemaError,
}
