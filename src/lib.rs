// reefql - restricted SQL front-end for key-indexed record tables
//
// Translates a small SQL dialect into schema-validated query descriptors for
// a downstream instruction compiler. Parsing, validation, and rendering are
// pure functions over caller-supplied text and schema snapshots.

pub mod catalog;
pub mod query;

// Re-export key items for convenient access
pub use catalog::{
    BatchValidationError, Column, DataType, Schema, SchemaError, SchemaValidator, Table,
    ValidationOptions,
};
pub use query::descriptor::QueryDescriptor;
pub use query::parser::{LexError, ParseError, Parser};
pub use query::{process, render_batch, render_statement, QueryError};
