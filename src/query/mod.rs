// Query Processing Module
//
// This module contains the SQL parser, the canonical renderer, and the
// query-descriptor output type.

// Re-export key components
pub mod parser;
pub mod render;
pub mod descriptor;

use thiserror::Error;

use crate::catalog::validation::{SchemaValidator, ValidationOptions};
use crate::catalog::validation_error::BatchValidationError;
use crate::catalog::Schema;
use parser::ParseError;

// Export key public interfaces
pub use descriptor::QueryDescriptor;
pub use parser::Parser;
pub use render::{render_batch, render_statement};

/// Umbrella error for the parse-then-validate pipeline
#[derive(Error, Debug)]
pub enum QueryError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Schema(#[from] BatchValidationError),
}

/// Parse a `;`-separated batch and validate every statement against the
/// schema. The first error aborts the batch; no descriptor is emitted for
/// the failing statement or anything after it.
pub fn process(
    sql: &str,
    schema: &Schema,
    options: ValidationOptions,
) -> Result<Vec<QueryDescriptor>, QueryError> {
    let batch = Parser::new(sql)?.parse_batch()?;
    let validator = SchemaValidator::with_options(schema, options);
    let descriptors = validator.validate_batch(&batch)?;
    log::debug!("processed batch of {} descriptor(s)", descriptors.len());
    Ok(descriptors)
}
