// Schema Validation Module
//
// This module binds parsed statements against a schema, checking table and
// column names, INSERT arity, and the auto-generated-column write policy.
// Checks here are purely structural; literal-to-declared-type coercion is
// the downstream instruction compiler's job.

use std::collections::HashSet;

use crate::catalog::table::Table;
use crate::catalog::validation_error::{BatchValidationError, SchemaError, SchemaResult};
use crate::catalog::Schema;
use crate::query::descriptor::QueryDescriptor;
use crate::query::parser::ast::{
    Batch, Conjunction, DeleteStatement, InsertStatement, Projection, SelectStatement, Statement,
    UpdateStatement,
};

/// Caller-supplied validation policy.
///
/// Whether an explicit primary-key value in an INSERT is acceptable depends
/// on the backing store's identity-generation configuration, which lives
/// outside the schema itself. The strict (rejecting) behavior is the
/// default; the permissive path is opt-in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Permit writers to supply values for auto-generated columns
    pub allow_auto_generated_writes: bool,
}

/// Binds statements to a schema and emits query descriptors
pub struct SchemaValidator<'a> {
    schema: &'a Schema,
    options: ValidationOptions,
}

impl<'a> SchemaValidator<'a> {
    /// Create a validator with the default (strict) policy
    pub fn new(schema: &'a Schema) -> Self {
        Self::with_options(schema, ValidationOptions::default())
    }

    /// Create a validator with an explicit policy
    pub fn with_options(schema: &'a Schema, options: ValidationOptions) -> Self {
        SchemaValidator { schema, options }
    }

    /// Validate one statement, producing an immutable descriptor bound to
    /// the resolved table
    pub fn validate(&self, statement: &Statement) -> SchemaResult<QueryDescriptor> {
        let table_name = statement.table_name();
        let table = self
            .schema
            .get_table(table_name)
            .ok_or_else(|| SchemaError::UnknownTable(table_name.to_string()))?;

        match statement {
            Statement::Select(select) => self.validate_select(select, table)?,
            Statement::Insert(insert) => self.validate_insert(insert, table)?,
            Statement::Update(update) => self.validate_update(update, table)?,
            Statement::Delete(delete) => self.validate_delete(delete, table)?,
        }

        log::debug!("validated statement against table {}", table.name());
        Ok(QueryDescriptor::new(statement.clone(), table.clone()))
    }

    /// Validate a batch in order, stopping at the first failing statement.
    /// The error records the failing statement's position in the batch.
    pub fn validate_batch(
        &self,
        batch: &Batch,
    ) -> Result<Vec<QueryDescriptor>, BatchValidationError> {
        batch
            .statements
            .iter()
            .enumerate()
            .map(|(index, statement)| {
                self.validate(statement).map_err(|error| BatchValidationError {
                    statement: index,
                    error,
                })
            })
            .collect()
    }

    fn validate_select(&self, select: &SelectStatement, table: &Table) -> SchemaResult<()> {
        if let Projection::Columns(columns) = &select.projection {
            for column in columns {
                check_column(table, column)?;
            }
        }
        check_filter(table, select.filter.as_ref())?;
        if let Some(order_by) = &select.order_by {
            for item in order_by {
                check_column(table, &item.column)?;
            }
        }
        Ok(())
    }

    fn validate_insert(&self, insert: &InsertStatement, table: &Table) -> SchemaResult<()> {
        match &insert.columns {
            Some(columns) => {
                let mut seen = HashSet::new();
                for column in columns {
                    check_column(table, column)?;
                    if !seen.insert(column.as_str()) {
                        return Err(SchemaError::DuplicateAssignmentColumn {
                            table: table.name().to_string(),
                            column: column.clone(),
                        });
                    }
                }
                for (row_idx, row) in insert.rows.iter().enumerate() {
                    if row.len() != columns.len() {
                        return Err(SchemaError::ArityMismatch {
                            table: table.name().to_string(),
                            row: row_idx,
                            expected: columns.len(),
                            found: row.len(),
                        });
                    }
                }
                for column in columns {
                    self.check_writable(table, column)?;
                }
            }
            None => {
                // Without an explicit list the tuple is matched positionally
                // against the columns a writer may supply: every column under
                // the permissive policy, the non-auto-generated ones under
                // the strict default.
                let implied = if self.options.allow_auto_generated_writes {
                    table.columns().len()
                } else {
                    table.writable_columns().len()
                };
                let full = table.columns().len();
                for (row_idx, row) in insert.rows.iter().enumerate() {
                    if row.len() == implied {
                        continue;
                    }
                    if row.len() == full {
                        // The tuple covers the auto-generated column(s)
                        let column = table
                            .auto_generated_columns()
                            .first()
                            .map(|c| c.name().to_string())
                            .unwrap_or_default();
                        return Err(SchemaError::AutoGeneratedColumnWrite {
                            table: table.name().to_string(),
                            column,
                        });
                    }
                    return Err(SchemaError::ArityMismatch {
                        table: table.name().to_string(),
                        row: row_idx,
                        expected: implied,
                        found: row.len(),
                    });
                }
            }
        }
        Ok(())
    }

    fn validate_update(&self, update: &UpdateStatement, table: &Table) -> SchemaResult<()> {
        let mut seen = HashSet::new();
        for assignment in &update.assignments {
            check_column(table, &assignment.column)?;
            if !seen.insert(assignment.column.as_str()) {
                return Err(SchemaError::DuplicateAssignmentColumn {
                    table: table.name().to_string(),
                    column: assignment.column.clone(),
                });
            }
            self.check_writable(table, &assignment.column)?;
        }
        check_filter(table, update.filter.as_ref())
    }

    fn validate_delete(&self, delete: &DeleteStatement, table: &Table) -> SchemaResult<()> {
        check_filter(table, delete.filter.as_ref())
    }

    fn check_writable(&self, table: &Table, column: &str) -> SchemaResult<()> {
        if self.options.allow_auto_generated_writes {
            return Ok(());
        }
        match table.get_column(column) {
            Some(col) if col.is_auto_generated() => Err(SchemaError::AutoGeneratedColumnWrite {
                table: table.name().to_string(),
                column: column.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

fn check_column(table: &Table, column: &str) -> SchemaResult<()> {
    if table.has_column(column) {
        Ok(())
    } else {
        Err(SchemaError::UnknownColumn {
            table: table.name().to_string(),
            column: column.to_string(),
        })
    }
}

fn check_filter(table: &Table, filter: Option<&Conjunction>) -> SchemaResult<()> {
    if let Some(conjunction) = filter {
        for comparison in &conjunction.0 {
            check_column(table, &comparison.column)?;
        }
    }
    Ok(())
}
