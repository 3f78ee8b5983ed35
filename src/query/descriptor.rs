// Query Descriptor
//
// The validated, immutable output of the query core. A descriptor pairs a
// statement with the schema table it was validated against, and is the only
// thing handed to the downstream instruction compiler.

use crate::catalog::Table;
use crate::query::parser::ast::Statement;
use crate::query::render::render_statement;

/// A schema-validated statement bound to its target table.
/// Constructed only by the validator; immutable once built.
#[derive(Debug, Clone)]
pub struct QueryDescriptor {
    statement: Statement,
    table: Table,
}

impl QueryDescriptor {
    pub(crate) fn new(statement: Statement, table: Table) -> Self {
        QueryDescriptor { statement, table }
    }

    /// The validated statement
    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    /// The schema table the statement targets
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Name of the target table
    pub fn table_name(&self) -> &str {
        self.table.name()
    }

    /// Canonical SQL form of the validated statement, for logging and
    /// round-trip checks
    pub fn dump_sql(&self) -> String {
        render_statement(&self.statement)
    }
}
