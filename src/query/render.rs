// Canonical SQL Renderer
//
// Deterministic serialization of an AST back to SQL text. The renderer is a
// pure function of the AST; the schema is never consulted. Its output is the
// canonical form: re-parsing it yields an AST equal to the one rendered.

use std::fmt;

use super::parser::ast::*;

/// Render a single statement to its canonical SQL form
pub fn render_statement(statement: &Statement) -> String {
    statement.to_string()
}

/// Render a batch, joining statements with `"; "`
pub fn render_batch(batch: &Batch) -> String {
    batch
        .statements
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Select(s) => s.fmt(f),
            Statement::Insert(s) => s.fmt(f),
            Statement::Update(s) => s.fmt(f),
            Statement::Delete(s) => s.fmt(f),
        }
    }
}

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SELECT {} FROM {}", self.projection, self.table)?;
        if let Some(filter) = &self.filter {
            write!(f, " WHERE {}", filter)?;
        }
        if let Some(order_by) = &self.order_by {
            write!(f, " ORDER BY ")?;
            for (i, item) in order_by.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", item)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Projection::All => write!(f, "*"),
            // A one-column list renders bare, matching the accepted shorthand
            Projection::Columns(columns) if columns.len() == 1 => {
                write!(f, "{}", columns[0])
            }
            Projection::Columns(columns) => {
                write!(f, "({})", columns.join(", "))
            }
        }
    }
}

impl fmt::Display for Conjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, comparison) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " AND ")?;
            }
            write!(f, "{}", comparison)?;
        }
        Ok(())
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.column, self.value)
    }
}

impl fmt::Display for OrderItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Direction is always rendered, even when the source omitted ASC
        match self.direction {
            Direction::Asc => write!(f, "{} ASC", self.column),
            Direction::Desc => write!(f, "{} DESC", self.column),
        }
    }
}

impl fmt::Display for InsertStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "INSERT INTO {}", self.table)?;
        if let Some(columns) = &self.columns {
            write!(f, " ({})", columns.join(", "))?;
        }
        write!(f, " VALUES ")?;
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            let values = row
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, "({})", values)?;
        }
        Ok(())
    }
}

impl fmt::Display for UpdateStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UPDATE {} SET ", self.table)?;
        for (i, assignment) in self.assignments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} = {}", assignment.column, assignment.value)?;
        }
        if let Some(filter) = &self.filter {
            write!(f, " WHERE {}", filter)?;
        }
        Ok(())
    }
}

impl fmt::Display for DeleteStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DELETE FROM {}", self.table)?;
        if let Some(filter) = &self.filter {
            write!(f, " WHERE {}", filter)?;
        }
        Ok(())
    }
}
