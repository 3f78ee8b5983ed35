// SQL Abstract Syntax Tree (AST) Implementation
//
// This module defines the AST nodes for representing parsed SQL statements.
// The dialect is deliberately small: equality-only predicates joined by AND,
// so a WHERE clause is a flat ordered conjunction rather than an expression
// tree. Downstream compilation maps each comparison to a key/field probe.

use std::fmt;

/// Represents a SQL statement
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(SelectStatement),
    Insert(InsertStatement),
    Update(UpdateStatement),
    Delete(DeleteStatement),
}

impl Statement {
    /// Name of the table this statement targets
    pub fn table_name(&self) -> &str {
        match self {
            Statement::Select(s) => &s.table,
            Statement::Insert(s) => &s.table,
            Statement::Update(s) => &s.table,
            Statement::Delete(s) => &s.table,
        }
    }
}

/// An ordered, non-empty sequence of statements parsed from one input text
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub statements: Vec<Statement>,
}

/// SELECT statement representation
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    pub table: String,
    pub projection: Projection,
    pub filter: Option<Conjunction>,
    pub order_by: Option<Vec<OrderItem>>,
}

/// Projected columns of a SELECT
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// All columns (*)
    All,
    /// Explicit column list; a single bare column and a parenthesized
    /// single-element list are the same thing
    Columns(Vec<String>),
}

/// One or more equality comparisons joined by AND, in source order
#[derive(Debug, Clone, PartialEq)]
pub struct Conjunction(pub Vec<Comparison>);

/// A single `column = literal` predicate, the only comparison form accepted
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub column: String,
    pub value: Value,
}

/// One ORDER BY entry
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub column: String,
    pub direction: Direction,
}

/// Sort direction; ASC is the default when the source omits it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// Literal values
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    String(String),
}

/// INSERT statement
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    pub table: String,
    /// Explicit column list, when given
    pub columns: Option<Vec<String>>,
    /// Non-empty list of value tuples, all of equal arity
    pub rows: Vec<Vec<Value>>,
}

/// UPDATE statement
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    pub table: String,
    pub assignments: Vec<Assignment>,
    pub filter: Option<Conjunction>,
}

/// Column assignment in UPDATE
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: String,
    pub value: Value,
}

/// DELETE statement
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement {
    pub table: String,
    pub filter: Option<Conjunction>,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::String(s) => write!(f, "'{}'", s),
        }
    }
}
