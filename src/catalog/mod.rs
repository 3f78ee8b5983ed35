//! Catalog Management Module
//!
//! This module defines the schema metadata the validator binds statements
//! against: tables, columns, and declared types. The schema is supplied by
//! an external IDL-loading collaborator and treated as read-only for the
//! lifetime of a parse/validate cycle; there is no global instance and no
//! interior mutability.

pub mod column;
pub mod table;
pub mod validation;
pub mod validation_error;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// Re-export key types
pub use self::column::Column;
pub use self::table::Table;
pub use self::validation::{SchemaValidator, ValidationOptions};
pub use self::validation_error::{BatchValidationError, SchemaError, SchemaResult};

/// Declared column types. The validator never coerces literals against
/// these; type checking belongs to the downstream instruction compiler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataType {
    Integer,
    Float,
    Text,
    Boolean,
}

impl DataType {
    /// Convert a string representation to a DataType
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "INT" | "INTEGER" | "U8" | "U32" | "U64" | "I64" => Some(DataType::Integer),
            "FLOAT" | "REAL" | "DOUBLE" | "F64" => Some(DataType::Float),
            "TEXT" | "VARCHAR" | "CHAR" | "STRING" => Some(DataType::Text),
            "BOOL" | "BOOLEAN" => Some(DataType::Boolean),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Integer => write!(f, "INTEGER"),
            DataType::Float => write!(f, "FLOAT"),
            DataType::Text => write!(f, "TEXT"),
            DataType::Boolean => write!(f, "BOOLEAN"),
        }
    }
}

/// A mapping from table name to table schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    tables: HashMap<String, Table>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Schema {
            tables: HashMap::new(),
        }
    }

    /// Add a table, replacing any previous table of the same name
    pub fn add_table(&mut self, table: Table) {
        self.tables.insert(table.name().to_string(), table);
    }

    /// Get a table by name
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Check if a table exists
    pub fn has_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Number of tables in the schema
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Check if the schema has no tables
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
