//! Table Management Module
//!
//! This module defines the Table type that represents one record table's
//! schema. Column order is significant: positional VALUES tuples are matched
//! against it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::column::Column;

/// Represents a record table schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Table name
    name: String,
    /// Columns in declaration order
    columns: Vec<Column>,
    /// Column name to index lookup
    #[serde(skip)]
    column_map: HashMap<String, usize>,
}

impl Table {
    /// Create a new table with the given name and columns
    pub fn new(name: String, columns: Vec<Column>) -> Self {
        let column_map = build_column_map(&columns);
        Table {
            name,
            columns,
            column_map,
        }
    }

    /// Get the table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get all columns in declaration order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get a column by name
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.column_index(name).map(|idx| &self.columns[idx])
    }

    /// Check if the table has a column with the given name
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Get the index of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        if self.column_map.is_empty() && !self.columns.is_empty() {
            // Deserialized tables skip the map; fall back to a scan
            return self.columns.iter().position(|c| c.name() == name);
        }
        self.column_map.get(name).copied()
    }

    /// Columns marked as the primary key
    pub fn primary_key_columns(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.is_primary_key()).collect()
    }

    /// Columns whose values the backing store assigns itself
    pub fn auto_generated_columns(&self) -> Vec<&Column> {
        self.columns
            .iter()
            .filter(|c| c.is_auto_generated())
            .collect()
    }

    /// Columns a writer may supply values for, in declaration order
    pub fn writable_columns(&self) -> Vec<&Column> {
        self.columns
            .iter()
            .filter(|c| !c.is_auto_generated())
            .collect()
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.columns == other.columns
    }
}

fn build_column_map(columns: &[Column]) -> HashMap<String, usize> {
    columns
        .iter()
        .enumerate()
        .map(|(i, col)| (col.name().to_string(), i))
        .collect()
}
