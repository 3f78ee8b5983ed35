// Column Management Module
//
// This module defines the Column type that describes one field of a record
// table.

use super::DataType;
use serde::{Deserialize, Serialize};

/// Represents a column in a record table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    name: String,
    /// Declared data type
    data_type: DataType,
    /// Whether this column is the table's primary key
    primary_key: bool,
    /// Whether the backing store assigns this column's value itself
    /// (e.g. an auto-incrementing primary key)
    auto_generated: bool,
}

impl Column {
    /// Create a new column
    pub fn new(name: String, data_type: DataType, primary_key: bool, auto_generated: bool) -> Self {
        Column {
            name,
            data_type,
            primary_key,
            auto_generated,
        }
    }

    /// Get the column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the declared data type
    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    /// Check if the column is the primary key
    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    /// Check if the column's value is assigned by the backing store
    pub fn is_auto_generated(&self) -> bool {
        self.auto_generated
    }
}
