//! Table and column records consumed by the generator

use serde::{Deserialize, Serialize};

/// A database table with its columns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Table {
    /// Object id of the table
    pub id: i32,

    /// Table name
    pub name: String,

    /// Schema name (may be empty)
    #[serde(default)]
    pub schema: String,

    /// Optional name override for the generated class
    #[serde(default)]
    pub alias: String,

    /// Columns in metadata order
    #[serde(default)]
    pub columns: Vec<Column>,
}

/// A table column
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Column {
    /// Id of the owning table
    #[serde(default)]
    pub table_id: i32,

    /// Column name
    pub name: String,

    /// Optional name override for the generated property
    #[serde(default)]
    pub alias: String,

    /// Position of the column, defines the property order
    pub order: i32,

    /// SQL type name, e.g. `nvarchar`
    pub data_type: String,

    /// Maximum length, `-1` means `MAX`
    #[serde(default)]
    pub max_length: i32,

    /// Whether the column accepts `NULL`
    #[serde(default)]
    pub is_nullable: bool,

    /// Whether the column is part of the primary key
    #[serde(default)]
    pub is_primary_key: bool,

    /// Default value expression (`NULL` when there is none)
    #[serde(default)]
    pub default_value: String,
}

impl Table {
    /// Name used for the class: the alias when set, otherwise the table name
    pub fn class_name(&self) -> &str {
        if self.alias.trim().is_empty() {
            &self.name
        } else {
            &self.alias
        }
    }

    /// Columns sorted by `order`; ties keep their metadata order
    pub fn ordered_columns(&self) -> Vec<&Column> {
        let mut columns: Vec<&Column> = self.columns.iter().collect();
        columns.sort_by_key(|c| c.order);
        columns
    }

    /// Primary key columns sorted by `order`
    pub fn primary_key_columns(&self) -> Vec<&Column> {
        self.ordered_columns()
            .into_iter()
            .filter(|c| c.is_primary_key)
            .collect()
    }

    /// Check if the primary key spans more than one column
    pub fn has_composite_key(&self) -> bool {
        self.columns.iter().filter(|c| c.is_primary_key).count() > 1
    }
}

impl Column {
    /// Name used for the property: the alias when set, otherwise the column name
    pub fn property_name(&self) -> &str {
        if self.alias.trim().is_empty() {
            &self.name
        } else {
            &self.alias
        }
    }

    /// Whether an alias is set that differs from the column name
    pub fn has_distinct_alias(&self) -> bool {
        !self.alias.trim().is_empty() && self.alias != self.name
    }
}
