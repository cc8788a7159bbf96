//! Composite key generator - EF Core key configuration for multi-column keys
//!
//! EF Core can't express a composite key with `[Key]` attributes, so tables
//! whose primary key spans more than one column get a `HasKey` call in
//! `OnModelCreating` instead. Single-column keys are covered by `[Key]`.

use serde::Serialize;
use tracing::debug;

use super::naming::{generate_class_name, generate_property_name};
use super::renderer::{NEW_LINE, TAB};
use crate::parser::Table;

/// Generated `OnModelCreating` code and the number of tables it covers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompositeKeyReport {
    pub code: String,
    pub table_count: usize,
}

impl CompositeKeyReport {
    /// Whether there is no code, i.e. no table has a composite key
    pub fn is_empty(&self) -> bool {
        self.code.trim().is_empty()
    }
}

/// Generate the key configuration for all tables with a composite key
pub fn generate_composite_keys(tables: &[Table]) -> CompositeKeyReport {
    let tables: Vec<&Table> = tables.iter().filter(|t| t.has_composite_key()).collect();

    if tables.is_empty() {
        return CompositeKeyReport::default();
    }

    let mut lines: Vec<String> = Vec::new();
    lines.push("protected override void OnModelCreating(ModelBuilder modelBuilder)".to_string());
    lines.push("{".to_string());

    for (index, table) in tables.iter().enumerate() {
        let class_name = generate_class_name(table.class_name());
        let keys = table.primary_key_columns();
        debug!("Composite key for {}: {} columns", class_name, keys.len());

        lines.push(format!(
            "{TAB}modelBuilder.Entity<{}>().HasKey(k => new",
            class_name
        ));
        lines.push(format!("{TAB}{{"));

        for (key_index, column) in keys.iter().enumerate() {
            let separator = if key_index + 1 < keys.len() { "," } else { "" };
            lines.push(format!(
                "{TAB}{TAB}k.{}{}",
                generate_property_name(column.property_name()),
                separator
            ));
        }

        lines.push(format!("{TAB}}});"));

        if index + 1 < tables.len() {
            lines.push(String::new());
        }
    }

    lines.push("}".to_string());

    CompositeKeyReport {
        code: lines.join(NEW_LINE),
        table_count: tables.len(),
    }
}
