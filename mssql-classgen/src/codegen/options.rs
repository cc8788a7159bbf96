//! Options of a generation run

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Fallback when no class modifier is given
pub const MODIFIER_FALLBACK: &str = "public";

/// Switches that control the generated classes, fixed for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Directory receiving the generated files
    pub output: PathBuf,

    /// Raw namespace, cleaned before use
    pub namespace: String,

    /// Class modifier keyword
    pub modifier: String,

    /// Add the `sealed` keyword
    pub sealed: bool,

    /// Emit EF Core attributes and the composite key code
    pub db_model: bool,

    /// Add a `[Column]` attribute to every property
    pub add_column_attribute: bool,

    /// Generate a backing field for every property
    pub with_backing_field: bool,

    /// Route setters through `SetProperty` of the MVVM toolkit
    pub add_set_property: bool,

    /// Add empty summaries to the class and every property
    pub add_summary: bool,

    /// Delete every `*.cs` file of the output directory first
    pub clean_before_export: bool,

    /// Add the table name to the class summary
    pub add_table_name_to_summary: bool,
}

impl GenerationOptions {
    /// Whether properties are generated with a backing field.
    ///
    /// `SetProperty` needs a field to pass by reference, so it implies one.
    pub fn has_backing_field(&self) -> bool {
        self.with_backing_field || self.add_set_property
    }

    /// The class modifier, falling back to `public` when blank
    pub fn modifier(&self) -> &str {
        if self.modifier.trim().is_empty() {
            MODIFIER_FALLBACK
        } else {
            &self.modifier
        }
    }
}
