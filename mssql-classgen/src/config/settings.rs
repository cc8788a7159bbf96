//! Configuration settings for mssql-classgen

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::defaults;
use crate::codegen::GenerationOptions;
use crate::error::{ClassgenError, Result};

/// Main configuration struct for class generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassgenConfig {
    /// Path to a T-SQL DDL script
    #[serde(default)]
    pub schema_file: PathBuf,

    /// Path to a JSON metadata snapshot (alternative to `schema_file`)
    #[serde(default)]
    pub metadata_file: Option<PathBuf>,

    /// Table name filter (`*prefix`, `suffix*`, `*contains*` or exact)
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Output directory for the generated classes
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Namespace of the generated classes (cleaned before use)
    #[serde(default)]
    pub namespace: String,

    /// Class modifier, e.g. `public` or `internal`
    #[serde(default = "default_modifier")]
    pub modifier: String,

    /// Add the `sealed` keyword
    #[serde(default = "default_sealed")]
    pub sealed: bool,

    /// Emit EF Core attributes (`[Key]`, `[Table]`) and the composite key code
    #[serde(default = "default_db_model")]
    pub db_model: bool,

    /// Add a `[Column]` attribute to every property
    #[serde(default = "default_column_attribute")]
    pub column_attribute: bool,

    /// Generate a backing field for every property
    #[serde(default = "default_backing_field")]
    pub backing_field: bool,

    /// Use `SetProperty` of the MVVM toolkit (implies `backing_field`)
    #[serde(default = "default_set_property")]
    pub set_property: bool,

    /// Add empty summaries to the class and every property
    #[serde(default = "default_summary")]
    pub summary: bool,

    /// Delete all `*.cs` files of the output directory before the export
    #[serde(default = "default_clean")]
    pub clean: bool,

    /// Add the table name to the class summary
    #[serde(default = "default_table_name_in_summary")]
    pub table_name_in_summary: bool,

    /// Directory with `*.cgt` template files (built-in templates when unset)
    #[serde(default)]
    pub template_dir: Option<PathBuf>,

    /// JSON file with the SQL to C# type map (built-in map when unset)
    #[serde(default)]
    pub type_map_file: Option<PathBuf>,

    /// Dry run mode - preview without writing files
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    /// Can be overridden by RUST_LOG env var
    #[serde(default)]
    pub log_level: Option<String>,
}

// Default value functions for serde
fn default_filter() -> String {
    defaults::FILTER.to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from(defaults::OUTPUT_DIR)
}
fn default_modifier() -> String {
    defaults::MODIFIER.to_string()
}
fn default_sealed() -> bool {
    defaults::SEALED
}
fn default_db_model() -> bool {
    defaults::DB_MODEL
}
fn default_column_attribute() -> bool {
    defaults::COLUMN_ATTRIBUTE
}
fn default_backing_field() -> bool {
    defaults::BACKING_FIELD
}
fn default_set_property() -> bool {
    defaults::SET_PROPERTY
}
fn default_summary() -> bool {
    defaults::SUMMARY
}
fn default_clean() -> bool {
    defaults::CLEAN
}
fn default_table_name_in_summary() -> bool {
    defaults::TABLE_NAME_IN_SUMMARY
}
fn default_dry_run() -> bool {
    defaults::DRY_RUN
}

impl Default for ClassgenConfig {
    fn default() -> Self {
        Self {
            schema_file: PathBuf::new(),
            metadata_file: None,
            filter: default_filter(),
            output_dir: default_output_dir(),
            namespace: String::new(),
            modifier: default_modifier(),
            sealed: default_sealed(),
            db_model: default_db_model(),
            column_attribute: default_column_attribute(),
            backing_field: default_backing_field(),
            set_property: default_set_property(),
            summary: default_summary(),
            clean: default_clean(),
            table_name_in_summary: default_table_name_in_summary(),
            template_dir: None,
            type_map_file: None,
            dry_run: default_dry_run(),
            log_level: None,
        }
    }
}

impl ClassgenConfig {
    /// Create a default config with the given schema file
    pub fn default_with_schema(schema_file: PathBuf) -> Self {
        Self {
            schema_file,
            ..Default::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ClassgenConfig = toml::from_str(&content).map_err(|e| {
            ClassgenError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(config)
    }

    /// Load configuration using config-rs (file + environment variables)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        } else {
            builder = builder.add_source(File::with_name(defaults::CONFIG_FILE_NAME).required(false));
        }

        // Keys contain underscores, so nesting uses a double underscore
        builder = builder.add_source(Environment::with_prefix(defaults::ENV_PREFIX).separator("__"));

        let config: ClassgenConfig = builder.build()?.try_deserialize()?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let has_schema = !self.schema_file.as_os_str().is_empty();

        match (&self.metadata_file, has_schema) {
            (None, false) => {
                return Err(ClassgenError::ValidationError(
                    "either schema_file or metadata_file is required".into(),
                ));
            }
            (Some(_), true) => {
                return Err(ClassgenError::ValidationError(
                    "schema_file and metadata_file are mutually exclusive".into(),
                ));
            }
            (Some(metadata), false) if !metadata.exists() => {
                return Err(ClassgenError::ValidationError(format!(
                    "Metadata file not found: {}",
                    metadata.display()
                )));
            }
            (None, true) if !self.schema_file.exists() => {
                return Err(ClassgenError::ValidationError(format!(
                    "Schema file not found: {}",
                    self.schema_file.display()
                )));
            }
            _ => {}
        }

        if self.namespace.trim().is_empty() {
            return Err(ClassgenError::ValidationError(
                "namespace is required".into(),
            ));
        }

        Ok(())
    }

    /// Convert the settings into the options consumed by the generator
    pub fn to_options(&self) -> GenerationOptions {
        GenerationOptions {
            output: self.output_dir.clone(),
            namespace: self.namespace.clone(),
            modifier: self.modifier.clone(),
            sealed: self.sealed,
            db_model: self.db_model,
            add_column_attribute: self.column_attribute,
            with_backing_field: self.backing_field,
            add_set_property: self.set_property,
            add_summary: self.summary,
            clean_before_export: self.clean,
            add_table_name_to_summary: self.table_name_in_summary,
        }
    }
}
