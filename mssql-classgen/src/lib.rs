//! mssql-classgen: Generate C# classes from SQL Server table metadata
//!
//! This crate provides both a CLI tool and a library for turning SQL Server
//! tables into C# classes, one file per table. Tables come from a T-SQL
//! schema script (parsed with `sqlparser-rs`) or from a JSON metadata
//! snapshot. Every class is rendered from small line templates:
//!
//! - plain DTOs or EF Core entities (`[Table]`, `[Key]`, `[Column]`, ...)
//! - optional backing fields and `SetProperty` setters of the MVVM toolkit
//! - the `OnModelCreating` key configuration of tables with composite keys
//!
//! # Library Usage
//!
//! ```rust,ignore
//! let report = mssql_classgen::ClassgenBuilder::new("schema.sql")
//!     .output_dir("src/Models")
//!     .namespace("Demo.Models")
//!     .db_model()
//!     .generate()?;
//!
//! if !report.is_empty() {
//!     println!("{}", report.code);
//! }
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! mssql-classgen --schema schema.sql --output ./Models --namespace Demo.Models --db-model generate
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod parser;
pub mod task;

use std::path::Path;

use tracing::{debug, info};

pub use codegen::{AssetPaths, ClassManager, CompositeKeyReport, GenerationOptions, Progress};
pub use config::ClassgenConfig;
pub use error::{ClassgenError, Result};
pub use parser::{Column, Table};

/// Main entry point for class generation
pub fn generate(config: &ClassgenConfig) -> Result<CompositeKeyReport> {
    let tables = load_tables(config)?;

    let manager = ClassManager::new(asset_paths(config));
    let report = manager.generate(&config.to_options(), &tables, &mut |progress| {
        info!("{}", progress);
    })?;

    info!("Class generation complete");
    Ok(report)
}

/// Load the tables of the configured source and apply the filter
pub fn load_tables(config: &ClassgenConfig) -> Result<Vec<Table>> {
    let tables = match &config.metadata_file {
        Some(path) => parser::load_snapshot(path)?,
        None => {
            info!("Parsing schema: {:?}", config.schema_file);
            let schema_sql = std::fs::read_to_string(&config.schema_file)?;
            parser::parse_schema(&schema_sql)?
        }
    };
    info!("Found {} tables", tables.len());

    let tables = parser::filter_tables(tables, &config.filter);
    debug!(
        "After filtering: {} tables (filter='{}')",
        tables.len(),
        config.filter
    );
    Ok(tables)
}

/// Asset locations of a config
pub fn asset_paths(config: &ClassgenConfig) -> AssetPaths {
    AssetPaths {
        template_dir: config.template_dir.clone(),
        type_map_file: config.type_map_file.clone(),
    }
}

/// Builder pattern for programmatic configuration
pub struct ClassgenBuilder {
    config: ClassgenConfig,
}

impl ClassgenBuilder {
    /// Create a new builder reading tables from the given T-SQL script
    pub fn new(schema_file: impl AsRef<Path>) -> Self {
        Self {
            config: ClassgenConfig::default_with_schema(schema_file.as_ref().to_path_buf()),
        }
    }

    /// Create a new builder reading tables from a JSON metadata snapshot
    pub fn from_snapshot(metadata_file: impl AsRef<Path>) -> Self {
        Self {
            config: ClassgenConfig {
                metadata_file: Some(metadata_file.as_ref().to_path_buf()),
                ..Default::default()
            },
        }
    }

    /// Set the output directory (must exist)
    pub fn output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.output_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the namespace of the classes
    pub fn namespace(mut self, namespace: &str) -> Self {
        self.config.namespace = namespace.to_string();
        self
    }

    /// Set the class modifier
    pub fn modifier(mut self, modifier: &str) -> Self {
        self.config.modifier = modifier.to_string();
        self
    }

    /// Set the table filter (`*prefix`, `suffix*`, `*contains*` or exact)
    pub fn filter(mut self, filter: &str) -> Self {
        self.config.filter = filter.to_string();
        self
    }

    /// Generate sealed classes
    pub fn sealed(mut self) -> Self {
        self.config.sealed = true;
        self
    }

    /// Generate EF Core entities
    pub fn db_model(mut self) -> Self {
        self.config.db_model = true;
        self
    }

    /// Add a `[Column]` attribute to every property
    pub fn column_attribute(mut self) -> Self {
        self.config.column_attribute = true;
        self
    }

    /// Generate backing fields
    pub fn backing_field(mut self) -> Self {
        self.config.backing_field = true;
        self
    }

    /// Use `SetProperty` setters (implies backing fields)
    pub fn set_property(mut self) -> Self {
        self.config.set_property = true;
        self
    }

    /// Add summaries to the class and every property
    pub fn summary(mut self) -> Self {
        self.config.summary = true;
        self
    }

    /// Add the table name to the class summary
    pub fn table_name_in_summary(mut self) -> Self {
        self.config.table_name_in_summary = true;
        self
    }

    /// Delete all `*.cs` files of the output directory before the export
    pub fn clean(mut self) -> Self {
        self.config.clean = true;
        self
    }

    /// Load templates from a directory instead of the built-in set
    pub fn template_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.template_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Load the type map from a JSON file instead of the built-in map
    pub fn type_map_file(mut self, path: impl AsRef<Path>) -> Self {
        self.config.type_map_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// The configuration built so far
    pub fn config(&self) -> &ClassgenConfig {
        &self.config
    }

    /// Generate the classes
    pub fn generate(self) -> Result<CompositeKeyReport> {
        self.config.validate()?;
        generate(&self.config)
    }
}
