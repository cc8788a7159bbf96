//! CLI entry point for mssql-classgen

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use mssql_classgen::codegen::{class_file_path, generate_class_name};
use mssql_classgen::config::ClassgenConfig;

#[derive(Parser)]
#[command(name = "mssql-classgen")]
#[command(about = "Generate C# classes from SQL Server table metadata")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to T-SQL schema file (overrides config)
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Path to JSON metadata snapshot (overrides config)
    #[arg(short, long)]
    metadata: Option<PathBuf>,

    /// Output directory, must exist (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Namespace of the classes (overrides config)
    #[arg(short, long)]
    namespace: Option<String>,

    /// Class modifier, e.g. public or internal
    #[arg(long)]
    modifier: Option<String>,

    /// Table filter: *prefix, suffix*, *contains* or an exact name
    #[arg(short, long)]
    filter: Option<String>,

    /// Generate sealed classes
    #[arg(long)]
    sealed: bool,

    /// Generate EF Core entities and the composite key configuration
    #[arg(long)]
    db_model: bool,

    /// Add a [Column] attribute to every property
    #[arg(long)]
    column_attribute: bool,

    /// Generate backing fields
    #[arg(long)]
    backing_field: bool,

    /// Use SetProperty of the MVVM toolkit (implies --backing-field)
    #[arg(long)]
    set_property: bool,

    /// Add summaries to the class and every property
    #[arg(long)]
    summary: bool,

    /// Delete all *.cs files of the output directory first
    #[arg(long)]
    clean: bool,

    /// Add the table name to the class summary
    #[arg(long)]
    table_name: bool,

    /// Directory with *.cgt templates (built-in templates otherwise)
    #[arg(long)]
    templates: Option<PathBuf>,

    /// JSON type map (built-in map otherwise)
    #[arg(long)]
    type_map: Option<PathBuf>,

    /// Dry run - show what would be generated without writing files
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the classes
    Generate,
    /// Inspect tables (show parsed tables for debugging)
    Inspect,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let started = Instant::now();

    // Load configuration first (before logging, so we can use config.log_level)
    let mut config = ClassgenConfig::load(cli.config.as_deref())?;

    // Initialize logging
    // Priority: RUST_LOG env var > config.log_level > default (debug for dev, info for release)
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    let log_level = config.log_level.as_deref().unwrap_or(default_level);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    apply_overrides(&mut config, &cli);
    debug!("Options: {:?}", config);

    if let Some(Commands::Inspect) = &cli.command {
        return inspect_tables(&config);
    }

    config.validate()?;

    if config.dry_run {
        println!("Dry run mode - would generate:");
        let tables = mssql_classgen::load_tables(&config)?;
        for table in &tables {
            let class_name = generate_class_name(table.class_name());
            println!(
                "  Class: {}",
                class_file_path(&config.output_dir, &class_name).display()
            );
        }
        return Ok(());
    }

    let report = mssql_classgen::generate(&config)?;
    if !report.is_empty() {
        info!(
            "Composite keys found in {} table(s), add the following code to your DbContext:",
            report.table_count
        );
        println!("{}", report.code);
    }

    info!("Generation finished in {:.2?}", started.elapsed());
    Ok(())
}

/// Apply the command line values on top of the loaded configuration
fn apply_overrides(config: &mut ClassgenConfig, cli: &Cli) {
    if let Some(schema) = &cli.schema {
        config.schema_file = schema.clone();
        config.metadata_file = None;
    }
    if let Some(metadata) = &cli.metadata {
        config.metadata_file = Some(metadata.clone());
        config.schema_file = PathBuf::new();
    }
    if let Some(output) = &cli.output {
        config.output_dir = output.clone();
    }
    if let Some(namespace) = &cli.namespace {
        config.namespace = namespace.clone();
    }
    if let Some(modifier) = &cli.modifier {
        config.modifier = modifier.clone();
    }
    if let Some(filter) = &cli.filter {
        config.filter = filter.clone();
    }
    if let Some(templates) = &cli.templates {
        config.template_dir = Some(templates.clone());
    }
    if let Some(type_map) = &cli.type_map {
        config.type_map_file = Some(type_map.clone());
    }

    // Switches only turn options on
    config.sealed |= cli.sealed;
    config.db_model |= cli.db_model;
    config.column_attribute |= cli.column_attribute;
    config.backing_field |= cli.backing_field;
    config.set_property |= cli.set_property;
    config.summary |= cli.summary;
    config.clean |= cli.clean;
    config.table_name_in_summary |= cli.table_name;
    config.dry_run |= cli.dry_run;
}

fn inspect_tables(config: &ClassgenConfig) -> Result<()> {
    let tables = mssql_classgen::load_tables(config)?;

    println!("Parsed {} tables:\n", tables.len());
    for table in &tables {
        if table.schema.is_empty() {
            println!("Table: {} (class {})", table.name, generate_class_name(table.class_name()));
        } else {
            println!(
                "Table: {}.{} (class {})",
                table.schema,
                table.name,
                generate_class_name(table.class_name())
            );
        }
        println!("  Columns:");
        for col in table.ordered_columns() {
            let nullable = if col.is_nullable { "NULL" } else { "NOT NULL" };
            let pk = if col.is_primary_key { " PRIMARY KEY" } else { "" };
            println!(
                "    - {} {}({}) {}{}",
                col.name, col.data_type, col.max_length, nullable, pk
            );
            if col.default_value != "NULL" && !col.default_value.is_empty() {
                println!("      DEFAULT {}", col.default_value);
            }
        }
        if table.has_composite_key() {
            let keys: Vec<&str> = table
                .primary_key_columns()
                .iter()
                .map(|c| c.name.as_str())
                .collect();
            println!("  Composite Key: {:?}", keys);
        }
        println!();
    }

    Ok(())
}
