//! Default configuration values - single source of truth

/// Default table filter (all tables)
pub const FILTER: &str = "";

/// Default output directory for generated classes
pub const OUTPUT_DIR: &str = "./generated";

/// Default class modifier
pub const MODIFIER: &str = "public";

/// Whether generated classes are sealed by default
pub const SEALED: bool = false;

/// Whether ORM (EF Core) attributes are emitted by default
pub const DB_MODEL: bool = false;

/// Whether every property gets a column attribute by default
pub const COLUMN_ATTRIBUTE: bool = false;

/// Whether properties get a backing field by default
pub const BACKING_FIELD: bool = false;

/// Whether setters go through `SetProperty` by default
pub const SET_PROPERTY: bool = false;

/// Whether summaries are emitted by default
pub const SUMMARY: bool = false;

/// Whether the output directory is cleaned before the export by default
pub const CLEAN: bool = false;

/// Whether the table name is added to the class summary by default
pub const TABLE_NAME_IN_SUMMARY: bool = false;

/// Whether to run in dry-run mode by default
pub const DRY_RUN: bool = false;

/// Name of the config file looked up when none is given
pub const CONFIG_FILE_NAME: &str = "mssql-classgen";

/// Prefix of environment variables that override the config
pub const ENV_PREFIX: &str = "MSSQL_CLASSGEN";
