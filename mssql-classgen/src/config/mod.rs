//! Configuration for mssql-classgen

pub mod defaults;
mod settings;

pub use settings::ClassgenConfig;
