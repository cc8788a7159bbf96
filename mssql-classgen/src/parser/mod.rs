//! Table providers: T-SQL DDL scripts (sqlparser-rs) and JSON metadata snapshots

mod filter;
mod metadata;
mod schema_parser;
mod snapshot;

pub use filter::*;
pub use metadata::*;
pub use schema_parser::*;
pub use snapshot::*;
