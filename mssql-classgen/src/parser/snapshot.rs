//! JSON metadata snapshots
//!
//! A snapshot is the JSON form of what the metadata queries return: an array
//! of tables, each carrying its columns.

use std::path::Path;

use tracing::info;

use super::metadata::Table;
use crate::error::Result;

/// Parse a JSON snapshot
pub fn parse_snapshot(json: &str) -> Result<Vec<Table>> {
    let mut tables: Vec<Table> = serde_json::from_str(json)?;

    // Columns always belong to the table they are nested in
    for table in &mut tables {
        let id = table.id;
        for column in &mut table.columns {
            column.table_id = id;
        }
    }

    Ok(tables)
}

/// Load a JSON snapshot from disk
pub fn load_snapshot(path: &Path) -> Result<Vec<Table>> {
    let content = std::fs::read_to_string(path)?;
    let tables = parse_snapshot(&content)?;
    info!("Loaded {} tables from {}", tables.len(), path.display());
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_snapshot() {
        let json = r#"[
            {
                "Id": 7,
                "Name": "Customer",
                "Schema": "dbo",
                "Columns": [
                    { "Name": "Id", "Order": 1, "DataType": "int", "IsPrimaryKey": true },
                    { "Name": "Name", "Order": 2, "DataType": "nvarchar", "MaxLength": 50, "IsNullable": true }
                ]
            }
        ]"#;

        let tables = parse_snapshot(json).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].schema, "dbo");
        assert_eq!(tables[0].alias, "");
        assert_eq!(tables[0].columns.len(), 2);
        assert!(tables[0].columns.iter().all(|c| c.table_id == 7));
        assert_eq!(tables[0].columns[1].max_length, 50);
        assert!(tables[0].columns[0].is_primary_key);
    }

    #[test]
    fn test_parse_snapshot_rejects_garbage() {
        assert!(parse_snapshot("{ not json").is_err());
    }
}
