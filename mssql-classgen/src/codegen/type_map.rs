//! SQL Server to C# type mapping

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::Result;

/// C# type used when a SQL type is not in the map
pub const FALLBACK_TYPE: &str = "object";

/// C# string type; string properties get a default value and a length attribute
pub const STRING_TYPE: &str = "string";

/// Map shipped with the crate
const BUILTIN_MAP: &str = include_str!("../../assets/TypeConversion.json");

/// One entry of the type map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeConversion {
    /// SQL type name, e.g. `nvarchar`
    #[serde(rename = "SqlType")]
    pub sql_type: String,

    /// C# type name, e.g. `string`
    #[serde(rename = "CsharpType", alias = "TargetType")]
    pub target_type: String,
}

/// Lookup table from SQL type names to C# type names
#[derive(Debug, Clone, Default)]
pub struct TypeMap {
    entries: Vec<TypeConversion>,
}

impl TypeMap {
    /// Create a map from the given entries
    pub fn new(entries: Vec<TypeConversion>) -> Self {
        Self { entries }
    }

    /// The map shipped with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_MAP)
    }

    /// Parse a JSON array of `{ "SqlType": .., "CsharpType": .. }` entries
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<TypeConversion> = serde_json::from_str(json)?;
        Ok(Self::new(entries))
    }

    /// Load the map from a JSON file.
    ///
    /// A missing file is logged and yields an empty map, so every lookup falls
    /// back to [`FALLBACK_TYPE`]. A file that exists but cannot be read or
    /// parsed is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            error!("The type conversion file is missing. Path: {}", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let map = Self::from_json(&content)?;
        debug!("Loaded {} type conversions from {}", map.len(), path.display());
        Ok(map)
    }

    /// Resolve the C# type of a SQL type (case-insensitive exact match)
    pub fn resolve(&self, sql_type: &str) -> &str {
        match self
            .entries
            .iter()
            .find(|e| e.sql_type.eq_ignore_ascii_case(sql_type))
        {
            Some(entry) => &entry.target_type,
            None => {
                debug!("No type conversion for '{}', using {}", sql_type, FALLBACK_TYPE);
                FALLBACK_TYPE
            }
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
