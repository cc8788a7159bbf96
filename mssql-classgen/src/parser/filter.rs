//! Table name filter

use tracing::debug;

use super::metadata::Table;

/// Check whether a name matches the filter
///
/// `*x*` matches names containing `x`, `*x` names ending with `x`, `x*` names
/// starting with `x`; without a wildcard the name must equal the filter. The
/// comparison ignores case and an empty filter matches everything.
pub fn matches_filter(value: &str, filter: &str) -> bool {
    if filter.trim().is_empty() {
        return true;
    }

    let start = filter.starts_with('*');
    let end = filter.ends_with('*');

    let needle = filter.replace('*', "").to_lowercase();
    let value = value.to_lowercase();

    match (start, end) {
        (true, true) => value.contains(&needle),
        (true, false) => value.ends_with(&needle),
        (false, true) => value.starts_with(&needle),
        (false, false) => value == needle,
    }
}

/// Keep the tables whose name matches the filter, preserving their order
pub fn filter_tables(tables: Vec<Table>, filter: &str) -> Vec<Table> {
    let total = tables.len();
    let tables: Vec<Table> = tables
        .into_iter()
        .filter(|t| matches_filter(&t.name, filter))
        .collect();
    debug!(
        "Filter '{}' kept {} of {} tables",
        filter,
        tables.len(),
        total
    );
    tables
}
