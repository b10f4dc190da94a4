//! Table name filtering.

/// Keep the tables whose name contains at least one of `filters`,
/// ignoring case.
///
/// Relative order is preserved. With no filters the input is returned as is.
pub fn filter_tables(tables: Vec<String>, filters: &[String]) -> Vec<String> {
    if filters.is_empty() {
        return tables;
    }

    let needles: Vec<String> = filters.iter().map(|f| f.to_lowercase()).collect();
    tables
        .into_iter()
        .filter(|table| {
            let name = table.to_lowercase();
            needles.iter().any(|needle| name.contains(needle.as_str()))
        })
        .collect()
}
