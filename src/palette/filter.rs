use crate::catalog::{CommandCatalog, CommandEntry};

/// Number of rows the popup shows. Filtering never returns more.
pub const VISIBLE_ROWS: usize = 5;

/// Entries whose label contains `fragment`, in group priority order and
/// catalog order within each group, capped at [`VISIBLE_ROWS`].
///
/// Matching is plain case-sensitive substring containment; an empty
/// fragment keeps everything.
pub fn filter<'a>(fragment: &str, catalog: &'a CommandCatalog) -> Vec<&'a CommandEntry> {
    catalog
        .entries()
        .filter(|entry| entry.label.contains(fragment))
        .take(VISIBLE_ROWS)
        .collect()
}
