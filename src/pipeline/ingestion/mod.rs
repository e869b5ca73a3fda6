// Pipeline ingestion: merge per-category tables into one ordered row sequence

use tracing::debug;

use crate::types::{CategoryTable, RawRow, ValidationCounts};

/// Settings for the ingestion stage.
#[derive(Debug, Clone)]
pub struct IngestSettings {
    /// Leading rows of each table to discard.
    pub header_rows: usize,
    /// Generic name token that recurs in every category table.
    pub placeholder: String,
    /// Column holding the character name.
    pub name_column: usize,
}

/// Concatenate all category tables in order, dropping header rows and
/// qualifying placeholder names with their category label.
///
/// A name cell starting with the placeholder is replaced whole by
/// `"<CATEGORY> <PLACEHOLDER>"`, so `TRAVELER (Anemo)` in the `ANEMO` table
/// becomes `ANEMO TRAVELER`.
pub fn ingest_tables(
    tables: &[CategoryTable],
    settings: &IngestSettings,
    counts: &mut ValidationCounts,
) -> Vec<RawRow> {
    let mut rows = Vec::new();

    for table in tables {
        counts.rows_fetched += table.rows.len();
        let kept = table.rows.len().saturating_sub(settings.header_rows);
        counts.rows_after_header_trim += kept;
        debug!(
            category = %table.category,
            fetched = table.rows.len(),
            kept,
            "Ingesting category table"
        );

        for cells in table.rows.iter().skip(settings.header_rows) {
            let mut cells = cells.clone();
            if let Some(Some(name)) = cells.get_mut(settings.name_column) {
                if name.starts_with(settings.placeholder.as_str()) {
                    *name = qualified_placeholder(&table.category, &settings.placeholder);
                }
            }
            rows.push(RawRow::new(table.category.clone(), cells));
        }
    }

    rows
}

fn qualified_placeholder(category: &str, placeholder: &str) -> String {
    format!("{} {}", category, placeholder)
}
