use tracing::debug;

use crate::constants::{NOISE_MARKERS, TIMESTAMP_MARKER_PREFIX};
use crate::types::{RawRow, ValidationCounts};

/// True when the name cell is a banner, notes marker or timestamp line.
/// Matching is exact, or by prefix for the timestamp marker; nothing fuzzy.
pub fn is_noise(name: Option<&str>) -> bool {
    match name {
        Some(name) => NOISE_MARKERS.contains(&name) || name.starts_with(TIMESTAMP_MARKER_PREFIX),
        None => false,
    }
}

/// Drop rows whose name column carries a non-data marker.
pub fn filter_noise(rows: Vec<RawRow>, name_column: usize, counts: &mut ValidationCounts) -> Vec<RawRow> {
    let before = rows.len();
    let kept: Vec<RawRow> = rows.into_iter().filter(|row| !is_noise(row.cell(name_column))).collect();

    counts.rows_filtered_keywords += before - kept.len();
    counts.rows_after_keyword_filter += kept.len();
    debug!(removed = before - kept.len(), kept = kept.len(), "Filtered noise rows");
    kept
}
