use crate::config::ColumnLayout;
use crate::types::{RawBlock, RawRow, ValidationCounts};

/// Attribute every row to the most recent name-bearing row.
///
/// A non-empty name cell starts a new character; rows before the first
/// name are dropped. Each attributed row becomes one block with its
/// content cells copied verbatim, and blocks with no content at all are
/// discarded.
pub fn segment_blocks(rows: &[RawRow], columns: &ColumnLayout, counts: &mut ValidationCounts) -> Vec<RawBlock> {
    let (_, blocks) = rows.iter().fold(
        (None::<String>, Vec::new()),
        |(current, mut blocks), row| {
            let current = match row.cell(columns.name) {
                Some(name) if !name.is_empty() => Some(name.to_string()),
                _ => current,
            };
            if let Some(character) = &current {
                blocks.push(RawBlock {
                    character: character.clone(),
                    role: row.cell(columns.role).map(str::to_string),
                    artifact_sets: row.cell(columns.artifact_sets).map(str::to_string),
                    main_stats: row.cell(columns.main_stats).map(str::to_string),
                    substats: row.cell(columns.substats).map(str::to_string),
                });
            }
            (current, blocks)
        },
    );

    let total = blocks.len();
    let meaningful: Vec<RawBlock> = blocks.into_iter().filter(|b| !b.is_empty()).collect();
    counts.rows_missing_data += total - meaningful.len();
    counts.rows_with_meaningful_data += meaningful.len();
    meaningful
}
