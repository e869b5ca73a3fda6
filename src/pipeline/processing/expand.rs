use tracing::debug;

use super::normalize::{canonicalize_artifact_sets, canonicalize_stats};
use crate::constants::SLOT_SEPARATOR;
use crate::types::{CharacterBlock, Fact, RankedEntry, ValidationCounts};

/// Split a main-stat line `<slot> - <stat text>` into its slot and stat text.
/// Only the text between the first and second separator is the stat text.
pub fn split_slot(line: &str) -> Option<(&str, &str)> {
    let mut parts = line.split(SLOT_SEPARATOR);
    let slot = parts.next()?;
    let stat_text = parts.next()?;
    Some((slot.trim(), stat_text))
}

struct RankedStats {
    rank: u32,
    stats: Vec<String>,
}

/// Expand every block into its cross-product of facts.
pub fn expand_facts(blocks: &[CharacterBlock], counts: &mut ValidationCounts) -> Vec<Fact> {
    let mut facts = Vec::new();
    for block in blocks {
        expand_block(block, counts, &mut facts);
    }
    facts
}

/// Emit one fact per (set × slot/main stat × substat) combination of a block.
///
/// Unranked set or substat lines and main-stat lines without a slot are
/// skipped and counted each time the loop reaches them; a substat equal
/// to the main stat cannot roll on that piece and is skipped too.
pub fn expand_block(block: &CharacterBlock, counts: &mut ValidationCounts, facts: &mut Vec<Fact>) {
    let substats: Vec<Option<RankedStats>> = block
        .substat_lines
        .iter()
        .map(|line| {
            RankedEntry::parse(line).map(|entry| RankedStats { rank: entry.rank, stats: canonicalize_stats(&entry.text) })
        })
        .collect();
    let main_stats: Vec<Option<(&str, Vec<String>)>> = block
        .main_stat_lines
        .iter()
        .map(|line| split_slot(line).map(|(slot, text)| (slot, canonicalize_stats(text))))
        .collect();

    let before = facts.len();
    for line in &block.artifact_set_lines {
        let Some(RankedEntry { rank: set_rank, text }) = RankedEntry::parse(line) else {
            counts.artifact_lines_no_rank += 1;
            continue;
        };

        for artifact_set in canonicalize_artifact_sets(&text) {
            for main in &main_stats {
                let Some((slot, stats)) = main else {
                    counts.main_stat_lines_no_slot += 1;
                    continue;
                };

                for main_stat in stats {
                    for substat_line in &substats {
                        let Some(ranked) = substat_line else {
                            counts.substat_lines_no_rank += 1;
                            continue;
                        };

                        for substat in &ranked.stats {
                            if substat == main_stat {
                                counts.skipped_duplicate_main_substat += 1;
                                continue;
                            }
                            facts.push(Fact {
                                character: block.character.clone(),
                                role: block.role.clone(),
                                preferred: block.preferred,
                                artifact_set: artifact_set.clone(),
                                artifact_set_rank: set_rank,
                                artifact_slot: slot.to_string(),
                                main_stat: main_stat.clone(),
                                substat: substat.clone(),
                                substat_rank: ranked.rank,
                            });
                        }
                    }
                }
            }
        }
    }

    debug!(
        character = %block.character,
        role = %block.role,
        facts = facts.len() - before,
        "Expanded block"
    );
}
