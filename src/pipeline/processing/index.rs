//! Denormalized lookup views over the fact table.
//!
//! Every view is rebuilt from scratch from the facts; nothing here mutates
//! them. Map keys are emitted in sorted order so the serialized bundle is
//! byte-stable across runs.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::constants::{FIXED_MAIN_STAT_LABEL, FIXED_SLOTS_LABEL};
use crate::error::Result;
use crate::types::Fact;

/// Joins the parts of composite `byArtifact` / `byMainStat` keys.
pub const KEY_SEPARATOR: &str = "|";

/// A character/role recommending something, with its set priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub character: String,
    pub role: String,
    pub preferred: bool,
    pub set_rank: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct CharacterRole {
    pub character: String,
    pub role: String,
}

/// A substat at one priority, with everyone recommending it at that priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubstatRecommendation {
    pub substat: String,
    pub rank: u32,
    pub character_roles: Vec<CharacterRole>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Recommendations {
    pub characters: Vec<Participant>,
    pub substats: Vec<SubstatRecommendation>,
}

/// Aggregate over all slots of a set, for pieces whose main stat is not chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedSlots {
    pub slot: String,
    pub main_stat_label: String,
    pub characters: Vec<Participant>,
    pub substats: Vec<SubstatRecommendation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetEntry {
    pub characters: Vec<Participant>,
    /// slot -> main stat -> recommendations
    pub slots: BTreeMap<String, BTreeMap<String, Recommendations>>,
    pub fixed_slots: FixedSlots,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub sets: Vec<String>,
    pub slots: Vec<String>,
    pub characters: Vec<String>,
    pub substats: Vec<String>,
    pub main_stats_by_slot: BTreeMap<String, Vec<String>>,
}

/// The index bundle consumed by the web evaluator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactIndex {
    pub meta: Meta,
    pub by_set: BTreeMap<String, SetEntry>,
    pub by_artifact: BTreeMap<String, Recommendations>,
    pub by_main_stat: BTreeMap<String, Recommendations>,
}

impl ArtifactIndex {
    /// Compact JSON encoding (no insignificant whitespace).
    pub fn to_compact_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

pub fn artifact_key(set: &str, slot: &str, main_stat: &str) -> String {
    [set, slot, main_stat].join(KEY_SEPARATOR)
}

pub fn main_stat_key(slot: &str, main_stat: &str) -> String {
    [slot, main_stat].join(KEY_SEPARATOR)
}

/// Build all four views over the fact table.
pub fn build_index(facts: &[Fact]) -> ArtifactIndex {
    ArtifactIndex {
        meta: build_meta(facts),
        by_set: build_by_set(facts),
        by_artifact: build_by_artifact(facts),
        by_main_stat: build_by_main_stat(facts),
    }
}

pub fn build_meta(facts: &[Fact]) -> Meta {
    let mut main_stats_by_slot: BTreeMap<String, BTreeSet<&str>> = BTreeMap::new();
    for fact in facts {
        main_stats_by_slot
            .entry(fact.artifact_slot.clone())
            .or_default()
            .insert(fact.main_stat.as_str());
    }

    Meta {
        sets: distinct(facts.iter().map(|f| f.artifact_set.as_str())),
        slots: distinct(facts.iter().map(|f| f.artifact_slot.as_str())),
        characters: distinct(facts.iter().map(|f| f.character.as_str())),
        substats: distinct(facts.iter().map(|f| f.substat.as_str())),
        main_stats_by_slot: main_stats_by_slot
            .into_iter()
            .map(|(slot, stats)| (slot, stats.into_iter().map(str::to_string).collect()))
            .collect(),
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values.collect::<BTreeSet<_>>().into_iter().map(str::to_string).collect()
}

pub fn build_by_set(facts: &[Fact]) -> BTreeMap<String, SetEntry> {
    group_by_set(facts)
        .into_iter()
        .map(|(set, set_facts)| {
            let slots = group_by_slot_and_main_stat(&set_facts)
                .into_iter()
                .map(|(slot, by_main)| {
                    let stats = by_main
                        .into_iter()
                        .map(|(main_stat, ms_facts)| (main_stat.to_string(), recommendations(&ms_facts)))
                        .collect();
                    (slot.to_string(), stats)
                })
                .collect();

            let entry = SetEntry {
                characters: participants(&set_facts),
                slots,
                fixed_slots: FixedSlots {
                    slot: FIXED_SLOTS_LABEL.to_string(),
                    main_stat_label: FIXED_MAIN_STAT_LABEL.to_string(),
                    characters: participants(&set_facts),
                    substats: substats(&set_facts),
                },
            };
            (set.to_string(), entry)
        })
        .collect()
}

pub fn build_by_artifact(facts: &[Fact]) -> BTreeMap<String, Recommendations> {
    let mut index = BTreeMap::new();
    for (set, set_facts) in group_by_set(facts) {
        for (slot, by_main) in group_by_slot_and_main_stat(&set_facts) {
            for (main_stat, ms_facts) in by_main {
                index.insert(artifact_key(set, slot, main_stat), recommendations(&ms_facts));
            }
        }
    }
    index
}

/// Slot/main-stat view ignoring the set. Each participant carries its best
/// set rank across every set offering the combination, and each substat its
/// best rank per character/role.
pub fn build_by_main_stat(facts: &[Fact]) -> BTreeMap<String, Recommendations> {
    let refs: Vec<&Fact> = facts.iter().collect();
    let mut index = BTreeMap::new();
    for (slot, by_main) in group_by_slot_and_main_stat(&refs) {
        for (main_stat, ms_facts) in by_main {
            let entry = Recommendations {
                characters: best_rank_participants(&ms_facts),
                substats: best_rank_substats(&ms_facts),
            };
            index.insert(main_stat_key(slot, main_stat), entry);
        }
    }
    index
}

fn group_by_set(facts: &[Fact]) -> BTreeMap<&str, Vec<&Fact>> {
    let mut groups: BTreeMap<&str, Vec<&Fact>> = BTreeMap::new();
    for fact in facts {
        groups.entry(fact.artifact_set.as_str()).or_default().push(fact);
    }
    groups
}

fn group_by_slot_and_main_stat<'a>(facts: &[&'a Fact]) -> BTreeMap<&'a str, BTreeMap<&'a str, Vec<&'a Fact>>> {
    let mut groups: BTreeMap<&'a str, BTreeMap<&'a str, Vec<&'a Fact>>> = BTreeMap::new();
    for &fact in facts {
        groups
            .entry(fact.artifact_slot.as_str())
            .or_default()
            .entry(fact.main_stat.as_str())
            .or_default()
            .push(fact);
    }
    groups
}

fn recommendations(facts: &[&Fact]) -> Recommendations {
    Recommendations { characters: participants(facts), substats: substats(facts) }
}

/// One entry per (character, role), keeping its lowest (preferred, set rank),
/// sorted by (set rank, character).
fn participants(facts: &[&Fact]) -> Vec<Participant> {
    let mut best: BTreeMap<(&str, &str), (bool, u32)> = BTreeMap::new();
    for fact in facts {
        let candidate = (fact.preferred, fact.artifact_set_rank);
        best.entry((fact.character.as_str(), fact.role.as_str()))
            .and_modify(|current| *current = (*current).min(candidate))
            .or_insert(candidate);
    }

    let list = best
        .into_iter()
        .map(|((character, role), (preferred, set_rank))| Participant {
            character: character.to_string(),
            role: role.to_string(),
            preferred,
            set_rank,
        })
        .collect();
    sort_participants(list)
}

/// One entry per (character, role, preferred) with its minimum set rank.
fn best_rank_participants(facts: &[&Fact]) -> Vec<Participant> {
    let mut best: BTreeMap<(&str, &str, bool), u32> = BTreeMap::new();
    for fact in facts {
        best.entry((fact.character.as_str(), fact.role.as_str(), fact.preferred))
            .and_modify(|rank| *rank = (*rank).min(fact.artifact_set_rank))
            .or_insert(fact.artifact_set_rank);
    }

    let list = best
        .into_iter()
        .map(|((character, role, preferred), set_rank)| Participant {
            character: character.to_string(),
            role: role.to_string(),
            preferred,
            set_rank,
        })
        .collect();
    sort_participants(list)
}

fn sort_participants(mut list: Vec<Participant>) -> Vec<Participant> {
    // Stable: ties keep (character, role) order from the grouping.
    list.sort_by(|a, b| (a.set_rank, &a.character).cmp(&(b.set_rank, &b.character)));
    list
}

/// Substats deduplicated by (substat, rank), sorted by (rank, substat), each
/// carrying its distinct (character, role) pairs in sorted order.
fn substats(facts: &[&Fact]) -> Vec<SubstatRecommendation> {
    group_substats(facts.iter().map(|f| (f.substat.as_str(), f.substat_rank, f.character.as_str(), f.role.as_str())))
}

fn best_rank_substats(facts: &[&Fact]) -> Vec<SubstatRecommendation> {
    let mut best: BTreeMap<(&str, &str, &str), u32> = BTreeMap::new();
    for fact in facts {
        best.entry((fact.character.as_str(), fact.role.as_str(), fact.substat.as_str()))
            .and_modify(|rank| *rank = (*rank).min(fact.substat_rank))
            .or_insert(fact.substat_rank);
    }
    group_substats(best.into_iter().map(|((character, role, substat), rank)| (substat, rank, character, role)))
}

fn group_substats<'a>(
    entries: impl IntoIterator<Item = (&'a str, u32, &'a str, &'a str)>,
) -> Vec<SubstatRecommendation> {
    let mut grouped: BTreeMap<(u32, &str), BTreeSet<(&str, &str)>> = BTreeMap::new();
    for (substat, rank, character, role) in entries {
        grouped.entry((rank, substat)).or_default().insert((character, role));
    }

    grouped
        .into_iter()
        .map(|((rank, substat), pairs)| SubstatRecommendation {
            substat: substat.to_string(),
            rank,
            character_roles: pairs
                .into_iter()
                .map(|(character, role)| CharacterRole { character: character.to_string(), role: role.to_string() })
                .collect(),
        })
        .collect()
}
