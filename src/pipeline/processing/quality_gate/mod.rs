//! Heuristic data-quality checks over the finished fact table.
//!
//! Nothing here rejects facts. Findings are collected into a
//! [`QualityAssessment`] and surfaced in the diagnostics report.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use crate::constants::{LONG_VALUE_CHARS, LOW_FREQUENCY_THRESHOLD};
use crate::pipeline::processing::normalize::is_category_label;
use crate::types::{Fact, FactColumn};

/// Kinds of leftover text the canonicalizers should have removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QualityIssueType {
    /// A continuation marker survived normalization
    ResidualMarker,
    Brackets,
    Asterisk,
    /// A percentage outside a known set-category label
    Percentage,
    ExcessiveLength,
}

impl QualityIssueType {
    pub fn description(self) -> String {
        match self {
            QualityIssueType::ResidualMarker => "contains ~ or ≈".to_string(),
            QualityIssueType::Brackets => "contains brackets []".to_string(),
            QualityIssueType::Asterisk => "contains asterisk".to_string(),
            QualityIssueType::Percentage => "contains percentage (may need expansion)".to_string(),
            QualityIssueType::ExcessiveLength => format!("very long string (>{} chars)", LONG_VALUE_CHARS),
        }
    }
}

/// Checked in order; a value reports its first match only.
static SUSPICIOUS_PATTERNS: Lazy<Vec<(Regex, QualityIssueType)>> = Lazy::new(|| {
    [
        (r"[~≈]", QualityIssueType::ResidualMarker),
        (r"[\[\]]", QualityIssueType::Brackets),
        (r"\*", QualityIssueType::Asterisk),
        (r"\d+%", QualityIssueType::Percentage),
    ]
    .into_iter()
    .map(|(pattern, kind)| (Regex::new(pattern).expect("valid suspicious-string pattern"), kind))
    .chain(std::iter::once((
        Regex::new(&format!(".{{{},}}", LONG_VALUE_CHARS)).expect("valid length pattern"),
        QualityIssueType::ExcessiveLength,
    )))
    .collect()
});

/// Columns scanned for suspicious strings, in report order.
pub const SUSPICIOUS_COLUMNS: [FactColumn; 5] = [
    FactColumn::ArtifactSet,
    FactColumn::MainStat,
    FactColumn::Substat,
    FactColumn::Character,
    FactColumn::Role,
];

/// Columns scanned for rare values.
pub const LOW_FREQUENCY_COLUMNS: [FactColumn; 3] = [FactColumn::ArtifactSet, FactColumn::MainStat, FactColumn::Substat];

/// Columns tabulated value-by-value, with their section headings.
pub const UNIQUE_VALUE_COLUMNS: [(FactColumn, &str); 5] = [
    (FactColumn::Character, "UNIQUE CHARACTERS"),
    (FactColumn::ArtifactSet, "UNIQUE ARTIFACT SETS"),
    (FactColumn::ArtifactSlot, "UNIQUE ARTIFACT SLOTS"),
    (FactColumn::MainStat, "UNIQUE MAIN STATS"),
    (FactColumn::Substat, "UNIQUE SUBSTATS"),
];

/// Plural heading used when listing findings for a column.
pub fn column_label(column: FactColumn) -> &'static str {
    match column {
        FactColumn::Character => "Characters",
        FactColumn::Role => "Roles",
        FactColumn::PreferredRole => "Preferred Roles",
        FactColumn::ArtifactSet => "Artifact Sets",
        FactColumn::ArtifactSetRank => "Artifact Set Ranks",
        FactColumn::ArtifactSlot => "Artifact Slots",
        FactColumn::MainStat => "Main Stats",
        FactColumn::Substat => "Substats",
        FactColumn::SubstatRank => "Substat Ranks",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityIssue {
    pub column: FactColumn,
    pub value: String,
    pub issue_type: QualityIssueType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LowFrequencyValue {
    pub column: FactColumn,
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSummary {
    pub column: FactColumn,
    pub non_empty: usize,
    pub distinct: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UniqueValues {
    pub heading: &'static str,
    /// (value, occurrences), sorted by value
    pub values: Vec<(String, usize)>,
}

/// Everything the quality gate found, grouped per check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QualityAssessment {
    /// Threshold the low-frequency listing was computed with
    pub low_frequency_threshold: usize,
    pub suspicious: Vec<QualityIssue>,
    pub low_frequency: Vec<LowFrequencyValue>,
    pub column_summaries: Vec<ColumnSummary>,
    pub unique_values: Vec<UniqueValues>,
}

impl QualityAssessment {
    pub fn suspicious_in(&self, column: FactColumn) -> impl Iterator<Item = &QualityIssue> {
        self.suspicious.iter().filter(move |issue| issue.column == column)
    }

    pub fn low_frequency_in(&self, column: FactColumn) -> impl Iterator<Item = &LowFrequencyValue> {
        self.low_frequency.iter().filter(move |entry| entry.column == column)
    }
}

/// Assess a finished fact table.
pub trait QualityGate {
    fn assess(&self, facts: &[Fact]) -> QualityAssessment;
}

/// Quality gate with the stock patterns and thresholds.
pub struct DefaultQualityGate {
    pub config: QualityGateConfig,
}

#[derive(Debug, Clone)]
pub struct QualityGateConfig {
    /// Values occurring at most this often are listed as possible typos
    pub low_frequency_threshold: usize,
    /// Artifact-set values exempt from the percentage check, on top of
    /// the canonical set-category labels
    pub extra_allowed_percentages: HashSet<String>,
}

impl Default for QualityGateConfig {
    fn default() -> Self {
        Self {
            low_frequency_threshold: LOW_FREQUENCY_THRESHOLD,
            extra_allowed_percentages: HashSet::new(),
        }
    }
}

impl DefaultQualityGate {
    pub fn new() -> Self {
        Self { config: QualityGateConfig::default() }
    }

    pub fn with_config(config: QualityGateConfig) -> Self {
        Self { config }
    }

    /// Distinct values of `column` in first-seen order, each with its first
    /// matching issue.
    fn suspicious_values(&self, facts: &[Fact], column: FactColumn) -> Vec<QualityIssue> {
        let percentage_allowed =
            |value: &str| is_category_label(value) || self.config.extra_allowed_percentages.contains(value);
        let mut seen = HashSet::new();
        let mut issues = Vec::new();

        for value in facts.iter().map(|fact| column.value(fact)) {
            if !seen.insert(value.clone()) {
                continue;
            }
            let issue_type = SUSPICIOUS_PATTERNS.iter().find_map(|(pattern, kind)| {
                if !pattern.is_match(&value) {
                    return None;
                }
                if *kind == QualityIssueType::Percentage && column == FactColumn::ArtifactSet && percentage_allowed(&value) {
                    return None;
                }
                Some(*kind)
            });
            if let Some(issue_type) = issue_type {
                issues.push(QualityIssue { column, value, issue_type });
            }
        }
        issues
    }

    /// Values at or under the threshold, ordered by count then value.
    fn low_frequency_values(&self, facts: &[Fact], column: FactColumn) -> Vec<LowFrequencyValue> {
        let mut rare: Vec<LowFrequencyValue> = value_counts(facts, column)
            .into_iter()
            .filter(|(_, count)| *count <= self.config.low_frequency_threshold)
            .map(|(value, count)| LowFrequencyValue { column, value, count })
            .collect();
        rare.sort_by(|a, b| (a.count, &a.value).cmp(&(b.count, &b.value)));
        rare
    }
}

impl Default for DefaultQualityGate {
    fn default() -> Self {
        Self::new()
    }
}

impl QualityGate for DefaultQualityGate {
    fn assess(&self, facts: &[Fact]) -> QualityAssessment {
        let suspicious = SUSPICIOUS_COLUMNS
            .iter()
            .flat_map(|&column| self.suspicious_values(facts, column))
            .collect();

        let low_frequency = LOW_FREQUENCY_COLUMNS
            .iter()
            .flat_map(|&column| self.low_frequency_values(facts, column))
            .collect();

        let column_summaries = FactColumn::ALL
            .iter()
            .map(|&column| {
                let counts = value_counts(facts, column);
                ColumnSummary {
                    column,
                    non_empty: counts.iter().filter(|(v, _)| !v.is_empty()).map(|(_, n)| n).sum(),
                    distinct: counts.len(),
                }
            })
            .collect();

        let unique_values = UNIQUE_VALUE_COLUMNS
            .iter()
            .map(|&(column, heading)| UniqueValues {
                heading,
                values: value_counts(facts, column).into_iter().collect(),
            })
            .collect();

        QualityAssessment {
            low_frequency_threshold: self.config.low_frequency_threshold,
            suspicious,
            low_frequency,
            column_summaries,
            unique_values,
        }
    }
}

fn value_counts(facts: &[Fact], column: FactColumn) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for fact in facts {
        *counts.entry(column.value(fact)).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(character: &str, set: &str, main: &str, sub: &str) -> Fact {
        Fact {
            character: character.to_string(),
            role: "DPS".to_string(),
            preferred: false,
            artifact_set: set.to_string(),
            artifact_set_rank: 1,
            artifact_slot: "Sands".to_string(),
            main_stat: main.to_string(),
            substat: sub.to_string(),
            substat_rank: 1,
        }
    }

    #[test]
    fn test_allow_listed_category_is_not_suspicious() {
        let facts = vec![fact("Amber", "18% ATK set", "ATK%", "Crit Rate")];
        let assessment = DefaultQualityGate::new().assess(&facts);
        assert_eq!(assessment.suspicious_in(FactColumn::ArtifactSet).count(), 0);
    }

    #[test]
    fn test_category_label_percentage_is_allowed_only_for_sets() {
        let facts = vec![fact("Amber", "Noblesse Oblige", "20% HP set", "Crit Rate")];
        let assessment = DefaultQualityGate::new().assess(&facts);
        let issues: Vec<_> = assessment.suspicious_in(FactColumn::MainStat).collect();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].issue_type, QualityIssueType::Percentage);
    }

    #[test]
    fn test_threshold_is_recorded() {
        let config = QualityGateConfig { low_frequency_threshold: 5, ..QualityGateConfig::default() };
        let assessment = DefaultQualityGate::with_config(config).assess(&[]);
        assert_eq!(assessment.low_frequency_threshold, 5);
    }

    #[test]
    fn test_unlisted_percentage_is_flagged() {
        let facts = vec![fact("Amber", "15% Pyro DMG set", "ATK%", "Crit Rate")];
        let assessment = DefaultQualityGate::new().assess(&facts);
        let issues: Vec<_> = assessment.suspicious_in(FactColumn::ArtifactSet).collect();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].issue_type, QualityIssueType::Percentage);
        assert_eq!(issues[0].issue_type.description(), "contains percentage (may need expansion)");
    }

    #[test]
    fn test_first_matching_reason_only() {
        let facts = vec![fact("Amber", "Noblesse Oblige", "ATK% [see notes] *", "Crit Rate")];
        let assessment = DefaultQualityGate::new().assess(&facts);
        let issues: Vec<_> = assessment.suspicious_in(FactColumn::MainStat).collect();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].issue_type, QualityIssueType::Brackets);
    }

    #[test]
    fn test_long_allow_listed_value_still_reports_length() {
        let label = "20% Energy Recharge set";
        let mut config = QualityGateConfig::default();
        let long_label = format!("{} {}", label, "x".repeat(40));
        config.extra_allowed_percentages.insert(long_label.clone());
        let facts = vec![fact("Amber", &long_label, "ATK%", "Crit Rate")];
        let assessment = DefaultQualityGate::with_config(config).assess(&facts);
        let issues: Vec<_> = assessment.suspicious_in(FactColumn::ArtifactSet).collect();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].issue_type, QualityIssueType::ExcessiveLength);
    }

    #[test]
    fn test_suspicious_values_are_distinct_in_first_seen_order() {
        let facts = vec![
            fact("Zed*", "Noblesse Oblige", "ATK%", "Crit Rate"),
            fact("Amber~", "Noblesse Oblige", "ATK%", "Crit Rate"),
            fact("Zed*", "Noblesse Oblige", "ATK%", "Crit Rate"),
        ];
        let assessment = DefaultQualityGate::new().assess(&facts);
        let values: Vec<_> = assessment.suspicious_in(FactColumn::Character).map(|i| i.value.as_str()).collect();
        assert_eq!(values, vec!["Zed*", "Amber~"]);
    }

    #[test]
    fn test_low_frequency_ordering() {
        let mut facts = Vec::new();
        for _ in 0..3 {
            facts.push(fact("Amber", "Noblesse Oblige", "ATK%", "Crit Rate"));
        }
        facts.push(fact("Amber", "Pale Flame", "ATK%", "Crit DMG"));
        facts.push(fact("Amber", "Gilded Dreams", "ATK%", "Crit DMG"));
        facts.push(fact("Amber", "Gilded Dreams", "ATK%", "Crit DMG"));

        let assessment = DefaultQualityGate::new().assess(&facts);
        let sets: Vec<_> = assessment
            .low_frequency_in(FactColumn::ArtifactSet)
            .map(|v| (v.value.as_str(), v.count))
            .collect();
        assert_eq!(sets, vec![("Pale Flame", 1), ("Gilded Dreams", 2)]);
        // Crit DMG occurs 3 times
        assert_eq!(assessment.low_frequency_in(FactColumn::Substat).count(), 0);
        assert_eq!(assessment.low_frequency_in(FactColumn::MainStat).count(), 0);
    }

    #[test]
    fn test_column_summary_and_unique_values() {
        let mut empty_role = fact("Bennett", "Noblesse Oblige", "HP%", "Crit Rate");
        empty_role.role = String::new();
        let facts = vec![fact("Amber", "Noblesse Oblige", "ATK%", "Crit Rate"), empty_role];

        let assessment = DefaultQualityGate::new().assess(&facts);
        let role = assessment
            .column_summaries
            .iter()
            .find(|s| s.column == FactColumn::Role)
            .unwrap();
        assert_eq!((role.non_empty, role.distinct), (1, 2));

        let characters = &assessment.unique_values[0];
        assert_eq!(characters.heading, "UNIQUE CHARACTERS");
        assert_eq!(characters.values, vec![("Amber".to_string(), 1), ("Bennett".to_string(), 1)]);
    }
}
