use serde::{Deserialize, Serialize};

/// One spreadsheet cell. Absent and non-text cells are both `None`.
pub type Cell = Option<String>;

/// One category table as returned by the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTable {
    pub category: String,
    pub rows: Vec<Vec<Cell>>,
}

/// A positionally addressed source row tagged with its category.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub category: String,
    pub cells: Vec<Cell>,
}

impl RawRow {
    pub fn new(category: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self { category: category.into(), cells }
    }

    /// Text of the cell at `index`; cells past the end of a ragged row are absent.
    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells.get(index).and_then(|c| c.as_deref())
    }
}

/// A row attributed to a character by carry-forward, fields still verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct RawBlock {
    pub character: String,
    pub role: Cell,
    pub artifact_sets: Cell,
    pub main_stats: Cell,
    pub substats: Cell,
}

impl RawBlock {
    /// True when none of the four content cells carries text.
    pub fn is_empty(&self) -> bool {
        [&self.role, &self.artifact_sets, &self.main_stats, &self.substats]
            .iter()
            .all(|cell| cell.as_deref().map_or(true, |s| s.trim().is_empty()))
    }
}

/// A build recommendation with its multi-line fields split into entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterBlock {
    pub character: String,
    pub role: String,
    pub preferred: bool,
    pub artifact_set_lines: Vec<String>,
    pub main_stat_lines: Vec<String>,
    pub substat_lines: Vec<String>,
}

/// A ranked list entry such as `2. Crit Rate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub rank: u32,
    pub text: String,
}

/// One fully resolved recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Fact {
    pub character: String,
    pub role: String,
    pub preferred: bool,
    pub artifact_set: String,
    pub artifact_set_rank: u32,
    pub artifact_slot: String,
    pub main_stat: String,
    pub substat: String,
    pub substat_rank: u32,
}

/// Columns of the fact table, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FactColumn {
    Character,
    Role,
    PreferredRole,
    ArtifactSet,
    ArtifactSetRank,
    ArtifactSlot,
    MainStat,
    Substat,
    SubstatRank,
}

impl FactColumn {
    pub const ALL: [FactColumn; 9] = [
        FactColumn::Character,
        FactColumn::Role,
        FactColumn::PreferredRole,
        FactColumn::ArtifactSet,
        FactColumn::ArtifactSetRank,
        FactColumn::ArtifactSlot,
        FactColumn::MainStat,
        FactColumn::Substat,
        FactColumn::SubstatRank,
    ];

    pub fn header(self) -> &'static str {
        match self {
            FactColumn::Character => "Character",
            FactColumn::Role => "Role",
            FactColumn::PreferredRole => "Preferred Role",
            FactColumn::ArtifactSet => "Artifact Set",
            FactColumn::ArtifactSetRank => "Artifact Set Rank",
            FactColumn::ArtifactSlot => "Artifact Slot",
            FactColumn::MainStat => "Main Stat",
            FactColumn::Substat => "Substat",
            FactColumn::SubstatRank => "Substat Rank",
        }
    }

    /// Text form of this column for `fact`, as written to the fact table.
    pub fn value(self, fact: &Fact) -> String {
        match self {
            FactColumn::Character => fact.character.clone(),
            FactColumn::Role => fact.role.clone(),
            FactColumn::PreferredRole => if fact.preferred { "True" } else { "False" }.to_string(),
            FactColumn::ArtifactSet => fact.artifact_set.clone(),
            FactColumn::ArtifactSetRank => fact.artifact_set_rank.to_string(),
            FactColumn::ArtifactSlot => fact.artifact_slot.clone(),
            FactColumn::MainStat => fact.main_stat.clone(),
            FactColumn::Substat => fact.substat.clone(),
            FactColumn::SubstatRank => fact.substat_rank.to_string(),
        }
    }
}

/// Row counts and skip counters collected across every stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationCounts {
    pub rows_fetched: usize,
    pub rows_after_header_trim: usize,
    pub rows_filtered_keywords: usize,
    pub rows_after_keyword_filter: usize,
    pub rows_missing_data: usize,
    pub rows_with_meaningful_data: usize,
    pub artifact_lines_no_rank: usize,
    pub main_stat_lines_no_slot: usize,
    pub substat_lines_no_rank: usize,
    pub skipped_duplicate_main_substat: usize,
    pub final_output_rows: usize,
}

impl ValidationCounts {
    /// Labelled rows in report order.
    pub fn rows(&self) -> [(&'static str, usize); 11] {
        [
            ("Rows fetched from API:", self.rows_fetched),
            ("Rows after header trim:", self.rows_after_header_trim),
            ("Rows filtered (keywords):", self.rows_filtered_keywords),
            ("Rows after keyword filter:", self.rows_after_keyword_filter),
            ("Rows missing data:", self.rows_missing_data),
            ("Rows with meaningful data:", self.rows_with_meaningful_data),
            ("Artifact lines without rank:", self.artifact_lines_no_rank),
            ("Main stat lines without slot:", self.main_stat_lines_no_slot),
            ("Substat lines without rank:", self.substat_lines_no_rank),
            ("Skipped (main=substat):", self.skipped_duplicate_main_substat),
            ("Final output rows:", self.final_output_rows),
        ]
    }
}
