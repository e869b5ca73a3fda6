pub mod ingestion;
pub mod processing;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::config::{ColumnLayout, Config};
use crate::pipeline::ingestion::{ingest_tables, IngestSettings};
use crate::pipeline::processing::index::{build_index, ArtifactIndex};
use crate::pipeline::processing::quality_gate::{DefaultQualityGate, QualityAssessment, QualityGate};
use crate::pipeline::processing::{expand_facts, filter_noise, normalize_block, segment_blocks};
use crate::types::{CategoryTable, CharacterBlock, Fact, ValidationCounts};

/// Knobs the pipeline needs from the configuration.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub header_rows: usize,
    pub placeholder: String,
    pub columns: ColumnLayout,
}

impl From<&Config> for PipelineSettings {
    fn from(config: &Config) -> Self {
        Self {
            header_rows: config.source.header_rows,
            placeholder: config.source.placeholder.clone(),
            columns: config.columns,
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Result of a complete pipeline run
#[derive(Debug, Serialize)]
pub struct PipelineOutput {
    pub facts: Vec<Fact>,
    pub index: ArtifactIndex,
    pub counts: ValidationCounts,
    pub quality: QualityAssessment,
}

/// Pure transformation from fetched category tables to facts and views.
/// Performs no I/O.
pub struct Pipeline {
    settings: PipelineSettings,
    quality_gate: Box<dyn QualityGate + Send + Sync>,
}

impl Pipeline {
    pub fn new(settings: PipelineSettings) -> Self {
        Self { settings, quality_gate: Box::new(DefaultQualityGate::new()) }
    }

    pub fn with_quality_gate(mut self, gate: Box<dyn QualityGate + Send + Sync>) -> Self {
        self.quality_gate = gate;
        self
    }

    #[instrument(skip(self, tables), fields(tables = tables.len()))]
    pub fn run(&self, tables: &[CategoryTable]) -> PipelineOutput {
        let mut counts = ValidationCounts::default();
        let columns = self.settings.columns;

        let ingest = IngestSettings {
            header_rows: self.settings.header_rows,
            placeholder: self.settings.placeholder.clone(),
            name_column: columns.name,
        };
        let rows = ingest_tables(tables, &ingest, &mut counts);
        info!("📥 Ingested {} rows ({} fetched)", rows.len(), counts.rows_fetched);

        let rows = filter_noise(rows, columns.name, &mut counts);
        debug!("Dropped {} marker rows", counts.rows_filtered_keywords);

        let blocks: Vec<CharacterBlock> = segment_blocks(&rows, &columns, &mut counts)
            .iter()
            .map(normalize_block)
            .collect();
        info!("🧩 Segmented {} character blocks", blocks.len());

        let facts = expand_facts(&blocks, &mut counts);
        counts.final_output_rows = facts.len();
        info!("✅ Expanded {} facts", facts.len());

        let index = build_index(&facts);
        debug!(
            sets = index.by_set.len(),
            artifacts = index.by_artifact.len(),
            main_stats = index.by_main_stat.len(),
            "Built lookup views"
        );

        let quality = self.quality_gate.assess(&facts);
        if !quality.suspicious.is_empty() {
            info!("🔍 Quality gate flagged {} suspicious values", quality.suspicious.len());
        }

        PipelineOutput { facts, index, counts, quality }
    }
}
