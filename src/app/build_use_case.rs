use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::app::ports::{OutputPort, TableSourcePort};
use crate::config::SourceCategory;
use crate::idempotency::{content_digest, run_key};
use crate::pipeline::Pipeline;
use crate::render::render_artifacts;
use crate::types::ValidationCounts;

/// What a completed build produced.
#[derive(Debug, Clone)]
pub struct BuildSummary {
    pub counts: ValidationCounts,
    pub suspicious_values: usize,
    pub written: Vec<PathBuf>,
    pub fact_table_digest: String,
    pub run_key: String,
}

/// Fetch, transform, render, write. Nothing is written unless the fetch and
/// the whole pipeline succeed.
pub struct BuildUseCase {
    source: Box<dyn TableSourcePort>,
    output: Box<dyn OutputPort>,
    pipeline: Pipeline,
    spreadsheet_id: String,
    categories: Vec<SourceCategory>,
    template: Option<String>,
}

impl BuildUseCase {
    pub fn new(
        source: Box<dyn TableSourcePort>,
        output: Box<dyn OutputPort>,
        pipeline: Pipeline,
        spreadsheet_id: impl Into<String>,
        categories: Vec<SourceCategory>,
    ) -> Self {
        Self {
            source,
            output,
            pipeline,
            spreadsheet_id: spreadsheet_id.into(),
            categories,
            template: None,
        }
    }

    /// Evaluator page template; without one the page is not written.
    pub fn with_template(mut self, template: Option<String>) -> Self {
        self.template = template;
        self
    }

    pub fn run(&self) -> Result<BuildSummary> {
        info!("📡 Fetching {} category tables", self.categories.len());
        let tables = self
            .source
            .fetch_tables(&self.categories)
            .context("Failed to fetch category tables")?;

        let output = self.pipeline.run(&tables);
        if output.facts.is_empty() {
            warn!("Pipeline produced no facts; outputs will be empty");
        }

        let artifacts = render_artifacts(&output, self.template.as_deref())
            .context("Failed to render outputs")?;
        let fact_table_digest = content_digest(artifacts.fact_table.as_bytes());
        let run_key = run_key(&self.spreadsheet_id, &self.categories, &fact_table_digest);

        let written = self
            .output
            .write_artifacts(&artifacts)
            .context("Failed to write outputs")?;
        info!("💾 Wrote {} files (run key {})", written.len(), &run_key[..12]);

        Ok(BuildSummary {
            suspicious_values: output.quality.suspicious.len(),
            counts: output.counts,
            written,
            fact_table_digest,
            run_key,
        })
    }
}
