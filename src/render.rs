//! Text forms of the pipeline output: fact table, index bundle, evaluator
//! page and diagnostics report.

use tracing::warn;

use crate::constants::{FACT_TABLE_DELIMITER, TEMPLATE_PLACEHOLDER};
use crate::error::Result;
use crate::idempotency::content_digest;
use crate::pipeline::PipelineOutput;
use crate::report::render_report;
use crate::types::{Fact, FactColumn};

/// Everything the output port writes, already serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifacts {
    pub fact_table: String,
    pub index_json: String,
    /// `None` when no template was available
    pub evaluator_page: Option<String>,
    pub report: String,
}

pub fn render_artifacts(output: &PipelineOutput, template: Option<&str>) -> Result<RenderedArtifacts> {
    let fact_table = fact_table_text(&output.facts);
    let index_json = output.index.to_compact_json()?;
    let evaluator_page = template.map(|t| evaluator_page(t, &index_json));
    let report = render_report(output, &content_digest(fact_table.as_bytes()));

    Ok(RenderedArtifacts { fact_table, index_json, evaluator_page, report })
}

/// Pipe-delimited fact table with a header row, one LF-terminated line per fact.
pub fn fact_table_text(facts: &[Fact]) -> String {
    let mut out = String::new();
    push_record(&mut out, FactColumn::ALL.iter().map(|c| c.header().to_string()));
    for fact in facts {
        push_record(&mut out, FactColumn::ALL.iter().map(|c| c.value(fact)));
    }
    out
}

fn push_record(out: &mut String, fields: impl Iterator<Item = String>) {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            out.push(FACT_TABLE_DELIMITER);
        }
        out.push_str(&escape_field(&field));
    }
    out.push('\n');
}

/// Quote a field that contains the delimiter, a quote or a line break.
pub fn escape_field(field: &str) -> String {
    let needs_quoting = field.contains(|c: char| c == FACT_TABLE_DELIMITER || c == '"' || c == '\r' || c == '\n');
    if needs_quoting {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Substitute the index bundle into the page template.
pub fn evaluator_page(template: &str, index_json: &str) -> String {
    if !template.contains(TEMPLATE_PLACEHOLDER) {
        warn!("Template has no {} token; page will carry no data", TEMPLATE_PLACEHOLDER);
    }
    // Keep the payload from terminating the surrounding <script> element.
    let payload = index_json.replace("</", "<\\/");
    template.replace(TEMPLATE_PLACEHOLDER, &payload)
}
