use std::fmt::Write;

use crate::pipeline::processing::quality_gate::{
    column_label, QualityAssessment, UniqueValues, LOW_FREQUENCY_COLUMNS, SUSPICIOUS_COLUMNS,
};
use crate::pipeline::PipelineOutput;
use crate::types::ValidationCounts;

const RULE_WIDTH: usize = 60;
const COUNT_LABEL_WIDTH: usize = 32;
const NONE_FOUND: &str = "None found.\n";

/// Human-readable diagnostics for one run.
pub fn render_report(output: &PipelineOutput, fact_table_digest: &str) -> String {
    let mut out = String::new();
    validation_section(&mut out, &output.counts);
    digest_section(&mut out, fact_table_digest);
    suspicious_section(&mut out, &output.quality);
    low_frequency_section(&mut out, &output.quality);
    column_summary_section(&mut out, &output.quality);
    unique_values_section(&mut out, &output.quality);
    out
}

fn heading(out: &mut String, title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    let _ = writeln!(out, "{rule}\n{title}\n{rule}");
}

fn validation_section(out: &mut String, counts: &ValidationCounts) {
    heading(out, "VALIDATION COUNTS");
    for (label, value) in counts.rows() {
        let _ = writeln!(out, "{:<width$}{}", label, value, width = COUNT_LABEL_WIDTH);
    }
    out.push('\n');
}

fn digest_section(out: &mut String, digest: &str) {
    heading(out, "FACT TABLE DIGEST");
    let _ = writeln!(out, "sha256: {digest}");
    out.push('\n');
}

fn suspicious_section(out: &mut String, quality: &QualityAssessment) {
    heading(out, "SUSPICIOUS STRINGS (may need cleanup)");
    if quality.suspicious.is_empty() {
        out.push_str(NONE_FOUND);
    }
    for column in SUSPICIOUS_COLUMNS {
        let mut issues = quality.suspicious_in(column).peekable();
        if issues.peek().is_none() {
            continue;
        }
        let _ = writeln!(out, "\n{}:", column_label(column));
        for issue in issues {
            let _ = writeln!(out, "  - \"{}\" ({})", issue.value, issue.issue_type.description());
        }
    }
    out.push('\n');
}

fn low_frequency_section(out: &mut String, quality: &QualityAssessment) {
    heading(out, &format!("LOW FREQUENCY VALUES (count <= {}, may be typos)", quality.low_frequency_threshold));
    if quality.low_frequency.is_empty() {
        out.push_str(NONE_FOUND);
    }
    for column in LOW_FREQUENCY_COLUMNS {
        let mut values = quality.low_frequency_in(column).peekable();
        if values.peek().is_none() {
            continue;
        }
        let _ = writeln!(out, "\n{}:", column_label(column));
        for entry in values {
            let _ = writeln!(out, "  - \"{}\" (count: {})", entry.value, entry.count);
        }
    }
    out.push('\n');
}

fn column_summary_section(out: &mut String, quality: &QualityAssessment) {
    heading(out, "COLUMN SUMMARY");
    let width = quality
        .column_summaries
        .iter()
        .map(|s| s.column.header().chars().count())
        .chain(std::iter::once("Column".len()))
        .max()
        .unwrap_or(0);
    let _ = writeln!(out, "{:<width$}  {:>9}  {:>8}", "Column", "Non-Empty", "Distinct");
    for summary in &quality.column_summaries {
        let _ = writeln!(
            out,
            "{:<width$}  {:>9}  {:>8}",
            summary.column.header(),
            summary.non_empty,
            summary.distinct
        );
    }
    out.push_str("\n\n");
}

fn unique_values_section(out: &mut String, quality: &QualityAssessment) {
    heading(out, "UNIQUE VALUE COUNTS");
    out.push('\n');
    let last = quality.unique_values.len().saturating_sub(1);
    for (i, table) in quality.unique_values.iter().enumerate() {
        let _ = writeln!(out, "{}", table.heading);
        out.push_str(&name_count_table(table));
        out.push_str(if i == last { "\n" } else { "\n\n" });
    }
}

/// Right-aligned two-column table without a trailing newline.
fn name_count_table(table: &UniqueValues) -> String {
    if table.values.is_empty() {
        return NONE_FOUND.trim_end().to_string();
    }
    let name_width = table
        .values
        .iter()
        .map(|(name, _)| name.chars().count())
        .chain(std::iter::once("Name".len()))
        .max()
        .unwrap_or(0);
    let count_width = table
        .values
        .iter()
        .map(|(_, count)| count.to_string().len())
        .chain(std::iter::once("Count".len()))
        .max()
        .unwrap_or(0);

    let mut lines = vec![format!("{:>name_width$}  {:>count_width$}", "Name", "Count")];
    lines.extend(
        table
            .values
            .iter()
            .map(|(name, count)| format!("{:>name_width$}  {:>count_width$}", name, count)),
    );
    lines.join("\n")
}
