use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::app::ports::TableSourcePort;
use crate::config::{SourceCategory, SourceConfig};
use crate::error::{PipelineError, Result};
use crate::types::{CategoryTable, Cell};

/// Body of a `values:batchGet` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchGetResponse {
    #[serde(default)]
    pub spreadsheet_id: String,
    #[serde(default)]
    pub value_ranges: Vec<ValueRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default)]
    pub range: String,
    /// Absent when the range holds no data.
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

/// Pair each requested category with its value range, in request order.
pub fn tables_from_response(categories: &[SourceCategory], response: BatchGetResponse) -> Result<Vec<CategoryTable>> {
    if response.value_ranges.len() != categories.len() {
        return Err(PipelineError::malformed(format!(
            "expected {} value ranges, got {}",
            categories.len(),
            response.value_ranges.len()
        )));
    }

    Ok(categories
        .iter()
        .zip(response.value_ranges)
        .map(|(category, range)| CategoryTable {
            category: category.label.clone(),
            rows: range.values.into_iter().map(|row| row.into_iter().map(cell).collect()).collect(),
        })
        .collect())
}

fn cell(value: serde_json::Value) -> Cell {
    match value {
        serde_json::Value::String(text) => Some(text),
        _ => None,
    }
}

/// Blocking client for the spreadsheet values API. One request per run,
/// no retry.
pub struct SheetsClient {
    http: reqwest::blocking::Client,
    api_base: String,
    spreadsheet_id: String,
    api_key: String,
}

impl SheetsClient {
    pub fn new(source: &SourceConfig, api_key: String) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(source.timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            api_base: source.api_base.trim_end_matches('/').to_string(),
            spreadsheet_id: source.spreadsheet_id.clone(),
            api_key,
        })
    }

    fn batch_url(&self) -> String {
        format!("{}/{}/values:batchGet", self.api_base, self.spreadsheet_id)
    }

    /// Fetch every category range in a single call.
    #[instrument(skip(self, categories), fields(ranges = categories.len()))]
    pub fn fetch_batch(&self, categories: &[SourceCategory]) -> Result<BatchGetResponse> {
        let mut query: Vec<(&str, &str)> = categories.iter().map(|c| ("ranges", c.range.as_str())).collect();
        query.push(("key", self.api_key.as_str()));

        debug!("GET {}", self.batch_url());
        // The request URL carries the key; strip it from any error.
        let response = self
            .http
            .get(self.batch_url())
            .query(&query)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| PipelineError::Http(e.without_url()))?;

        let body: BatchGetResponse = response.json().map_err(|e| PipelineError::Http(e.without_url()))?;
        info!("✅ Received {} value ranges", body.value_ranges.len());
        Ok(body)
    }
}

impl TableSourcePort for SheetsClient {
    fn fetch_tables(&self, categories: &[SourceCategory]) -> Result<Vec<CategoryTable>> {
        let response = self.fetch_batch(categories)?;
        tables_from_response(categories, response)
    }
}
