use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::app::ports::TableSourcePort;
use crate::config::SourceCategory;
use crate::error::Result;
use crate::infra::sheets_client::{tables_from_response, BatchGetResponse};
use crate::types::CategoryTable;

/// Reads a batch response previously saved by `fetch`.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

impl TableSourcePort for JsonFileSource {
    fn fetch_tables(&self, categories: &[SourceCategory]) -> Result<Vec<CategoryTable>> {
        let content = fs::read_to_string(&self.path)?;
        let response: BatchGetResponse = serde_json::from_str(&content)?;
        info!("📂 Loaded {} value ranges from {}", response.value_ranges.len(), self.path.display());
        tables_from_response(categories, response)
    }
}
