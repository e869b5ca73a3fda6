use std::path::PathBuf;

use crate::config::SourceCategory;
use crate::error::Result;
use crate::render::RenderedArtifacts;
use crate::types::CategoryTable;

/// Supplies the raw category tables, one per requested category, in order.
pub trait TableSourcePort: Send + Sync {
    fn fetch_tables(&self, categories: &[SourceCategory]) -> Result<Vec<CategoryTable>>;
}

/// Persists the rendered outputs and reports the paths written.
pub trait OutputPort: Send + Sync {
    fn write_artifacts(&self, artifacts: &RenderedArtifacts) -> Result<Vec<PathBuf>>;
}
