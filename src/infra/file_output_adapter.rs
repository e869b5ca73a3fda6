use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::app::ports::OutputPort;
use crate::constants::{EVALUATOR_PAGE_FILE, FACT_TABLE_FILE, INDEX_BUNDLE_FILE, REPORT_FILE};
use crate::error::Result;
use crate::render::RenderedArtifacts;

/// Writes every rendered artifact into one directory, replacing earlier runs.
pub struct FileOutputAdapter {
    dir: PathBuf,
}

impl FileOutputAdapter {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    fn write(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.dir.join(name);
        fs::write(&path, content)?;
        info!("Wrote {} ({} bytes)", path.display(), content.len());
        Ok(path)
    }
}

impl OutputPort for FileOutputAdapter {
    fn write_artifacts(&self, artifacts: &RenderedArtifacts) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.dir)?;

        let mut written = vec![
            self.write(FACT_TABLE_FILE, &artifacts.fact_table)?,
            self.write(INDEX_BUNDLE_FILE, &artifacts.index_json)?,
        ];
        if let Some(page) = &artifacts.evaluator_page {
            written.push(self.write(EVALUATOR_PAGE_FILE, page)?);
        }
        written.push(self.write(REPORT_FILE, &artifacts.report)?);
        Ok(written)
    }
}
