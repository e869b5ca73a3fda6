use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::constants;
use crate::error::{PipelineError, Result};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub columns: ColumnLayout,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub spreadsheet_id: String,
    pub api_base: String,
    pub timeout_seconds: u64,
    pub header_rows: usize,
    pub placeholder: String,
    pub categories: Vec<SourceCategory>,
}

/// One element table of the spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceCategory {
    pub label: String,
    pub range: String,
}

/// Fixed positional columns of every category table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    pub name: usize,
    pub role: usize,
    pub artifact_sets: usize,
    pub main_stats: usize,
    pub substats: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub template: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: constants::DEFAULT_SPREADSHEET_ID.to_string(),
            api_base: constants::SHEETS_API_BASE.to_string(),
            timeout_seconds: 30,
            header_rows: constants::DEFAULT_HEADER_ROWS,
            placeholder: constants::DEFAULT_PLACEHOLDER.to_string(),
            categories: constants::DEFAULT_CATEGORIES
                .iter()
                .map(|(label, range)| SourceCategory {
                    label: label.to_string(),
                    range: range.to_string(),
                })
                .collect(),
        }
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            name: constants::NAME_COLUMN,
            role: constants::ROLE_COLUMN,
            artifact_sets: constants::ARTIFACT_SETS_COLUMN,
            main_stats: constants::MAIN_STATS_COLUMN,
            substats: constants::SUBSTATS_COLUMN,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(constants::DEFAULT_OUTPUT_DIR),
            template: PathBuf::from(constants::DEFAULT_TEMPLATE_PATH),
        }
    }
}

impl Config {
    /// Load from `path`, falling back to built-in defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        let config = Self::from_toml(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.source.categories.is_empty() {
            return Err(PipelineError::Config("at least one source category is required".to_string()));
        }
        if self.source.placeholder.is_empty() {
            return Err(PipelineError::Config("placeholder token must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Read the API key from the environment (a `.env` file is honoured).
pub fn api_key() -> Result<String> {
    dotenv::dotenv().ok();
    let key = std::env::var(constants::API_KEY_ENV)?;
    if key.trim().is_empty() {
        return Err(PipelineError::Config(format!("{} is empty", constants::API_KEY_ENV)));
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_spreadsheet_layout() {
        let config = Config::default();
        assert_eq!(config.source.header_rows, 5);
        assert_eq!(config.source.categories.len(), 7);
        assert_eq!(config.source.categories[0].label, "PYRO");
        assert_eq!(config.source.categories[6].range, "Geo !A1:J");
        assert_eq!(config.columns.name, 1);
        assert_eq!(config.columns.substats, 6);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [source]
            header_rows = 3

            [output]
            dir = "build"
            "#,
        )
        .unwrap();
        assert_eq!(config.source.header_rows, 3);
        assert_eq!(config.source.placeholder, "TRAVELER");
        assert_eq!(config.output.dir, PathBuf::from("build"));
        assert_eq!(config.columns, ColumnLayout::default());
    }

    #[test]
    fn test_custom_categories() {
        let config = Config::from_toml(
            r#"
            [[source.categories]]
            label = "HYDRO"
            range = "Hydro !A1:J"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.source.categories,
            vec![SourceCategory { label: "HYDRO".to_string(), range: "Hydro !A1:J".to_string() }]
        );
    }

    #[test]
    fn test_rejects_empty_category_list() {
        let err = Config::from_toml("[source]\ncategories = []\n").unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load(Path::new("definitely/not/here.toml")).unwrap();
        assert_eq!(config.output.dir, PathBuf::from("output"));
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let config = Config::from_toml(include_str!("../config.example.toml")).unwrap();
        let defaults = Config::default();
        assert_eq!(config.source.categories, defaults.source.categories);
        assert_eq!(config.source.spreadsheet_id, defaults.source.spreadsheet_id);
        assert_eq!(config.columns, defaults.columns);
        assert_eq!(config.output.template, defaults.output.template);
    }
}
