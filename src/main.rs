use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use artifact_builds::app::build_use_case::{BuildSummary, BuildUseCase};
use artifact_builds::app::ports::TableSourcePort;
use artifact_builds::config::{self, Config, DEFAULT_CONFIG_PATH};
use artifact_builds::infra::{FileOutputAdapter, JsonFileSource, SheetsClient};
use artifact_builds::logging;
use artifact_builds::pipeline::{Pipeline, PipelineSettings};

#[derive(Parser)]
#[command(name = "artifact_builds")]
#[command(about = "Builds normalized artifact recommendations from the community build spreadsheet")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every category table, run the pipeline and write all outputs
    Run {
        /// Output directory (overrides the config)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Fetch only and save the raw batch response as JSON
    Fetch {
        #[arg(long)]
        out: PathBuf,
    },
    /// Run the pipeline on a saved batch response; no network
    Process {
        #[arg(long)]
        input: PathBuf,
        /// Output directory (overrides the config)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn read_template(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(template) => Some(template),
        Err(e) => {
            warn!("Evaluator template {} not available ({}); skipping page", path.display(), e);
            None
        }
    }
}

fn build(config: &Config, source: Box<dyn TableSourcePort>, output: Option<PathBuf>) -> Result<BuildSummary> {
    let output_dir = output.unwrap_or_else(|| config.output.dir.clone());
    let use_case = BuildUseCase::new(
        source,
        Box::new(FileOutputAdapter::new(&output_dir)),
        Pipeline::new(PipelineSettings::from(config)),
        config.source.spreadsheet_id.clone(),
        config.source.categories.clone(),
    )
    .with_template(read_template(&config.output.template));
    use_case.run()
}

fn print_summary(summary: &BuildSummary) {
    println!("\n📊 Build results:");
    for (label, value) in summary.counts.rows() {
        println!("   {} {}", label, value);
    }
    if summary.suspicious_values > 0 {
        println!("   ⚠️  {} suspicious values (see summary.txt)", summary.suspicious_values);
    }
    for path in &summary.written {
        println!("   Wrote {}", path.display());
    }
    println!("   Fact table sha256: {}", summary.fact_table_digest);
}

fn sheets_client(config: &Config) -> Result<SheetsClient> {
    let key = config::api_key().context("GOOGLE_API_KEY is not set")?;
    Ok(SheetsClient::new(&config.source, key)?)
}

fn execute(cli: Cli) -> Result<()> {
    let config = Config::load(&cli.config).context("Failed to load configuration")?;

    match cli.command {
        Commands::Run { output } => {
            println!("🚀 Running full build...");
            let client = sheets_client(&config)?;
            let summary = build(&config, Box::new(client), output)?;
            print_summary(&summary);
        }
        Commands::Fetch { out } => {
            println!("📡 Fetching {} ranges...", config.source.categories.len());
            let client = sheets_client(&config)?;
            let response = client.fetch_batch(&config.source.categories)?;
            let json = serde_json::to_string_pretty(&response)?;
            fs::write(&out, json).with_context(|| format!("Failed to write {}", out.display()))?;
            info!("Saved batch response to {}", out.display());
            println!("✅ Saved {} value ranges to {}", response.value_ranges.len(), out.display());
        }
        Commands::Process { input, output } => {
            println!("🔨 Processing {}...", input.display());
            let summary = build(&config, Box::new(JsonFileSource::new(&input)), output)?;
            print_summary(&summary);
        }
    }
    Ok(())
}

fn main() {
    let log_guard = logging::init_logging();

    let cli = Cli::parse();
    if let Err(e) = execute(cli) {
        error!("❌ Build failed: {:#}", e);
        // exit skips destructors; flush the log file first
        drop(log_guard);
        std::process::exit(1);
    }
}
