use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_DIR: &str = "logs";
pub const LOG_FILE: &str = "artifact_builds.log";
const DEFAULT_DIRECTIVES: &str = "artifact_builds=info,warn";

/// `RUST_LOG` when set, otherwise info for this crate and warn elsewhere.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Console output on stderr plus JSON lines in a daily rolled file under `logs/`.
///
/// Hold the returned guard until exit; dropping it flushes the file writer.
pub fn init_logging() -> Option<WorkerGuard> {
    init_logging_in(Path::new(LOG_DIR))
}

pub fn init_logging_in(dir: &Path) -> Option<WorkerGuard> {
    let (file_layer, guard) = match fs::create_dir_all(dir) {
        Ok(()) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().json().with_writer(writer)), Some(guard))
        }
        Err(e) => {
            eprintln!("Cannot create log directory {}: {}; logging to console only", dir.display(), e);
            (None, None)
        }
    };

    // stdout is reserved for command output
    let console_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer)
        .with(console_layer)
        .try_init();
    guard
}
