use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use dashboard_core::settings::DEFAULT_DATA_FILE;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Per-user directory searched for the data file.
pub const USER_DIR: &str = ".sales-dashboard";

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a `--log-level` name to an [`EnvFilter`] directive.
///
/// Unknown names are passed through unchanged so that full filter
/// expressions such as `dashboard_data=trace` also work.
pub fn level_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" | "WARN" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_string(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// With `log_file` set, events are appended to that file without ANSI
/// colours (the TUI owns the terminal). Otherwise they go to stderr.
pub fn setup_logging(log_level: &str, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(level_directive(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating log directory {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    let stderr_layer = if log_file.is_none() {
        Some(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_writer(std::io::stderr),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("installing tracing subscriber")?;

    Ok(())
}

// ── Data-path discovery ────────────────────────────────────────────────────────

/// Candidate locations for the data file, in lookup order:
/// 1. `<cwd>/Superstore_Sales_utf8.csv`
/// 2. `<home>/.sales-dashboard/Superstore_Sales_utf8.csv`
pub fn candidate_paths(cwd: &Path, home: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = vec![cwd.join(DEFAULT_DATA_FILE)];
    if let Some(home) = home {
        candidates.push(home.join(USER_DIR).join(DEFAULT_DATA_FILE));
    }
    candidates
}

/// Locate the data file on the local system. Returns `None` when no
/// candidate exists.
pub fn discover_data_path() -> Option<PathBuf> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let home = dirs::home_dir();
    candidate_paths(&cwd, home.as_deref())
        .into_iter()
        .find(|p| p.is_file())
}

/// The file to load: `explicit` if given, else the first discovered
/// candidate, else the bare default name (so the load error names it).
pub fn resolve_data_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    discover_data_path().unwrap_or_else(|| {
        tracing::warn!("no data file found in the working directory or ~/{USER_DIR}");
        PathBuf::from(DEFAULT_DATA_FILE)
    })
}

// ── Tests ──────────────────────────────────────────────────────────────────────
