use clap::Parser;
use std::path::PathBuf;

use crate::error::Result;
use crate::models::Selection;
use crate::taxonomy::Category;

/// Default data file name looked up when `--data-file` is not given.
pub const DEFAULT_DATA_FILE: &str = "Superstore_Sales_utf8.csv";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Interactive sales and profit dashboard for the Superstore dataset
#[derive(Parser, Debug, Clone)]
#[command(
    name = "sales-dashboard",
    about = "Interactive sales and profit dashboard for the Superstore dataset",
    version
)]
pub struct Settings {
    /// Path to the sales CSV file
    #[arg(long, env = "SALES_DASHBOARD_DATA")]
    pub data_file: Option<PathBuf>,

    /// Category selected at startup
    #[arg(long, default_value = "Furniture")]
    pub category: String,

    /// Subcategories selected at startup (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub subcategories: Vec<String>,

    /// View mode
    #[arg(long, default_value = "dashboard", value_parser = ["dashboard", "summary"])]
    pub view: String,

    /// Output format for the summary view
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] with an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// The `--category` value as a [`Category`].
    pub fn initial_category(&self) -> Result<Category> {
        self.category.parse()
    }

    /// Startup selection built from `--category` and `--subcategories`.
    ///
    /// Names outside the category's taxonomy are dropped with a warning.
    pub fn initial_selection(&self) -> Result<Selection> {
        let category = self.initial_category()?;
        let requested: Vec<&str> = self
            .subcategories
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();

        let selection = Selection::new(category, &requested);
        let ignored = outside_selection(&selection, &requested);
        if !ignored.is_empty() {
            tracing::warn!(
                category = %category,
                ignored = ?ignored,
                "ignoring subcategories outside the selected category"
            );
        }
        Ok(selection)
    }
}

/// Requested names that did not make it into `selection`. Repeats of a
/// chosen name are not reported.
fn outside_selection<'a>(selection: &Selection, requested: &[&'a str]) -> Vec<&'a str> {
    requested
        .iter()
        .copied()
        .filter(|s| !selection.is_chosen(s))
        .collect()
}

// ── Tests ──────────────────────────────────────────────────────────────────────
