mod bootstrap;
mod summary;

use anyhow::{Context, Result};
use dashboard_core::settings::Settings;
use dashboard_data::analysis::analyze_with_overview;
use dashboard_runtime::controller::DashboardController;
use dashboard_runtime::data_manager::DataManager;
use dashboard_ui::app::App;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_deref())?;

    tracing::info!("Sales Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "View: {}, Theme: {}, Category: {}",
        settings.view,
        settings.theme,
        settings.category
    );

    let selection = settings
        .initial_selection()
        .context("invalid --category")?;

    let data_path = bootstrap::resolve_data_path(settings.data_file.as_deref());
    let mut manager = DataManager::new(data_path);
    let dataset = manager
        .get_data()
        .with_context(|| format!("loading sales data from {}", manager.data_path().display()))?;

    match settings.view.as_str() {
        "dashboard" => {
            let controller = DashboardController::new(dataset, selection);
            App::new(&settings.theme, controller)
                .run()
                .context("running the dashboard")?;
        }

        "summary" => {
            let snapshot =
                analyze_with_overview(&dataset.records, &dataset.overview, &selection);
            println!("{}", summary::render(&snapshot, &settings.format)?);
        }

        unknown => anyhow::bail!("Unknown view mode: {unknown}"),
    }

    Ok(())
}
