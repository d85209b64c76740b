use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

use covid_trends::app::CovidTrendsApp;
use covid_trends::cli::Cli;
use covid_trends::data::loader;
use covid_trends::report;
use covid_trends::state::AppState;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.run_config().context("invalid run configuration")?;
    let table = loader::load_file(&cli.input)
        .with_context(|| format!("loading {}", cli.input.display()))?;

    let title = config.title();
    let figure = config.figure.clone();
    let state = AppState::with_source(config, cli.input.clone(), table)
        .context("input does not have the expected columns")?;

    if let Some(output) = &state.output {
        print!("{}", report::summary(&output.counts));
        if cli.headless {
            print!("{}", report::render_rows(&output.decimated));
        }
    }
    if cli.headless {
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([
                figure.width,
                figure.trend_height.max(figure.comparison_height),
            ])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(CovidTrendsApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}
