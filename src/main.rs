mod app;
mod charts;
mod cli;
mod color;
mod data;
mod state;
mod ui;

use std::sync::Arc;

use anyhow::{Context, Result};
use app::DashboardApp;
use clap::Parser;
use eframe::egui;
use serde::Serialize;

use charts::ChartSpec;
use cli::Cli;
use state::{AppState, ControlState, PIE_CHART, SCATTER_CHART};

/// Headless output of `--dump`.
#[derive(Serialize)]
struct ChartDump<'a> {
    site: &'a data::filter::SiteSelection,
    payload: data::model::PayloadRange,
    charts: Vec<&'a ChartSpec>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let table = data::loader::load_file(&cli.data)
        .with_context(|| format!("loading launch table from {}", cli.data.display()))?;
    let controls: ControlState = cli.initial_controls(&table);
    let state = AppState::new(Arc::new(table), cli.site_options(), controls);

    if cli.dump {
        return dump_charts(&state);
    }
    run_ui(&cli, state)
}

fn dump_charts(state: &AppState) -> Result<()> {
    let dump = ChartDump {
        site: &state.controls().site,
        payload: state.controls().payload,
        charts: [PIE_CHART, SCATTER_CHART]
            .into_iter()
            .filter_map(|id| state.output(id))
            .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&dump)?);
    Ok(())
}

fn run_ui(cli: &Cli, state: AppState) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([cli.width, cli.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        ui::panels::DASHBOARD_TITLE,
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Ok(Box::new(DashboardApp::new(state)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard window: {e}"))
}
