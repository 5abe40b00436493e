mod app;
mod chart;
mod color;
mod config;
mod data;
mod export;
mod state;
mod ui;

use anyhow::{anyhow, Context};
use app::GeneDashApp;
use clap::Parser;
use config::{Args, APP_TITLE, MIN_WINDOW_SIZE, WINDOW_SIZE};
use eframe::egui;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    config::init_logging(args.log_level);

    // A dataset that cannot be loaded is fatal: no window is opened.
    let dataset = match data::loader::load_file(&args.dataset)
        .with_context(|| format!("loading dataset {}", args.dataset.display()))
    {
        Ok(ds) => ds,
        Err(e) => {
            log::error!("{e:#}");
            return Err(e);
        }
    };
    log::info!(
        "Loaded {} rows ({} genes) with conditions {:?}",
        dataset.len(),
        dataset.genes.len(),
        dataset.conditions
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_min_inner_size(MIN_WINDOW_SIZE),
        ..Default::default()
    };

    let kind = args.kind;
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(GeneDashApp::new(dataset, kind)))),
    )
    .map_err(|e| anyhow!("running UI: {e}"))
}
