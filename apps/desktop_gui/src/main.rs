mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context};
use clap::Parser;
use client_core::load_settings;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{PredictFormApp, StartupConfig};

#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the prediction service.
    #[arg(long)]
    server_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let settings = load_settings(args.server_url.as_deref()).context("invalid client settings")?;
    tracing::info!(server_url = %settings.server_url, "starting prediction form");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    let _worker = backend_bridge::runtime::launch(cmd_rx, ui_tx, settings.server_url.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("CSAT Predictor")
            .with_inner_size([560.0, 720.0])
            .with_min_inner_size([420.0, 520.0]),
        ..Default::default()
    };
    let startup = StartupConfig {
        server_url: settings.server_url,
    };
    eframe::run_native(
        "CSAT Predictor",
        options,
        Box::new(move |_cc| Ok(Box::new(PredictFormApp::new(cmd_tx, ui_rx, startup)))),
    )
    .map_err(|err| anyhow!("desktop GUI exited with an error: {err}"))
}
