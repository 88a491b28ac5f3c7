// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! curfree-panel: storage identifier panel entrypoint. Main loads settings,
//! installs logging, starts the runtime, and hands the window to eframe.

use anyhow::{anyhow, Result};
use curfree_app_core::settings::PanelSettings;
use curfree_config_fs::FsSettingsSource;
use tracing_subscriber::EnvFilter;

mod app;
mod render_port;
mod ui;
mod ui_state;

const APP_TITLE: &str = "curfree";
const WINDOW_SIZE: [f32; 2] = [650.0, 580.0];

fn load_settings() -> (PanelSettings, Option<String>) {
    match FsSettingsSource::new() {
        Ok(source) => (PanelSettings::load(&source), None),
        Err(err) => (PanelSettings::default(), Some(err.to_string())),
    }
}

fn init_tracing(settings: &PanelSettings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            EnvFilter::try_new(settings.log_filter.as_deref().unwrap_or("info"))
        })
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let (settings, settings_error) = load_settings();
    init_tracing(&settings);
    if let Some(err) = settings_error {
        tracing::warn!(error = %err, "settings directory unavailable; using defaults");
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;
    let handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size(WINDOW_SIZE)
            .with_resizable(false),
        ..Default::default()
    };
    tracing::info!(storage_path = ?settings.storage_path, "starting panel");
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(app::PanelApp::new(cc, handle, &settings)))),
    )
    .map_err(|err| anyhow!("eframe: {err}"))?;

    runtime.shutdown_background();
    Ok(())
}
