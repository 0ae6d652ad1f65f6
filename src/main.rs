#![deny(missing_docs)]

//! Entry point for the Fleetdeck dashboard.
use std::sync::Arc;

use eframe::egui;
use fleetdeck::api::HttpFleetApi;
use fleetdeck::config::{self, AppSettings};
use fleetdeck::egui_app::controller::EguiController;
use fleetdeck::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use fleetdeck::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let settings = config::load_or_default().unwrap_or_else(|err| {
        tracing::warn!("Using default settings: {err}");
        config::apply_env_overrides(
            AppSettings::default(),
            std::env::var(config::API_URL_ENV).ok(),
        )
    });
    tracing::info!(
        "Starting against {} (poll every {}s)",
        settings.api.base_url,
        settings.polling.interval_secs
    );

    let viewport = egui::ViewportBuilder::default()
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_inner_size([1400.0, 860.0]);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Fleetdeck",
        native_options,
        Box::new(move |_cc| match HttpFleetApi::new(&settings.api) {
            Ok(api) => {
                let controller = EguiController::new(settings.clone(), Arc::new(api));
                Ok(Box::new(EguiApp::new(controller)))
            }
            Err(err) => Ok(Box::new(LaunchError {
                message: format!("Invalid API settings: {err}"),
            })),
        }),
    )?;
    Ok(())
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start Fleetdeck");
                ui.label(&self.message);
            });
        });
    }
}
