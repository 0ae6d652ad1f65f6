//! egui renderer for the dashboard.

mod chrome;
mod detail_panel;
pub(crate) mod map_math;
mod map_view;
pub mod style;
mod truck_list;
mod warehouse_panel;

use std::time::Duration;

use eframe::egui;

use crate::egui_app::controller::EguiController;

/// Smallest window the layout still fits into.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(960.0, 600.0);

/// Frames are requested at least this often so worker results land promptly.
const REPAINT_INTERVAL: Duration = Duration::from_millis(250);

/// Renders the dashboard from the controller's state.
pub struct EguiApp {
    controller: EguiController,
    visuals_set: bool,
}

impl EguiApp {
    /// Wrap a controller and start its background work.
    pub fn new(mut controller: EguiController) -> Self {
        controller.start();
        Self {
            controller,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.tick();
        self.render_top_bar(ctx);
        self.render_status(ctx);
        egui::SidePanel::left("truck_list")
            .resizable(true)
            .default_width(320.0)
            .min_width(260.0)
            .show(ctx, |ui| self.render_truck_list(ui));
        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(340.0)
            .min_width(280.0)
            .show(ctx, |ui| {
                self.render_detail_panel(ui);
                ui.separator();
                self.render_warehouse_panel(ui);
            });
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(style::palette().canvas))
            .show(ctx, |ui| self.render_map(ui));
        self.render_popup(ctx);
        ctx.request_repaint_after(REPAINT_INTERVAL);
    }
}
