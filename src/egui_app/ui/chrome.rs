use super::style;
use super::*;
use eframe::egui::{Frame, Margin, RichText, StrokeKind};

impl EguiApp {
    pub(super) fn render_top_bar(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::top("top_bar")
            .frame(
                Frame::new()
                    .fill(palette.canvas)
                    .stroke(style::panel_border())
                    .inner_margin(Margin::symmetric(8, 6)),
            )
            .show(ctx, |ui| {
                let stats = self.controller.stats();
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Fleet Dashboard").strong().color(palette.text));
                    ui.separator();
                    stat_chip(ui, "Total", stats.total, palette.text);
                    stat_chip(ui, "En route", stats.en_route, palette.success);
                    stat_chip(ui, "Delayed", stats.delayed, palette.danger);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .button(RichText::new("Refresh").color(palette.text))
                            .on_hover_text("Fetch the latest truck positions now")
                            .clicked()
                        {
                            self.controller.refresh_now();
                        }
                    });
                });
            });
    }

    pub(super) fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                Frame::new()
                    .fill(palette.canvas)
                    .stroke(style::panel_border())
                    .inner_margin(Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    let (badge_rect, _) =
                        ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
                    ui.painter().rect_filled(badge_rect, 0.0, status.badge_color);
                    ui.painter().rect_stroke(
                        badge_rect,
                        0.0,
                        style::panel_border(),
                        StrokeKind::Inside,
                    );
                    ui.add_space(6.0);
                    ui.label(RichText::new(&status.badge_label).color(palette.text));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(palette.text_dim));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let api = &self.controller.settings().api;
                        ui.label(RichText::new(&api.base_url).color(palette.text_dim).small());
                    });
                });
            });
    }
}

fn stat_chip(ui: &mut egui::Ui, label: &str, value: usize, color: egui::Color32) {
    let palette = style::palette();
    ui.label(RichText::new(label).color(palette.text_dim));
    ui.label(RichText::new(value.to_string()).strong().color(color));
    ui.add_space(10.0);
}
