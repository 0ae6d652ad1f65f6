use super::style;
use super::*;
use crate::fleet::ListRow;
use eframe::egui::{Frame, Margin, RichText, StrokeKind};

const ROW_HEIGHT: f32 = 54.0;

impl EguiApp {
    pub(super) fn render_truck_list(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        ui.add_space(6.0);
        ui.label(RichText::new("Trucks").strong().color(palette.text));
        let search = ui.add(
            egui::TextEdit::singleline(&mut self.controller.ui.filter_input)
                .hint_text("Search truck ID or SKU")
                .desired_width(f32::INFINITY),
        );
        if search.changed() {
            self.controller.apply_filter_input();
        }
        ui.add_space(6.0);

        if let Some(message) = self.controller.list().message() {
            ui.add_space(12.0);
            let color = if matches!(self.controller.list(), crate::fleet::ListView::Failed(_)) {
                palette.warning
            } else {
                palette.text_dim
            };
            ui.label(RichText::new(message).color(color));
            return;
        }

        let mut clicked: Option<String> = None;
        egui::ScrollArea::vertical()
            .id_salt("truck_list_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for row in self.controller.list().rows() {
                    ui.push_id(&row.truck_id, |ui| {
                        if render_row(ui, row).clicked() {
                            clicked = Some(row.truck_id.clone());
                        }
                    });
                }
            });
        if let Some(truck_id) = clicked {
            self.controller.select_truck(&truck_id);
        }
    }
}

fn render_row(ui: &mut egui::Ui, row: &ListRow) -> egui::Response {
    let palette = style::palette();
    let fill = if row.active {
        style::row_selected_fill()
    } else {
        palette.surface
    };
    let inner = Frame::new()
        .fill(fill)
        .inner_margin(Margin::symmetric(6, 4))
        .show(ui, |ui| {
            ui.set_min_height(ROW_HEIGHT - 8.0);
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                let (dot, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
                ui.painter()
                    .circle_filled(dot.center(), 5.0, style::icon_color(row.icon));
                ui.label(RichText::new(&row.truck_id).strong().color(palette.text));
                ui.label(RichText::new(&row.business_unit).small().color(palette.text_dim));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(&row.status_label).color(style::status_color(
                            &row.status_class.base,
                            row.status_class.delayed,
                        )),
                    );
                });
            });
            ui.horizontal(|ui| {
                ui.label(RichText::new(&row.route).color(palette.text_dim));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(RichText::new(format!("ETA {}", row.eta)).color(palette.text_dim));
                });
            });
        });
    let response = inner.response.interact(egui::Sense::click());
    if row.active {
        ui.painter().rect_stroke(
            response.rect,
            0.0,
            egui::Stroke::new(1.0, palette.highlight),
            StrokeKind::Inside,
        );
    } else if response.hovered() {
        ui.painter()
            .rect_stroke(response.rect, 0.0, style::panel_border(), StrokeKind::Inside);
    }
    ui.add_space(2.0);
    response
}
