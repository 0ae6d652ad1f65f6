use super::style;
use super::*;
use crate::fleet::detail::PLACEHOLDER_TEXT;
use crate::fleet::{DetailView, TruckDetail};
use eframe::egui::RichText;

impl EguiApp {
    pub(super) fn render_detail_panel(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        ui.add_space(6.0);
        ui.label(RichText::new("Truck details").strong().color(palette.text));
        ui.add_space(4.0);
        match self.controller.detail() {
            DetailView::Placeholder => {
                ui.label(RichText::new(PLACEHOLDER_TEXT).color(palette.text_dim));
            }
            DetailView::Truck(detail) => render_truck(ui, detail),
        }
    }
}

fn render_truck(ui: &mut egui::Ui, detail: &TruckDetail) {
    let palette = style::palette();
    egui::Grid::new("truck_detail_grid")
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            field(ui, "Truck ID", RichText::new(&detail.truck_id).strong());
            field(ui, "Business unit", RichText::new(&detail.business_unit));
            field(
                ui,
                "Status",
                RichText::new(&detail.status_label).color(style::status_color(
                    &detail.status_class.base,
                    detail.status_class.delayed,
                )),
            );
            field(ui, "Route", RichText::new(&detail.route));
            field(ui, "Direction", RichText::new(&detail.direction));
            field(ui, "Speed", RichText::new(&detail.speed));
            field(ui, "Latitude", RichText::new(&detail.latitude));
            field(ui, "Longitude", RichText::new(&detail.longitude));
            field(ui, "ETA", RichText::new(&detail.eta));
            field(ui, "Last updated", RichText::new(&detail.last_updated));
        });

    ui.add_space(8.0);
    ui.label(RichText::new("Shipments").strong().color(palette.text));
    if let Some(text) = detail.empty_shipments_text() {
        ui.label(RichText::new(text).color(palette.text_dim));
        return;
    }
    egui::ScrollArea::vertical()
        .id_salt("shipment_scroll")
        .max_height(160.0)
        .show(ui, |ui| {
            egui::Grid::new("shipment_grid")
                .num_columns(4)
                .striped(true)
                .show(ui, |ui| {
                    for heading in ["Order", "SKU", "Qty", "Expected"] {
                        ui.label(RichText::new(heading).color(palette.text_dim));
                    }
                    ui.end_row();
                    for line in &detail.shipments {
                        ui.label(&line.order_id);
                        ui.label(&line.sku);
                        ui.label(&line.quantity);
                        ui.label(&line.expected_arrival);
                        ui.end_row();
                    }
                });
        });
}

fn field(ui: &mut egui::Ui, label: &str, value: RichText) {
    ui.label(RichText::new(label).color(style::palette().text_dim));
    ui.label(value);
    ui.end_row();
}
