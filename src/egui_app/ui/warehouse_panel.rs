use super::style;
use super::*;
use crate::fleet::warehouse::{IncomingRow, IncomingView, WAREHOUSES_FAILED_TEXT, WarehousePicker};
use eframe::egui::{Frame, Margin, RichText};

impl EguiApp {
    pub(super) fn render_warehouse_panel(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        ui.label(RichText::new("Incoming to warehouse").strong().color(palette.text));
        ui.add_space(4.0);

        let board = self.controller.warehouses();
        let mut choice: Option<Option<String>> = None;
        match board.picker() {
            WarehousePicker::Loading => {
                ui.label(RichText::new("Loading warehouses...").color(palette.text_dim));
            }
            WarehousePicker::Failed => {
                ui.label(RichText::new(WAREHOUSES_FAILED_TEXT).color(palette.warning));
            }
            WarehousePicker::Ready(warehouses) => {
                let selected = board.selected();
                let selected_text = warehouses
                    .iter()
                    .find(|warehouse| Some(warehouse.warehouse_id.as_str()) == selected)
                    .map(|warehouse| warehouse.name.clone())
                    .unwrap_or_else(|| "-- Select a warehouse --".to_string());
                egui::ComboBox::from_id_salt("warehouse_picker")
                    .selected_text(selected_text)
                    .width(ui.available_width())
                    .show_ui(ui, |ui| {
                        if ui.selectable_label(selected.is_none(), "-- Select a warehouse --").clicked() {
                            choice = Some(None);
                        }
                        for warehouse in warehouses {
                            let active = Some(warehouse.warehouse_id.as_str()) == selected;
                            if ui.selectable_label(active, &warehouse.name).clicked() {
                                choice = Some(Some(warehouse.warehouse_id.clone()));
                            }
                        }
                    });
            }
        }
        ui.add_space(6.0);

        match board.incoming() {
            IncomingView::Loaded(rows) => {
                egui::ScrollArea::vertical()
                    .id_salt("incoming_scroll")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for (index, row) in rows.iter().enumerate() {
                            ui.push_id(index, |ui| render_incoming(ui, row));
                        }
                    });
            }
            other => {
                if let Some(message) = other.message() {
                    let color = if matches!(other, IncomingView::Failed) {
                        palette.warning
                    } else {
                        palette.text_dim
                    };
                    ui.label(RichText::new(message).color(color));
                }
            }
        }

        if let Some(choice) = choice {
            self.controller.select_warehouse(choice);
        }
    }
}

fn render_incoming(ui: &mut egui::Ui, row: &IncomingRow) {
    let palette = style::palette();
    Frame::new()
        .fill(palette.surface_raised)
        .stroke(style::panel_border())
        .inner_margin(Margin::symmetric(6, 4))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                RichText::new(&row.registration_number)
                    .strong()
                    .color(palette.text),
            );
            ui.label(RichText::new(format!("ETA: {}", row.eta)).color(palette.text_dim));
            ui.label(
                RichText::new(format!("Scheduled: {}", row.scheduled_arrival))
                    .color(palette.text_dim),
            );
            for line in &row.sku_lines {
                ui.label(RichText::new(format!("• {line}")).color(palette.text));
            }
        });
    ui.add_space(4.0);
}
