use super::map_math;
use super::style;
use super::*;
use crate::egui_app::map_layer::CanvasMarker;
use crate::fleet::{LatLon, PopupAction};
use eframe::egui::{Align2, FontId, RichText, Stroke};

const MAP_ZOOM_SPEED: f32 = 0.01;
const HIT_RADIUS: f32 = 12.0;
const TRUCK_RADIUS: f32 = 7.0;
const FACILITY_HALF: f32 = 8.0;
const GRID_TARGET_PX: f64 = 120.0;
const MAX_GRID_LINES: usize = 64;

impl EguiApp {
    pub(super) fn render_map(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        self.controller.ui.map.canvas = Some(rect);

        let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
        if response.hovered() && scroll_delta.abs() > 0.0 {
            let map = &mut self.controller.ui.map;
            map.zoom = map_math::clamp_zoom(map.zoom + scroll_delta * MAP_ZOOM_SPEED);
            map.user_moved = true;
        }

        if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                let map = &mut self.controller.ui.map;
                let last = map.last_drag_pos.unwrap_or(pos);
                map.center = map_math::pan(map.center, map.zoom, pos - last);
                map.last_drag_pos = Some(pos);
                map.user_moved = true;
            }
        } else {
            self.controller.ui.map.last_drag_pos = None;
        }

        let center = self.controller.ui.map.center;
        let zoom = self.controller.ui.map.zoom;
        let to_screen = |position: LatLon| map_math::map_to_screen(position, rect, center, zoom);

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, palette.canvas);
        paint_graticule(&painter, rect, center, zoom);

        let open_popup = self.controller.ui.map.open_popup;
        let selected = self.controller.selected_truck().map(str::to_string);
        for (id, marker) in self.controller.layer().paint_order() {
            let pos = to_screen(marker.position);
            if !rect.expand(FACILITY_HALF * 2.0).contains(pos) {
                continue;
            }
            let highlighted = open_popup == Some(id)
                || (selected.is_some() && marker.truck_id() == selected.as_deref());
            paint_marker(&painter, marker, pos, highlighted);
        }

        painter.text(
            rect.left_bottom() + egui::vec2(8.0, -8.0),
            Align2::LEFT_BOTTOM,
            format!("{:.4}, {:.4}  zoom {zoom:.1}", center.lat, center.lon),
            FontId::monospace(11.0),
            palette.text_dim,
        );

        if response.clicked() {
            let hit = response
                .interact_pointer_pos()
                .and_then(|pointer| self.controller.layer().hit_test(pointer, HIT_RADIUS, to_screen));
            match hit {
                Some(id) => self.controller.click_marker(id),
                None => self.controller.close_popup(),
            }
        }
    }

    pub(super) fn render_popup(&mut self, ctx: &egui::Context) {
        let Some(id) = self.controller.ui.map.open_popup else {
            return;
        };
        let Some(rect) = self.controller.ui.map.canvas else {
            return;
        };
        let Some(marker) = self.controller.layer().get(id) else {
            self.controller.close_popup();
            return;
        };
        let Some(popup) = marker.popup.clone() else {
            return;
        };
        let anchor = map_math::map_to_screen(
            marker.position,
            rect,
            self.controller.ui.map.center,
            self.controller.ui.map.zoom,
        );
        if !rect.contains(anchor) {
            return;
        }

        let palette = style::palette();
        let mut open = true;
        let mut action: Option<PopupAction> = None;
        egui::Window::new(RichText::new(&popup.title).strong())
            .id(egui::Id::new("marker_popup"))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .fixed_pos(anchor + egui::vec2(14.0, -14.0))
            .show(ctx, |ui| {
                for line in &popup.lines {
                    ui.label(RichText::new(line).color(palette.text));
                }
                if let Some(popup_action) = &popup.action {
                    ui.add_space(4.0);
                    if ui.button(popup_action.label()).clicked() {
                        action = Some(popup_action.clone());
                    }
                }
            });
        if !open {
            self.controller.close_popup();
        }
        if let Some(PopupAction::ViewDetails(truck_id)) = action {
            self.controller.select_truck(&truck_id);
        }
    }
}

fn paint_marker(painter: &egui::Painter, marker: &CanvasMarker, pos: egui::Pos2, highlighted: bool) {
    let palette = style::palette();
    let fill = style::icon_color(marker.icon);
    let outline = if highlighted {
        Stroke::new(2.0, palette.highlight)
    } else {
        Stroke::new(1.0, palette.canvas)
    };
    if marker.icon.is_facility() {
        let square = egui::Rect::from_center_size(pos, egui::vec2(FACILITY_HALF * 2.0, FACILITY_HALF * 2.0));
        painter.rect_filled(square, 2.0, fill);
        painter.rect_stroke(square, 2.0, outline, egui::StrokeKind::Outside);
        if let Some(popup) = &marker.popup {
            painter.text(
                pos + egui::vec2(0.0, FACILITY_HALF + 4.0),
                Align2::CENTER_TOP,
                &popup.title,
                FontId::proportional(11.0),
                palette.text,
            );
        }
    } else {
        painter.circle_filled(pos, TRUCK_RADIUS, fill);
        painter.circle_stroke(pos, TRUCK_RADIUS, outline);
    }
}

fn paint_graticule(painter: &egui::Painter, rect: egui::Rect, center: LatLon, zoom: f32) {
    let palette = style::palette();
    let step = map_math::grid_step(zoom, GRID_TARGET_PX);
    let top_left = map_math::screen_to_map(rect.left_top(), rect, center, zoom);
    let bottom_right = map_math::screen_to_map(rect.right_bottom(), rect, center, zoom);
    let stroke = Stroke::new(1.0, palette.grid_minor);

    let first_lon = (top_left.lon / step).floor() as i64;
    let last_lon = (bottom_right.lon / step).ceil() as i64;
    for index in (first_lon..=last_lon).take(MAX_GRID_LINES) {
        let lon = index as f64 * step;
        let x = map_math::map_to_screen(LatLon::new(center.lat, lon), rect, center, zoom).x;
        painter.vline(x, rect.y_range(), stroke);
    }

    let first_lat = (bottom_right.lat / step).floor() as i64;
    let last_lat = (top_left.lat / step).ceil() as i64;
    for index in (first_lat..=last_lat).take(MAX_GRID_LINES) {
        let lat = index as f64 * step;
        let y = map_math::map_to_screen(LatLon::new(lat, center.lon), rect, center, zoom).y;
        painter.hline(rect.x_range(), y, stroke);
    }
}
