//! Web-mercator projection between coordinates and canvas points.

use std::f64::consts::PI;

use crate::fleet::LatLon;

pub(crate) const TILE_SIZE: f64 = 256.0;
pub(crate) const MIN_ZOOM: f32 = 1.0;
pub(crate) const MAX_ZOOM: f32 = 19.0;
const MAX_LATITUDE: f64 = 85.051_128_78;

/// Normalized mercator position, both axes in `0.0..=1.0`.
pub(crate) fn project(position: LatLon) -> (f64, f64) {
    let lat = position.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (position.lon + 180.0) / 360.0;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0;
    (x, y)
}

pub(crate) fn unproject(x: f64, y: f64) -> LatLon {
    let lon = x * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * y)).sinh().atan().to_degrees();
    LatLon::new(lat, lon)
}

/// Screen points per normalized unit at `zoom`.
pub(crate) fn world_size(zoom: f32) -> f64 {
    TILE_SIZE * 2f64.powf(f64::from(zoom))
}

pub(crate) fn map_to_screen(
    position: LatLon,
    rect: egui::Rect,
    center: LatLon,
    zoom: f32,
) -> egui::Pos2 {
    let scale = world_size(zoom);
    let (px, py) = project(position);
    let (cx, cy) = project(center);
    egui::pos2(
        rect.center().x + ((px - cx) * scale) as f32,
        rect.center().y + ((py - cy) * scale) as f32,
    )
}

pub(crate) fn screen_to_map(
    pos: egui::Pos2,
    rect: egui::Rect,
    center: LatLon,
    zoom: f32,
) -> LatLon {
    let scale = world_size(zoom);
    let (cx, cy) = project(center);
    let x = cx + f64::from(pos.x - rect.center().x) / scale;
    let y = cy + f64::from(pos.y - rect.center().y) / scale;
    unproject(x.rem_euclid(1.0), y.clamp(0.0, 1.0))
}

/// New center after dragging the canvas by `delta` screen points.
pub(crate) fn pan(center: LatLon, zoom: f32, delta: egui::Vec2) -> LatLon {
    let scale = world_size(zoom);
    let (cx, cy) = project(center);
    let x = cx - f64::from(delta.x) / scale;
    let y = cy - f64::from(delta.y) / scale;
    unproject(x.rem_euclid(1.0), y.clamp(0.0, 1.0))
}

pub(crate) fn clamp_zoom(zoom: f32) -> f32 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Graticule spacing in degrees that keeps lines roughly `target_px` apart.
pub(crate) fn grid_step(zoom: f32, target_px: f64) -> f64 {
    let degrees_per_px = 360.0 / world_size(zoom);
    let wanted = degrees_per_px * target_px;
    const STEPS: [f64; 12] = [
        0.001, 0.002, 0.005, 0.01, 0.02, 0.05, 0.1, 0.2, 0.5, 1.0, 5.0, 10.0,
    ];
    STEPS
        .iter()
        .copied()
        .find(|step| *step >= wanted)
        .unwrap_or(30.0)
}
