//! Colors and widget visuals for the dashboard.

use egui::{
    Color32, Stroke, Visuals,
    epaint::{CornerRadius, Shadow},
    style::WidgetVisuals,
};

use crate::fleet::IconCategory;

#[derive(Clone, Copy, Debug)]
pub struct Palette {
    /// Map background and window fill.
    pub canvas: Color32,
    pub surface: Color32,
    pub surface_raised: Color32,
    pub outline: Color32,
    pub grid_major: Color32,
    pub grid_minor: Color32,
    pub text: Color32,
    pub text_dim: Color32,
    /// Selection and hover outlines.
    pub highlight: Color32,
    pub warning: Color32,
    pub success: Color32,
    pub danger: Color32,
}

pub fn palette() -> Palette {
    Palette {
        canvas: Color32::from_rgb(14, 18, 24),
        surface: Color32::from_rgb(22, 27, 34),
        surface_raised: Color32::from_rgb(33, 39, 48),
        outline: Color32::from_rgb(48, 56, 68),
        grid_major: Color32::from_rgb(52, 62, 76),
        grid_minor: Color32::from_rgb(26, 32, 40),
        text: Color32::from_rgb(214, 220, 228),
        text_dim: Color32::from_rgb(134, 146, 160),
        highlight: Color32::from_rgb(255, 214, 102),
        warning: Color32::from_rgb(230, 150, 60),
        success: Color32::from_rgb(76, 186, 120),
        danger: Color32::from_rgb(226, 72, 72),
    }
}

pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.window_fill = palette.surface;
    visuals.panel_fill = palette.surface;
    visuals.extreme_bg_color = palette.canvas;
    visuals.faint_bg_color = palette.surface_raised;
    visuals.override_text_color = Some(palette.text);
    visuals.hyperlink_color = palette.highlight;
    visuals.warn_fg_color = palette.warning;
    visuals.error_fg_color = palette.danger;
    visuals.selection.bg_fill = palette.grid_major;
    visuals.selection.stroke = Stroke::new(1.0, palette.highlight);
    visuals.widgets.noninteractive.bg_fill = palette.surface;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, palette.outline);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text);
    flat_widget(&mut visuals.widgets.inactive, palette.surface_raised, palette.outline);
    flat_widget(&mut visuals.widgets.hovered, palette.grid_major, palette.highlight);
    flat_widget(&mut visuals.widgets.active, palette.grid_major, palette.highlight);
    flat_widget(&mut visuals.widgets.open, palette.surface_raised, palette.outline);
    visuals.window_corner_radius = CornerRadius::same(4);
    visuals.menu_corner_radius = CornerRadius::same(2);
    visuals.popup_shadow = Shadow::NONE;
}

fn flat_widget(vis: &mut WidgetVisuals, fill: Color32, border: Color32) {
    let palette = palette();
    vis.corner_radius = CornerRadius::same(2);
    vis.bg_fill = fill;
    vis.weak_bg_fill = fill;
    vis.bg_stroke = Stroke::new(1.0, border);
    vis.fg_stroke = Stroke::new(1.0, palette.text);
}

pub fn panel_border() -> Stroke {
    Stroke::new(1.0, palette().outline)
}

/// Fill of the list row whose truck is selected.
pub fn row_selected_fill() -> Color32 {
    Color32::from_rgb(44, 54, 68)
}

/// Fill color of a marker or list badge.
pub fn icon_color(icon: IconCategory) -> Color32 {
    match icon {
        IconCategory::SermsukOutbound => Color32::from_rgb(46, 134, 222),
        IconCategory::SermsukInbound => Color32::from_rgb(120, 180, 240),
        IconCategory::TblOutbound => Color32::from_rgb(39, 174, 96),
        IconCategory::TblInbound => Color32::from_rgb(130, 210, 150),
        IconCategory::Delayed => palette().danger,
        IconCategory::Warehouse => Color32::from_rgb(195, 165, 122),
        IconCategory::Factory => Color32::from_rgb(155, 89, 182),
        IconCategory::Default => palette().text_dim,
    }
}

/// Text color for a status class, by its base name.
pub fn status_color(base_class: &str, delayed: bool) -> Color32 {
    let palette = palette();
    if delayed {
        return palette.danger;
    }
    match base_class {
        "status-en_route" => palette.success,
        "status-stopped" | "status-idle" => palette.text_dim,
        "status-loading" | "status-unloading" => palette.highlight,
        _ => palette.text,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Busy,
    Info,
    Warning,
    Error,
}

/// Badge label and color for the status bar.
pub fn status_badge(tone: StatusTone) -> (&'static str, Color32) {
    let palette = palette();
    match tone {
        StatusTone::Idle => ("Idle", palette.outline),
        StatusTone::Busy => ("Loading", Color32::from_rgb(66, 140, 230)),
        StatusTone::Info => ("Live", palette.success),
        StatusTone::Warning => ("Warning", palette.warning),
        StatusTone::Error => ("Error", palette.danger),
    }
}
