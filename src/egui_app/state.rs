//! Shared state types for the egui UI.

use egui::{Color32, Pos2, Rect};

use crate::config::MapSettings;
use crate::egui_app::map_layer::MarkerId;
use crate::egui_app::ui::style::{self, StatusTone};
use crate::fleet::LatLon;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub status: StatusBarState,
    pub map: MapViewState,
    /// Text in the search box; pushed to the engine when it changes.
    pub filter_input: String,
}

impl UiState {
    pub fn new(map: &MapSettings) -> Self {
        Self {
            status: StatusBarState::idle(),
            map: MapViewState::new(map.default_center, map.initial_zoom),
            filter_input: String::new(),
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(&MapSettings::default())
    }
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub badge_label: String,
    pub badge_color: Color32,
}

impl StatusBarState {
    pub fn idle() -> Self {
        Self::with_tone("Connecting to the fleet service", StatusTone::Idle)
    }

    pub fn with_tone(text: impl Into<String>, tone: StatusTone) -> Self {
        let (label, color) = style::status_badge(tone);
        Self {
            text: text.into(),
            badge_label: label.to_string(),
            badge_color: color,
        }
    }
}

/// Viewport of the map canvas.
#[derive(Clone, Debug)]
pub struct MapViewState {
    pub center: LatLon,
    pub zoom: f32,
    /// Marker whose popup is open.
    pub open_popup: Option<MarkerId>,
    /// Set once the user pans, zooms or selects; late facility fixes stop recentering.
    pub user_moved: bool,
    pub last_drag_pos: Option<Pos2>,
    /// Canvas area from the last frame, used to anchor popups.
    pub canvas: Option<Rect>,
}

impl MapViewState {
    pub fn new(center: LatLon, zoom: f32) -> Self {
        Self {
            center,
            zoom,
            open_popup: None,
            user_moved: false,
            last_drag_pos: None,
            canvas: None,
        }
    }
}
