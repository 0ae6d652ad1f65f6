use time::UtcOffset;

use super::classify::DELAYED_SUFFIX;
use super::model::{FacilityLocation, TruckSnapshotRecord};
use super::timefmt;

/// Action offered by a popup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PopupAction {
    /// Select the truck and open its detail panel.
    ViewDetails(String),
}

impl PopupAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::ViewDetails(_) => "View Details",
        }
    }
}

/// Text bound to a marker, rebuilt every cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct PopupContent {
    pub title: String,
    pub lines: Vec<String>,
    pub action: Option<PopupAction>,
}

impl PopupContent {
    pub fn for_truck(record: &TruckSnapshotRecord, offset: UtcOffset) -> Self {
        let mut status = record.status.as_str().replace('_', " ");
        if record.is_delayed {
            status.push_str(DELAYED_SUFFIX);
        }
        Self {
            title: format!("{} ({})", record.truck_id, record.business_unit),
            lines: vec![
                format!("Status: {status}"),
                format!("Speed: {} km/h", record.speed_or_zero()),
                format!("Direction: {}", record.route_label()),
                format!("Calc. ETA: {}", timefmt::clock(record.eta, offset)),
            ],
            action: Some(PopupAction::ViewDetails(record.truck_id.clone())),
        }
    }

    pub fn for_facility(location: &FacilityLocation) -> Self {
        Self {
            title: location.name.clone(),
            lines: vec![format!(
                "({:.4}, {:.4})",
                location.latitude, location.longitude
            )],
            action: None,
        }
    }
}
