use time::UtcOffset;

use super::classify::{StatusClass, classify};
use super::model::TruckSnapshotRecord;
use super::timefmt::{self, NOT_AVAILABLE};

pub const PLACEHOLDER_TEXT: &str = "Click on a truck in the list or on the map to see details.";
pub const NO_SHIPMENTS_TEXT: &str = "No shipment data available for this truck.";

/// Content of the detail panel.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DetailView {
    #[default]
    Placeholder,
    Truck(Box<TruckDetail>),
}

impl DetailView {
    pub fn truck_id(&self) -> Option<&str> {
        match self {
            Self::Placeholder => None,
            Self::Truck(detail) => Some(&detail.truck_id),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TruckDetail {
    pub truck_id: String,
    pub business_unit: String,
    pub status_label: String,
    pub status_class: StatusClass,
    pub route: String,
    pub direction: String,
    pub speed: String,
    pub latitude: String,
    pub longitude: String,
    pub eta: String,
    pub last_updated: String,
    pub shipments: Vec<ShipmentLine>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShipmentLine {
    pub order_id: String,
    pub sku: String,
    pub quantity: String,
    pub expected_arrival: String,
}

impl TruckDetail {
    pub fn from_record(record: &TruckSnapshotRecord, offset: UtcOffset) -> Self {
        let classification = classify(record);
        Self {
            truck_id: record.truck_id.clone(),
            business_unit: record.business_unit.label().to_string(),
            status_label: classification.status_label,
            status_class: classification.status_class,
            route: record.route_label(),
            direction: record.direction.label().to_string(),
            speed: format!("{} km/h", record.speed_or_zero()),
            latitude: coordinate(record.latitude),
            longitude: coordinate(record.longitude),
            eta: timefmt::date_time(record.eta, offset),
            last_updated: timefmt::date_time(record.last_updated, offset),
            shipments: record
                .shipments
                .iter()
                .map(|shipment| ShipmentLine {
                    order_id: shipment
                        .order_id
                        .clone()
                        .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                    sku: shipment.sku.clone(),
                    quantity: shipment.quantity.to_string(),
                    expected_arrival: timefmt::date_time(shipment.expected_arrival_time, offset),
                })
                .collect(),
        }
    }

    /// Text shown instead of the shipment table when there is nothing to list.
    pub fn empty_shipments_text(&self) -> Option<&'static str> {
        self.shipments.is_empty().then_some(NO_SHIPMENTS_TEXT)
    }
}

fn coordinate(value: Option<f64>) -> String {
    value
        .map(|value| format!("{value:.6}"))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
