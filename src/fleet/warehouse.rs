//! Warehouse point of view: incoming shipments for one chosen warehouse.

use std::cmp::Ordering;

use super::model::{IncomingShipment, Warehouse};
use super::timefmt::NOT_AVAILABLE;
use crate::api::FetchError;

pub const WAREHOUSES_FAILED_TEXT: &str = "Error loading warehouses";
pub const NO_INCOMING_TEXT: &str = "No incoming shipments for this warehouse.";
pub const INCOMING_FAILED_TEXT: &str = "Error loading shipments. Please try again.";
pub const NO_SKU_TEXT: &str = "No SKU details available";

#[derive(Clone, Debug, Default, PartialEq)]
pub enum WarehousePicker {
    #[default]
    Loading,
    Ready(Vec<Warehouse>),
    Failed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IncomingRow {
    pub registration_number: String,
    pub eta: String,
    pub scheduled_arrival: String,
    pub sku_lines: Vec<String>,
}

impl IncomingRow {
    fn from_shipment(shipment: &IncomingShipment) -> Self {
        let sku_lines = if shipment.sku_details.is_empty() {
            vec![NO_SKU_TEXT.to_string()]
        } else {
            shipment
                .sku_details
                .iter()
                .map(|sku| format!("{} (Quantity: {})", sku.description, sku.quantity))
                .collect()
        };
        Self {
            registration_number: shipment.registration_number.clone(),
            eta: shipment
                .eta_hours
                .map(|hours| format!("{hours:.2} hours"))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            scheduled_arrival: shipment
                .scheduled_arrival_time
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            sku_lines,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum IncomingView {
    #[default]
    NotSelected,
    Loading,
    Empty,
    Loaded(Vec<IncomingRow>),
    Failed,
}

impl IncomingView {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::NotSelected => Some("Select a warehouse to see incoming shipments."),
            Self::Loading => Some("Loading shipments..."),
            Self::Empty => Some(NO_INCOMING_TEXT),
            Self::Failed => Some(INCOMING_FAILED_TEXT),
            Self::Loaded(_) => None,
        }
    }
}

/// Orders shipments by ETA, unknown ETAs last, keeping input order on ties.
pub fn sort_incoming(shipments: &mut [IncomingShipment]) {
    shipments.sort_by(|a, b| match (a.eta_hours, b.eta_hours) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Picker and incoming-shipment state, with last-request-wins sequencing.
#[derive(Clone, Debug, Default)]
pub struct WarehouseBoard {
    picker: WarehousePicker,
    selected: Option<String>,
    incoming: IncomingView,
    latest_request: u64,
}

impl WarehouseBoard {
    pub fn picker(&self) -> &WarehousePicker {
        &self.picker
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn incoming(&self) -> &IncomingView {
        &self.incoming
    }

    pub fn set_warehouses(&mut self, warehouses: Vec<Warehouse>) {
        self.picker = WarehousePicker::Ready(warehouses);
    }

    pub fn set_warehouses_failed(&mut self) {
        self.picker = WarehousePicker::Failed;
    }

    /// Start loading `warehouse_id`; returns the sequence the response must carry.
    pub fn begin_request(&mut self, warehouse_id: &str) -> u64 {
        self.latest_request += 1;
        self.selected = Some(warehouse_id.to_string());
        self.incoming = IncomingView::Loading;
        self.latest_request
    }

    /// Clear the selection back to the prompt.
    pub fn clear_selection(&mut self) {
        self.latest_request += 1;
        self.selected = None;
        self.incoming = IncomingView::NotSelected;
    }

    /// Apply a response; returns false when a newer request superseded it.
    pub fn apply_incoming(
        &mut self,
        seq: u64,
        result: Result<Vec<IncomingShipment>, FetchError>,
    ) -> bool {
        if seq != self.latest_request {
            tracing::debug!(
                "Discarding incoming shipments #{seq}; latest is #{}",
                self.latest_request
            );
            return false;
        }
        self.incoming = match result {
            Ok(mut shipments) if !shipments.is_empty() => {
                sort_incoming(&mut shipments);
                IncomingView::Loaded(shipments.iter().map(IncomingRow::from_shipment).collect())
            }
            Ok(_) => IncomingView::Empty,
            Err(err) => {
                tracing::warn!("Loading incoming shipments failed: {err}");
                IncomingView::Failed
            }
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::model::SkuDetail;

    fn shipment(reg: &str, eta: Option<f64>) -> IncomingShipment {
        IncomingShipment {
            registration_number: reg.into(),
            eta_hours: eta,
            scheduled_arrival_time: None,
            sku_details: Vec::new(),
        }
    }

    #[test]
    fn unknown_eta_sorts_last_and_ties_stay_stable() {
        let mut shipments = vec![
            shipment("A", None),
            shipment("B", Some(2.0)),
            shipment("C", Some(0.5)),
            shipment("D", None),
            shipment("E", Some(2.0)),
        ];
        sort_incoming(&mut shipments);
        let order: Vec<&str> = shipments
            .iter()
            .map(|s| s.registration_number.as_str())
            .collect();
        assert_eq!(order, vec!["C", "B", "E", "A", "D"]);
    }

    #[test]
    fn rows_format_eta_and_sku_lines() {
        let mut with_skus = shipment("REG-1", Some(1.234));
        with_skus.sku_details.push(SkuDetail {
            description: "Cola 330ml".into(),
            quantity: 24.0,
        });
        let row = IncomingRow::from_shipment(&with_skus);
        assert_eq!(row.eta, "1.23 hours");
        assert_eq!(row.scheduled_arrival, NOT_AVAILABLE);
        assert_eq!(row.sku_lines, vec!["Cola 330ml (Quantity: 24)".to_string()]);

        let bare = IncomingRow::from_shipment(&shipment("REG-2", None));
        assert_eq!(bare.eta, NOT_AVAILABLE);
        assert_eq!(bare.sku_lines, vec![NO_SKU_TEXT.to_string()]);
    }

    #[test]
    fn superseded_response_is_discarded() {
        let mut board = WarehouseBoard::default();
        let first = board.begin_request("W1");
        let second = board.begin_request("W2");
        assert!(!board.apply_incoming(first, Ok(vec![shipment("OLD", None)])));
        assert_eq!(board.incoming(), &IncomingView::Loading);
        assert!(board.apply_incoming(second, Ok(Vec::new())));
        assert_eq!(board.incoming(), &IncomingView::Empty);
        assert_eq!(board.selected(), Some("W2"));
    }

    #[test]
    fn failure_shows_error_state() {
        let mut board = WarehouseBoard::default();
        let seq = board.begin_request("W1");
        board.apply_incoming(seq, Err(FetchError::BadStatus { status: 500 }));
        assert_eq!(board.incoming().message(), Some(INCOMING_FAILED_TEXT));
    }
}
