//! Wire records received from the tracking backend.
//!
//! Truck records are decoded leniently: a bad coordinate or a missing optional
//! field never fails the surrounding snapshot. Only records that cannot be
//! keyed (no string `truck_id`) are dropped.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::timefmt;

/// Geographic position in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Organizational fleet a truck belongs to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BusinessUnit {
    Sermsuk,
    Tbl,
    /// Any value the dashboard has no styling for, kept verbatim.
    Other(String),
    #[default]
    Unknown,
}

impl BusinessUnit {
    pub fn label(&self) -> &str {
        match self {
            Self::Sermsuk => "Sermsuk",
            Self::Tbl => "TBL",
            Self::Other(raw) => raw,
            Self::Unknown => "Unknown",
        }
    }
}

impl From<String> for BusinessUnit {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Sermsuk" => Self::Sermsuk,
            "TBL" => Self::Tbl,
            "" => Self::Unknown,
            _ => Self::Other(raw),
        }
    }
}

impl fmt::Display for BusinessUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Leg of the factory/warehouse round trip.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Factory to warehouse.
    Outbound,
    /// Warehouse to factory.
    Inbound,
    Other(String),
    #[default]
    Unknown,
}

impl Direction {
    pub fn label(&self) -> &str {
        match self {
            Self::Outbound => "outbound",
            Self::Inbound => "inbound",
            Self::Other(raw) => raw,
            Self::Unknown => "unknown",
        }
    }

    /// Arrow drawn between origin and destination in list rows.
    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Outbound => "→",
            Self::Inbound => "←",
            Self::Other(_) | Self::Unknown => "–",
        }
    }
}

impl From<String> for Direction {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "outbound" => Self::Outbound,
            "inbound" => Self::Inbound,
            "" => Self::Unknown,
            _ => Self::Other(raw),
        }
    }
}

/// Operational status reported by the control tower.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TruckStatus(String);

impl TruckStatus {
    pub const EN_ROUTE: &'static str = "en_route";

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_en_route(&self) -> bool {
        self.0 == Self::EN_ROUTE
    }
}

impl Default for TruckStatus {
    fn default() -> Self {
        Self("unknown".to_string())
    }
}

impl From<String> for TruckStatus {
    fn from(raw: String) -> Self {
        if raw.is_empty() {
            Self::default()
        } else {
            Self(raw)
        }
    }
}

/// One order line carried by a truck.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ShipmentRecord {
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub order_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub sku: String,
    #[serde(default, deserialize_with = "lenient::number_or_zero")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub expected_arrival_time: Option<OffsetDateTime>,
}

/// State of a single truck as of one poll cycle.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TruckSnapshotRecord {
    pub truck_id: String,
    #[serde(default, deserialize_with = "lenient::parsed")]
    pub business_unit: BusinessUnit,
    #[serde(default, deserialize_with = "lenient::parsed")]
    pub direction: Direction,
    #[serde(default, deserialize_with = "lenient::string")]
    pub origin: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub destination: String,
    #[serde(default, deserialize_with = "lenient::parsed")]
    pub status: TruckStatus,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_delayed: bool,
    /// `None` when the backend sent something other than a finite number.
    #[serde(default, deserialize_with = "lenient::number")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub speed_kmh: Option<f64>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub eta: Option<OffsetDateTime>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub last_updated: Option<OffsetDateTime>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub shipments: Vec<ShipmentRecord>,
}

impl TruckSnapshotRecord {
    /// Position when both coordinates are valid numbers.
    pub fn position(&self) -> Option<LatLon> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(LatLon::new(lat, lon)),
            _ => None,
        }
    }

    /// Reported speed, with an absent value treated as standing still.
    pub fn speed_or_zero(&self) -> f64 {
        self.speed_kmh.unwrap_or(0.0)
    }

    pub fn route_label(&self) -> String {
        format!("{} → {}", self.origin, self.destination)
    }
}

/// Fixed facility shown on the map.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FacilityLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl FacilityLocation {
    pub fn position(&self) -> LatLon {
        LatLon::new(self.latitude, self.longitude)
    }
}

/// The two static facilities the fleet shuttles between.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FacilityKind {
    Warehouse,
    Factory,
}

impl FacilityKind {
    pub const ALL: [FacilityKind; 2] = [FacilityKind::Warehouse, FacilityKind::Factory];

    /// Path segment of the location endpoint.
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Warehouse => "warehouse-location",
            Self::Factory => "factory-location",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Warehouse => "Warehouse",
            Self::Factory => "Factory",
        }
    }
}

/// Entry of the warehouse picker.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Warehouse {
    pub warehouse_id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SkuDetail {
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::number_or_zero")]
    pub quantity: f64,
}

/// Vehicle heading to a warehouse, with its cargo.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct IncomingShipment {
    #[serde(default, deserialize_with = "lenient::string")]
    pub registration_number: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub eta_hours: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub scheduled_arrival_time: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub sku_details: Vec<SkuDetail>,
}

mod lenient {
    use serde::{Deserialize, Deserializer, de::DeserializeOwned};
    use serde_json::Value;
    use time::OffsetDateTime;

    use super::timefmt;

    pub(super) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(text) => text,
            Value::Number(number) => number.to_string(),
            Value::Bool(flag) => flag.to_string(),
            _ => String::new(),
        })
    }

    pub(super) fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = string(deserializer)?;
        Ok((!text.is_empty()).then_some(text))
    }

    pub(super) fn parsed<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: From<String>,
    {
        string(deserializer).map(T::from)
    }

    pub(super) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
    }

    pub(super) fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Value::deserialize(deserializer)?
            .as_f64()
            .filter(|value| value.is_finite()))
    }

    pub(super) fn number_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        number(deserializer).map(|value| value.unwrap_or(0.0))
    }

    pub(super) fn timestamp<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Value::String(raw) = Value::deserialize(deserializer)? else {
            return Ok(None);
        };
        let parsed = timefmt::parse_timestamp(&raw);
        if parsed.is_none() && !raw.is_empty() {
            tracing::debug!("Unparseable timestamp {raw:?}");
        }
        Ok(parsed)
    }

    /// Array of `T`; anything else decodes as empty and unreadable items are dropped.
    pub(super) fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let Value::Array(items) = Value::deserialize(deserializer)? else {
            return Ok(Vec::new());
        };
        Ok(items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<T>(item) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!("Dropping unreadable {}: {err}", std::any::type_name::<T>());
                    None
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> TruckSnapshotRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn non_numeric_coordinates_decode_as_missing() {
        let record = decode(json!({
            "truck_id": "TRK1",
            "latitude": "bad",
            "longitude": 100.5
        }));
        assert_eq!(record.latitude, None);
        assert_eq!(record.longitude, Some(100.5));
        assert!(record.position().is_none());
    }

    #[test]
    fn absent_optional_fields_fall_back_to_defaults() {
        let record = decode(json!({ "truck_id": "TRK1" }));
        assert_eq!(record.speed_or_zero(), 0.0);
        assert_eq!(record.eta, None);
        assert!(record.shipments.is_empty());
        assert!(!record.is_delayed);
        assert_eq!(record.business_unit, BusinessUnit::Unknown);
    }

    #[test]
    fn unknown_enumerations_are_preserved() {
        let record = decode(json!({
            "truck_id": "TRK1",
            "business_unit": "Beverages",
            "direction": "sideways",
            "status": "stopped"
        }));
        assert_eq!(record.business_unit, BusinessUnit::Other("Beverages".into()));
        assert_eq!(record.direction, Direction::Other("sideways".into()));
        assert_eq!(record.status.as_str(), "stopped");
    }

    #[test]
    fn shipments_tolerate_nulls() {
        let record = decode(json!({
            "truck_id": "TRK1",
            "shipments": [
                { "order_id": null, "sku": "SKU-1", "quantity": 12, "expected_arrival_time": null },
                { "sku": "SKU-2" }
            ]
        }));
        assert_eq!(record.shipments.len(), 2);
        assert_eq!(record.shipments[0].order_id, None);
        assert_eq!(record.shipments[0].quantity, 12.0);
        assert_eq!(record.shipments[1].sku, "SKU-2");
    }

    #[test]
    fn incoming_rows_with_null_sku_details_still_decode() {
        let rows: Vec<IncomingShipment> = serde_json::from_value(json!([
            {
                "registration_number": "70-1234",
                "eta_hours": 1.5,
                "sku_details": [{ "description": "Water 600ml", "quantity": 24 }, null]
            },
            { "registration_number": "70-5678", "eta_hours": null, "sku_details": null },
            { "registration_number": "70-9999", "sku_details": "n/a" }
        ]))
        .unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].sku_details.len(), 1);
        assert_eq!(rows[0].sku_details[0].quantity, 24.0);
        assert!(rows[1].sku_details.is_empty());
        assert_eq!(rows[1].eta_hours, None);
        assert!(rows[2].sku_details.is_empty());
    }

    #[test]
    fn missing_truck_id_is_rejected() {
        let result = serde_json::from_value::<TruckSnapshotRecord>(json!({ "status": "idle" }));
        assert!(result.is_err());
    }
}
