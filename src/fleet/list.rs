//! Filtered, sorted truck list.

use time::UtcOffset;

use super::classify::{IconCategory, StatusClass, classify};
use super::model::TruckSnapshotRecord;
use super::snapshot::Snapshot;
use super::timefmt;

pub const NO_MATCHES_TEXT: &str = "No trucks match your search or available.";
pub const LOAD_FAILED_TEXT: &str = "Error loading truck data. Please try again later.";

/// Normalized search term.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    raw: String,
    needle: String,
}

impl FilterState {
    pub fn new(term: &str) -> Self {
        Self {
            raw: term.to_string(),
            needle: term.to_lowercase(),
        }
    }

    /// Term as typed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Case-insensitive substring match on the id or any shipment sku.
    pub fn matches(&self, record: &TruckSnapshotRecord) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        record.truck_id.to_lowercase().contains(&self.needle)
            || record
                .shipments
                .iter()
                .any(|shipment| shipment.sku.to_lowercase().contains(&self.needle))
    }
}

/// Records passing `filter`, delayed trucks first, then by id.
pub fn filtered_sorted<'a>(
    snapshot: &'a Snapshot,
    filter: &FilterState,
) -> Vec<&'a TruckSnapshotRecord> {
    let mut rows: Vec<&TruckSnapshotRecord> = snapshot
        .records()
        .iter()
        .filter(|record| filter.matches(record))
        .collect();
    rows.sort_by(|a, b| {
        b.is_delayed
            .cmp(&a.is_delayed)
            .then_with(|| a.truck_id.cmp(&b.truck_id))
    });
    rows
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListRow {
    pub truck_id: String,
    pub business_unit: String,
    pub status_label: String,
    pub status_class: StatusClass,
    pub route: String,
    pub eta: String,
    pub delayed: bool,
    pub active: bool,
    pub icon: IconCategory,
}

impl ListRow {
    fn from_record(record: &TruckSnapshotRecord, selected: Option<&str>, offset: UtcOffset) -> Self {
        let classification = classify(record);
        Self {
            truck_id: record.truck_id.clone(),
            business_unit: record.business_unit.label().to_string(),
            status_label: classification.status_label,
            status_class: classification.status_class,
            route: format!(
                "{} {} {}",
                record.origin,
                record.direction.arrow(),
                record.destination
            ),
            eta: timefmt::clock(record.eta, offset),
            delayed: record.is_delayed,
            active: selected == Some(record.truck_id.as_str()),
            icon: classification.icon,
        }
    }
}

/// What the list region shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ListView {
    #[default]
    Loading,
    /// The snapshot holds no trucks at all.
    Empty,
    NoMatches,
    Rows(Vec<ListRow>),
    Failed(String),
}

impl ListView {
    pub fn rows(&self) -> &[ListRow] {
        match self {
            Self::Rows(rows) => rows,
            _ => &[],
        }
    }

    /// Placeholder or error text for non-row states.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Loading => Some("Loading trucks..."),
            Self::Empty | Self::NoMatches => Some(NO_MATCHES_TEXT),
            Self::Failed(message) => Some(message),
            Self::Rows(_) => None,
        }
    }
}

pub fn build_list_view(
    snapshot: &Snapshot,
    filter: &FilterState,
    selected: Option<&str>,
    offset: UtcOffset,
) -> ListView {
    if snapshot.is_empty() {
        return ListView::Empty;
    }
    let rows: Vec<ListRow> = filtered_sorted(snapshot, filter)
        .into_iter()
        .map(|record| ListRow::from_record(record, selected, offset))
        .collect();
    if rows.is_empty() {
        ListView::NoMatches
    } else {
        ListView::Rows(rows)
    }
}
