//! Visual classification of trucks: marker icon plus status text.

use super::model::{BusinessUnit, Direction, FacilityKind, TruckSnapshotRecord};

/// Closed set of marker icons the map knows how to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IconCategory {
    SermsukOutbound,
    SermsukInbound,
    TblOutbound,
    TblInbound,
    /// Overrides every business unit/direction combination.
    Delayed,
    Warehouse,
    Factory,
    Default,
}

impl IconCategory {
    /// Icon for an on-time truck of `unit` travelling `direction`.
    pub fn fleet(unit: &BusinessUnit, direction: &Direction) -> Self {
        match (unit, direction) {
            (BusinessUnit::Sermsuk, Direction::Outbound) => Self::SermsukOutbound,
            (BusinessUnit::Sermsuk, Direction::Inbound) => Self::SermsukInbound,
            (BusinessUnit::Tbl, Direction::Outbound) => Self::TblOutbound,
            (BusinessUnit::Tbl, Direction::Inbound) => Self::TblInbound,
            _ => Self::Default,
        }
    }

    pub fn facility(kind: FacilityKind) -> Self {
        match kind {
            FacilityKind::Warehouse => Self::Warehouse,
            FacilityKind::Factory => Self::Factory,
        }
    }

    /// Stable asset key.
    pub fn key(self) -> &'static str {
        match self {
            Self::SermsukOutbound => "sermsuk_outbound",
            Self::SermsukInbound => "sermsuk_inbound",
            Self::TblOutbound => "tbl_outbound",
            Self::TblInbound => "tbl_inbound",
            Self::Delayed => "delayed",
            Self::Warehouse => "warehouse",
            Self::Factory => "factory",
            Self::Default => "default",
        }
    }

    pub fn is_facility(self) -> bool {
        matches!(self, Self::Warehouse | Self::Factory)
    }
}

/// Status styling hook: the base class plus an optional delayed modifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusClass {
    pub base: String,
    pub delayed: bool,
}

impl StatusClass {
    pub const DELAYED: &'static str = "status-delayed";

    /// Every class name in application order, base first.
    pub fn classes(&self) -> Vec<String> {
        let mut classes = vec![self.base.clone()];
        if self.delayed {
            classes.push(Self::DELAYED.to_string());
        }
        classes
    }
}

impl std::fmt::Display for StatusClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.classes().join(" "))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classification {
    pub icon: IconCategory,
    pub status_label: String,
    pub status_class: StatusClass,
}

/// Suffix appended to the status label of delayed trucks.
pub const DELAYED_SUFFIX: &str = " (Delayed)";

pub fn classify(record: &TruckSnapshotRecord) -> Classification {
    let icon = if record.is_delayed {
        IconCategory::Delayed
    } else {
        IconCategory::fleet(&record.business_unit, &record.direction)
    };
    let mut status_label = humanize_status(record.status.as_str());
    if record.is_delayed {
        status_label.push_str(DELAYED_SUFFIX);
    }
    Classification {
        icon,
        status_label,
        status_class: StatusClass {
            base: status_class_base(record.status.as_str()),
            delayed: record.is_delayed,
        },
    }
}

/// `en_route` becomes `En Route`.
pub fn humanize_status(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut at_word_start = true;
    for ch in raw.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if at_word_start && ch.is_alphanumeric() {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = !ch.is_alphanumeric();
    }
    out
}

fn status_class_base(raw: &str) -> String {
    let joined = raw
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    format!("status-{joined}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::model::TruckStatus;

    fn record(unit: BusinessUnit, direction: Direction, delayed: bool) -> TruckSnapshotRecord {
        TruckSnapshotRecord {
            truck_id: "TRK1".into(),
            business_unit: unit,
            direction,
            origin: "Factory".into(),
            destination: "Warehouse".into(),
            status: TruckStatus::new("en_route"),
            is_delayed: delayed,
            latitude: Some(13.75),
            longitude: Some(100.52),
            speed_kmh: None,
            eta: None,
            last_updated: None,
            shipments: Vec::new(),
        }
    }

    #[test]
    fn sermsuk_outbound_on_time() {
        let result = classify(&record(BusinessUnit::Sermsuk, Direction::Outbound, false));
        assert_eq!(result.icon, IconCategory::SermsukOutbound);
        assert_eq!(result.icon.key(), "sermsuk_outbound");
    }

    #[test]
    fn delay_overrides_every_combination() {
        for unit in [BusinessUnit::Sermsuk, BusinessUnit::Tbl, BusinessUnit::Other("X".into())] {
            for direction in [Direction::Outbound, Direction::Inbound] {
                let result = classify(&record(unit.clone(), direction, true));
                assert_eq!(result.icon, IconCategory::Delayed);
            }
        }
    }

    #[test]
    fn all_four_fleet_combinations_are_distinct() {
        let icons = [
            IconCategory::fleet(&BusinessUnit::Sermsuk, &Direction::Outbound),
            IconCategory::fleet(&BusinessUnit::Sermsuk, &Direction::Inbound),
            IconCategory::fleet(&BusinessUnit::Tbl, &Direction::Outbound),
            IconCategory::fleet(&BusinessUnit::Tbl, &Direction::Inbound),
        ];
        let keys: std::collections::HashSet<_> = icons.iter().map(|icon| icon.key()).collect();
        assert_eq!(keys.len(), 4);
        assert!(!icons.contains(&IconCategory::Default));
    }

    #[test]
    fn unrecognized_unit_uses_default_icon() {
        let result = classify(&record(
            BusinessUnit::Other("Beverages".into()),
            Direction::Outbound,
            false,
        ));
        assert_eq!(result.icon, IconCategory::Default);
    }

    #[test]
    fn status_label_and_classes() {
        let on_time = classify(&record(BusinessUnit::Tbl, Direction::Inbound, false));
        assert_eq!(on_time.status_label, "En Route");
        assert_eq!(on_time.status_class.to_string(), "status-en_route");

        let late = classify(&record(BusinessUnit::Tbl, Direction::Inbound, true));
        assert_eq!(late.status_label, "En Route (Delayed)");
        assert_eq!(
            late.status_class.classes(),
            vec!["status-en_route".to_string(), "status-delayed".to_string()]
        );
    }

    #[test]
    fn humanize_replaces_every_underscore() {
        assert_eq!(humanize_status("waiting_at_dock"), "Waiting At Dock");
        assert_eq!(humanize_status("idle"), "Idle");
    }

    #[test]
    fn class_base_joins_whitespace() {
        assert_eq!(status_class_base("In Transit"), "status-in_transit");
    }
}
