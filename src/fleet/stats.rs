use super::snapshot::Snapshot;

/// Fleet-wide counters shown in the header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FleetStats {
    pub total: usize,
    pub en_route: usize,
    pub delayed: usize,
}

impl FleetStats {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        snapshot
            .records()
            .iter()
            .fold(Self::default(), |mut stats, record| {
                stats.total += 1;
                stats.en_route += usize::from(record.status.is_en_route());
                stats.delayed += usize::from(record.is_delayed);
                stats
            })
    }
}
