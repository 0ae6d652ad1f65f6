use serde_json::Value;
use thiserror::Error;
use time::OffsetDateTime;

use super::model::TruckSnapshotRecord;

/// Errors for payloads that are not a truck array at all.
#[derive(Debug, Error)]
pub enum SnapshotParseError {
    #[error("Snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Snapshot must be a JSON array, got {0}")]
    NotAnArray(&'static str),
}

/// One complete pull of every truck, replacing the previous one wholesale.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    records: Vec<TruckSnapshotRecord>,
    fetched_at: OffsetDateTime,
    dropped: usize,
}

impl Snapshot {
    pub fn new(records: Vec<TruckSnapshotRecord>) -> Self {
        Self {
            records,
            fetched_at: OffsetDateTime::now_utc(),
            dropped: 0,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Decode a `/trucks` response body.
    ///
    /// Entries that cannot be keyed are dropped and counted; every other
    /// malformation is absorbed by the record decoder.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, SnapshotParseError> {
        let value: Value = serde_json::from_slice(bytes)?;
        let Value::Array(items) = value else {
            return Err(SnapshotParseError::NotAnArray(json_kind(&value)));
        };
        let mut records = Vec::with_capacity(items.len());
        let mut dropped = 0;
        for (index, item) in items.into_iter().enumerate() {
            match serde_json::from_value::<TruckSnapshotRecord>(item) {
                Ok(record) => records.push(record),
                Err(err) => {
                    dropped += 1;
                    tracing::warn!("Dropping truck record #{index}: {err}");
                }
            }
        }
        Ok(Self {
            records,
            fetched_at: OffsetDateTime::now_utc(),
            dropped,
        })
    }

    pub fn records(&self) -> &[TruckSnapshotRecord] {
        &self.records
    }

    /// First record carrying `truck_id`.
    pub fn get(&self, truck_id: &str) -> Option<&TruckSnapshotRecord> {
        self.records.iter().find(|record| record.truck_id == truck_id)
    }

    pub fn contains(&self, truck_id: &str) -> bool {
        self.get(truck_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn fetched_at(&self) -> OffsetDateTime {
        self.fetched_at
    }

    /// Number of entries discarded while decoding.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unkeyed_entries_are_dropped_and_counted() {
        let body = br#"[
            {"truck_id": "TRK1"},
            {"status": "idle"},
            42,
            {"truck_id": "TRK2", "latitude": "bad"}
        ]"#;
        let snapshot = Snapshot::from_json_slice(body).unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.dropped(), 2);
        assert!(snapshot.contains("TRK2"));
    }

    #[test]
    fn object_payload_is_rejected() {
        let err = Snapshot::from_json_slice(br#"{"error": "down"}"#).unwrap_err();
        assert!(matches!(err, SnapshotParseError::NotAnArray("an object")));
    }

    #[test]
    fn invalid_json_is_rejected() {
        assert!(matches!(
            Snapshot::from_json_slice(b"<html>"),
            Err(SnapshotParseError::Json(_))
        ));
    }
}
