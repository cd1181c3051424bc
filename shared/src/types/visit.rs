//! Visit history records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::address::AddressKey;

/// Accumulated visit history for one address key
///
/// `history` is append-only and `visit_count == history.len()` always holds.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitRecord {
    pub visit_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_visited: Option<DateTime<Utc>>,
    #[serde(default)]
    pub history: Vec<DateTime<Utc>>,
}

impl VisitRecord {
    /// Append a visit, keeping the count and last-visited time in step
    pub fn record(&mut self, timestamp: DateTime<Utc>) {
        self.history.push(timestamp);
        self.visit_count = self.history.len() as u32;
        self.last_visited = Some(timestamp);
    }
}

/// Every visit record of a single user, keyed by address
pub type VisitSnapshot = HashMap<AddressKey, VisitRecord>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_record_appends_in_call_order() {
        let mut record = VisitRecord::default();
        let t1 = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap();
        let t3 = Utc.with_ymd_and_hms(2024, 4, 30, 9, 0, 0).unwrap();

        record.record(t1);
        record.record(t2);
        record.record(t3);

        assert_eq!(record.visit_count, 3);
        assert_eq!(record.history, vec![t1, t2, t3]);
        assert_eq!(record.last_visited, Some(t3));
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let mut record = VisitRecord::default();
        record.record(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["visitCount"], 1);
        assert_eq!(json["lastVisited"], "2024-01-02T03:04:05Z");
        assert_eq!(json["history"].as_array().map(|h| h.len()), Some(1));
    }
}
