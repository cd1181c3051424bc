//! Test fixtures for planner service tests

use chrono::{DateTime, Duration, TimeZone, Utc};
use futures_util::TryStreamExt;
use serde_json::{Value, json};

use shared::{AddressKey, UserId};
use crate::core::address_key;
use crate::traits::CsvStream;

pub fn test_user() -> UserId {
    UserId::parse("user-1").unwrap()
}

pub fn other_user() -> UserId {
    UserId::parse("user-2").unwrap()
}

pub fn main_street() -> AddressKey {
    address_key("123 Main St")
}

/// Fixed base instant for visit timestamps
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 10, 8, 30, 0).unwrap()
}

/// `count` timestamps one day apart starting at `base_time()`
pub fn daily_visits(count: usize) -> Vec<DateTime<Utc>> {
    (0..count).map(|i| base_time() + Duration::days(i as i64)).collect()
}

/// Directions response in the provider's wire format
pub fn directions_ok(waypoint_order: &[usize]) -> Value {
    json!({
        "geocoded_waypoints": [],
        "routes": [{
            "summary": "I-5 N",
            "legs": [],
            "waypoint_order": waypoint_order,
        }],
        "status": "OK"
    })
}

pub async fn collect_csv(stream: CsvStream) -> String {
    let chunks: Vec<_> = stream.try_collect().await.unwrap();
    let bytes: Vec<u8> = chunks.iter().flat_map(|c| c.iter().copied()).collect();
    String::from_utf8(bytes).unwrap()
}
