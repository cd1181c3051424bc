//! Visit recency statistics
//!
//! Read-only derivations over a [`VisitLookup`]: days since the last visit,
//! visit counts, display labels and the tiered badge color.

use chrono::{DateTime, Utc};

use shared::{AddressKey, SharedResult, VisitRecord};
use crate::traits::{Clock, VisitLookup};
use crate::types::{StatusColor, VisitBadge};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Whole days elapsed from `last` to `now`, rounded down
///
/// A `last` later than `now` (clock skew between devices) counts as today.
pub fn days_between(last: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - last).num_milliseconds().div_euclid(MILLIS_PER_DAY).max(0)
}

/// Human-readable recency
pub fn last_visit_label(days: Option<i64>) -> String {
    match days {
        None => "Never visited".to_string(),
        Some(0) => "Visited today".to_string(),
        Some(1) => "Visited yesterday".to_string(),
        Some(n) => format!("Visited {n} days ago"),
    }
}

/// Badge color tier; `None` means no recency indicator at all
pub fn status_color(days: Option<i64>) -> Option<StatusColor> {
    let days = days?;
    let color = match days {
        i64::MIN..=0 => StatusColor::Green,
        1..=3 => StatusColor::Yellow,
        4..=7 => StatusColor::Cyan,
        8..=14 => StatusColor::Purple,
        _ => StatusColor::Red,
    };
    Some(color)
}

/// Recency view over a visit lookup at the clock's current time
pub struct VisitStats<'a> {
    lookup: &'a dyn VisitLookup,
    clock: &'a dyn Clock,
}

impl<'a> VisitStats<'a> {
    pub fn new(lookup: &'a dyn VisitLookup, clock: &'a dyn Clock) -> Self {
        Self { lookup, clock }
    }

    pub fn days_since_last_visit(&self, key: &AddressKey) -> SharedResult<Option<i64>> {
        let record = self.lookup.lookup(key)?;
        Ok(self.days_for(record.as_ref()))
    }

    pub fn visit_count(&self, key: &AddressKey) -> SharedResult<u32> {
        Ok(self.lookup.lookup(key)?.map_or(0, |r| r.visit_count))
    }

    pub fn last_visit_label(&self, key: &AddressKey) -> SharedResult<String> {
        Ok(last_visit_label(self.days_since_last_visit(key)?))
    }

    /// Label, color and count from a single lookup
    pub fn badge(&self, key: &AddressKey) -> SharedResult<VisitBadge> {
        let record = self.lookup.lookup(key)?;
        let days = self.days_for(record.as_ref());

        Ok(VisitBadge {
            label: last_visit_label(days),
            color: status_color(days),
            visit_count: record.map_or(0, |r| r.visit_count),
        })
    }

    fn days_for(&self, record: Option<&VisitRecord>) -> Option<i64> {
        let last = record?.last_visited?;
        Some(days_between(last, self.clock.now()))
    }
}
