// src/models/slot.rs

//! Slot and area domain models.
//!
//! The portal describes each bookable unit as an "area" (a numbered court)
//! paired with a "stock" record carrying the time-range label. Availability
//! is indexed by [`SlotKey`] so a configured [`Target`] can be matched
//! without string concatenation.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

/// Prefix the portal uses for court names ("场地1", "场地2", ...).
const AREA_NAME_PREFIX: &str = "场地";

/// A desired reservation slot from configuration: an hour of day and
/// a numbered court.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct Target {
    /// Hour of day (24h); the bookable range starts at this hour
    pub time: u32,

    /// Court number as displayed by the portal
    pub number: u32,
}

impl Target {
    /// Court name as the portal displays it, e.g. `场地3`.
    pub fn area_name(&self) -> String {
        format!("{}{}", AREA_NAME_PREFIX, self.number)
    }

    /// Time-range label as the portal encodes it, e.g. `14:01-15:00`.
    ///
    /// The portal's hourly stock runs from one minute past the hour to the
    /// top of the next hour.
    pub fn time_no(&self) -> String {
        format!("{:02}:01-{:02}:00", self.time, self.time + 1)
    }

    /// Availability lookup key for this target.
    pub fn slot_key(&self) -> SlotKey {
        SlotKey {
            time_no: self.time_no(),
            area_name: self.area_name(),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.time_no(), self.area_name())
    }
}

/// Composite availability key: time-range label plus court name.
///
/// The portal's own client concatenates the two strings with no separator;
/// keeping them as separate fields avoids that collision risk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub time_no: String,
    pub area_name: String,
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.time_no, self.area_name)
    }
}

/// Stock record nested inside a raw area entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Stock {
    /// Time-range label, e.g. `14:01-15:00`
    pub time_no: String,
}

/// Raw area record as returned by the find-open-areas endpoint.
///
/// Transient; only lives while the availability response is decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct Area {
    /// Court name, e.g. `场地3`
    pub sname: String,

    /// Inventory record carrying the time-range label
    pub stock: Stock,

    /// Stock identifier used in order payloads
    pub stock_id: i64,

    /// Area identifier used in order payloads
    pub id: i64,
}

/// The subset of an area record needed to build an order payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaInfo {
    pub id: i64,
    pub sname: String,
    pub stock_id: i64,
}

/// Lookup table from slot key to bookable area, built once per run.
pub type AvailabilityMap = HashMap<SlotKey, AreaInfo>;

/// Build the availability map from decoded area records.
///
/// Exactly one entry per input record; keys are unique in the portal's
/// natural key space.
pub fn build_availability_map(areas: Vec<Area>) -> AvailabilityMap {
    areas
        .into_iter()
        .map(|area| {
            let key = SlotKey {
                time_no: area.stock.time_no,
                area_name: area.sname.clone(),
            };
            let info = AreaInfo {
                id: area.id,
                sname: area.sname,
                stock_id: area.stock_id,
            };
            (key, info)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(sname: &str, time_no: &str, stock_id: i64, id: i64) -> Area {
        Area {
            sname: sname.to_string(),
            stock: Stock {
                time_no: time_no.to_string(),
            },
            stock_id,
            id,
        }
    }

    #[test]
    fn target_labels_are_zero_padded() {
        let target = Target { time: 14, number: 3 };
        assert_eq!(target.time_no(), "14:01-15:00");
        assert_eq!(target.area_name(), "场地3");

        let early = Target { time: 8, number: 12 };
        assert_eq!(early.time_no(), "08:01-09:00");
        assert_eq!(early.area_name(), "场地12");
    }

    #[test]
    fn target_key_matches_area_key() {
        let target = Target { time: 14, number: 3 };
        let map = build_availability_map(vec![area("场地3", "14:01-15:00", 555, 77)]);

        let info = map.get(&target.slot_key()).expect("key should match");
        assert_eq!(info.stock_id, 555);
        assert_eq!(info.id, 77);
    }

    #[test]
    fn map_has_one_entry_per_area() {
        let areas = vec![
            area("场地1", "14:01-15:00", 1, 10),
            area("场地2", "14:01-15:00", 2, 20),
            area("场地1", "15:01-16:00", 3, 30),
        ];
        let map = build_availability_map(areas);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn missing_key_is_absent() {
        let map = build_availability_map(vec![area("场地1", "14:01-15:00", 1, 10)]);
        let target = Target { time: 14, number: 2 };
        assert!(map.get(&target.slot_key()).is_none());
    }

    #[test]
    fn struct_key_separates_fields() {
        // "14:01-15:00场" + "地1" and "14:01-15:00" + "场地1" concatenate to the
        // same string; the struct key keeps them distinct.
        let a = SlotKey {
            time_no: "14:01-15:00场".to_string(),
            area_name: "地1".to_string(),
        };
        let b = SlotKey {
            time_no: "14:01-15:00".to_string(),
            area_name: "场地1".to_string(),
        };
        assert_ne!(a, b);
    }

    #[test]
    fn area_decodes_from_portal_json() {
        let body = r#"{
            "sname": "场地5",
            "stock": { "time_no": "16:01-17:00", "extra": "ignored" },
            "stock_id": 4021,
            "id": 918,
            "other_field": null
        }"#;
        let area: Area = serde_json::from_str(body).unwrap();
        assert_eq!(area.sname, "场地5");
        assert_eq!(area.stock.time_no, "16:01-17:00");
        assert_eq!(area.stock_id, 4021);
        assert_eq!(area.id, 918);
    }
}
