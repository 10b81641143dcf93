//! Per-cart lubrication state.
//!
//! One record per cart id, persisted by the cart store collaborator.
//! JSON field names match the station's existing `cart<id>.json` files
//! so records written by earlier controller revisions stay readable.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Persistent state for one cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartRecord {
    /// Tag id of the cart. Older record files omit it.
    #[serde(rename = "cartId", default)]
    pub cart_id: u16,
    /// When this cart last passed the scan station.
    #[serde(rename = "lastTS")]
    pub last_scan_ts: NaiveDateTime,
    /// When this cart last received lubricant.
    #[serde(rename = "lastLubTS")]
    pub last_lub_ts: NaiveDateTime,
    /// Duration of the last dispense, in milliseconds. Zero when the
    /// last cycle decided not to spray.
    #[serde(rename = "lastLubDur")]
    pub last_lub_dur_ms: u32,
}

impl CartRecord {
    /// Minutes elapsed since the last scan — inference input 1.
    pub fn minutes_since_scan(&self, now: NaiveDateTime) -> f64 {
        (now - self.last_scan_ts).num_seconds() as f64 / 60.0
    }

    /// Hours elapsed since the last lubrication — inference input 2.
    pub fn hours_since_lubrication(&self, now: NaiveDateTime) -> f64 {
        (now - self.last_lub_ts).num_seconds() as f64 / 3600.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 7)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn elapsed_inputs_use_plain_unit_conversions() {
        let rec = CartRecord {
            cart_id: 17,
            last_scan_ts: ts(6, 0),
            last_lub_ts: ts(3, 30),
            last_lub_dur_ms: 1500,
        };
        let now = ts(9, 0);
        assert!((rec.minutes_since_scan(now) - 180.0).abs() < 1e-9);
        assert!((rec.hours_since_lubrication(now) - 5.5).abs() < 1e-9);
    }

    #[test]
    fn json_field_names_match_station_files() {
        let rec = CartRecord {
            cart_id: 3,
            last_scan_ts: ts(6, 0),
            last_lub_ts: ts(3, 30),
            last_lub_dur_ms: 900,
        };
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains("\"lastTS\""));
        assert!(json.contains("\"lastLubTS\""));
        assert!(json.contains("\"lastLubDur\":900"));

        let back: CartRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rec);
    }

    #[test]
    fn legacy_record_without_cart_id_parses() {
        let json = r#"{
            "lastTS": "2026-08-07T06:00:00",
            "lastLubTS": "2026-08-06T22:15:00.123456",
            "lastLubDur": 0
        }"#;
        let rec: CartRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.cart_id, 0);
        assert_eq!(rec.last_lub_dur_ms, 0);
    }
}
