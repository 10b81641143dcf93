//! File-backed cart store.
//!
//! One `cart<id>.json` per cart in a configurable directory — the
//! station's existing record layout. A missing file is
//! [`StoreError::NotFound`]; record creation for never-seen carts is a
//! provisioning task, not something the decision loop does.

use std::path::{Path, PathBuf};

use crate::app::ports::CartStore;
use crate::cart::CartRecord;
use crate::error::StoreError;

/// Cart store over per-cart JSON files.
pub struct JsonCartStore {
    dir: PathBuf,
}

impl JsonCartStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, id: u16) -> PathBuf {
        self.dir.join(format!("cart{id}.json"))
    }
}

impl CartStore for JsonCartStore {
    fn load(&self, id: u16) -> Result<CartRecord, StoreError> {
        let path = self.path_for(id);
        let text = match std::fs::read_to_string(&path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound { id });
            }
            Err(e) => return Err(StoreError::Io { id, source: e }),
        };
        serde_json::from_str(&text).map_err(|e| StoreError::Corrupt {
            id,
            reason: e.to_string(),
        })
    }

    fn save(&self, id: u16, record: &CartRecord) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(record).map_err(|e| StoreError::Corrupt {
            id,
            reason: e.to_string(),
        })?;
        write_atomic(&self.path_for(id), text.as_bytes())
            .map_err(|source| StoreError::Io { id, source })
    }
}

/// Write via a temp file + rename so a power cut mid-save never leaves
/// a half-written record.
fn write_atomic(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, data)?;
    std::fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(id: u16) -> CartRecord {
        let ts = NaiveDate::from_ymd_opt(2026, 8, 7)
            .unwrap()
            .and_hms_opt(6, 0, 0)
            .unwrap();
        CartRecord {
            cart_id: id,
            last_scan_ts: ts,
            last_lub_ts: ts,
            last_lub_dur_ms: 750,
        }
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonCartStore::new(dir.path());
        store.save(12, &record(12)).unwrap();
        let loaded = store.load(12).unwrap();
        assert_eq!(loaded, record(12));
        assert!(dir.path().join("cart12.json").exists());
    }

    #[test]
    fn missing_record_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonCartStore::new(dir.path());
        let err = store.load(44).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { id: 44 }));
    }

    #[test]
    fn corrupt_record_is_reported_not_panicked() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cart9.json"), b"{not json").unwrap();
        let store = JsonCartStore::new(dir.path());
        let err = store.load(9).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { id: 9, .. }));
    }

    #[test]
    fn station_format_files_load() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("cart17.json"),
            r#"{
                "lastTS": "2026-08-07T06:00:00",
                "lastLubTS": "2026-08-05T21:30:00",
                "lastLubDur": 1200
            }"#,
        )
        .unwrap();
        let store = JsonCartStore::new(dir.path());
        let rec = store.load(17).unwrap();
        assert_eq!(rec.last_lub_dur_ms, 1200);
    }
}
