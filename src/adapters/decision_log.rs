//! Daily decision-file event sink.
//!
//! Appends one CSV line per computed decision to
//! `cart_log_<date>.csv` in the configured directory, creating the
//! file with a header when a new day starts. Append failures are
//! logged and swallowed — the decision loop never stalls on its own
//! bookkeeping.

use std::io::Write;
use std::path::PathBuf;

use chrono::Local;
use log::warn;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

const HEADER: &str = "Waktu,CartID,lastTS,lastLubTS,lastLubDur\n";

/// Append-only decision log, one file per day.
pub struct DecisionLog {
    dir: PathBuf,
}

impl DecisionLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn append_line(&self, line: &str) -> std::io::Result<()> {
        let path = self
            .dir
            .join(format!("cart_log_{}.csv", Local::now().date_naive()));
        let fresh = !path.exists();
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        if fresh {
            file.write_all(HEADER.as_bytes())?;
        }
        file.write_all(line.as_bytes())
    }
}

impl EventSink for DecisionLog {
    fn emit(&mut self, event: &AppEvent) {
        let AppEvent::DecisionComputed(d) = event else {
            return;
        };
        let line = format!(
            "{},{},{},{},{}\n",
            d.at.format("%Y-%m-%d %H:%M:%S"),
            d.cart_id,
            d.record.last_scan_ts,
            d.record.last_lub_ts,
            d.record.last_lub_dur_ms,
        );
        if let Err(e) = self.append_line(&line) {
            warn!("decision log append failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::events::DecisionRecord;
    use crate::cart::CartRecord;
    use chrono::NaiveDate;

    #[test]
    fn appends_header_then_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DecisionLog::new(dir.path());

        let ts = NaiveDate::from_ymd_opt(2026, 8, 7)
            .unwrap()
            .and_hms_opt(6, 0, 0)
            .unwrap();
        let record = CartRecord {
            cart_id: 17,
            last_scan_ts: ts,
            last_lub_ts: ts,
            last_lub_dur_ms: 900,
        };
        let event = AppEvent::DecisionComputed(DecisionRecord {
            at: ts,
            cart_id: 17,
            minutes_since_scan: 180.0,
            hours_since_lubrication: 50.0,
            previous_dispense_ms: 1000,
            raw_output_ms: 901.4,
            dispense_ms: 900,
            record,
        });

        sink.emit(&event);
        sink.emit(&event);
        // Non-decision events are ignored.
        sink.emit(&AppEvent::WaitingForTag);

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(entries.len(), 1);
        let text = std::fs::read_to_string(&entries[0]).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Waktu,CartID,lastTS,lastLubTS,lastLubDur");
        assert!(lines[1].starts_with("2026-08-07 06:00:00,17,"));
        assert!(lines[1].ends_with(",900"));
    }
}
