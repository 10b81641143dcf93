//! System configuration parameters
//!
//! All tunable parameters for the lubrication station. Values can be
//! overridden via a JSON config file or CLI flags; the defaults match
//! the deployed station.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::control::{Domain, InferenceEngine, RuleRow, RuleSet};
use crate::error::ConfigError;

/// Parameters for one fuzzy linguistic domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainParams {
    pub name: String,
    pub min: f64,
    pub max: f64,
    /// Five label names, ordered "very short" → "very long".
    pub labels: Vec<String>,
    pub resolution: f64,
}

impl DomainParams {
    fn new(name: &str, min: f64, max: f64, labels: &[&str]) -> Self {
        Self {
            name: name.to_owned(),
            min,
            max,
            labels: labels.iter().map(|&l| l.to_owned()).collect(),
            resolution: 0.1,
        }
    }

    pub fn build(&self) -> Result<Domain, ConfigError> {
        Domain::new(&self.name, self.min, self.max, &self.labels, self.resolution)
    }
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Tag reader ---
    /// Reader module host.
    pub reader_host: String,
    /// Reader module TCP port.
    pub reader_port: u16,
    /// TCP connect timeout (milliseconds).
    pub connect_timeout_ms: u64,
    /// Reply read timeout (milliseconds).
    pub read_timeout_ms: u64,
    /// Inventory command bytes sent on every poll (CRC appended by the
    /// codec).
    pub inventory_command: Vec<u8>,

    // --- Scan loop ---
    /// Delay between reader polls (milliseconds).
    pub poll_interval_ms: u64,
    /// Wall-clock budget for one scan before giving up (seconds).
    pub scan_timeout_secs: u64,
    /// Reserved tag id reported when the scan budget expires. Must not
    /// collide with a real tag id at the site.
    pub timeout_tag_id: u16,
    /// Dispense duration used for the timeout sentinel (milliseconds).
    /// Zero means no dispense.
    pub fallback_dispense_ms: u32,

    // --- Decision ---
    /// Computed durations below this are clamped to zero (no dispense).
    pub min_dispense_ms: u32,

    // --- PLC registers ---
    /// Gate poll interval (milliseconds).
    pub gate_poll_interval_ms: u64,
    /// Holding register carrying the station's ready flag.
    pub status_register: u16,
    /// Register the computed duration is written to.
    pub duration_register: u16,
    /// PLC unit / slave id.
    pub register_unit: u8,

    // --- Paths ---
    /// Directory holding `cart<id>.json` records.
    pub cart_dir: PathBuf,
    /// Rule table CSV.
    pub rules_path: PathBuf,
    /// Directory for daily decision log files.
    pub event_log_dir: PathBuf,

    // --- Fuzzy domains ---
    /// Oven duration input (minutes since last scan).
    pub oven_domain: DomainParams,
    /// Span since last lubrication input (hours).
    pub span_domain: DomainParams,
    /// Previous dispense duration input (milliseconds).
    pub last_dispense_domain: DomainParams,
    /// Output dispense duration (milliseconds).
    pub output_domain: DomainParams,
}

const TIME_LABELS: [&str; 5] = [
    "sangat_sebentar",
    "sebentar",
    "sedang",
    "lama",
    "sangat_lama",
];
const SPRAY_LABELS: [&str; 5] = ["tidak_spray", "sebentar", "sedang", "lama", "sangat_lama"];

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Tag reader
            reader_host: "192.168.1.190".to_owned(),
            reader_port: 6000,
            connect_timeout_ms: 2000,
            read_timeout_ms: 2000,
            inventory_command: vec![0x04, 0xFF, 0x0F],

            // Scan loop
            poll_interval_ms: 40,
            scan_timeout_secs: 30,
            timeout_tag_id: 999,
            fallback_dispense_ms: 0,

            // Decision
            min_dispense_ms: 500,

            // PLC registers
            gate_poll_interval_ms: 1000,
            status_register: 502,
            duration_register: 501,
            register_unit: 1,

            // Paths
            cart_dir: PathBuf::from("carts"),
            rules_path: PathBuf::from("rulebases.csv"),
            event_log_dir: PathBuf::from("logs"),

            // Fuzzy domains
            oven_domain: DomainParams::new("Durasi Oven (Menit)", 120.0, 1440.0, &TIME_LABELS),
            span_domain: DomainParams::new(
                "Rentang Lubrikasi Terakhir (Jam)",
                12.0,
                672.0,
                &TIME_LABELS,
            ),
            last_dispense_domain: DomainParams::new(
                "Durasi Lubrikasi Terakhir (Milisecond)",
                50.0,
                6000.0,
                &SPRAY_LABELS,
            ),
            output_domain: DomainParams::new(
                "Durasi Lubrikasi (Milisecond)",
                20.0,
                6000.0,
                &SPRAY_LABELS,
            ),
        }
    }
}

impl SystemConfig {
    /// Load from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::ConfigFileInvalid {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| ConfigError::ConfigFileInvalid {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Build the inference engine from the configured domains and rule
    /// rows. Fatal at startup on any domain or label error.
    pub fn build_engine(&self, rows: &[RuleRow]) -> Result<InferenceEngine, ConfigError> {
        let oven = self.oven_domain.build()?;
        let span = self.span_domain.build()?;
        let last = self.last_dispense_domain.build()?;
        let output = self.output_domain.build()?;
        let rules = RuleSet::load(rows, [&oven, &span, &last], &output)?;
        Ok(InferenceEngine::new([oven, span, last], output, rules))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = SystemConfig::default();
        assert!(c.poll_interval_ms > 0);
        assert!(c.scan_timeout_secs > 0);
        assert!(c.min_dispense_ms > 0);
        assert!(c.connect_timeout_ms > 0 && c.read_timeout_ms > 0);
        assert!(!c.inventory_command.is_empty());
        assert_eq!(c.oven_domain.labels.len(), 5);
        assert_eq!(c.output_domain.labels.len(), 5);
    }

    #[test]
    fn serde_roundtrip() {
        let c = SystemConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: SystemConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c.reader_host, c2.reader_host);
        assert_eq!(c.timeout_tag_id, c2.timeout_tag_id);
        assert_eq!(c.inventory_command, c2.inventory_command);
        assert!((c.output_domain.max - c2.output_domain.max).abs() < f64::EPSILON);
    }

    #[test]
    fn poll_faster_than_scan_budget() {
        let c = SystemConfig::default();
        assert!(
            c.poll_interval_ms < c.scan_timeout_secs * 1000,
            "poll interval must fit many times into the scan budget"
        );
    }

    #[test]
    fn default_engine_builds() {
        let c = SystemConfig::default();
        let engine = c.build_engine(&[]).unwrap();
        assert_eq!(engine.input_domains()[0].max(), 1440.0);
        assert_eq!(engine.output_domain().max(), 6000.0);
    }
}
