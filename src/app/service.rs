//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the inference engine and the scan-loop state.
//! All I/O flows through port traits injected at call sites, making
//! the whole decision cycle testable with mock adapters.
//!
//! ```text
//!  TagScanner ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │      AppService         │
//!  CartStore  ◀──│  scan · infer · clamp   │──▶ RegisterPort
//!                 └────────────────────────┘
//! ```

use std::time::{Duration, Instant};

use chrono::{Local, NaiveDateTime};
use log::{info, warn};

use crate::config::SystemConfig;
use crate::control::InferenceEngine;
use crate::error::{Result, StoreError};
use crate::protocol::Classification;

use super::events::{AppEvent, DecisionRecord, ScanPhase};
use super::ports::{CartStore, EventSink, RegisterPort, TagScanner};

/// How one scan attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// A real tag was read.
    Tag(u16),
    /// The scan budget expired; the sentinel id applies.
    TimedOut,
}

/// The application service orchestrates one decision cycle at a time.
///
/// A single service instance owns the cycle exclusively — cart record
/// mutation is serialized by construction, and the engine behind it is
/// immutable, so no locking is needed anywhere in the core.
pub struct AppService {
    engine: InferenceEngine,
    config: SystemConfig,
    phase: ScanPhase,
    gate_prev: u16,
}

impl AppService {
    pub fn new(config: SystemConfig, engine: InferenceEngine) -> Self {
        Self {
            engine,
            config,
            phase: ScanPhase::Idle,
            gate_prev: 0,
        }
    }

    /// Current scan phase.
    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    // ── Gate polling ──────────────────────────────────────────

    /// Poll the PLC status register once; `true` on a 0→1 edge.
    ///
    /// A register failure reads as status 0 — the gate simply stays
    /// closed for this poll, it never aborts the loop.
    pub fn gate_opened(&mut self, registers: &mut impl RegisterPort, sink: &mut impl EventSink) -> bool {
        let status = match registers.read_holding_registers(
            self.config.status_register,
            1,
            self.config.register_unit,
        ) {
            Ok(regs) => regs.first().copied().unwrap_or(0),
            Err(e) => {
                warn!("gate poll failed: {e}");
                0
            }
        };

        let rising = self.gate_prev == 0 && status == 1;
        self.gate_prev = status;
        if rising {
            sink.emit(&AppEvent::GateOpened);
        }
        rising
    }

    // ── Scan loop ─────────────────────────────────────────────

    /// Poll the reader until a tag answers or the budget expires.
    ///
    /// Classification changes are debounced: a streak of identical
    /// NoTag / Fault classifications emits one event, not one per
    /// poll.
    pub fn scan_for_tag(
        &mut self,
        scanner: &mut impl TagScanner,
        sink: &mut impl EventSink,
    ) -> ScanOutcome {
        self.set_phase(ScanPhase::Polling, sink);
        let deadline =
            Instant::now() + Duration::from_secs(self.config.scan_timeout_secs);
        let mut last: Option<Classification> = None;

        loop {
            let class = scanner.poll();

            if let Classification::Tag(id) = class {
                sink.emit(&AppEvent::TagDetected { id });
                return ScanOutcome::Tag(id);
            }

            if last != Some(class) {
                match class {
                    Classification::NoTag => sink.emit(&AppEvent::WaitingForTag),
                    Classification::Fault => sink.emit(&AppEvent::ReaderFault),
                    Classification::Tag(_) => {}
                }
                last = Some(class);
            }

            if Instant::now() >= deadline {
                sink.emit(&AppEvent::ScanTimedOut);
                self.set_phase(ScanPhase::Idle, sink);
                return ScanOutcome::TimedOut;
            }
            std::thread::sleep(Duration::from_millis(self.config.poll_interval_ms));
        }
    }

    // ── Decision ──────────────────────────────────────────────

    /// Compute and persist the dispense decision for one cart.
    ///
    /// Loads the cart record (missing record = failed cycle, no
    /// auto-create), runs inference on the elapsed-time inputs, applies
    /// the minimum-dispense threshold, and saves the updated record.
    pub fn decide(
        &self,
        id: u16,
        now: NaiveDateTime,
        store: &impl CartStore,
        sink: &mut impl EventSink,
    ) -> std::result::Result<DecisionRecord, StoreError> {
        let mut record = store.load(id)?;

        let minutes = record.minutes_since_scan(now);
        let hours = record.hours_since_lubrication(now);
        let previous = record.last_lub_dur_ms;

        let raw = self.engine.evaluate(minutes, hours, f64::from(previous));
        let rounded = raw.round() as u32;
        let dispense = if rounded < self.config.min_dispense_ms {
            0
        } else {
            rounded
        };

        record.cart_id = id;
        record.last_scan_ts = now;
        record.last_lub_dur_ms = dispense;
        if dispense > 0 {
            record.last_lub_ts = now;
        }

        store.save(id, &record)?;

        let decision = DecisionRecord {
            at: now,
            cart_id: id,
            minutes_since_scan: minutes,
            hours_since_lubrication: hours,
            previous_dispense_ms: previous,
            raw_output_ms: raw,
            dispense_ms: dispense,
            record,
        };
        sink.emit(&AppEvent::DecisionComputed(decision.clone()));
        Ok(decision)
    }

    // ── Full cycle ────────────────────────────────────────────

    /// Run one gate-triggered cycle: scan, decide, write the duration
    /// register.
    ///
    /// Returns the decision for a real tag, `None` when the scan timed
    /// out and the fallback applied. Store and register failures bubble
    /// up; the caller logs them and keeps the loop alive.
    pub fn run_cycle(
        &mut self,
        scanner: &mut impl TagScanner,
        store: &impl CartStore,
        registers: &mut impl RegisterPort,
        sink: &mut impl EventSink,
    ) -> Result<Option<DecisionRecord>> {
        match self.scan_for_tag(scanner, sink) {
            ScanOutcome::Tag(id) => {
                self.set_phase(ScanPhase::Computing, sink);
                let now = Local::now().naive_local();
                let result = self.decide(id, now, store, sink);
                self.set_phase(ScanPhase::Idle, sink);
                let decision = result?;

                registers.write_register(
                    self.config.duration_register,
                    decision.dispense_ms.min(u32::from(u16::MAX)) as u16,
                    self.config.register_unit,
                )?;
                info!(
                    "cart {}: dispense {} ms (raw {:.1})",
                    id, decision.dispense_ms, decision.raw_output_ms
                );
                Ok(Some(decision))
            }
            ScanOutcome::TimedOut => {
                // Sentinel path: no cart lookup, the configured
                // fallback duration applies.
                let fallback = self.config.fallback_dispense_ms;
                sink.emit(&AppEvent::FallbackApplied {
                    tag_id: self.config.timeout_tag_id,
                    dispense_ms: fallback,
                });
                if fallback > 0 {
                    registers.write_register(
                        self.config.duration_register,
                        fallback.min(u32::from(u16::MAX)) as u16,
                        self.config.register_unit,
                    )?;
                }
                Ok(None)
            }
        }
    }

    // ── Internal ──────────────────────────────────────────────

    fn set_phase(&mut self, to: ScanPhase, sink: &mut impl EventSink) {
        if self.phase != to {
            let from = self.phase;
            self.phase = to;
            sink.emit(&AppEvent::PhaseChanged { from, to });
        }
    }
}
