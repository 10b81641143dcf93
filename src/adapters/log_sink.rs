//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events
//! to the process logger. The daily decision-file adapter implements
//! the same trait; the two are usually paired through
//! [`TeeSink`](crate::app::ports::TeeSink).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::PhaseChanged { from, to } => {
                info!("PHASE | {:?} -> {:?}", from, to);
            }
            AppEvent::WaitingForTag => {
                info!("SCAN  | waiting for tag");
            }
            AppEvent::ReaderFault => {
                warn!("SCAN  | reader exchange failed");
            }
            AppEvent::TagDetected { id } => {
                info!("SCAN  | tag {id} detected");
            }
            AppEvent::ScanTimedOut => {
                warn!("SCAN  | timed out, sentinel applies");
            }
            AppEvent::DecisionComputed(d) => {
                info!(
                    "DECIDE| cart={} | in=({:.1} min, {:.1} h, {} ms) | raw={:.1} ms | dispense={} ms",
                    d.cart_id,
                    d.minutes_since_scan,
                    d.hours_since_lubrication,
                    d.previous_dispense_ms,
                    d.raw_output_ms,
                    d.dispense_ms,
                );
            }
            AppEvent::FallbackApplied { tag_id, dispense_ms } => {
                warn!(
                    "DECIDE| sentinel tag {} | fallback dispense {} ms",
                    tag_id, dispense_ms
                );
            }
            AppEvent::GateOpened => {
                info!("GATE  | status flag rose");
            }
        }
    }
}
