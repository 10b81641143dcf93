//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (tag reader, PLC registers, cart store, event
//! sinks) implement these traits. The [`AppService`](super::service::AppService)
//! consumes them via generics, so the decision core never touches a
//! socket or the filesystem directly.

use crate::cart::CartRecord;
use crate::error::{RegisterError, StoreError};
use crate::protocol::Classification;

// ───────────────────────────────────────────────────────────────
// Tag scanner port (driven adapter: reader hardware → domain)
// ───────────────────────────────────────────────────────────────

/// One reader poll: exchange the inventory command and classify the
/// reply. Implementations must never panic on I/O failure — they
/// report [`Classification::Fault`] instead.
pub trait TagScanner {
    fn poll(&mut self) -> Classification;
}

// ───────────────────────────────────────────────────────────────
// Register port (driven adapter: domain ↔ PLC)
// ───────────────────────────────────────────────────────────────

/// Opaque read/write-register service. The core reads a single status
/// flag and writes a single duration register; the wire protocol
/// behind this trait is the adapter's business.
pub trait RegisterPort {
    /// Read `count` holding registers starting at `address`.
    fn read_holding_registers(
        &mut self,
        address: u16,
        count: u16,
        unit: u8,
    ) -> Result<Vec<u16>, RegisterError>;

    /// Write one register.
    fn write_register(&mut self, address: u16, value: u16, unit: u8)
        -> Result<(), RegisterError>;
}

// ───────────────────────────────────────────────────────────────
// Cart store port (driven adapter: domain ↔ persistence)
// ───────────────────────────────────────────────────────────────

/// Per-cart record persistence.
///
/// Missing records are surfaced as [`StoreError::NotFound`]; the core
/// never creates cart files on its own — first sight of a new cart id
/// is handled outside the decision loop.
pub trait CartStore {
    fn load(&self, id: u16) -> Result<CartRecord, StoreError>;
    fn save(&self, id: u16, record: &CartRecord) -> Result<(), StoreError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go — serial log,
/// daily decision file, both. Emission is fire-and-forget: sink
/// failures must never abort the decision loop.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

/// Fan out events to two sinks (console log + decision file is the
/// usual pairing).
pub struct TeeSink<'a, A: EventSink, B: EventSink>(pub &'a mut A, pub &'a mut B);

impl<A: EventSink, B: EventSink> EventSink for TeeSink<'_, A, B> {
    fn emit(&mut self, event: &super::events::AppEvent) {
        self.0.emit(event);
        self.1.emit(event);
    }
}
