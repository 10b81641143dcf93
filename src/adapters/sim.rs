//! Simulation adapters.
//!
//! In-memory implementations of every port, used by the test suite and
//! by `--sim` runs on a bench without a reader or PLC attached. Core
//! algorithms are identical in simulation — only the adapters differ.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::app::events::AppEvent;
use crate::app::ports::{CartStore, EventSink, RegisterPort, TagScanner};
use crate::cart::CartRecord;
use crate::error::{RegisterError, StoreError};
use crate::protocol::Classification;

// ───────────────────────────────────────────────────────────────
// Scripted tag scanner
// ───────────────────────────────────────────────────────────────

/// Replays a fixed classification sequence, then repeats its final
/// entry forever (or a single entry forever via [`repeating`]).
///
/// [`repeating`]: ScriptedScanner::repeating
pub struct ScriptedScanner {
    script: Vec<Classification>,
    next: usize,
}

impl ScriptedScanner {
    pub fn new(script: Vec<Classification>) -> Self {
        assert!(!script.is_empty(), "script must have at least one entry");
        Self { script, next: 0 }
    }

    pub fn repeating(class: Classification) -> Self {
        Self::new(vec![class])
    }

    /// Polls consumed so far.
    pub fn polls(&self) -> usize {
        self.next
    }
}

impl TagScanner for ScriptedScanner {
    fn poll(&mut self) -> Classification {
        let idx = self.next.min(self.script.len() - 1);
        self.next += 1;
        self.script[idx]
    }
}

// ───────────────────────────────────────────────────────────────
// In-memory register bus
// ───────────────────────────────────────────────────────────────

/// Register service backed by a plain map. Reads of unwritten
/// addresses return 0, like a freshly powered PLC.
#[derive(Default)]
pub struct SimRegisterBus {
    registers: HashMap<u16, u16>,
}

impl SimRegisterBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, address: u16, value: u16) {
        self.registers.insert(address, value);
    }

    /// Raw view for assertions: `None` if never written.
    pub fn get(&self, address: u16) -> Option<u16> {
        self.registers.get(&address).copied()
    }
}

impl RegisterPort for SimRegisterBus {
    fn read_holding_registers(
        &mut self,
        address: u16,
        count: u16,
        _unit: u8,
    ) -> Result<Vec<u16>, RegisterError> {
        Ok((0..count)
            .map(|i| {
                self.registers
                    .get(&(address + i))
                    .copied()
                    .unwrap_or(0)
            })
            .collect())
    }

    fn write_register(
        &mut self,
        address: u16,
        value: u16,
        _unit: u8,
    ) -> Result<(), RegisterError> {
        self.registers.insert(address, value);
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// In-memory cart store
// ───────────────────────────────────────────────────────────────

/// Cart store backed by a map. Missing ids surface as
/// [`StoreError::NotFound`], exactly like the file-backed store.
#[derive(Default)]
pub struct MemoryCartStore {
    records: RefCell<HashMap<u16, CartRecord>>,
}

impl MemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, id: u16, record: CartRecord) {
        self.records.borrow_mut().insert(id, record);
    }
}

impl CartStore for MemoryCartStore {
    fn load(&self, id: u16) -> Result<CartRecord, StoreError> {
        self.records
            .borrow()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    fn save(&self, id: u16, record: &CartRecord) -> Result<(), StoreError> {
        self.records.borrow_mut().insert(id, record.clone());
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// Collecting event sink
// ───────────────────────────────────────────────────────────────

/// Buffers every emitted event for assertions.
#[derive(Default)]
pub struct CollectSink {
    events: Vec<AppEvent>,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[AppEvent] {
        &self.events
    }
}

impl EventSink for CollectSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
