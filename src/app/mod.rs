//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the lubrication
//! station: scan orchestration, inference invocation, the dispense
//! threshold, and cart-record bookkeeping. All interaction with the
//! outside world happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without a reader or PLC.

pub mod events;
pub mod ports;
pub mod service;
