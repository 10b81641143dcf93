//! Autolube controller library.
//!
//! Fuzzy-logic lubrication timing for RFID-gated oven cart stations.
//! Exposes the pure-logic modules for integration testing and external
//! inspection; all I/O sits behind the port traits in [`app::ports`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod cart;
pub mod config;
pub mod control;
pub mod error;
pub mod protocol;
