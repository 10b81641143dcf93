//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements       | Connects to                   |
//! |----------------|------------------|-------------------------------|
//! | `log_sink`     | EventSink        | process logger                |
//! | `decision_log` | EventSink        | daily `cart_log_*.csv` file   |
//! | `json_store`   | CartStore        | `cart<id>.json` record files  |
//! | `sim`          | every port       | in-memory simulation / tests  |
//!
//! The TCP tag scanner lives with its codec in
//! [`crate::protocol::reader`].

pub mod decision_log;
pub mod json_store;
pub mod log_sink;
pub mod sim;
