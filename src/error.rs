//! Unified error types for the lubrication controller.
//!
//! A single `Error` enum that every subsystem can convert into, keeping
//! the top-level decision loop's error handling uniform. Configuration
//! errors are fatal at startup; protocol and store errors are transient
//! conditions the loop recovers from cycle by cycle.

use thiserror::Error;

/// Every fallible operation in the controller funnels into this type.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed domain parameters or rule table content.
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    /// Tag reader framing or I/O failure.
    #[error("protocol: {0}")]
    Protocol(#[from] ProtocolError),
    /// Cart record could not be loaded or saved.
    #[error("store: {0}")]
    Store(#[from] StoreError),
    /// PLC register read/write failed.
    #[error("register: {0}")]
    Register(#[from] RegisterError),
}

/// Fatal configuration errors, raised during startup only.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A fuzzy domain was constructed with a non-positive upper bound.
    #[error("domain '{name}': max must be positive, got {max}")]
    InvalidDomainRange { name: String, max: f64 },
    /// A fuzzy domain was given the wrong number of labels.
    #[error("domain '{name}': expected {expected} labels, got {got}")]
    WrongLabelCount {
        name: String,
        expected: usize,
        got: usize,
    },
    /// A rule row referenced a label the domain does not define.
    #[error("rule row {row}: unknown label '{label}' for domain '{domain}'")]
    LabelNotFound {
        row: usize,
        label: String,
        domain: String,
    },
    /// A rule row did not have exactly four columns.
    #[error("rule row {row}: expected 4 columns, got {got}")]
    MalformedRuleRow { row: usize, got: usize },
    /// The rule file could not be read.
    #[error("rule file '{path}': {source}")]
    RuleFileUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The config file could not be read or parsed.
    #[error("config file '{path}': {reason}")]
    ConfigFileInvalid { path: String, reason: String },
}

/// Transient tag-protocol failures. The scan loop recovers from these
/// by re-polling until its wall-clock budget expires.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// TCP connect to the reader failed or timed out.
    #[error("reader connect failed: {0}")]
    Connect(std::io::Error),
    /// Writing the framed command failed.
    #[error("reader write failed: {0}")]
    Write(std::io::Error),
    /// Reading the reply failed, timed out, or returned zero bytes.
    #[error("reader read failed: {0}")]
    Read(std::io::Error),
    /// The reply was too short to carry a tag id.
    #[error("malformed reply: {len} bytes")]
    ShortReply { len: usize },
}

/// Cart persistence failures. Missing records are a boundary condition
/// surfaced to the caller; the core never creates cart files itself.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record exists for this cart id.
    #[error("cart {id}: no record")]
    NotFound { id: u16 },
    /// The record file exists but could not be read or written.
    #[error("cart {id}: {source}")]
    Io {
        id: u16,
        #[source]
        source: std::io::Error,
    },
    /// The record file exists but does not parse.
    #[error("cart {id}: corrupt record: {reason}")]
    Corrupt { id: u16, reason: String },
}

/// PLC register service failures.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// The register service is unreachable.
    #[error("register I/O failed: {0}")]
    Io(std::io::Error),
    /// The service answered with fewer registers than requested.
    #[error("short register response: wanted {wanted}, got {got}")]
    ShortResponse { wanted: usize, got: usize },
}

/// Controller-wide `Result` alias.
pub type Result<T> = std::result::Result<T, Error>;
