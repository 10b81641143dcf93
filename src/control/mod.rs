//! Fuzzy decision core — pure logic, zero I/O.
//!
//! Membership functions, linguistic domains, the rule table, and the
//! inference engine. Everything here is immutable after construction
//! and safe to share across decision cycles.

pub mod domain;
pub mod engine;
pub mod membership;
pub mod rules;

pub use domain::{Domain, LabelId, LABEL_COUNT};
pub use engine::InferenceEngine;
pub use membership::MembershipFunction;
pub use rules::{Rule, RuleRow, RuleSet};
