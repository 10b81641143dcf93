//! Mamdani-style inference engine.
//!
//! Owns the three input domains, the output domain, and the rule set;
//! everything is immutable after construction, so one engine instance
//! can be shared freely. [`evaluate`](InferenceEngine::evaluate) is a
//! pure function of its inputs.

use log::debug;

use crate::control::domain::Domain;
use crate::control::rules::RuleSet;

/// Fuzzy inference over three inputs and one output.
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    inputs: [Domain; 3],
    output: Domain,
    rules: RuleSet,
}

impl InferenceEngine {
    pub fn new(inputs: [Domain; 3], output: Domain, rules: RuleSet) -> Self {
        Self {
            inputs,
            output,
            rules,
        }
    }

    /// Crisp output for the input triple, in output-domain units.
    ///
    /// Returns 0.0 when no rule fires (inputs outside every active
    /// region, or an empty rule set). Callers round to whole
    /// milliseconds.
    pub fn evaluate(&self, x1: f64, x2: f64, x3: f64) -> f64 {
        let result = self.rules.aggregate(
            [x1, x2, x3],
            [&self.inputs[0], &self.inputs[1], &self.inputs[2]],
            &self.output,
        );
        debug!(
            "inference: ({:.3}, {:.3}, {:.3}) -> {:.3}",
            x1, x2, x3, result
        );
        result
    }

    pub fn input_domains(&self) -> &[Domain; 3] {
        &self.inputs
    }

    pub fn output_domain(&self) -> &Domain {
        &self.output
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}
