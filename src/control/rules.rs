//! Fuzzy rule table.
//!
//! Rules arrive as rows of label names — three premise labels (one per
//! input domain) and one conclusion label on the output domain. Names
//! are resolved to label ids at load time, so evaluation never touches
//! strings. Duplicate premises overwrite: the last row wins, which
//! lets a site append corrections to the bottom of the table.

use std::collections::HashMap;
use std::path::Path;

use crate::control::domain::{Domain, LabelId};
use crate::error::ConfigError;

/// One resolved rule: premise labels per input domain → output label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub premise: [LabelId; 3],
    pub conclusion: LabelId,
}

/// One unresolved table row, as read from the rule source.
#[derive(Debug, Clone)]
pub struct RuleRow {
    pub inputs: [String; 3],
    pub output: String,
}

/// The immutable rule collection for one domain configuration.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Resolve rows against the three input domains and the output
    /// domain. Unknown label names are a fatal configuration error.
    pub fn load(
        rows: &[RuleRow],
        inputs: [&Domain; 3],
        output: &Domain,
    ) -> Result<Self, ConfigError> {
        let mut table: HashMap<[LabelId; 3], LabelId> = HashMap::new();
        let mut order: Vec<[LabelId; 3]> = Vec::new();

        for (row_no, row) in rows.iter().enumerate() {
            let mut premise = [0usize; 3];
            for (slot, domain) in inputs.iter().enumerate() {
                let name = &row.inputs[slot];
                premise[slot] = domain.label_id(name).ok_or_else(|| {
                    ConfigError::LabelNotFound {
                        row: row_no + 1,
                        label: name.clone(),
                        domain: domain.name().to_owned(),
                    }
                })?;
            }
            let conclusion = output.label_id(&row.output).ok_or_else(|| {
                ConfigError::LabelNotFound {
                    row: row_no + 1,
                    label: row.output.clone(),
                    domain: output.name().to_owned(),
                }
            })?;

            if table.insert(premise, conclusion).is_none() {
                order.push(premise);
            }
        }

        // Deterministic rule order: first occurrence of each premise,
        // carrying the last-written conclusion.
        let rules = order
            .into_iter()
            .map(|premise| Rule {
                premise,
                conclusion: table[&premise],
            })
            .collect();

        Ok(Self { rules })
    }

    /// The resolved rules, in first-occurrence order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Weighted-average defuzzification over all rules.
    ///
    /// Each rule fires with strength `min` of its three premise
    /// memberships; the crisp output is the strength-weighted average
    /// of the conclusion labels' representative values. When nothing
    /// fires the result is a defined 0.0 — the no-rule-fired
    /// degenerate case — never NaN.
    pub fn aggregate(
        &self,
        inputs: [f64; 3],
        domains: [&Domain; 3],
        output: &Domain,
    ) -> f64 {
        let mut weighted = 0.0;
        let mut total = 0.0;

        for rule in &self.rules {
            let strength = rule
                .premise
                .iter()
                .zip(domains.iter())
                .zip(inputs.iter())
                .map(|((&label, domain), &x)| domain.degree(label, x))
                .fold(f64::INFINITY, f64::min);

            if strength > 0.0 {
                weighted += strength * output.representative(rule.conclusion);
                total += strength;
            }
        }

        if total > 0.0 {
            weighted / total
        } else {
            0.0
        }
    }
}

/// Parse rule rows from CSV text: a header line followed by
/// `in1,in2,in3,out` rows. Blank lines are skipped.
pub fn parse_rule_csv(text: &str) -> Result<Vec<RuleRow>, ConfigError> {
    let mut rows = Vec::new();
    for (line_no, line) in text.lines().enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != 4 {
            return Err(ConfigError::MalformedRuleRow {
                row: line_no + 1,
                got: fields.len(),
            });
        }
        rows.push(RuleRow {
            inputs: [
                fields[0].to_owned(),
                fields[1].to_owned(),
                fields[2].to_owned(),
            ],
            output: fields[3].to_owned(),
        });
    }
    Ok(rows)
}

/// Read and parse a rule CSV file.
pub fn read_rule_file(path: &Path) -> Result<Vec<RuleRow>, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| {
        ConfigError::RuleFileUnreadable {
            path: path.display().to_string(),
            source,
        }
    })?;
    parse_rule_csv(&text)
}
