//! Validation System - Description Invariants
//!
//! The generator upholds these by construction. Descriptions that come from
//! anywhere else (JSON, hand-built parts) go through the `Validator` before
//! they can become an `AvatarDescription`.

use serde::{Deserialize, Serialize};
use crate::generator::DescriptionParts;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationViolation {
    pub rule: String,
    pub message: String,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub violations: Vec<ValidationViolation>,
}

impl ValidationResult {
    pub fn success() -> Self {
        Self {
            valid: true,
            violations: vec![],
        }
    }

    pub fn failure(violations: Vec<ValidationViolation>) -> Self {
        Self {
            valid: false,
            violations,
        }
    }

    /// `rule: message` for every violation, joined with "; ".
    pub fn summary(&self) -> String {
        self.violations
            .iter()
            .map(|v| format!("{}: {}", v.rule, v.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Validation rule trait - produces violations
pub trait ValidationRule {
    fn name(&self) -> &'static str;
    fn validate(&self, parts: &DescriptionParts) -> Vec<ValidationViolation>;
}

// --- Concrete Rules ---

/// One colored flag per node across all rows.
pub struct NodeCountRule;

impl ValidationRule for NodeCountRule {
    fn name(&self) -> &'static str { "node_count" }

    fn validate(&self, parts: &DescriptionParts) -> Vec<ValidationViolation> {
        let expected: usize = parts.rows.iter().map(|r| r.node_count()).sum();
        let actual = parts.colored_nodes.len();

        if expected != actual {
            vec![ValidationViolation {
                rule: self.name().to_string(),
                message: "Colored node flags do not match the rows' node count".to_string(),
                expected: Some(expected.to_string()),
                actual: Some(actual.to_string()),
            }]
        } else {
            vec![]
        }
    }
}

/// At least one node carries the gradient.
pub struct ColoredCoverageRule;

impl ValidationRule for ColoredCoverageRule {
    fn name(&self) -> &'static str { "colored_coverage" }

    fn validate(&self, parts: &DescriptionParts) -> Vec<ValidationViolation> {
        if parts.colored_nodes.iter().any(|&c| c) {
            return vec![];
        }
        vec![ValidationViolation {
            rule: self.name().to_string(),
            message: "No node is colored".to_string(),
            expected: Some(">= 1 colored node".to_string()),
            actual: Some("0 colored nodes".to_string()),
        }]
    }
}

/// Validator runs every rule; any violation rejects the description.
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule + Send + Sync>>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(NodeCountRule),
                Box::new(ColoredCoverageRule),
            ],
        }
    }

    pub fn validate(&self, parts: &DescriptionParts) -> ValidationResult {
        let violations: Vec<_> = self.rules
            .iter()
            .flat_map(|rule| rule.validate(parts))
            .collect();

        if violations.is_empty() {
            ValidationResult::success()
        } else {
            ValidationResult::failure(violations)
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
