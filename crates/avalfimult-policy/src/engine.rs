//! Policy evaluation engine

use avalfimult_core::{Error, Indicators, Result};
use std::path::Path;
use tracing::debug;

use crate::Policy;

/// Policy evaluation engine
#[derive(Debug, Clone)]
pub struct PolicyEngine {
    policies: Vec<Policy>,
}

impl PolicyEngine {
    /// Create an engine with no policies; every request is allowed
    pub fn new() -> Self {
        Self {
            policies: Vec::new(),
        }
    }

    /// Create an engine holding only the built-in net equity floor
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_policy(Policy::default());
        engine
    }

    /// Load a policy from file
    pub fn load_policy(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let policy = Policy::from_file(path)?;
        self.policies.push(policy);
        Ok(())
    }

    /// Add a policy directly
    pub fn add_policy(&mut self, policy: Policy) {
        self.policies.push(policy);
    }

    /// Evaluate indicators against all enabled rules, stopping at the first rejection
    pub fn evaluate(&self, indicators: &Indicators) -> EvaluationResult {
        for policy in &self.policies {
            for rule in policy.rules.iter().filter(|r| r.enabled) {
                if rule.trigger.fires(indicators) {
                    debug!(
                        policy = %policy.name,
                        rule = %rule.name,
                        indicator = %rule.trigger.indicator(),
                        "Rule rejected request"
                    );
                    return EvaluationResult::Rejected {
                        policy_name: policy.name.clone(),
                        rule_name: rule.name.clone(),
                        message: rule.message.clone(),
                    };
                }
            }
        }
        EvaluationResult::Allowed
    }

    /// Evaluate and turn a rejection into a `PolicyViolation` error
    pub fn check(&self, indicators: &Indicators) -> Result<()> {
        match self.evaluate(indicators) {
            EvaluationResult::Allowed => Ok(()),
            EvaluationResult::Rejected { message, .. } => Err(Error::PolicyViolation(message)),
        }
    }

    /// Get loaded policies
    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    /// Total number of enabled rules
    pub fn rule_count(&self) -> usize {
        self.policies
            .iter()
            .flat_map(|p| p.rules.iter())
            .filter(|r| r.enabled)
            .count()
    }
}

impl Default for PolicyEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Result of policy evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationResult {
    /// No rule fired
    Allowed,

    /// A rule fired; the request must not be scored
    Rejected {
        policy_name: String,
        rule_name: String,
        message: String,
    },
}

impl EvaluationResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}
