//! AvalFIMult Policy Engine
//!
//! Business rules checked against the validated indicators before the model
//! is invoked. A request that breaks any enabled rule is rejected with the
//! rule's message and never reaches the scorer.
//!
//! The built-in policy holds a single rule: net equity (`patliq`) must be at
//! least 1,000,000. Additional policies can be loaded from YAML.

pub mod engine;
pub mod rule;
pub mod trigger;

pub use engine::{EvaluationResult, PolicyEngine};
pub use rule::{Policy, Rule, NET_EQUITY_FLOOR, NET_EQUITY_MESSAGE};
pub use trigger::Trigger;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::engine::{EvaluationResult, PolicyEngine};
    pub use crate::rule::{Policy, Rule};
    pub use crate::trigger::Trigger;
}
