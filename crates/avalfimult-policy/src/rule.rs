//! Policy and rule definitions

use avalfimult_core::{Error, Indicator, Result};
use serde::{Deserialize, Serialize};

use crate::Trigger;

/// Minimum net equity a fund must have to be scored
pub const NET_EQUITY_FLOOR: f64 = 1_000_000.0;

/// Message returned when net equity is below the floor
pub const NET_EQUITY_MESSAGE: &str = "Erro: patliq deve ser >= 1M !!!";

/// A named set of rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    /// Policy name
    pub name: String,

    /// Description of what this policy enforces
    #[serde(default)]
    pub description: String,

    /// Rules in this policy, evaluated in order
    pub rules: Vec<Rule>,
}

impl Policy {
    /// Load a policy from YAML string
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load a policy from a file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
            .map_err(|e| Error::config(format!("invalid policy {}: {}", path.display(), e)))
    }

    /// The built-in policy: net equity must be at least `minimum`
    pub fn net_equity_floor(minimum: f64, message: impl Into<String>) -> Self {
        Self {
            name: "fund-eligibility".to_string(),
            description: "Funds below the net equity floor are not scored".to_string(),
            rules: vec![Rule {
                name: "net-equity-floor".to_string(),
                description: format!("patliq must be >= {minimum}"),
                trigger: Trigger::Below {
                    indicator: Indicator::Patliq,
                    minimum,
                },
                message: message.into(),
                enabled: true,
            }],
        }
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::net_equity_floor(NET_EQUITY_FLOOR, NET_EQUITY_MESSAGE)
    }
}

/// A single rule within a policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    /// Rule identifier
    pub name: String,

    /// Description of what this rule does
    #[serde(default)]
    pub description: String,

    /// Condition that rejects the request
    pub trigger: Trigger,

    /// Message returned to the client when the rule rejects
    pub message: String,

    /// Whether this rule is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}
