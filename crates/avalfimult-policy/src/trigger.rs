//! Policy trigger definitions

use avalfimult_core::{Indicator, Indicators};
use serde::{Deserialize, Serialize};

/// Condition under which a rule rejects a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    /// Fires when the indicator is strictly below `minimum`
    Below {
        indicator: Indicator,
        minimum: f64,
    },

    /// Fires when the indicator is strictly above `maximum`
    Above {
        indicator: Indicator,
        maximum: f64,
    },
}

impl Trigger {
    /// Whether this trigger fires for the given indicators
    pub fn fires(&self, indicators: &Indicators) -> bool {
        match self {
            Self::Below { indicator, minimum } => indicators.get(*indicator) < *minimum,
            Self::Above { indicator, maximum } => indicators.get(*indicator) > *maximum,
        }
    }

    /// The indicator this trigger inspects
    pub fn indicator(&self) -> Indicator {
        match self {
            Self::Below { indicator, .. } | Self::Above { indicator, .. } => *indicator,
        }
    }
}
