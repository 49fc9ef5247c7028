//! Core types for AvalFIMult

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// Number of features every scaler and classifier operates on
pub const FEATURE_COUNT: usize = 4;

/// One of the four fund indicators accepted by the scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    /// Redemption amount
    Resgate,
    /// Capital inflow amount
    Capta,
    /// Net equity of the fund
    Patliq,
    /// Total equity
    Pattotal,
}

impl Indicator {
    /// All indicators, in feature-vector order
    pub const ALL: [Indicator; FEATURE_COUNT] = [
        Indicator::Resgate,
        Indicator::Capta,
        Indicator::Patliq,
        Indicator::Pattotal,
    ];

    /// Query-parameter name of this indicator
    pub fn name(&self) -> &'static str {
        match self {
            Self::Resgate => "resgate",
            Self::Capta => "capta",
            Self::Patliq => "patliq",
            Self::Pattotal => "pattotal",
        }
    }

    /// Position of this indicator inside a [`FeatureVector`]
    pub fn index(&self) -> usize {
        match self {
            Self::Resgate => 0,
            Self::Capta => 1,
            Self::Patliq => 2,
            Self::Pattotal => 3,
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The four validated, parsed indicators of a scoring request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Indicators {
    /// Redemption amount
    pub resgate: f64,

    /// Capital inflow amount
    pub capta: f64,

    /// Net equity
    pub patliq: f64,

    /// Total equity
    pub pattotal: f64,
}

impl Indicators {
    /// Create a new set of indicators
    pub fn new(resgate: f64, capta: f64, patliq: f64, pattotal: f64) -> Self {
        Self {
            resgate,
            capta,
            patliq,
            pattotal,
        }
    }

    /// Value of a single indicator
    pub fn get(&self, indicator: Indicator) -> f64 {
        match indicator {
            Indicator::Resgate => self.resgate,
            Indicator::Capta => self.capta,
            Indicator::Patliq => self.patliq,
            Indicator::Pattotal => self.pattotal,
        }
    }

    /// Build the feature vector in training order `[resgate, capta, patliq, pattotal]`
    pub fn feature_vector(&self) -> FeatureVector {
        FeatureVector([self.resgate, self.capta, self.patliq, self.pattotal])
    }
}

/// Single-row feature vector, raw or normalized
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Feature values as a slice
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Value at a feature index, if in range
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }
}

impl fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}

/// Raw class label produced by a classifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(pub f64);

impl Label {
    /// Whether the label is exactly the integer `n`
    pub fn is(&self, n: i64) -> bool {
        self.0.fract() == 0.0 && self.0 == n as f64
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Integral class values render without a decimal point ("0", "1")
        if self.0.is_finite() && self.0.fract() == 0.0 {
            write!(f, "{:.0}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Viability verdict for allocating funds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Viable")]
    Viable,
    #[serde(rename = "Not Viable")]
    NotViable,
}

impl Verdict {
    /// Map a classifier label to a verdict: 0 is "Not Viable", 1 is "Viable"
    pub fn from_label(label: Label) -> Result<Self> {
        if label.is(0) {
            Ok(Self::NotViable)
        } else if label.is(1) {
            Ok(Self::Viable)
        } else {
            Err(Error::UnexpectedLabel(label.to_string()))
        }
    }

    /// Human-readable verdict text
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Viable => "Viable",
            Self::NotViable => "Not Viable",
        }
    }

    /// The raw label this verdict corresponds to
    pub fn label(&self) -> Label {
        match self {
            Self::Viable => Label(1.0),
            Self::NotViable => Label(0.0),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_vector_order() {
        let indicators = Indicators::new(100.0, 200.0, 2_000_000.0, 5_000_000.0);
        let features = indicators.feature_vector();
        assert_eq!(features.as_slice(), &[100.0, 200.0, 2_000_000.0, 5_000_000.0]);

        for indicator in Indicator::ALL {
            assert_eq!(features.get(indicator.index()), Some(indicators.get(indicator)));
        }
    }

    #[test]
    fn test_verdict_mapping() {
        assert_eq!(Verdict::from_label(Label(0.0)).unwrap(), Verdict::NotViable);
        assert_eq!(Verdict::from_label(Label(1.0)).unwrap(), Verdict::Viable);
        assert_eq!(Verdict::Viable.to_string(), "Viable");
        assert_eq!(Verdict::NotViable.to_string(), "Not Viable");
    }

    #[test]
    fn test_unexpected_label() {
        let err = Verdict::from_label(Label(2.0)).unwrap_err();
        assert!(matches!(err, Error::UnexpectedLabel(ref l) if l == "2"));

        let err = Verdict::from_label(Label(0.5)).unwrap_err();
        assert!(matches!(err, Error::UnexpectedLabel(ref l) if l == "0.5"));
    }

    #[test]
    fn test_label_display() {
        assert_eq!(Label(0.0).to_string(), "0");
        assert_eq!(Label(1.0).to_string(), "1");
        assert_eq!(Verdict::Viable.label(), Label(1.0));
    }

    #[test]
    fn test_verdict_serialization() {
        let json = serde_json::to_string(&Verdict::NotViable).unwrap();
        assert_eq!(json, "\"Not Viable\"");
    }
}
