//! Query parameter validation
//!
//! Each indicator must be present and written as a plain non-negative decimal:
//! ASCII digits with at most one `.` and at least one digit. Signs, exponents,
//! whitespace, thousands separators and special values are rejected.

use avalfimult_core::{Error, Indicator, Indicators};
use std::fmt;

/// The four raw query parameters of a scoring request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreQuery {
    pub resgate: Option<String>,
    pub capta: Option<String>,
    pub patliq: Option<String>,
    pub pattotal: Option<String>,
}

impl ScoreQuery {
    /// Collect parameters from decoded query pairs. The first occurrence of a
    /// repeated key wins; unknown keys are ignored.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let first = |name: &str| {
            pairs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
        };
        Self {
            resgate: first(Indicator::Resgate.name()),
            capta: first(Indicator::Capta.name()),
            patliq: first(Indicator::Patliq.name()),
            pattotal: first(Indicator::Pattotal.name()),
        }
    }

    fn raw(&self, indicator: Indicator) -> Option<&str> {
        match indicator {
            Indicator::Resgate => self.resgate.as_deref(),
            Indicator::Capta => self.capta.as_deref(),
            Indicator::Patliq => self.patliq.as_deref(),
            Indicator::Pattotal => self.pattotal.as_deref(),
        }
    }
}

/// Which parameters were missing or not numeric
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationFailure {
    pub missing: Vec<Indicator>,
    pub invalid: Vec<Indicator>,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(
            "Os argumentos 'resgate', 'capta', 'patliq' e 'pattotal' recebidos ou estão vazios ou não são números.",
        )?;
        if !self.missing.is_empty() {
            write!(f, " Ausentes: {}.", join(&self.missing))?;
        }
        if !self.invalid.is_empty() {
            write!(f, " Não numéricos: {}.", join(&self.invalid))?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

fn join(indicators: &[Indicator]) -> String {
    indicators
        .iter()
        .map(Indicator::name)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<ValidationFailure> for Error {
    fn from(failure: ValidationFailure) -> Self {
        Error::Validation(failure.to_string())
    }
}

/// Validate all four parameters, reporting every offending one at once
pub fn validate(query: &ScoreQuery) -> Result<Indicators, ValidationFailure> {
    let mut failure = ValidationFailure::default();
    let mut values = [0.0f64; 4];

    for indicator in Indicator::ALL {
        match query.raw(indicator) {
            None => failure.missing.push(indicator),
            Some(raw) => match parse_decimal(raw) {
                Some(value) => values[indicator.index()] = value,
                None => failure.invalid.push(indicator),
            },
        }
    }

    if failure.missing.is_empty() && failure.invalid.is_empty() {
        let [resgate, capta, patliq, pattotal] = values;
        Ok(Indicators::new(resgate, capta, patliq, pattotal))
    } else {
        Err(failure)
    }
}

/// Parse a non-negative decimal such as `"5"`, `"5.25"`, `".5"` or `"5."`
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let mut digits = 0usize;
    let mut dots = 0usize;
    for c in raw.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return None,
        }
    }
    if digits == 0 || dots > 1 {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}
