//! Fitted feature scalers
//!
//! Scalers are applied to the raw feature vector before classification and
//! must match the transform the classifier was trained against.

use avalfimult_core::{Error, FeatureVector, Result, FEATURE_COUNT};

/// Trait for fitted feature normalization transforms
pub trait Scaler: Send + Sync {
    /// Map a raw feature vector to a normalized one
    fn transform(&self, features: &FeatureVector) -> FeatureVector;

    /// Get the scaler name
    fn name(&self) -> &str;

    /// Short description of the fitted transform, used in request logs
    fn identity(&self) -> String {
        self.name().to_string()
    }
}

/// Standardization: `(x - mean) / scale`
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl StandardScaler {
    /// Create a standard scaler from fitted per-feature means and scales.
    ///
    /// A zero scale (constant feature during fitting) is treated as 1.
    pub fn new(mean: &[f64], scale: &[f64]) -> Result<Self> {
        let mean = fixed_width("mean", mean)?;
        let mut scale = fixed_width("scale", scale)?;
        for s in scale.iter_mut() {
            if *s == 0.0 {
                *s = 1.0;
            }
        }
        Ok(Self { mean, scale })
    }
}

impl Scaler for StandardScaler {
    fn transform(&self, features: &FeatureVector) -> FeatureVector {
        let mut out = features.0;
        for (i, x) in out.iter_mut().enumerate() {
            *x = (*x - self.mean[i]) / self.scale[i];
        }
        FeatureVector(out)
    }

    fn name(&self) -> &str {
        "standard"
    }

    fn identity(&self) -> String {
        format!("StandardScaler(n_features={FEATURE_COUNT})")
    }
}

/// Min-max scaling in fitted form: `x * scale + min`
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxScaler {
    min: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl MinMaxScaler {
    /// Create a min-max scaler from its fitted `min` offsets and `scale` factors
    pub fn new(min: &[f64], scale: &[f64]) -> Result<Self> {
        Ok(Self {
            min: fixed_width("min", min)?,
            scale: fixed_width("scale", scale)?,
        })
    }

    /// Fit a min-max scaler mapping `[data_min, data_max]` onto `[lo, hi]`
    pub fn from_range(data_min: &[f64], data_max: &[f64], lo: f64, hi: f64) -> Result<Self> {
        let data_min = fixed_width("data_min", data_min)?;
        let data_max = fixed_width("data_max", data_max)?;
        if hi <= lo {
            return Err(Error::artifact(format!(
                "min-max feature range must be increasing, got ({lo}, {hi})"
            )));
        }

        let mut min = [0.0; FEATURE_COUNT];
        let mut scale = [0.0; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            let range = data_max[i] - data_min[i];
            let range = if range == 0.0 { 1.0 } else { range };
            scale[i] = (hi - lo) / range;
            min[i] = lo - data_min[i] * scale[i];
        }
        Ok(Self { min, scale })
    }
}

impl Scaler for MinMaxScaler {
    fn transform(&self, features: &FeatureVector) -> FeatureVector {
        let mut out = features.0;
        for (i, x) in out.iter_mut().enumerate() {
            *x = *x * self.scale[i] + self.min[i];
        }
        FeatureVector(out)
    }

    fn name(&self) -> &str {
        "min_max"
    }

    fn identity(&self) -> String {
        format!("MinMaxScaler(n_features={FEATURE_COUNT})")
    }
}

/// Pass-through scaler for models trained on raw features
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityScaler;

impl Scaler for IdentityScaler {
    fn transform(&self, features: &FeatureVector) -> FeatureVector {
        *features
    }

    fn name(&self) -> &str {
        "identity"
    }
}

fn fixed_width(field: &str, values: &[f64]) -> Result<[f64; FEATURE_COUNT]> {
    let arr: [f64; FEATURE_COUNT] = values.try_into().map_err(|_| {
        Error::artifact(format!(
            "scaler field '{}' has {} values, expected {}",
            field,
            values.len(),
            FEATURE_COUNT
        ))
    })?;
    if let Some(bad) = arr.iter().find(|v| !v.is_finite()) {
        return Err(Error::artifact(format!(
            "scaler field '{field}' contains non-finite value {bad}"
        )));
    }
    Ok(arr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_scaler() {
        let scaler = StandardScaler::new(&[10.0, 20.0, 30.0, 40.0], &[2.0, 4.0, 5.0, 10.0]).unwrap();
        let out = scaler.transform(&FeatureVector([12.0, 12.0, 30.0, 60.0]));
        assert_eq!(out.0, [1.0, -2.0, 0.0, 2.0]);
    }

    #[test]
    fn test_standard_scaler_zero_scale() {
        let scaler = StandardScaler::new(&[1.0; 4], &[0.0, 1.0, 1.0, 1.0]).unwrap();
        let out = scaler.transform(&FeatureVector([3.0, 1.0, 1.0, 1.0]));
        assert_eq!(out.0[0], 2.0);
    }

    #[test]
    fn test_standard_scaler_wrong_width() {
        let err = StandardScaler::new(&[0.0; 3], &[1.0; 4]).unwrap_err();
        assert!(err.to_string().contains("expected 4"));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(StandardScaler::new(&[f64::NAN, 0.0, 0.0, 0.0], &[1.0; 4]).is_err());
    }

    #[test]
    fn test_min_max_from_range() {
        let scaler = MinMaxScaler::from_range(&[0.0; 4], &[10.0, 100.0, 1000.0, 5.0], 0.0, 1.0).unwrap();
        let out = scaler.transform(&FeatureVector([5.0, 25.0, 1000.0, 0.0]));
        for (got, want) in out.0.iter().zip([0.5, 0.25, 1.0, 0.0]) {
            assert!((got - want).abs() < 1e-12, "got {got}, want {want}");
        }
    }

    #[test]
    fn test_min_max_fitted_form() {
        let scaler = MinMaxScaler::new(&[-1.0; 4], &[0.5; 4]).unwrap();
        let out = scaler.transform(&FeatureVector([2.0, 4.0, 0.0, 6.0]));
        assert_eq!(out.0, [0.0, 1.0, -1.0, 2.0]);
    }

    #[test]
    fn test_min_max_bad_range() {
        assert!(MinMaxScaler::from_range(&[0.0; 4], &[1.0; 4], 1.0, 1.0).is_err());
    }

    #[test]
    fn test_identity_scaler() {
        let features = FeatureVector([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(IdentityScaler.transform(&features), features);
        assert_eq!(IdentityScaler.identity(), "identity");
    }
}
