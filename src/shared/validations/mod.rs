//! Clinical range checks for numeric features.
//!
//! The bounds are the observed min/max of the training dataset. The risk
//! form rejects values outside them; CSV ingestion does not (imported rows
//! are taken as-is).

use serde::{Deserialize, Serialize};

use crate::shared::{DomainError, DomainResult};

/// Inclusive numeric bounds for one feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Observed bounds of the numeric features, per feature name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRanges {
    pub age: NumericRange,
    pub resting_bp: NumericRange,
    pub cholesterol: NumericRange,
    pub max_hr: NumericRange,
    pub oldpeak: NumericRange,
}

impl Default for FeatureRanges {
    fn default() -> Self {
        Self {
            age: NumericRange::new(29.0, 77.0),
            resting_bp: NumericRange::new(94.0, 200.0),
            cholesterol: NumericRange::new(126.0, 564.0),
            max_hr: NumericRange::new(71.0, 202.0),
            oldpeak: NumericRange::new(0.0, 6.2),
        }
    }
}

impl FeatureRanges {
    /// Check one feature value against its bounds.
    pub fn check(&self, feature: &'static str, value: f64) -> DomainResult<()> {
        let range = match feature {
            "age" => &self.age,
            "resting_bp" => &self.resting_bp,
            "cholesterol" => &self.cholesterol,
            "max_hr" => &self.max_hr,
            "oldpeak" => &self.oldpeak,
            other => {
                return Err(DomainError::Validation(format!(
                    "Unknown feature: {other}"
                )))
            }
        };
        if range.contains(value) {
            Ok(())
        } else {
            Err(DomainError::Validation(format!(
                "{feature} must be between {} and {}",
                range.min, range.max
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_values_inside_bounds() {
        let ranges = FeatureRanges::default();
        assert!(ranges.check("age", 54.0).is_ok());
        assert!(ranges.check("oldpeak", 0.0).is_ok());
        assert!(ranges.check("oldpeak", 6.2).is_ok());
    }

    #[test]
    fn rejects_values_outside_bounds() {
        let ranges = FeatureRanges::default();
        assert!(ranges.check("age", 28.0).is_err());
        assert!(ranges.check("cholesterol", 600.0).is_err());
        assert!(ranges.check("nope", 1.0).is_err());
    }
}
