//! Disease risk estimation.
//!
//! Placeholder scoring, not a trained model: a uniform baseline draw plus
//! three additive clamped terms keyed on age, chest pain type and
//! exercise-induced angina. The contract is only that the output lies in
//! [0, 1] and responds to those three inputs in the documented direction.

use std::sync::{Arc, RwLock};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::record::codes;
use crate::domain::DomainResult;
use crate::shared::FeatureRanges;

/// Feature bounds shared between the risk form, the sample generator and
/// the training stub that refreshes them from the dataset.
pub type SharedFeatureRanges = Arc<RwLock<FeatureRanges>>;

/// Age bounds of the original training set. Fixed constants so the linear
/// age term stays stable even after the ranges are refreshed.
const AGE_LOW: f64 = 29.0;
const AGE_HIGH: f64 = 77.0;
/// Maximum contribution of the age term.
const AGE_WEIGHT: f64 = 0.2;
/// Chest-pain offsets: asymptomatic pain weighs double.
const ASY_OFFSET: f64 = 0.2;
const OTHER_PAIN_OFFSET: f64 = 0.1;
/// Offset applied when exercise-induced angina is present.
const ANGINA_OFFSET: f64 = 0.1;

/// Patient features submitted from the risk form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskInput {
    pub age: i32,
    pub sex: String,
    pub chest_pain_type: String,
    pub resting_bp: i32,
    pub cholesterol: i32,
    pub fasting_bs: bool,
    pub resting_ecg: String,
    pub max_hr: i32,
    pub exercise_angina: bool,
    pub oldpeak: f32,
    pub st_slope: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_probability(probability: f64) -> Self {
        if probability < 0.3 {
            Self::Low
        } else if probability < 0.6 {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Низкий риск",
            Self::Medium => "Средний риск",
            Self::High => "Высокий риск",
        }
    }

    pub fn recommendations(&self) -> &'static str {
        match self {
            Self::Low => {
                "• Продолжайте вести здоровый образ жизни\n• Регулярные профилактические осмотры"
            }
            Self::Medium => {
                "• Рекомендуется консультация кардиолога\n• Контроль факторов риска\n• Регулярный мониторинг состояния"
            }
            Self::High => {
                "• Срочная консультация кардиолога\n• Дополнительное обследование\n• Строгий контроль факторов риска"
            }
        }
    }
}

/// Full assessment returned to the risk form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    /// Estimated probability in [0, 1].
    pub probability: f64,
    pub level: RiskLevel,
    pub level_label: String,
    pub recommendations: String,
    /// Headline inputs echoed back for the info panel.
    pub key_factors: Vec<String>,
}

pub struct RiskEstimator {
    ranges: SharedFeatureRanges,
}

impl RiskEstimator {
    pub fn new(ranges: SharedFeatureRanges) -> Self {
        Self { ranges }
    }

    /// Reject inputs outside the observed clinical ranges before scoring.
    pub fn validate(&self, input: &RiskInput) -> DomainResult<()> {
        let ranges = *self.ranges.read().expect("ranges lock poisoned");
        ranges.check("age", input.age as f64)?;
        ranges.check("resting_bp", input.resting_bp as f64)?;
        ranges.check("cholesterol", input.cholesterol as f64)?;
        ranges.check("max_hr", input.max_hr as f64)?;
        ranges.check("oldpeak", input.oldpeak as f64)?;
        Ok(())
    }

    /// Deterministic part of the score: the three documented terms.
    pub fn adjustments(input: &RiskInput) -> f64 {
        let age_ratio = ((input.age as f64 - AGE_LOW) / (AGE_HIGH - AGE_LOW)).clamp(0.0, 1.0);
        let age_effect = age_ratio * AGE_WEIGHT;

        let pain_effect = if input.chest_pain_type == "ASY" {
            ASY_OFFSET
        } else {
            OTHER_PAIN_OFFSET
        };

        let angina_effect = if input.exercise_angina {
            ANGINA_OFFSET
        } else {
            0.0
        };

        age_effect + pain_effect + angina_effect
    }

    /// Baseline random draw plus the deterministic terms, clamped to [0, 1].
    pub fn estimate(&self, input: &RiskInput) -> f64 {
        let baseline = rand::thread_rng().gen_range(0.0..0.5);
        (baseline + Self::adjustments(input)).clamp(0.0, 1.0)
    }

    pub fn assess(&self, input: &RiskInput) -> RiskAssessment {
        let probability = self.estimate(input);
        let level = RiskLevel::from_probability(probability);
        RiskAssessment {
            probability,
            level,
            level_label: level.label().to_string(),
            recommendations: level.recommendations().to_string(),
            key_factors: vec![
                format!("Возраст: {} лет", input.age),
                format!("Холестерин: {} мг/дл", input.cholesterol),
                format!("Макс. пульс: {}", input.max_hr),
            ],
        }
    }

    /// Random but plausible form input, drawn across the observed ranges.
    pub fn sample_input(&self) -> RiskInput {
        let ranges = *self.ranges.read().expect("ranges lock poisoned");
        let mut rng = rand::thread_rng();

        let mut draw_int = |min: f64, max: f64| rng.gen_range(min..=max).round() as i32;
        let age = draw_int(ranges.age.min, ranges.age.max);
        let resting_bp = draw_int(ranges.resting_bp.min, ranges.resting_bp.max);
        let cholesterol = draw_int(ranges.cholesterol.min, ranges.cholesterol.max);
        let max_hr = draw_int(ranges.max_hr.min, ranges.max_hr.max);

        let oldpeak_raw: f64 = rng.gen_range(ranges.oldpeak.min..=ranges.oldpeak.max);
        let oldpeak = (oldpeak_raw * 10.0).round() as f32 / 10.0;

        let pick = |options: &[&str], rng: &mut rand::rngs::ThreadRng| {
            options[rng.gen_range(0..options.len())].to_string()
        };

        RiskInput {
            age,
            sex: pick(codes::SEX, &mut rng),
            chest_pain_type: pick(codes::CHEST_PAIN_TYPE, &mut rng),
            resting_bp,
            cholesterol,
            fasting_bs: rng.gen_bool(0.5),
            resting_ecg: pick(codes::RESTING_ECG, &mut rng),
            max_hr,
            exercise_angina: rng.gen_bool(0.5),
            oldpeak,
            st_slope: pick(codes::ST_SLOPE, &mut rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimator() -> RiskEstimator {
        RiskEstimator::new(Arc::new(RwLock::new(FeatureRanges::default())))
    }

    fn input(age: i32) -> RiskInput {
        RiskInput {
            age,
            sex: "M".into(),
            chest_pain_type: "NAP".into(),
            resting_bp: 140,
            cholesterol: 250,
            fasting_bs: false,
            resting_ecg: "Normal".into(),
            max_hr: 150,
            exercise_angina: false,
            oldpeak: 1.0,
            st_slope: "Flat".into(),
        }
    }

    #[test]
    fn age_term_is_linear_between_the_training_bounds() {
        let younger = RiskEstimator::adjustments(&input(41));
        let older = RiskEstimator::adjustments(&input(65));
        let expected = (65.0 - 41.0) / (77.0 - 29.0) * 0.2;
        assert!((older - younger - expected).abs() < 1e-9);
    }

    #[test]
    fn asymptomatic_pain_and_angina_raise_the_score() {
        let base = RiskEstimator::adjustments(&input(50));

        let mut asy = input(50);
        asy.chest_pain_type = "ASY".into();
        assert!((RiskEstimator::adjustments(&asy) - base - 0.1).abs() < 1e-9);

        let mut angina = input(50);
        angina.exercise_angina = true;
        assert!((RiskEstimator::adjustments(&angina) - base - 0.1).abs() < 1e-9);
    }

    #[test]
    fn age_term_is_clamped_outside_the_bounds() {
        assert_eq!(
            RiskEstimator::adjustments(&input(20)),
            RiskEstimator::adjustments(&input(29))
        );
        assert_eq!(
            RiskEstimator::adjustments(&input(90)),
            RiskEstimator::adjustments(&input(77))
        );
    }

    #[test]
    fn estimate_stays_within_unit_interval() {
        let estimator = estimator();
        let mut worst = input(77);
        worst.chest_pain_type = "ASY".into();
        worst.exercise_angina = true;
        for _ in 0..200 {
            let p = estimator.estimate(&worst);
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn risk_levels_follow_the_documented_bands() {
        assert_eq!(RiskLevel::from_probability(0.1), RiskLevel::Low);
        assert_eq!(RiskLevel::from_probability(0.3), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_probability(0.59), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_probability(0.6), RiskLevel::High);
    }

    #[test]
    fn generated_samples_pass_validation() {
        let estimator = estimator();
        for _ in 0..100 {
            let sample = estimator.sample_input();
            estimator.validate(&sample).unwrap();
        }
    }

    #[test]
    fn out_of_range_input_is_rejected() {
        let estimator = estimator();
        let mut bad = input(50);
        bad.cholesterol = 900;
        assert!(estimator.validate(&bad).is_err());
    }
}
