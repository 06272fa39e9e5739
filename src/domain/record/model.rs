use serde::{Deserialize, Serialize};

/// Known categorical codes.
///
/// Storage keeps codes raw: a record with an unlisted code is stored and
/// displayed as-is (the display layer passes unknown codes through), so
/// these sets gate the manual-entry path only.
pub mod codes {
    pub const SEX: &[&str] = &["M", "F"];
    pub const CHEST_PAIN_TYPE: &[&str] = &["ATA", "NAP", "ASY", "TA"];
    pub const RESTING_ECG: &[&str] = &["Normal", "ST", "LVH"];
    pub const ST_SLOPE: &[&str] = &["Up", "Flat", "Down"];
}

/// One persisted patient observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRecord {
    /// Store-assigned identity, immutable after insert.
    pub id: i32,
    pub age: i32,
    /// Sex code: `M` / `F`.
    pub sex: String,
    /// Chest pain type code: `ATA` / `NAP` / `ASY` / `TA`.
    pub chest_pain_type: String,
    /// Resting blood pressure, mmHg.
    pub resting_bp: i32,
    /// Serum cholesterol, mg/dl.
    pub cholesterol: i32,
    /// Fasting blood sugar > 120 mg/dl (CSV-encoded 0/1).
    pub fasting_bs: bool,
    /// Resting ECG code: `Normal` / `ST` / `LVH`.
    pub resting_ecg: String,
    /// Maximum heart rate achieved.
    pub max_hr: i32,
    /// Exercise-induced angina (CSV-encoded Y/N).
    pub exercise_angina: bool,
    /// ST depression induced by exercise.
    pub oldpeak: f32,
    /// ST slope code: `Up` / `Flat` / `Down`.
    pub st_slope: String,
    /// Disease label (CSV-encoded 0/1).
    pub heart_disease: bool,
}

/// A record without identity. Produced by CSV ingestion and by the editor;
/// identity is assigned only on persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewHeartRecord {
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
    pub heart_disease: bool,
}

impl HeartRecord {
    /// Identity-less copy, e.g. for re-encoding to CSV.
    pub fn draft(&self) -> NewHeartRecord {
        NewHeartRecord {
            age: self.age,
            sex: self.sex.clone(),
            chest_pain_type: self.chest_pain_type.clone(),
            resting_bp: self.resting_bp,
            cholesterol: self.cholesterol,
            fasting_bs: self.fasting_bs,
            resting_ecg: self.resting_ecg.clone(),
            max_hr: self.max_hr,
            exercise_angina: self.exercise_angina,
            oldpeak: self.oldpeak,
            st_slope: self.st_slope.clone(),
            heart_disease: self.heart_disease,
        }
    }
}
