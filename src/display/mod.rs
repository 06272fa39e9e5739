//! Bidirectional mapping between categorical codes and localized display
//! labels.
//!
//! Forward mapping (code to label) is lenient: an unknown code is passed
//! through unchanged so imported data with unlisted codes still renders.
//! Reverse mapping (label back to code) is used when edited UI values are
//! resolved at save time and fails closed on anything unknown.

use crate::domain::HeartRecord;
use crate::shared::{DomainError, DomainResult};

/// Categorical fields that carry a code ↔ label table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodedField {
    Sex,
    ChestPainType,
    RestingEcg,
    StSlope,
    FastingBs,
    ExerciseAngina,
    HeartDisease,
}

impl CodedField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sex => "Sex",
            Self::ChestPainType => "ChestPainType",
            Self::RestingEcg => "RestingECG",
            Self::StSlope => "ST_Slope",
            Self::FastingBs => "FastingBS",
            Self::ExerciseAngina => "ExerciseAngina",
            Self::HeartDisease => "HeartDisease",
        }
    }

    fn table(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Sex => SEX,
            Self::ChestPainType => CHEST_PAIN_TYPE,
            Self::RestingEcg => RESTING_ECG,
            Self::StSlope => ST_SLOPE,
            Self::FastingBs => FASTING_BS,
            Self::ExerciseAngina => EXERCISE_ANGINA,
            Self::HeartDisease => HEART_DISEASE,
        }
    }
}

const SEX: &[(&str, &str)] = &[("M", "Мужской"), ("F", "Женский")];

const CHEST_PAIN_TYPE: &[(&str, &str)] = &[
    ("ATA", "Типичная стенокардия"),
    ("NAP", "Нетипичная стенокардия"),
    ("ASY", "Асимптоматическая"),
    ("TA", "Нестенокардическая боль"),
];

const RESTING_ECG: &[(&str, &str)] = &[
    ("Normal", "Нормальная"),
    ("ST", "Отклонение ST-T"),
    ("LVH", "Гипертрофия ЛЖ"),
];

const ST_SLOPE: &[(&str, &str)] = &[
    ("Up", "Восходящий"),
    ("Flat", "Плоский"),
    ("Down", "Нисходящий"),
];

const FASTING_BS: &[(&str, &str)] = &[("1", "> 120 мг/дл"), ("0", "≤ 120 мг/дл")];

const EXERCISE_ANGINA: &[(&str, &str)] = &[("Y", "Да"), ("N", "Нет")];

const HEART_DISEASE: &[(&str, &str)] = &[("1", "Есть"), ("0", "Нет")];

/// Code to localized label. Unknown codes pass through unchanged.
pub fn label_for_code(field: CodedField, code: &str) -> String {
    field
        .table()
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| (*label).to_string())
        .unwrap_or_else(|| code.to_string())
}

/// Localized label back to code. Unknown labels are a hard error.
pub fn code_for_label(field: CodedField, label: &str) -> DomainResult<String> {
    field
        .table()
        .iter()
        .find(|(_, l)| *l == label)
        .map(|(code, _)| (*code).to_string())
        .ok_or_else(|| DomainError::UnknownLabel {
            field: field.name(),
            label: label.to_string(),
        })
}

/// Resolve an edited UI value to a storable code. Accepts either a known
/// code or a known label; anything else rejects the save.
pub fn resolve_code(field: CodedField, value: &str) -> DomainResult<String> {
    if field.table().iter().any(|(code, _)| *code == value) {
        return Ok(value.to_string());
    }
    code_for_label(field, value)
}

fn bool_label(field: CodedField, value: bool) -> String {
    label_for_code(field, if value { "1" } else { "0" })
}

/// A record formatted for grid display: every field a localized string.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRecord {
    pub id: i32,
    pub age: String,
    pub sex: String,
    pub chest_pain_type: String,
    pub resting_bp: String,
    pub cholesterol: String,
    pub fasting_bs: String,
    pub resting_ecg: String,
    pub max_hr: String,
    pub exercise_angina: String,
    pub oldpeak: String,
    pub st_slope: String,
    pub heart_disease: String,
}

/// Format a stored record for display.
pub fn format_record(record: &HeartRecord) -> DisplayRecord {
    DisplayRecord {
        id: record.id,
        age: record.age.to_string(),
        sex: label_for_code(CodedField::Sex, &record.sex),
        chest_pain_type: label_for_code(CodedField::ChestPainType, &record.chest_pain_type),
        resting_bp: record.resting_bp.to_string(),
        cholesterol: record.cholesterol.to_string(),
        fasting_bs: bool_label(CodedField::FastingBs, record.fasting_bs),
        resting_ecg: label_for_code(CodedField::RestingEcg, &record.resting_ecg),
        max_hr: record.max_hr.to_string(),
        exercise_angina: label_for_code(
            CodedField::ExerciseAngina,
            if record.exercise_angina { "Y" } else { "N" },
        ),
        oldpeak: record.oldpeak.to_string(),
        st_slope: label_for_code(CodedField::StSlope, &record.st_slope),
        heart_disease: bool_label(CodedField::HeartDisease, record.heart_disease),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_both_ways() {
        for field in [
            CodedField::Sex,
            CodedField::ChestPainType,
            CodedField::RestingEcg,
            CodedField::StSlope,
            CodedField::FastingBs,
            CodedField::ExerciseAngina,
            CodedField::HeartDisease,
        ] {
            for (code, label) in field.table() {
                assert_eq!(label_for_code(field, code), *label);
                assert_eq!(code_for_label(field, label).unwrap(), *code);
            }
        }
    }

    #[test]
    fn unknown_code_passes_through() {
        assert_eq!(label_for_code(CodedField::ChestPainType, "XXX"), "XXX");
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = code_for_label(CodedField::StSlope, "Вертикальный").unwrap_err();
        assert!(matches!(
            err,
            DomainError::UnknownLabel { field: "ST_Slope", .. }
        ));
    }

    #[test]
    fn resolve_accepts_code_or_label_only() {
        assert_eq!(resolve_code(CodedField::Sex, "M").unwrap(), "M");
        assert_eq!(resolve_code(CodedField::Sex, "Женский").unwrap(), "F");
        assert!(resolve_code(CodedField::Sex, "Other").is_err());
    }

    #[test]
    fn formats_a_record_with_localized_labels() {
        let record = HeartRecord {
            id: 1,
            age: 54,
            sex: "M".into(),
            chest_pain_type: "ASY".into(),
            resting_bp: 150,
            cholesterol: 365,
            fasting_bs: false,
            resting_ecg: "Normal".into(),
            max_hr: 134,
            exercise_angina: false,
            oldpeak: 1.0,
            st_slope: "Flat".into(),
            heart_disease: true,
        };
        let display = format_record(&record);
        assert_eq!(display.sex, "Мужской");
        assert_eq!(display.chest_pain_type, "Асимптоматическая");
        assert_eq!(display.fasting_bs, "≤ 120 мг/дл");
        assert_eq!(display.exercise_angina, "Нет");
        assert_eq!(display.heart_disease, "Есть");
    }
}
