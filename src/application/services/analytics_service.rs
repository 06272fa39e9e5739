//! Chart-ready distribution summaries over the dataset.
//!
//! Produces plain numeric series; rendering belongs to the shell. Labels
//! are localized through the display formatter so every chart shows the
//! same wording as the grids.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::display::{label_for_code, CodedField};
use crate::domain::{DomainResult, HeartRecord, RepositoryProvider};

/// Cholesterol histogram bin width used by the distribution chart.
const CHOLESTEROL_BIN_WIDTH: i32 = 20;

/// Fixed clinical cholesterol bands for the dashboard chart.
const CHOLESTEROL_BANDS: &[(i32, Option<i32>, &str)] = &[
    (0, Some(200), "Нормальный"),
    (200, Some(240), "Пограничный"),
    (240, None, "Высокий"),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeGroupCount {
    /// Decade label, e.g. "40-49".
    pub label: String,
    pub healthy: u64,
    pub diseased: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SexCount {
    pub code: String,
    pub label: String,
    pub total: u64,
    pub diseased: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChestPainCount {
    pub code: String,
    pub label: String,
    pub healthy: u64,
    pub diseased: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CholesterolBand {
    pub label: String,
    pub min: i32,
    /// Exclusive upper bound; `None` for the open-ended top band.
    pub max: Option<i32>,
    pub healthy: u64,
    pub diseased: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total: u64,
    pub healthy: u64,
    pub diseased: u64,
    /// Share of diseased records, 0 when the dataset is empty.
    pub prevalence: f64,
    pub age_groups: Vec<AgeGroupCount>,
    pub sex: Vec<SexCount>,
    pub chest_pain: Vec<ChestPainCount>,
    pub cholesterol_bands: Vec<CholesterolBand>,
}

/// Filters applied by the exploration view before charting.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EdaFilter {
    pub sex: Option<String>,
    pub heart_disease: Option<bool>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
}

impl EdaFilter {
    fn matches(&self, record: &HeartRecord) -> bool {
        if let Some(sex) = &self.sex {
            if &record.sex != sex {
                return false;
            }
        }
        if let Some(diseased) = self.heart_disease {
            if record.heart_disease != diseased {
                return false;
            }
        }
        if let Some(min) = self.min_age {
            if record.age < min {
                return false;
            }
        }
        if let Some(max) = self.max_age {
            if record.age > max {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub age: i32,
    pub max_hr: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    /// Inclusive lower edge; the bin spans `start..start + bin_width`.
    pub start: i32,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeanBpByPain {
    pub code: String,
    pub label: String,
    pub mean_resting_bp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdaReport {
    pub healthy: Vec<ScatterPoint>,
    pub diseased: Vec<ScatterPoint>,
    pub cholesterol_bin_width: i32,
    /// Cholesterol histogram over positive values only.
    pub cholesterol_bins: Vec<HistogramBin>,
    /// Mean resting blood pressure per chest pain type, highest first.
    pub bp_by_pain: Vec<MeanBpByPain>,
}

pub struct AnalyticsService {
    repos: Arc<dyn RepositoryProvider>,
}

impl AnalyticsService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn dashboard(&self) -> DomainResult<DashboardSummary> {
        let records = self.repos.records().list_records().await?;
        Ok(build_dashboard(&records))
    }

    pub async fn eda(&self, filter: &EdaFilter) -> DomainResult<EdaReport> {
        let records = self.repos.records().list_records().await?;
        let filtered: Vec<&HeartRecord> = records.iter().filter(|r| filter.matches(r)).collect();
        Ok(build_eda(&filtered))
    }
}

fn build_dashboard(records: &[HeartRecord]) -> DashboardSummary {
    let total = records.len() as u64;
    let diseased = records.iter().filter(|r| r.heart_disease).count() as u64;
    let healthy = total - diseased;

    // Age decades
    let mut decades: BTreeMap<i32, (u64, u64)> = BTreeMap::new();
    for record in records {
        let decade = (record.age / 10) * 10;
        let entry = decades.entry(decade).or_default();
        if record.heart_disease {
            entry.1 += 1;
        } else {
            entry.0 += 1;
        }
    }
    let age_groups = decades
        .into_iter()
        .map(|(decade, (healthy, diseased))| AgeGroupCount {
            label: format!("{}-{}", decade, decade + 9),
            healthy,
            diseased,
        })
        .collect();

    // Sex split
    let mut by_sex: BTreeMap<String, (u64, u64)> = BTreeMap::new();
    for record in records {
        let entry = by_sex.entry(record.sex.clone()).or_default();
        entry.0 += 1;
        if record.heart_disease {
            entry.1 += 1;
        }
    }
    let sex = by_sex
        .into_iter()
        .map(|(code, (total, diseased))| SexCount {
            label: label_for_code(CodedField::Sex, &code),
            code,
            total,
            diseased,
        })
        .collect();

    // Chest pain types
    let mut by_pain: BTreeMap<String, (u64, u64)> = BTreeMap::new();
    for record in records {
        let entry = by_pain.entry(record.chest_pain_type.clone()).or_default();
        if record.heart_disease {
            entry.1 += 1;
        } else {
            entry.0 += 1;
        }
    }
    let chest_pain = by_pain
        .into_iter()
        .map(|(code, (healthy, diseased))| ChestPainCount {
            label: label_for_code(CodedField::ChestPainType, &code),
            code,
            healthy,
            diseased,
        })
        .collect();

    // Cholesterol bands
    let cholesterol_bands = CHOLESTEROL_BANDS
        .iter()
        .map(|&(min, max, label)| {
            let in_band = |value: i32| value >= min && max.map_or(true, |m| value < m);
            let healthy = records
                .iter()
                .filter(|r| in_band(r.cholesterol) && !r.heart_disease)
                .count() as u64;
            let diseased = records
                .iter()
                .filter(|r| in_band(r.cholesterol) && r.heart_disease)
                .count() as u64;
            CholesterolBand {
                label: label.to_string(),
                min,
                max,
                healthy,
                diseased,
            }
        })
        .collect();

    DashboardSummary {
        total,
        healthy,
        diseased,
        prevalence: if total == 0 {
            0.0
        } else {
            diseased as f64 / total as f64
        },
        age_groups,
        sex,
        chest_pain,
        cholesterol_bands,
    }
}

fn build_eda(records: &[&HeartRecord]) -> EdaReport {
    let mut healthy = Vec::new();
    let mut diseased = Vec::new();
    for record in records {
        let point = ScatterPoint {
            age: record.age,
            max_hr: record.max_hr,
        };
        if record.heart_disease {
            diseased.push(point);
        } else {
            healthy.push(point);
        }
    }

    // Cholesterol histogram; zero readings are missing values, drop them.
    let mut bins: BTreeMap<i32, u64> = BTreeMap::new();
    for record in records {
        if record.cholesterol > 0 {
            let start = (record.cholesterol / CHOLESTEROL_BIN_WIDTH) * CHOLESTEROL_BIN_WIDTH;
            *bins.entry(start).or_default() += 1;
        }
    }
    let cholesterol_bins = bins
        .into_iter()
        .map(|(start, count)| HistogramBin { start, count })
        .collect();

    // Mean resting BP per chest pain type, highest mean first
    let mut bp_sums: BTreeMap<String, (f64, u64)> = BTreeMap::new();
    for record in records {
        let entry = bp_sums.entry(record.chest_pain_type.clone()).or_default();
        entry.0 += record.resting_bp as f64;
        entry.1 += 1;
    }
    let mut bp_by_pain: Vec<MeanBpByPain> = bp_sums
        .into_iter()
        .map(|(code, (sum, count))| MeanBpByPain {
            label: label_for_code(CodedField::ChestPainType, &code),
            code,
            mean_resting_bp: sum / count as f64,
        })
        .collect();
    bp_by_pain.sort_by(|a, b| {
        b.mean_resting_bp
            .partial_cmp(&a.mean_resting_bp)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    EdaReport {
        healthy,
        diseased,
        cholesterol_bin_width: CHOLESTEROL_BIN_WIDTH,
        cholesterol_bins,
        bp_by_pain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i32, age: i32, sex: &str, pain: &str, chol: i32, bp: i32, sick: bool) -> HeartRecord {
        HeartRecord {
            id,
            age,
            sex: sex.into(),
            chest_pain_type: pain.into(),
            resting_bp: bp,
            cholesterol: chol,
            fasting_bs: false,
            resting_ecg: "Normal".into(),
            max_hr: 150,
            exercise_angina: false,
            oldpeak: 0.0,
            st_slope: "Up".into(),
            heart_disease: sick,
        }
    }

    fn dataset() -> Vec<HeartRecord> {
        vec![
            record(1, 43, "M", "ATA", 180, 120, false),
            record(2, 47, "F", "ASY", 230, 140, true),
            record(3, 55, "M", "ASY", 260, 160, true),
            record(4, 58, "F", "NAP", 0, 130, false),
        ]
    }

    #[test]
    fn dashboard_counts_and_buckets() {
        let summary = build_dashboard(&dataset());
        assert_eq!(summary.total, 4);
        assert_eq!(summary.healthy, 2);
        assert_eq!(summary.diseased, 2);
        assert!((summary.prevalence - 0.5).abs() < 1e-9);

        assert_eq!(
            summary.age_groups,
            vec![
                AgeGroupCount {
                    label: "40-49".into(),
                    healthy: 1,
                    diseased: 1
                },
                AgeGroupCount {
                    label: "50-59".into(),
                    healthy: 1,
                    diseased: 1
                },
            ]
        );

        let men = summary.sex.iter().find(|s| s.code == "M").unwrap();
        assert_eq!((men.total, men.diseased), (2, 1));
        assert_eq!(men.label, "Мужской");

        let bands: Vec<(u64, u64)> = summary
            .cholesterol_bands
            .iter()
            .map(|b| (b.healthy, b.diseased))
            .collect();
        // 180 and the missing 0 fall into the first band, 230 and 260 above.
        assert_eq!(bands, vec![(2, 0), (0, 1), (0, 1)]);
    }

    #[test]
    fn eda_splits_scatter_and_bins_positive_cholesterol_only() {
        let records = dataset();
        let refs: Vec<&HeartRecord> = records.iter().collect();
        let report = build_eda(&refs);

        assert_eq!(report.healthy.len(), 2);
        assert_eq!(report.diseased.len(), 2);

        let total_binned: u64 = report.cholesterol_bins.iter().map(|b| b.count).sum();
        assert_eq!(total_binned, 3); // the 0 reading is dropped
        assert_eq!(report.cholesterol_bins[0].start, 180);

        // ASY has the highest mean BP (150) and comes first
        assert_eq!(report.bp_by_pain[0].code, "ASY");
        assert!((report.bp_by_pain[0].mean_resting_bp - 150.0).abs() < 1e-9);
    }

    #[test]
    fn eda_filter_narrows_the_population() {
        let records = dataset();
        let filter = EdaFilter {
            sex: Some("M".into()),
            heart_disease: Some(true),
            min_age: None,
            max_age: None,
        };
        let refs: Vec<&HeartRecord> = records.iter().filter(|r| filter.matches(r)).collect();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].id, 3);

        let empty = EdaFilter {
            min_age: Some(90),
            ..Default::default()
        };
        assert!(records.iter().all(|r| !empty.matches(r)));
    }
}
