//! Model training stub.
//!
//! Runs one background task that walks the dataset, reports progress to a
//! shared status snapshot and refreshes the observed feature ranges used by
//! the risk form. The task is not cancellable and has no timeout; callers
//! wait for natural completion. No model artifact is produced.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info};

use crate::application::services::risk_service::SharedFeatureRanges;
use crate::domain::{DomainError, DomainResult, HeartRecord, RepositoryProvider};
use crate::shared::{FeatureRanges, NumericRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrainingState {
    Idle,
    Running,
    Completed,
    Failed,
}

/// Snapshot of the training progress shown by the foreground indicator.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingStatus {
    pub state: TrainingState,
    /// 0..=100
    pub progress: u8,
    pub message: String,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl Default for TrainingStatus {
    fn default() -> Self {
        Self {
            state: TrainingState::Idle,
            progress: 0,
            message: "Готов к обучению".to_string(),
            started_at: None,
            finished_at: None,
        }
    }
}

pub struct TrainingService {
    repos: Arc<dyn RepositoryProvider>,
    ranges: SharedFeatureRanges,
    status: Arc<RwLock<TrainingStatus>>,
}

impl TrainingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, ranges: SharedFeatureRanges) -> Self {
        Self {
            repos,
            ranges,
            status: Arc::new(RwLock::new(TrainingStatus::default())),
        }
    }

    /// Kick off one background training pass. Rejected while a pass is
    /// already running.
    pub fn start(&self) -> DomainResult<()> {
        {
            let mut status = self.status.write().expect("status lock poisoned");
            if status.state == TrainingState::Running {
                return Err(DomainError::Conflict(
                    "Training is already running".to_string(),
                ));
            }
            *status = TrainingStatus {
                state: TrainingState::Running,
                progress: 0,
                message: "Начало обучения модели...".to_string(),
                started_at: Some(Utc::now()),
                finished_at: None,
            };
        }

        let repos = self.repos.clone();
        let ranges = self.ranges.clone();
        let status = self.status.clone();
        tokio::spawn(async move {
            run_training(repos, ranges, status).await;
        });

        Ok(())
    }

    /// Current progress snapshot.
    pub fn status(&self) -> TrainingStatus {
        self.status.read().expect("status lock poisoned").clone()
    }
}

async fn run_training(
    repos: Arc<dyn RepositoryProvider>,
    ranges: SharedFeatureRanges,
    status: Arc<RwLock<TrainingStatus>>,
) {
    let step = |progress: u8, message: &str| {
        let mut st = status.write().expect("status lock poisoned");
        st.progress = progress;
        st.message = message.to_string();
    };

    step(10, "Загрузка данных...");
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let records = match repos.records().list_records().await {
        Ok(records) => records,
        Err(e) => {
            error!("Training failed: {}", e);
            let mut st = status.write().expect("status lock poisoned");
            st.state = TrainingState::Failed;
            st.message = format!("Ошибка при обучении: {}", e);
            st.finished_at = Some(Utc::now());
            return;
        }
    };

    step(60, "Анализ обучающей выборки...");
    if let Some(observed) = ranges_from_records(&records) {
        *ranges.write().expect("ranges lock poisoned") = observed;
    }
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    step(90, "Сохранение модели...");
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    info!("Training pass finished over {} records", records.len());
    let mut st = status.write().expect("status lock poisoned");
    st.state = TrainingState::Completed;
    st.progress = 100;
    st.message = "Обучение завершено успешно!".to_string();
    st.finished_at = Some(Utc::now());
}

/// Observed min/max of every numeric feature. `None` for an empty dataset
/// so the defaults stay in effect.
fn ranges_from_records(records: &[HeartRecord]) -> Option<FeatureRanges> {
    let first = records.first()?;

    let mut ranges = FeatureRanges {
        age: NumericRange::new(first.age as f64, first.age as f64),
        resting_bp: NumericRange::new(first.resting_bp as f64, first.resting_bp as f64),
        cholesterol: NumericRange::new(first.cholesterol as f64, first.cholesterol as f64),
        max_hr: NumericRange::new(first.max_hr as f64, first.max_hr as f64),
        oldpeak: NumericRange::new(first.oldpeak as f64, first.oldpeak as f64),
    };

    let mut widen = |range: &mut NumericRange, value: f64| {
        range.min = range.min.min(value);
        range.max = range.max.max(value);
    };

    for record in &records[1..] {
        widen(&mut ranges.age, record.age as f64);
        widen(&mut ranges.resting_bp, record.resting_bp as f64);
        widen(&mut ranges.cholesterol, record.cholesterol as f64);
        widen(&mut ranges.max_hr, record.max_hr as f64);
        widen(&mut ranges.oldpeak, record.oldpeak as f64);
    }

    Some(ranges)
}

#[cfg(test)]
mod tests {
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;

    use super::*;
    use crate::domain::NewHeartRecord;
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;

    fn draft(age: i32, max_hr: i32) -> NewHeartRecord {
        NewHeartRecord {
            age,
            sex: "M".into(),
            chest_pain_type: "ASY".into(),
            resting_bp: 150,
            cholesterol: 365,
            fasting_bs: false,
            resting_ecg: "Normal".into(),
            max_hr,
            exercise_angina: false,
            oldpeak: 1.0,
            st_slope: "Flat".into(),
            heart_disease: true,
        }
    }

    async fn service() -> (TrainingService, SharedFeatureRanges) {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db));
        repos
            .records()
            .insert_records(vec![draft(35, 120), draft(70, 180)])
            .await
            .unwrap();
        let ranges: SharedFeatureRanges = Arc::new(RwLock::new(FeatureRanges::default()));
        (TrainingService::new(repos, ranges.clone()), ranges)
    }

    async fn wait_until_done(service: &TrainingService) -> TrainingStatus {
        for _ in 0..100 {
            let status = service.status();
            if status.state != TrainingState::Running {
                return status;
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
        panic!("training did not finish in time");
    }

    #[tokio::test]
    async fn completes_and_refreshes_observed_ranges() {
        let (service, ranges) = service().await;
        assert_eq!(service.status().state, TrainingState::Idle);

        service.start().unwrap();
        let done = wait_until_done(&service).await;

        assert_eq!(done.state, TrainingState::Completed);
        assert_eq!(done.progress, 100);
        assert!(done.started_at.is_some() && done.finished_at.is_some());

        let observed = *ranges.read().unwrap();
        assert_eq!(observed.age, NumericRange::new(35.0, 70.0));
        assert_eq!(observed.max_hr, NumericRange::new(120.0, 180.0));
    }

    #[tokio::test]
    async fn second_start_while_running_is_a_conflict() {
        let (service, _) = service().await;
        service.start().unwrap();
        let err = service.start().unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        wait_until_done(&service).await;
    }

    #[test]
    fn empty_dataset_keeps_default_ranges() {
        assert_eq!(ranges_from_records(&[]), None);
    }
}
