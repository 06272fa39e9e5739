//! Application services

pub mod analytics_service;
pub mod auth_service;
pub mod dataset_service;
pub mod record_service;
pub mod risk_service;
pub mod training_service;
pub mod user_service;

pub use analytics_service::{AnalyticsService, DashboardSummary, EdaFilter, EdaReport};
pub use auth_service::AuthService;
pub use dataset_service::{DatasetService, ImportSummary};
pub use record_service::RecordService;
pub use risk_service::{RiskAssessment, RiskEstimator, RiskInput, RiskLevel, SharedFeatureRanges};
pub use training_service::{TrainingService, TrainingState, TrainingStatus};
pub use user_service::UserService;
