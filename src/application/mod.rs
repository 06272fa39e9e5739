//! Business logic: services and the authentication session context.

pub mod services;
pub mod session;

pub use services::{
    AnalyticsService, AuthService, DatasetService, RecordService, RiskEstimator, TrainingService,
    UserService,
};
pub use session::AuthSession;
