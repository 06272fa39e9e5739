//! API Router with Swagger UI

use std::sync::{Arc, RwLock};

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dto::{ApiResponse, EmptyData};
use crate::api::handlers::{
    analytics, auth, dataset, health, records, risk, training, users,
};
use crate::application::services::{
    AnalyticsService, AuthService, DatasetService, RecordService, RiskEstimator,
    SharedFeatureRanges, TrainingService, UserService,
};
use crate::application::session::AuthSession;
use crate::domain::RepositoryProvider;
use crate::shared::FeatureRanges;

/// Unified state for all handlers.
///
/// Built once at bootstrap; the session context is shared between the
/// services and the handlers that check it.
#[derive(Clone)]
pub struct ApiState {
    pub session: AuthSession,
    pub auth: Arc<AuthService>,
    pub records: Arc<RecordService>,
    pub users: Arc<UserService>,
    pub dataset: Arc<DatasetService>,
    pub analytics: Arc<AnalyticsService>,
    pub risk: Arc<RiskEstimator>,
    pub training: Arc<TrainingService>,
}

impl ApiState {
    pub fn new(repos: Arc<dyn RepositoryProvider>, session: AuthSession) -> Self {
        let ranges: SharedFeatureRanges = Arc::new(RwLock::new(FeatureRanges::default()));
        Self {
            auth: Arc::new(AuthService::new(repos.clone(), session.clone())),
            records: Arc::new(RecordService::new(repos.clone())),
            users: Arc::new(UserService::new(repos.clone())),
            dataset: Arc::new(DatasetService::new(repos.clone())),
            analytics: Arc::new(AnalyticsService::new(repos.clone())),
            risk: Arc::new(RiskEstimator::new(ranges.clone())),
            training: Arc::new(TrainingService::new(repos, ranges)),
            session,
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::logout,
        auth::me,
        // Records
        records::list_records,
        records::list_records_display,
        records::get_record,
        records::create_record,
        records::update_record,
        records::delete_record,
        // Users
        users::list_users,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Dataset
        dataset::import_csv,
        dataset::export_csv,
        // Analytics
        analytics::dashboard,
        analytics::eda,
        // Risk
        risk::estimate,
        risk::sample,
        // Training
        training::start,
        training::status,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            EmptyData,
            // Health
            health::HealthResponse,
            // Auth
            auth::LoginRequest,
            auth::UserInfo,
            // Records
            records::RecordDto,
            records::LocalizedRecordDto,
            records::SaveRecordRequest,
            // Users
            users::CreateUserRequest,
            users::UpdateUserRequest,
            // Dataset
            dataset::ImportSummaryDto,
            // Risk
            risk::RiskRequest,
        )
    ),
    tags(
        (name = "Health", description = "Проверка живости"),
        (name = "Authentication", description = "Локальная сессия пользователя"),
        (name = "Records", description = "Записи наблюдений пациентов"),
        (name = "Users", description = "Администрирование пользователей"),
        (name = "Dataset", description = "Импорт и экспорт CSV"),
        (name = "Analytics", description = "Серии для графиков"),
        (name = "Risk", description = "Оценка риска заболевания"),
        (name = "Training", description = "Фоновое обучение модели")
    )
)]
struct ApiDoc;

/// Build the complete API router.
pub fn create_api_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Auth
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        // Records
        .route(
            "/records",
            get(records::list_records).post(records::create_record),
        )
        .route("/records/display", get(records::list_records_display))
        .route(
            "/records/{id}",
            get(records::get_record)
                .put(records::update_record)
                .delete(records::delete_record),
        )
        // Users
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            put(users::update_user).delete(users::delete_user),
        )
        // Dataset
        .route("/dataset/import", post(dataset::import_csv))
        .route("/dataset/export", get(dataset::export_csv))
        // Analytics
        .route("/analytics/dashboard", get(analytics::dashboard))
        .route("/analytics/eda", get(analytics::eda))
        // Risk
        .route("/risk/estimate", post(risk::estimate))
        .route("/risk/sample", get(risk::sample))
        // Training
        .route("/training/start", post(training::start))
        .route("/training/status", get(training::status))
        .with_state(state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check))
        .nest("/api/v1", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
