//! Model training handlers

use axum::{extract::State, Json};

use super::{domain_error, ErrorResponse};
use crate::api::dto::{ApiResponse, EmptyData};
use crate::api::router::ApiState;
use crate::application::services::TrainingStatus;

/// Запуск обучения модели
///
/// Запускает один фоновый проход по датасету. Пока проход идёт, повторный
/// запуск отклоняется. Прогресс доступен через `/training/status`.
#[utoipa::path(
    post,
    path = "/api/v1/training/start",
    tag = "Training",
    responses(
        (status = 200, description = "Обучение запущено", body = ApiResponse<EmptyData>),
        (status = 403, description = "Требуется роль Admin"),
        (status = 409, description = "Обучение уже выполняется")
    )
)]
pub async fn start(
    State(state): State<ApiState>,
) -> Result<Json<ApiResponse<EmptyData>>, ErrorResponse<EmptyData>> {
    state.session.require_admin().map_err(domain_error)?;
    state.training.start().map_err(domain_error)?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}

/// Статус обучения
#[utoipa::path(
    get,
    path = "/api/v1/training/status",
    tag = "Training",
    responses(
        (status = 200, description = "Текущий прогресс"),
        (status = 403, description = "Требуется роль Admin")
    )
)]
pub async fn status(
    State(state): State<ApiState>,
) -> Result<Json<ApiResponse<TrainingStatus>>, ErrorResponse<TrainingStatus>> {
    state.session.require_admin().map_err(domain_error)?;
    Ok(Json(ApiResponse::success(state.training.status())))
}
