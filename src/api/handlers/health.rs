//! Health check handler

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// Ответ health-check
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Всегда `ok`, если процесс жив
    pub status: String,
    /// Имя сервиса
    pub service: String,
    /// Версия сборки
    pub version: String,
}

/// Проверка живости сервиса
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Сервис работает", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "cardiodesk-service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
