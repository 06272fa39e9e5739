//! Dataset import/export handlers

use axum::{extract::State, http::header, Json};
use serde::Serialize;
use utoipa::ToSchema;

use super::{domain_error, ErrorResponse};
use crate::api::dto::ApiResponse;
use crate::api::router::ApiState;

/// Итог импорта CSV
#[derive(Debug, Serialize, ToSchema)]
pub struct ImportSummaryDto {
    /// Количество добавленных записей
    pub imported: u64,
    /// Количество пропущенных некорректных строк
    pub skipped: usize,
}

/// Импорт CSV
///
/// Тело запроса — CSV-документ целиком (первая строка — заголовок).
/// Некорректные строки пропускаются, остальные добавляются к датасету.
#[utoipa::path(
    post,
    path = "/api/v1/dataset/import",
    tag = "Dataset",
    request_body(content = String, content_type = "text/csv"),
    responses(
        (status = 200, description = "Импорт завершён", body = ApiResponse<ImportSummaryDto>),
        (status = 403, description = "Требуется роль Admin")
    )
)]
pub async fn import_csv(
    State(state): State<ApiState>,
    body: String,
) -> Result<Json<ApiResponse<ImportSummaryDto>>, ErrorResponse<ImportSummaryDto>> {
    state.session.require_admin().map_err(domain_error)?;
    let summary = state.dataset.import_csv(&body).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(ImportSummaryDto {
        imported: summary.imported,
        skipped: summary.skipped,
    })))
}

/// Экспорт CSV
///
/// Возвращает весь датасет в каноническом 12-колоночном формате.
#[utoipa::path(
    get,
    path = "/api/v1/dataset/export",
    tag = "Dataset",
    responses(
        (status = 200, description = "CSV-документ", body = String, content_type = "text/csv"),
        (status = 403, description = "Требуется роль Admin")
    )
)]
pub async fn export_csv(
    State(state): State<ApiState>,
) -> Result<([(header::HeaderName, &'static str); 2], String), ErrorResponse<String>> {
    state.session.require_admin().map_err(domain_error)?;
    let csv = state.dataset.export_csv().await.map_err(domain_error)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"heart.csv\"",
            ),
        ],
        csv,
    ))
}
