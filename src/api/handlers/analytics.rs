//! Chart summary handlers

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::{domain_error, ErrorResponse};
use crate::api::dto::ApiResponse;
use crate::api::router::ApiState;
use crate::application::services::{DashboardSummary, EdaFilter, EdaReport};

/// Фильтры исследовательского режима
#[derive(Debug, Deserialize, IntoParams)]
pub struct EdaParams {
    /// Фильтр по полу: `M` / `F`
    pub sex: Option<String>,
    /// Фильтр по диагнозу: `true` — больные, `false` — здоровые
    pub heart_disease: Option<bool>,
    /// Нижняя граница возраста
    pub min_age: Option<i32>,
    /// Верхняя граница возраста
    pub max_age: Option<i32>,
}

/// Сводка для дашборда
///
/// Счётчики по декадам возраста, полу, типу боли и диапазонам холестерина.
#[utoipa::path(
    get,
    path = "/api/v1/analytics/dashboard",
    tag = "Analytics",
    responses(
        (status = 200, description = "Сводка по датасету"),
        (status = 403, description = "Требуется роль Admin")
    )
)]
pub async fn dashboard(
    State(state): State<ApiState>,
) -> Result<Json<ApiResponse<DashboardSummary>>, ErrorResponse<DashboardSummary>> {
    state.session.require_admin().map_err(domain_error)?;
    let summary = state.analytics.dashboard().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(summary)))
}

/// Исследовательские графики
///
/// Диаграмма рассеяния возраст × пульс, гистограмма холестерина и среднее
/// давление по типам боли, с учётом фильтров.
#[utoipa::path(
    get,
    path = "/api/v1/analytics/eda",
    tag = "Analytics",
    params(EdaParams),
    responses(
        (status = 200, description = "Серии для графиков"),
        (status = 403, description = "Требуется роль Admin")
    )
)]
pub async fn eda(
    State(state): State<ApiState>,
    Query(params): Query<EdaParams>,
) -> Result<Json<ApiResponse<EdaReport>>, ErrorResponse<EdaReport>> {
    state.session.require_admin().map_err(domain_error)?;
    let filter = EdaFilter {
        sex: params.sex,
        heart_disease: params.heart_disease,
        min_age: params.min_age,
        max_age: params.max_age,
    };
    let report = state.analytics.eda(&filter).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(report)))
}
