//! Risk estimation handlers (the one view Client role can use)

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{domain_error, ErrorResponse};
use crate::api::dto::ApiResponse;
use crate::api::router::ApiState;
use crate::application::services::{RiskAssessment, RiskInput};
use crate::display::{resolve_code, CodedField};
use crate::domain::DomainResult;

/// Данные формы прогноза
///
/// Категориальные поля принимают код или локализованную подпись.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "age": 54,
    "sex": "M",
    "chest_pain_type": "ASY",
    "resting_bp": 150,
    "cholesterol": 365,
    "fasting_bs": false,
    "resting_ecg": "Normal",
    "max_hr": 134,
    "exercise_angina": false,
    "oldpeak": 1.0,
    "st_slope": "Flat"
}))]
pub struct RiskRequest {
    /// Возраст, лет
    pub age: i32,
    /// Пол
    pub sex: String,
    /// Тип боли в груди
    pub chest_pain_type: String,
    /// Давление в покое
    pub resting_bp: i32,
    /// Холестерин
    pub cholesterol: i32,
    /// Сахар натощак > 120 мг/дл
    pub fasting_bs: bool,
    /// ЭКГ в покое
    pub resting_ecg: String,
    /// Максимальный пульс
    pub max_hr: i32,
    /// Стенокардия при нагрузке
    pub exercise_angina: bool,
    /// Депрессия ST
    pub oldpeak: f32,
    /// Наклон ST
    pub st_slope: String,
}

impl RiskRequest {
    fn into_input(self) -> DomainResult<RiskInput> {
        Ok(RiskInput {
            age: self.age,
            sex: resolve_code(CodedField::Sex, &self.sex)?,
            chest_pain_type: resolve_code(CodedField::ChestPainType, &self.chest_pain_type)?,
            resting_bp: self.resting_bp,
            cholesterol: self.cholesterol,
            fasting_bs: self.fasting_bs,
            resting_ecg: resolve_code(CodedField::RestingEcg, &self.resting_ecg)?,
            max_hr: self.max_hr,
            exercise_angina: self.exercise_angina,
            oldpeak: self.oldpeak,
            st_slope: resolve_code(CodedField::StSlope, &self.st_slope)?,
        })
    }
}

impl From<RiskInput> for RiskRequest {
    fn from(input: RiskInput) -> Self {
        Self {
            age: input.age,
            sex: input.sex,
            chest_pain_type: input.chest_pain_type,
            resting_bp: input.resting_bp,
            cholesterol: input.cholesterol,
            fasting_bs: input.fasting_bs,
            resting_ecg: input.resting_ecg,
            max_hr: input.max_hr,
            exercise_angina: input.exercise_angina,
            oldpeak: input.oldpeak,
            st_slope: input.st_slope,
        }
    }
}

/// Расчёт вероятности заболевания
///
/// Значения проверяются по наблюдаемым клиническим диапазонам. Результат —
/// вероятность в [0, 1], уровень риска и рекомендации.
#[utoipa::path(
    post,
    path = "/api/v1/risk/estimate",
    tag = "Risk",
    request_body = RiskRequest,
    responses(
        (status = 200, description = "Оценка риска"),
        (status = 401, description = "Нет сессии"),
        (status = 422, description = "Значение вне диапазона или неизвестная подпись")
    )
)]
pub async fn estimate(
    State(state): State<ApiState>,
    Json(request): Json<RiskRequest>,
) -> Result<Json<ApiResponse<RiskAssessment>>, ErrorResponse<RiskAssessment>> {
    state.session.require_user().map_err(domain_error)?;
    let input = request.into_input().map_err(domain_error)?;
    state.risk.validate(&input).map_err(domain_error)?;
    Ok(Json(ApiResponse::success(state.risk.assess(&input))))
}

/// Случайные правдоподобные данные для формы
///
/// Значения равномерно распределены по наблюдаемым диапазонам признаков.
#[utoipa::path(
    get,
    path = "/api/v1/risk/sample",
    tag = "Risk",
    responses(
        (status = 200, description = "Сгенерированные данные формы", body = ApiResponse<RiskRequest>),
        (status = 401, description = "Нет сессии")
    )
)]
pub async fn sample(
    State(state): State<ApiState>,
) -> Result<Json<ApiResponse<RiskRequest>>, ErrorResponse<RiskRequest>> {
    state.session.require_user().map_err(domain_error)?;
    Ok(Json(ApiResponse::success(state.risk.sample_input().into())))
}
