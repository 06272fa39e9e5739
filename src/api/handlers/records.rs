//! Heart disease record management handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{domain_error, ErrorResponse};
use crate::api::dto::{ApiResponse, EmptyData};
use crate::api::router::ApiState;
use crate::display::{self, resolve_code, CodedField};
use crate::domain::{DomainError, DomainResult, HeartRecord, NewHeartRecord};

/// Запись наблюдения пациента (коды как в CSV)
#[derive(Debug, Serialize, ToSchema)]
pub struct RecordDto {
    /// Идентификатор записи
    pub id: i32,
    /// Возраст, лет
    pub age: i32,
    /// Пол: `M` / `F`
    pub sex: String,
    /// Тип боли в груди: `ATA` / `NAP` / `ASY` / `TA`
    pub chest_pain_type: String,
    /// Давление в покое, мм рт. ст.
    pub resting_bp: i32,
    /// Холестерин, мг/дл
    pub cholesterol: i32,
    /// Сахар натощак > 120 мг/дл
    pub fasting_bs: bool,
    /// ЭКГ в покое: `Normal` / `ST` / `LVH`
    pub resting_ecg: String,
    /// Максимальный пульс
    pub max_hr: i32,
    /// Стенокардия при нагрузке
    pub exercise_angina: bool,
    /// Депрессия ST
    pub oldpeak: f32,
    /// Наклон ST: `Up` / `Flat` / `Down`
    pub st_slope: String,
    /// Диагноз
    pub heart_disease: bool,
}

impl From<HeartRecord> for RecordDto {
    fn from(r: HeartRecord) -> Self {
        Self {
            id: r.id,
            age: r.age,
            sex: r.sex,
            chest_pain_type: r.chest_pain_type,
            resting_bp: r.resting_bp,
            cholesterol: r.cholesterol,
            fasting_bs: r.fasting_bs,
            resting_ecg: r.resting_ecg,
            max_hr: r.max_hr,
            exercise_angina: r.exercise_angina,
            oldpeak: r.oldpeak,
            st_slope: r.st_slope,
            heart_disease: r.heart_disease,
        }
    }
}

/// Строка таблицы с локализованными значениями
#[derive(Debug, Serialize, ToSchema)]
pub struct LocalizedRecordDto {
    pub id: i32,
    pub age: String,
    pub sex: String,
    pub chest_pain_type: String,
    pub resting_bp: String,
    pub cholesterol: String,
    pub fasting_bs: String,
    pub resting_ecg: String,
    pub max_hr: String,
    pub exercise_angina: String,
    pub oldpeak: String,
    pub st_slope: String,
    pub heart_disease: String,
}

impl From<&HeartRecord> for LocalizedRecordDto {
    fn from(record: &HeartRecord) -> Self {
        let d = display::format_record(record);
        Self {
            id: d.id,
            age: d.age,
            sex: d.sex,
            chest_pain_type: d.chest_pain_type,
            resting_bp: d.resting_bp,
            cholesterol: d.cholesterol,
            fasting_bs: d.fasting_bs,
            resting_ecg: d.resting_ecg,
            max_hr: d.max_hr,
            exercise_angina: d.exercise_angina,
            oldpeak: d.oldpeak,
            st_slope: d.st_slope,
            heart_disease: d.heart_disease,
        }
    }
}

/// Запрос на создание или обновление записи
///
/// Категориальные поля принимают код (`ASY`) или локализованную подпись
/// («Асимптоматическая»); всё остальное отклоняет сохранение.
#[derive(Debug, Deserialize, ToSchema, Validate)]
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
    "st_slope": "Flat",
    "heart_disease": true
}))]
pub struct SaveRecordRequest {
    /// Возраст, лет
    #[validate(range(min = 1, max = 120))]
    pub age: i32,
    /// Пол: код или подпись
    pub sex: String,
    /// Тип боли в груди: код или подпись
    pub chest_pain_type: String,
    /// Давление в покое, мм рт. ст.
    #[validate(range(min = 50, max = 260))]
    pub resting_bp: i32,
    /// Холестерин, мг/дл
    #[validate(range(min = 0, max = 700))]
    pub cholesterol: i32,
    /// Сахар натощак > 120 мг/дл
    pub fasting_bs: bool,
    /// ЭКГ в покое: код или подпись
    pub resting_ecg: String,
    /// Максимальный пульс
    #[validate(range(min = 40, max = 250))]
    pub max_hr: i32,
    /// Стенокардия при нагрузке
    pub exercise_angina: bool,
    /// Депрессия ST
    #[validate(range(min = -4.0, max = 8.0))]
    pub oldpeak: f32,
    /// Наклон ST: код или подпись
    pub st_slope: String,
    /// Диагноз
    pub heart_disease: bool,
}

impl SaveRecordRequest {
    /// Numeric ranges first, then categorical resolution; either failure
    /// rejects the save before anything reaches the store.
    fn into_draft(self) -> DomainResult<NewHeartRecord> {
        self.validate()
            .map_err(|e| DomainError::Validation(e.to_string()))?;

        Ok(NewHeartRecord {
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
            heart_disease: self.heart_disease,
        })
    }
}

/// Список всех записей
///
/// Возвращает весь датасет в порядке возрастания идентификатора.
#[utoipa::path(
    get,
    path = "/api/v1/records",
    tag = "Records",
    responses(
        (status = 200, description = "Все записи", body = ApiResponse<Vec<RecordDto>>),
        (status = 401, description = "Нет сессии"),
        (status = 403, description = "Требуется роль Admin")
    )
)]
pub async fn list_records(
    State(state): State<ApiState>,
) -> Result<Json<ApiResponse<Vec<RecordDto>>>, ErrorResponse<Vec<RecordDto>>> {
    state.session.require_admin().map_err(domain_error)?;
    let records = state.records.list().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        records.into_iter().map(RecordDto::from).collect(),
    )))
}

/// Список записей для таблицы (локализованные значения)
#[utoipa::path(
    get,
    path = "/api/v1/records/display",
    tag = "Records",
    responses(
        (status = 200, description = "Строки таблицы", body = ApiResponse<Vec<LocalizedRecordDto>>),
        (status = 401, description = "Нет сессии"),
        (status = 403, description = "Требуется роль Admin")
    )
)]
pub async fn list_records_display(
    State(state): State<ApiState>,
) -> Result<Json<ApiResponse<Vec<LocalizedRecordDto>>>, ErrorResponse<Vec<LocalizedRecordDto>>> {
    state.session.require_admin().map_err(domain_error)?;
    let records = state.records.list().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        records.iter().map(LocalizedRecordDto::from).collect(),
    )))
}

/// Одна запись по идентификатору
#[utoipa::path(
    get,
    path = "/api/v1/records/{id}",
    tag = "Records",
    params(("id" = i32, Path, description = "Идентификатор записи")),
    responses(
        (status = 200, description = "Запись", body = ApiResponse<RecordDto>),
        (status = 404, description = "Запись не найдена")
    )
)]
pub async fn get_record(
    State(state): State<ApiState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<RecordDto>>, ErrorResponse<RecordDto>> {
    state.session.require_admin().map_err(domain_error)?;
    let record = state.records.get(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(record.into())))
}

/// Создание записи
#[utoipa::path(
    post,
    path = "/api/v1/records",
    tag = "Records",
    request_body = SaveRecordRequest,
    responses(
        (status = 200, description = "Создано", body = ApiResponse<RecordDto>),
        (status = 422, description = "Ошибка валидации или неизвестная подпись")
    )
)]
pub async fn create_record(
    State(state): State<ApiState>,
    Json(request): Json<SaveRecordRequest>,
) -> Result<Json<ApiResponse<RecordDto>>, ErrorResponse<RecordDto>> {
    state.session.require_admin().map_err(domain_error)?;
    let draft = request.into_draft().map_err(domain_error)?;
    let record = state.records.create(draft).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(record.into())))
}

/// Обновление записи
///
/// Перезаписывает все поля существующей записи; идентификатор неизменяем.
#[utoipa::path(
    put,
    path = "/api/v1/records/{id}",
    tag = "Records",
    params(("id" = i32, Path, description = "Идентификатор записи")),
    request_body = SaveRecordRequest,
    responses(
        (status = 200, description = "Обновлено", body = ApiResponse<RecordDto>),
        (status = 404, description = "Запись не найдена"),
        (status = 422, description = "Ошибка валидации или неизвестная подпись")
    )
)]
pub async fn update_record(
    State(state): State<ApiState>,
    Path(id): Path<i32>,
    Json(request): Json<SaveRecordRequest>,
) -> Result<Json<ApiResponse<RecordDto>>, ErrorResponse<RecordDto>> {
    state.session.require_admin().map_err(domain_error)?;
    let draft = request.into_draft().map_err(domain_error)?;
    let record = state.records.update(id, draft).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(record.into())))
}

/// Удаление записи
///
/// Удаление отсутствующего идентификатора считается успешным.
#[utoipa::path(
    delete,
    path = "/api/v1/records/{id}",
    tag = "Records",
    params(("id" = i32, Path, description = "Идентификатор записи")),
    responses(
        (status = 200, description = "Удалено", body = ApiResponse<EmptyData>)
    )
)]
pub async fn delete_record(
    State(state): State<ApiState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<EmptyData>>, ErrorResponse<EmptyData>> {
    state.session.require_admin().map_err(domain_error)?;
    state.records.delete(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}
