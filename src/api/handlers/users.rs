//! User management handlers (admin editor)

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use super::auth::UserInfo;
use super::{domain_error, ErrorResponse};
use crate::api::dto::{ApiResponse, EmptyData};
use crate::api::router::ApiState;
use crate::domain::{CreateUserDto, UpdateUserDto, UserRole};

/// Запрос на создание пользователя
#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({
    "username": "doctor",
    "password": "secret123",
    "role": "Client",
    "is_active": true
}))]
pub struct CreateUserRequest {
    /// Имя пользователя (уникальное)
    pub username: String,
    /// Пароль (хранится только его хеш)
    pub password: String,
    /// Роль: `Admin` или `Client`. По умолчанию `Client`
    #[serde(default = "default_role")]
    pub role: String,
    /// Активен ли аккаунт. По умолчанию `true`
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Запрос на обновление пользователя
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    /// Имя пользователя
    pub username: String,
    /// Роль: `Admin` или `Client`
    pub role: String,
    /// Активен ли аккаунт
    pub is_active: bool,
    /// Новый пароль; пустое значение оставляет старый хеш
    pub password: Option<String>,
}

fn default_role() -> String {
    "Client".to_string()
}

fn default_active() -> bool {
    true
}

/// Список пользователей
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    responses(
        (status = 200, description = "Все пользователи", body = ApiResponse<Vec<UserInfo>>),
        (status = 403, description = "Требуется роль Admin")
    )
)]
pub async fn list_users(
    State(state): State<ApiState>,
) -> Result<Json<ApiResponse<Vec<UserInfo>>>, ErrorResponse<Vec<UserInfo>>> {
    state.session.require_admin().map_err(domain_error)?;
    let users = state.users.list().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        users.into_iter().map(UserInfo::from).collect(),
    )))
}

/// Создание пользователя
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "Создан", body = ApiResponse<UserInfo>),
        (status = 409, description = "Имя пользователя уже занято"),
        (status = 422, description = "Ошибка валидации")
    )
)]
pub async fn create_user(
    State(state): State<ApiState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<UserInfo>>, ErrorResponse<UserInfo>> {
    state.session.require_admin().map_err(domain_error)?;
    let role = UserRole::parse(&request.role).map_err(domain_error)?;
    let user = state
        .users
        .create(CreateUserDto {
            username: request.username,
            password: request.password,
            role,
            is_active: request.is_active,
        })
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(user.into())))
}

/// Обновление пользователя
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "Идентификатор пользователя")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Обновлён", body = ApiResponse<UserInfo>),
        (status = 404, description = "Пользователь не найден"),
        (status = 409, description = "Имя пользователя уже занято")
    )
)]
pub async fn update_user(
    State(state): State<ApiState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserInfo>>, ErrorResponse<UserInfo>> {
    state.session.require_admin().map_err(domain_error)?;
    let role = UserRole::parse(&request.role).map_err(domain_error)?;
    let user = state
        .users
        .update(
            id,
            UpdateUserDto {
                username: request.username,
                role,
                is_active: request.is_active,
                password: request.password,
            },
        )
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(user.into())))
}

/// Удаление пользователя
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "Идентификатор пользователя")),
    responses(
        (status = 200, description = "Удалён", body = ApiResponse<EmptyData>)
    )
)]
pub async fn delete_user(
    State(state): State<ApiState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<EmptyData>>, ErrorResponse<EmptyData>> {
    state.session.require_admin().map_err(domain_error)?;
    state.users.delete(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}
