//! Authentication API handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{domain_error, ErrorResponse};
use crate::api::dto::{ApiResponse, EmptyData};
use crate::api::router::ApiState;
use crate::domain::User;

/// Запрос на авторизацию
#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({
    "username": "admin",
    "password": "admin123"
}))]
pub struct LoginRequest {
    /// Имя пользователя
    pub username: String,
    /// Пароль
    pub password: String,
}

/// Информация о пользователе
#[derive(Debug, Serialize, ToSchema)]
pub struct UserInfo {
    /// Идентификатор пользователя
    pub id: i32,
    /// Имя пользователя
    pub username: String,
    /// Роль: `Admin` или `Client`
    pub role: String,
    /// Активен ли аккаунт
    pub is_active: bool,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role.as_str().to_string(),
            is_active: user.is_active,
        }
    }
}

/// Авторизация пользователя
///
/// Успешный вход делает пользователя принципалом локальной сессии.
/// Неверное имя, неверный пароль и отключённый аккаунт дают один и тот же
/// общий отказ — перечислить пользователей через эту форму нельзя.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Успешная авторизация", body = ApiResponse<UserInfo>),
        (status = 401, description = "Неверные учётные данные")
    )
)]
pub async fn login(
    State(state): State<ApiState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<UserInfo>>, ErrorResponse<UserInfo>> {
    let user = state
        .auth
        .login(&request.username, &request.password)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(user.into())))
}

/// Выход из сессии
///
/// Очищает принципала сессии. Повторный вызов безопасен.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "Authentication",
    responses(
        (status = 200, description = "Сессия очищена", body = ApiResponse<EmptyData>)
    )
)]
pub async fn logout(State(state): State<ApiState>) -> Json<ApiResponse<EmptyData>> {
    state.auth.logout();
    Json(ApiResponse::success(EmptyData {}))
}

/// Текущий пользователь сессии
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    responses(
        (status = 200, description = "Текущий принципал", body = ApiResponse<UserInfo>),
        (status = 401, description = "Нет активной сессии")
    )
)]
pub async fn me(
    State(state): State<ApiState>,
) -> Result<Json<ApiResponse<UserInfo>>, ErrorResponse<UserInfo>> {
    let user = state.session.require_user().map_err(domain_error)?;
    Ok(Json(ApiResponse::success(user.into())))
}
