//! API handlers

pub mod analytics;
pub mod auth;
pub mod dataset;
pub mod health;
pub mod records;
pub mod risk;
pub mod training;
pub mod users;

use axum::http::StatusCode;
use axum::Json;

use crate::api::dto::ApiResponse;
use crate::domain::DomainError;

/// Error shape shared by every handler.
pub(crate) type ErrorResponse<T> = (StatusCode, Json<ApiResponse<T>>);

/// Map a domain error to its HTTP status. Transient store failures get 503
/// so the shell can offer a manual retry.
pub(crate) fn domain_error<T>(e: DomainError) -> ErrorResponse<T> {
    let status = match &e {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) if e.is_transient() => StatusCode::SERVICE_UNAVAILABLE,
        DomainError::Validation(_) | DomainError::UnknownLabel { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
    };
    (status, Json(ApiResponse::error(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_error_taxonomy() {
        let (status, _) = domain_error::<()>(DomainError::NotFound {
            entity: "HeartRecord",
            field: "id",
            value: "1".into(),
        });
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = domain_error::<()>(DomainError::Unauthorized("x".into()));
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = domain_error::<()>(DomainError::UnknownLabel {
            field: "Sex",
            label: "x".into(),
        });
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) =
            domain_error::<()>(DomainError::Validation("Database error: gone".into()));
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
