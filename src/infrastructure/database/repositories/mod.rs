//! SeaORM repository implementations

pub mod record_repository;
pub mod repository_provider;
pub mod user_repository;

pub use record_repository::SeaOrmRecordRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use user_repository::SeaOrmUserRepository;

use crate::shared::DomainError;

/// Map a driver error to the recoverable store-failure variant. The caller
/// retries the action manually; nothing retries automatically.
pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}
