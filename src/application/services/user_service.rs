//! User administration.

use std::sync::Arc;

use crate::domain::{
    CreateUserDto, DomainError, DomainResult, RepositoryProvider, UpdateUserDto, User,
};

pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
}

impl UserService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self) -> DomainResult<Vec<User>> {
        self.repos.users().list_users().await
    }

    pub async fn create(&self, dto: CreateUserDto) -> DomainResult<User> {
        if dto.username.trim().is_empty() {
            return Err(DomainError::Validation("Username is required".to_string()));
        }
        if dto.password.is_empty() {
            return Err(DomainError::Validation("Password is required".to_string()));
        }
        let dto = CreateUserDto {
            username: dto.username.trim().to_string(),
            ..dto
        };
        self.repos.users().create_user(dto).await
    }

    pub async fn update(&self, id: i32, dto: UpdateUserDto) -> DomainResult<User> {
        if dto.username.trim().is_empty() {
            return Err(DomainError::Validation("Username is required".to_string()));
        }
        let dto = UpdateUserDto {
            username: dto.username.trim().to_string(),
            ..dto
        };
        self.repos.users().update_user(id, dto).await
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        self.repos.users().delete_user(id).await
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;

    use super::*;
    use crate::domain::UserRole;
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;

    async fn service() -> UserService {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        UserService::new(Arc::new(SeaOrmRepositoryProvider::new(db)))
    }

    #[tokio::test]
    async fn blank_username_or_password_is_a_validation_error() {
        let service = service().await;
        let blank_name = service
            .create(CreateUserDto {
                username: "   ".into(),
                password: "x".into(),
                role: UserRole::Client,
                is_active: true,
            })
            .await
            .unwrap_err();
        assert!(matches!(blank_name, DomainError::Validation(_)));

        let blank_pass = service
            .create(CreateUserDto {
                username: "doctor".into(),
                password: "".into(),
                role: UserRole::Client,
                is_active: true,
            })
            .await
            .unwrap_err();
        assert!(matches!(blank_pass, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn username_whitespace_is_trimmed_on_create() {
        let service = service().await;
        let user = service
            .create(CreateUserDto {
                username: " doctor ".into(),
                password: "secret123".into(),
                role: UserRole::Admin,
                is_active: true,
            })
            .await
            .unwrap();
        assert_eq!(user.username, "doctor");
    }
}
