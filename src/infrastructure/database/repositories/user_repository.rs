use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::db_err;
use crate::domain::{
    CreateUserDto, DomainError, DomainResult, UpdateUserDto, User, UserRepositoryInterface,
    UserRole,
};
use crate::infrastructure::crypto::password::hash_password;
use crate::infrastructure::database::entities::user;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::Admin => UserRole::Admin,
        user::UserRole::Client => UserRole::Client,
    }
}

fn domain_role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::Admin => user::UserRole::Admin,
        UserRole::Client => user::UserRole::Client,
    }
}

fn model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        password_hash: model.password_hash,
        role: entity_role_to_domain(model.role),
        is_active: model.is_active,
    }
}

fn unique_violation(e: sea_orm::DbErr) -> DomainError {
    if e.to_string().contains("UNIQUE") || e.to_string().contains("duplicate") {
        DomainError::Conflict("Username already exists".to_string())
    } else {
        db_err(e)
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for SeaOrmUserRepository {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let password_hash = hash_password(&dto.password)
            .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))?;

        let new_user = user::ActiveModel {
            id: NotSet,
            username: Set(dto.username),
            password_hash: Set(password_hash),
            role: Set(domain_role_to_entity(dto.role)),
            is_active: Set(dto.is_active),
        };

        let inserted = new_user.insert(&self.db).await.map_err(unique_violation)?;

        Ok(model_to_domain(inserted))
    }

    async fn list_users(&self) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn get_user_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(model_to_domain))
    }

    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(model_to_domain))
    }

    async fn update_user(&self, id: i32, dto: UpdateUserDto) -> DomainResult<User> {
        let existing = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: id.to_string(),
            });
        };

        let mut active: user::ActiveModel = existing.into();
        active.username = Set(dto.username);
        active.role = Set(domain_role_to_entity(dto.role));
        active.is_active = Set(dto.is_active);

        // Password is replaced only when the editor supplied a new one.
        if let Some(password) = dto.password.filter(|p| !p.is_empty()) {
            let password_hash = hash_password(&password)
                .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))?;
            active.password_hash = Set(password_hash);
        }

        let updated = active.update(&self.db).await.map_err(unique_violation)?;

        Ok(model_to_domain(updated))
    }

    async fn delete_user(&self, id: i32) -> DomainResult<()> {
        user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(())
    }

    async fn count_users(&self) -> DomainResult<u64> {
        user::Entity::find().count(&self.db).await.map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;

    use super::*;
    use crate::infrastructure::crypto::password::verify_password;
    use crate::infrastructure::database::migrator::Migrator;

    async fn repo() -> SeaOrmUserRepository {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        SeaOrmUserRepository::new(db)
    }

    fn dto(username: &str) -> CreateUserDto {
        CreateUserDto {
            username: username.to_string(),
            password: "secret123".to_string(),
            role: UserRole::Client,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn create_stores_a_digest_not_the_password() {
        let repo = repo().await;
        let user = repo.create_user(dto("doctor")).await.unwrap();
        assert_ne!(user.password_hash, "secret123");
        assert!(verify_password("secret123", &user.password_hash).unwrap());
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let repo = repo().await;
        repo.create_user(dto("doctor")).await.unwrap();
        let err = repo.create_user(dto("doctor")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_keeps_hash_when_no_password_given() {
        let repo = repo().await;
        let user = repo.create_user(dto("doctor")).await.unwrap();

        let updated = repo
            .update_user(
                user.id,
                UpdateUserDto {
                    username: "doctor".into(),
                    role: UserRole::Admin,
                    is_active: false,
                    password: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.password_hash, user.password_hash);
        assert_eq!(updated.role, UserRole::Admin);
        assert!(!updated.is_active);
    }

    #[tokio::test]
    async fn update_missing_user_is_not_found() {
        let repo = repo().await;
        let err = repo
            .update_user(
                42,
                UpdateUserDto {
                    username: "ghost".into(),
                    role: UserRole::Client,
                    is_active: true,
                    password: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let repo = repo().await;
        let user = repo.create_user(dto("doctor")).await.unwrap();
        repo.delete_user(user.id).await.unwrap();
        repo.delete_user(user.id).await.unwrap();
        assert_eq!(repo.count_users().await.unwrap(), 0);
    }
}
