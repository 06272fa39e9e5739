use async_trait::async_trait;

use super::{CreateUserDto, UpdateUserDto, User};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User>;

    /// All users ordered by identity ascending.
    async fn list_users(&self) -> DomainResult<Vec<User>>;
    async fn get_user_by_id(&self, id: i32) -> DomainResult<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>>;

    /// Absent identity surfaces as `NotFound`.
    async fn update_user(&self, id: i32, dto: UpdateUserDto) -> DomainResult<User>;

    /// Deleting an absent identity is a no-op.
    async fn delete_user(&self, id: i32) -> DomainResult<()>;

    async fn count_users(&self) -> DomainResult<u64>;
}
