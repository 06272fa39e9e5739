//! Repository traits for the domain layer

use super::record::RecordRepositoryInterface;
use super::user::UserRepositoryInterface;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let all = repos.records().list_records().await?;
///     let admin = repos.users().get_user_by_username("admin").await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn records(&self) -> &dyn RecordRepositoryInterface;
    fn users(&self) -> &dyn UserRepositoryInterface;
}
