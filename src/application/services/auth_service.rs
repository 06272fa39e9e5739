//! Login and logout against the user table.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::session::AuthSession;
use crate::domain::{DomainError, DomainResult, RepositoryProvider, User};
use crate::infrastructure::crypto::password::verify_password;

pub struct AuthService {
    repos: Arc<dyn RepositoryProvider>,
    session: AuthSession,
}

/// Every failure path yields this same error so a caller cannot tell an
/// unknown username from a wrong password or a deactivated account.
fn invalid_credentials() -> DomainError {
    DomainError::Unauthorized("Invalid username or password".to_string())
}

impl AuthService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, session: AuthSession) -> Self {
        Self { repos, session }
    }

    /// Authenticate and make the user the session principal.
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<User> {
        let username = username.trim();

        let user = self
            .repos
            .users()
            .get_user_by_username(username)
            .await?
            .ok_or_else(|| {
                warn!("Login rejected for {username}");
                invalid_credentials()
            })?;

        let password_ok = verify_password(password, &user.password_hash).unwrap_or(false);
        if !password_ok || !user.is_active {
            warn!("Login rejected for {username}");
            return Err(invalid_credentials());
        }

        info!("User {} signed in ({:?})", user.username, user.role);
        self.session.sign_in(user.clone());
        Ok(user)
    }

    /// Clear the session principal.
    pub fn logout(&self) {
        if let Some(user) = self.session.current_user() {
            info!("User {} signed out", user.username);
        }
        self.session.sign_out();
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.current_user()
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;

    use super::*;
    use crate::domain::{CreateUserDto, UserRole};
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;

    async fn service() -> (AuthService, AuthSession, Arc<dyn RepositoryProvider>) {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db));
        let session = AuthSession::new();
        (
            AuthService::new(repos.clone(), session.clone()),
            session,
            repos,
        )
    }

    async fn add_user(repos: &Arc<dyn RepositoryProvider>, username: &str, active: bool) {
        repos
            .users()
            .create_user(CreateUserDto {
                username: username.to_string(),
                password: "secret123".to_string(),
                role: UserRole::Client,
                is_active: active,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn valid_credentials_set_the_session_principal() {
        let (auth, session, repos) = service().await;
        add_user(&repos, "doctor", true).await;

        let user = auth.login("doctor", "secret123").await.unwrap();
        assert_eq!(user.username, "doctor");
        assert_eq!(session.current_user().unwrap().username, "doctor");

        auth.logout();
        assert!(session.current_user().is_none());
    }

    #[tokio::test]
    async fn username_is_trimmed_before_lookup() {
        let (auth, _, repos) = service().await;
        add_user(&repos, "doctor", true).await;
        assert!(auth.login("  doctor  ", "secret123").await.is_ok());
    }

    #[tokio::test]
    async fn all_failure_modes_yield_the_same_generic_error() {
        let (auth, session, repos) = service().await;
        add_user(&repos, "doctor", true).await;
        add_user(&repos, "retired", false).await;

        let wrong_user = auth.login("nobody", "secret123").await.unwrap_err();
        let wrong_pass = auth.login("doctor", "hunter2").await.unwrap_err();
        let inactive = auth.login("retired", "secret123").await.unwrap_err();

        for err in [&wrong_user, &wrong_pass, &inactive] {
            assert_eq!(
                err.to_string(),
                "Unauthorized: Invalid username or password"
            );
        }
        assert!(session.current_user().is_none());
    }
}
