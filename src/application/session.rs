//! Authentication session context.
//!
//! Holds at most one authenticated principal for the process lifetime.
//! The context object is created once at bootstrap and handed to services
//! and API state at construction, so there is no process-global singleton.
//! No expiry, no refresh: sign-in replaces the principal, sign-out clears
//! it, and an absent principal means unauthenticated.

use std::sync::{Arc, RwLock};

use crate::domain::{DomainError, DomainResult, User};

#[derive(Clone, Default)]
pub struct AuthSession {
    principal: Arc<RwLock<Option<User>>>,
}

impl AuthSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current principal, if any.
    pub fn current_user(&self) -> Option<User> {
        self.principal.read().expect("session lock poisoned").clone()
    }

    pub fn sign_in(&self, user: User) {
        *self.principal.write().expect("session lock poisoned") = Some(user);
    }

    pub fn sign_out(&self) {
        *self.principal.write().expect("session lock poisoned") = None;
    }

    /// Any authenticated principal.
    pub fn require_user(&self) -> DomainResult<User> {
        self.current_user()
            .ok_or_else(|| DomainError::Unauthorized("Not signed in".to_string()))
    }

    /// An authenticated Admin principal.
    pub fn require_admin(&self) -> DomainResult<User> {
        let user = self.require_user()?;
        if user.is_admin() {
            Ok(user)
        } else {
            Err(DomainError::Forbidden(
                "Administrator role required".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;

    fn user(role: UserRole) -> User {
        User {
            id: 1,
            username: "someone".into(),
            password_hash: "hash".into(),
            role,
            is_active: true,
        }
    }

    #[test]
    fn empty_session_blocks_both_levels() {
        let session = AuthSession::new();
        assert!(session.current_user().is_none());
        assert!(matches!(
            session.require_user(),
            Err(DomainError::Unauthorized(_))
        ));
        assert!(session.require_admin().is_err());
    }

    #[test]
    fn client_principal_is_not_an_admin() {
        let session = AuthSession::new();
        session.sign_in(user(UserRole::Client));
        assert!(session.require_user().is_ok());
        assert!(matches!(
            session.require_admin(),
            Err(DomainError::Forbidden(_))
        ));
    }

    #[test]
    fn sign_out_clears_the_principal() {
        let session = AuthSession::new();
        session.sign_in(user(UserRole::Admin));
        assert!(session.require_admin().is_ok());
        session.sign_out();
        assert!(session.current_user().is_none());
    }
}
