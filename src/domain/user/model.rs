use serde::{Deserialize, Serialize};

use crate::shared::{DomainError, DomainResult};

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    Client,
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Client
    }
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Client => "Client",
        }
    }

    pub fn parse(value: &str) -> DomainResult<Self> {
        match value {
            "Admin" => Ok(Self::Admin),
            "Client" => Ok(Self::Client),
            other => Err(DomainError::Validation(format!("Unknown role: {other}"))),
        }
    }
}

/// User model
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_string_form() {
        assert_eq!(UserRole::parse("Admin").unwrap(), UserRole::Admin);
        assert_eq!(UserRole::parse(UserRole::Client.as_str()).unwrap(), UserRole::Client);
        assert!(UserRole::parse("root").is_err());
    }
}
