use super::UserRole;

#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub username: String,
    /// Plaintext password; hashed by the persistence layer.
    pub password: String,
    pub role: UserRole,
    pub is_active: bool,
}
