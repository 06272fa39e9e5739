use super::UserRole;

#[derive(Debug, Clone)]
pub struct UpdateUserDto {
    pub username: String,
    pub role: UserRole,
    pub is_active: bool,
    /// When `None` or empty the stored hash is kept unchanged.
    pub password: Option<String>,
}
