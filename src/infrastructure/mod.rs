//! External concerns: database access, migrations, seeding, crypto.

pub mod crypto;
pub mod database;

pub use database::{init_database, DatabaseConfig};
pub use database::repositories::SeaOrmRepositoryProvider;
