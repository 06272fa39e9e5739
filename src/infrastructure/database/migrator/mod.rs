//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20260120_000001_create_heart_disease_records;
mod m20260120_000002_create_users;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260120_000001_create_heart_disease_records::Migration),
            Box::new(m20260120_000002_create_users::Migration),
        ]
    }
}
