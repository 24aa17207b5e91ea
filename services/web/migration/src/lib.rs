use sea_orm_migration::prelude::*;

mod m20250801_000001_create_users;
mod m20250801_000002_create_otp_storage;
mod m20250801_000003_create_study_sessions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250801_000001_create_users::Migration),
            Box::new(m20250801_000002_create_otp_storage::Migration),
            Box::new(m20250801_000003_create_study_sessions::Migration),
        ]
    }
}
