pub use sea_orm_migration::prelude::*;

mod m20251201_000001_create_users;
mod m20251201_000002_create_fleet;
mod m20251201_000003_create_trips;
mod m20251201_000004_create_notifications;
mod m20251201_000005_create_sessions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251201_000001_create_users::Migration),
            Box::new(m20251201_000002_create_fleet::Migration),
            Box::new(m20251201_000003_create_trips::Migration),
            Box::new(m20251201_000004_create_notifications::Migration),
            Box::new(m20251201_000005_create_sessions::Migration),
        ]
    }
}
