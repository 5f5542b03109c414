pub use sea_orm_migration::prelude::*;

mod m20250301_000001_kigg_user;
mod m20250301_000002_kigg_user_ip_address;
mod m20250301_000003_kigg_blocked_ip;
mod m20250301_000004_kigg_recommendation;
mod m20250301_000005_kigg_upcoming_event;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_kigg_user::Migration),
            Box::new(m20250301_000002_kigg_user_ip_address::Migration),
            Box::new(m20250301_000003_kigg_blocked_ip::Migration),
            Box::new(m20250301_000004_kigg_recommendation::Migration),
            Box::new(m20250301_000005_kigg_upcoming_event::Migration),
        ]
    }
}
