pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20260301_000001_content_tables;
mod m20260301_000002_tracking_tables;
mod m20260301_000003_tracking_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_content_tables::Migration),
            Box::new(m20260301_000002_tracking_tables::Migration),
            Box::new(m20260301_000003_tracking_indexes::Migration),
        ]
    }
}
