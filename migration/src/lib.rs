// migration/src/lib.rs
pub use sea_orm_migration::prelude::*;

mod m20250801_000001_create_profiles_table;
mod m20250801_000002_create_objectives_table;
mod m20250801_000003_create_objective_updates_table;
mod m20250801_000004_create_daily_work_table;
mod m20250801_000005_create_action_items_table;
mod m20250801_000006_create_action_item_closures_table;
mod m20250801_000007_create_action_item_verifications_table;
mod m20250801_000008_create_system_settings_table;
mod m20250801_000009_create_component_permissions_table;
mod m20250801_000010_create_initial_superadmin;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            // 1. Tables without dependencies
            Box::new(m20250801_000001_create_profiles_table::Migration),
            Box::new(m20250801_000008_create_system_settings_table::Migration),
            Box::new(m20250801_000009_create_component_permissions_table::Migration),
            // 2. Tables depending on profiles
            Box::new(m20250801_000002_create_objectives_table::Migration),
            Box::new(m20250801_000004_create_daily_work_table::Migration),
            Box::new(m20250801_000005_create_action_items_table::Migration),
            // 3. Tables depending on objectives / action_items
            Box::new(m20250801_000003_create_objective_updates_table::Migration),
            Box::new(m20250801_000006_create_action_item_closures_table::Migration),
            Box::new(m20250801_000007_create_action_item_verifications_table::Migration),
            // 4. Seed data
            Box::new(m20250801_000010_create_initial_superadmin::Migration),
        ]
    }
}
