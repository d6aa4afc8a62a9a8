mod utils;

pub use sea_orm_migration::prelude::*;

mod m20240301_100000_create_users_table;
mod m20240301_100100_create_classrooms_table;
mod m20240301_100200_create_classroom_users_table;
mod m20240301_100300_create_lectures_table;
mod m20240301_100400_create_assignables_tables;
mod m20240301_100500_create_submissions_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_100000_create_users_table::Migration),
            Box::new(m20240301_100100_create_classrooms_table::Migration),
            Box::new(m20240301_100200_create_classroom_users_table::Migration),
            Box::new(m20240301_100300_create_lectures_table::Migration),
            Box::new(m20240301_100400_create_assignables_tables::Migration),
            Box::new(m20240301_100500_create_submissions_tables::Migration),
        ]
    }
}
