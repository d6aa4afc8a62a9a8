use crate::utils::created_at;
use entity::users::{self, constraints::*};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(users::Entity)
                    .if_not_exists()
                    .col(ColumnDef::new(users::Column::Id).uuid().not_null())
                    .col(
                        ColumnDef::new(users::Column::Name)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(users::Column::Email)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(users::Column::Role)
                            .small_integer()
                            .not_null(),
                    )
                    .col(created_at!(users::Column::CreatedAt))
                    .primary_key(Index::create().name(PK_USERS).col(users::Column::Id))
                    .index(
                        Index::create()
                            .name(UC_USERS_EMAIL)
                            .col(users::Column::Email)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(users::Entity).to_owned())
            .await
    }
}
