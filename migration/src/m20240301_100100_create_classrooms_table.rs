use crate::utils::created_at;
use entity::{
    classrooms::{self, constraints::*},
    users,
};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(classrooms::Entity)
                    .if_not_exists()
                    .col(ColumnDef::new(classrooms::Column::Id).uuid().not_null())
                    .col(
                        ColumnDef::new(classrooms::Column::UserId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(classrooms::Column::Code)
                            .string_len(7)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(classrooms::Column::Name)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(classrooms::Column::Description).text().null())
                    .col(created_at!(classrooms::Column::CreatedAt))
                    .primary_key(
                        Index::create()
                            .name(PK_CLASSROOMS)
                            .col(classrooms::Column::Id),
                    )
                    .index(
                        Index::create()
                            .name(UC_CLASSROOMS_CODE)
                            .col(classrooms::Column::Code)
                            .unique(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_CLASSROOMS_USER_ID)
                            .from(classrooms::Entity, classrooms::Column::UserId)
                            .to(users::Entity, users::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(classrooms::Entity).to_owned())
            .await
    }
}
