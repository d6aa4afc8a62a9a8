use crate::utils::created_at;
use entity::{
    classrooms,
    lectures::{self, constraints::*},
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
                    .table(lectures::Entity)
                    .if_not_exists()
                    .col(ColumnDef::new(lectures::Column::Id).uuid().not_null())
                    .col(
                        ColumnDef::new(lectures::Column::ClassroomId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(lectures::Column::Name)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(lectures::Column::Document).text().null())
                    .col(created_at!(lectures::Column::CreatedAt))
                    .primary_key(Index::create().name(PK_LECTURES).col(lectures::Column::Id))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_LECTURES_CLASSROOM_ID)
                            .from(lectures::Entity, lectures::Column::ClassroomId)
                            .to(classrooms::Entity, classrooms::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(lectures::Entity).to_owned())
            .await
    }
}
