use crate::utils::created_at;
use entity::{
    classroom_users::{self, constraints::*},
    classrooms, users,
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
                    .table(classroom_users::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(classroom_users::Column::ClassroomId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(classroom_users::Column::UserId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(classroom_users::Column::MidTermObtainedMarks)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(classroom_users::Column::MidTermTotalMarks)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(classroom_users::Column::FinalTermObtainedMarks)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(classroom_users::Column::FinalTermTotalMarks)
                            .integer()
                            .null(),
                    )
                    .col(created_at!(classroom_users::Column::CreatedAt))
                    .primary_key(
                        Index::create()
                            .name(PK_CLASSROOM_USERS)
                            .col(classroom_users::Column::ClassroomId)
                            .col(classroom_users::Column::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_CLASSROOM_USERS_CLASSROOM_ID)
                            .from(classroom_users::Entity, classroom_users::Column::ClassroomId)
                            .to(classrooms::Entity, classrooms::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_CLASSROOM_USERS_USER_ID)
                            .from(classroom_users::Entity, classroom_users::Column::UserId)
                            .to(users::Entity, users::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(classroom_users::Entity).to_owned())
            .await
    }
}
