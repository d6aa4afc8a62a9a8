use crate::utils::{created_at, drop_table};
use entity::{assignments, classrooms, projects, quizzes, Assignable, AssignableColumn};
use sea_orm_migration::{prelude::*, sea_orm::EntityName};

#[derive(DeriveMigrationName)]
pub struct Migration;

fn create_table<A: Assignable>() -> TableCreateStatement {
    let assignable = A::default();
    let table = assignable.table_name();
    let column = A::column;

    Table::create()
        .table(assignable)
        .if_not_exists()
        .col(ColumnDef::new(column(AssignableColumn::Id)).uuid().not_null())
        .col(
            ColumnDef::new(column(AssignableColumn::ClassroomId))
                .uuid()
                .not_null(),
        )
        .col(
            ColumnDef::new(column(AssignableColumn::Name))
                .string_len(255)
                .not_null(),
        )
        .col(ColumnDef::new(column(AssignableColumn::Description)).text().null())
        .col(
            ColumnDef::new(column(AssignableColumn::Marks))
                .integer()
                .not_null(),
        )
        .col(ColumnDef::new(column(AssignableColumn::Document)).text().null())
        .col(created_at!(column(AssignableColumn::CreatedAt)))
        .primary_key(
            Index::create()
                .name(format!("PK_{table}"))
                .col(column(AssignableColumn::Id)),
        )
        .foreign_key(
            ForeignKey::create()
                .name(format!("FK_{table}_classroom_id"))
                .from(assignable, column(AssignableColumn::ClassroomId))
                .to(classrooms::Entity, classrooms::Column::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(create_table::<assignments::Entity>())
            .await?;
        manager.create_table(create_table::<quizzes::Entity>()).await?;
        manager.create_table(create_table::<projects::Entity>()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_table!(manager, projects::Entity);
        drop_table!(manager, quizzes::Entity);
        drop_table!(manager, assignments::Entity);
        Ok(())
    }
}
