use crate::utils::{created_at, drop_table};
use entity::{
    assignment_users, assignments, project_users, projects, quiz_users, quizzes, users,
    Assignable, AssignableColumn, SubmissionColumn,
};
use sea_orm_migration::{prelude::*, sea_orm::EntityName};

#[derive(DeriveMigrationName)]
pub struct Migration;

fn create_table<A: Assignable>() -> TableCreateStatement {
    let submission = A::Submission::default();
    let table = submission.table_name();
    let parent = format!("{}_id", A::NAME);
    let column = A::submission_column;

    Table::create()
        .table(submission)
        .if_not_exists()
        .col(ColumnDef::new(column(SubmissionColumn::Id)).uuid().not_null())
        .col(
            ColumnDef::new(column(SubmissionColumn::Parent))
                .uuid()
                .not_null(),
        )
        .col(
            ColumnDef::new(column(SubmissionColumn::UserId))
                .uuid()
                .not_null(),
        )
        .col(ColumnDef::new(column(SubmissionColumn::Marks)).integer().null())
        .col(ColumnDef::new(column(SubmissionColumn::Document)).text().null())
        .col(created_at!(column(SubmissionColumn::CreatedAt)))
        .primary_key(
            Index::create()
                .name(format!("PK_{table}"))
                .col(column(SubmissionColumn::Id)),
        )
        .index(
            Index::create()
                .name(format!("UC_{table}_{parent}_user_id"))
                .col(column(SubmissionColumn::Parent))
                .col(column(SubmissionColumn::UserId))
                .unique(),
        )
        .foreign_key(
            ForeignKey::create()
                .name(format!("FK_{table}_{parent}"))
                .from(submission, column(SubmissionColumn::Parent))
                .to(A::default(), A::column(AssignableColumn::Id))
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name(format!("FK_{table}_user_id"))
                .from(submission, column(SubmissionColumn::UserId))
                .to(users::Entity, users::Column::Id)
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
        drop_table!(manager, project_users::Entity);
        drop_table!(manager, quiz_users::Entity);
        drop_table!(manager, assignment_users::Entity);
        Ok(())
    }
}
