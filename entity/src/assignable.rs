use crate::{
    assignment_users, assignments, project_users, projects, quiz_users, quizzes,
};
use sea_orm::{EntityTrait, Related};

/// Columns every assignable table has.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignableColumn {
    Id,
    ClassroomId,
    Name,
    Description,
    Marks,
    Document,
    CreatedAt,
}

/// Columns every submission table has. `Parent` is the foreign key to the
/// assignable (`assignment_id`, `quiz_id`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionColumn {
    Id,
    Parent,
    UserId,
    Marks,
    Document,
    CreatedAt,
}

/// A category of graded classroom work: the table holding the assignables of
/// a classroom and the table holding each member's submission for them.
///
/// Assignments, quizzes and projects share one shape, so queries are written
/// once against this trait instead of once per table.
pub trait Assignable: EntityTrait + Default + Copy {
    type Submission: EntityTrait + Related<Self> + Default + Copy;

    /// Singular name, used for routes, document collections and logging.
    const NAME: &'static str;

    fn column(column: AssignableColumn) -> Self::Column;

    fn submission_column(column: SubmissionColumn) -> <Self::Submission as EntityTrait>::Column;
}

macro_rules! impl_assignable {
    ($name:literal, $assignable:ident, $submission:ident, $parent:ident) => {
        impl Assignable for $assignable::Entity {
            type Submission = $submission::Entity;

            const NAME: &'static str = $name;

            fn column(column: AssignableColumn) -> $assignable::Column {
                match column {
                    AssignableColumn::Id => $assignable::Column::Id,
                    AssignableColumn::ClassroomId => $assignable::Column::ClassroomId,
                    AssignableColumn::Name => $assignable::Column::Name,
                    AssignableColumn::Description => $assignable::Column::Description,
                    AssignableColumn::Marks => $assignable::Column::Marks,
                    AssignableColumn::Document => $assignable::Column::Document,
                    AssignableColumn::CreatedAt => $assignable::Column::CreatedAt,
                }
            }

            fn submission_column(column: SubmissionColumn) -> $submission::Column {
                match column {
                    SubmissionColumn::Id => $submission::Column::Id,
                    SubmissionColumn::Parent => $submission::Column::$parent,
                    SubmissionColumn::UserId => $submission::Column::UserId,
                    SubmissionColumn::Marks => $submission::Column::Marks,
                    SubmissionColumn::Document => $submission::Column::Document,
                    SubmissionColumn::CreatedAt => $submission::Column::CreatedAt,
                }
            }
        }
    };
}

impl_assignable!("assignment", assignments, assignment_users, AssignmentId);
impl_assignable!("quiz", quizzes, quiz_users, QuizId);
impl_assignable!("project", projects, project_users, ProjectId);
