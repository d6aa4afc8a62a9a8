use super::{classrooms, quiz_users};
use sea_orm::entity::prelude::*;

pub mod constraints {
    pub const PK_QUIZZES: &str = "PK_quizzes";
    pub const FK_QUIZZES_CLASSROOM_ID: &str = "FK_quizzes_classroom_id";
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "quizzes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub classroom_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Maximum marks obtainable.
    pub marks: i32,
    pub document: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Classroom,
    Submissions,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Classroom => Entity::belongs_to(classrooms::Entity)
                .from(Column::ClassroomId)
                .to(classrooms::Column::Id)
                .into(),
            Self::Submissions => Entity::has_many(quiz_users::Entity).into(),
        }
    }
}

impl Related<classrooms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classroom.def()
    }
}

impl Related<quiz_users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
