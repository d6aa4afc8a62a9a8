use super::{quizzes, users};
use sea_orm::entity::prelude::*;

pub mod constraints {
    pub const PK_QUIZ_USERS: &str = "PK_quiz_users";
    pub const UC_QUIZ_USERS_QUIZ_ID_USER_ID: &str = "UC_quiz_users_quiz_id_user_id";
    pub const FK_QUIZ_USERS_QUIZ_ID: &str = "FK_quiz_users_quiz_id";
    pub const FK_QUIZ_USERS_USER_ID: &str = "FK_quiz_users_user_id";
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "quiz_users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub user_id: Uuid,
    /// Null until the submission is marked.
    pub marks: Option<i32>,
    pub document: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Quiz,
    User,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Quiz => Entity::belongs_to(quizzes::Entity)
                .from(Column::QuizId)
                .to(quizzes::Column::Id)
                .into(),
            Self::User => Entity::belongs_to(users::Entity)
                .from(Column::UserId)
                .to(users::Column::Id)
                .into(),
        }
    }
}

impl Related<quizzes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quiz.def()
    }
}

impl Related<users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
