use super::{classrooms, users};
use sea_orm::entity::prelude::*;
use serde::Serialize;

pub mod constraints {
    pub const PK_CLASSROOM_USERS: &str = "PK_classroom_users";
    pub const FK_CLASSROOM_USERS_CLASSROOM_ID: &str = "FK_classroom_users_classroom_id";
    pub const FK_CLASSROOM_USERS_USER_ID: &str = "FK_classroom_users_user_id";
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "classroom_users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub classroom_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: Uuid,
    pub mid_term_obtained_marks: Option<i32>,
    pub mid_term_total_marks: Option<i32>,
    pub final_term_obtained_marks: Option<i32>,
    pub final_term_total_marks: Option<i32>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Classroom,
    User,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Classroom => Entity::belongs_to(classrooms::Entity)
                .from(Column::ClassroomId)
                .to(classrooms::Column::Id)
                .into(),
            Self::User => Entity::belongs_to(users::Entity)
                .from(Column::UserId)
                .to(users::Column::Id)
                .into(),
        }
    }
}

impl Related<classrooms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classroom.def()
    }
}

impl Related<users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Entity {
    #[inline]
    pub fn find_membership(classroom_id: Uuid, user_id: Uuid) -> Select<Entity> {
        Self::find_by_id((classroom_id, user_id))
    }
}
