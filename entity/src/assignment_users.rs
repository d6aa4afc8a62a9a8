use super::{assignments, users};
use sea_orm::entity::prelude::*;

pub mod constraints {
    pub const PK_ASSIGNMENT_USERS: &str = "PK_assignment_users";
    pub const UC_ASSIGNMENT_USERS_ASSIGNMENT_ID_USER_ID: &str = "UC_assignment_users_assignment_id_user_id";
    pub const FK_ASSIGNMENT_USERS_ASSIGNMENT_ID: &str = "FK_assignment_users_assignment_id";
    pub const FK_ASSIGNMENT_USERS_USER_ID: &str = "FK_assignment_users_user_id";
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "assignment_users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub assignment_id: Uuid,
    pub user_id: Uuid,
    /// Null until the submission is marked.
    pub marks: Option<i32>,
    pub document: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Assignment,
    User,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Assignment => Entity::belongs_to(assignments::Entity)
                .from(Column::AssignmentId)
                .to(assignments::Column::Id)
                .into(),
            Self::User => Entity::belongs_to(users::Entity)
                .from(Column::UserId)
                .to(users::Column::Id)
                .into(),
        }
    }
}

impl Related<assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl Related<users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
