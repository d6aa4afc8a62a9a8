use super::{projects, users};
use sea_orm::entity::prelude::*;

pub mod constraints {
    pub const PK_PROJECT_USERS: &str = "PK_project_users";
    pub const UC_PROJECT_USERS_PROJECT_ID_USER_ID: &str = "UC_project_users_project_id_user_id";
    pub const FK_PROJECT_USERS_PROJECT_ID: &str = "FK_project_users_project_id";
    pub const FK_PROJECT_USERS_USER_ID: &str = "FK_project_users_user_id";
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "project_users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub project_id: Uuid,
    pub user_id: Uuid,
    /// Null until the submission is marked.
    pub marks: Option<i32>,
    pub document: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Project,
    User,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Project => Entity::belongs_to(projects::Entity)
                .from(Column::ProjectId)
                .to(projects::Column::Id)
                .into(),
            Self::User => Entity::belongs_to(users::Entity)
                .from(Column::UserId)
                .to(users::Column::Id)
                .into(),
        }
    }
}

impl Related<projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
