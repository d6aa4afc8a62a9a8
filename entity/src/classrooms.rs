use super::{classroom_users, users};
use sea_orm::entity::prelude::*;
use serde::Serialize;

pub mod constraints {
    pub const PK_CLASSROOMS: &str = "PK_classrooms";
    pub const UC_CLASSROOMS_CODE: &str = "UC_classrooms_code";
    pub const FK_CLASSROOMS_USER_ID: &str = "FK_classrooms_user_id";
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "classrooms")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// The owning teacher.
    pub user_id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Owner,
    Memberships,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Owner => Entity::belongs_to(users::Entity)
                .from(Column::UserId)
                .to(users::Column::Id)
                .into(),
            Self::Memberships => Entity::has_many(classroom_users::Entity).into(),
        }
    }
}

impl Related<classroom_users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Memberships.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Entity {
    #[inline]
    pub fn find_by_code(code: &str) -> Select<Entity> {
        Self::find().filter(Column::Code.eq(code))
    }

    #[inline]
    pub fn find_owned_by(user_id: Uuid) -> Select<Entity> {
        Self::find().filter(Column::UserId.eq(user_id))
    }

    /// Classrooms the user has joined.
    #[inline]
    pub fn find_joined_by(user_id: Uuid) -> Select<Entity> {
        Self::find()
            .inner_join(classroom_users::Entity)
            .filter(classroom_users::Column::UserId.eq(user_id))
    }
}
