use super::{classroom_users, classrooms};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub mod constraints {
    pub const PK_USERS: &str = "PK_users";
    pub const UC_USERS_EMAIL: &str = "UC_users_email";
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub role: Role,
    pub created_at: DateTimeUtc,
}

#[derive(
    EnumIter, DeriveActiveEnum, Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "i16", db_type = "SmallInteger")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[sea_orm(num_value = 0)]
    Admin,
    #[sea_orm(num_value = 1)]
    Teacher,
    #[sea_orm(num_value = 2)]
    Student,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Memberships,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Memberships => Entity::has_many(classroom_users::Entity).into(),
        }
    }
}

impl Related<classroom_users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Memberships.def()
    }
}

impl Related<classrooms::Entity> for Entity {
    fn to() -> RelationDef {
        classroom_users::Relation::Classroom.def()
    }

    fn via() -> Option<RelationDef> {
        Some(classroom_users::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Entity {
    #[inline]
    pub fn find_with_role(role: Role) -> Select<Entity> {
        Self::find().filter(Column::Role.eq(role))
    }
}
