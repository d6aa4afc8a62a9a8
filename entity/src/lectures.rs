use super::classrooms;
use sea_orm::entity::prelude::*;
use serde::Serialize;

pub mod constraints {
    pub const PK_LECTURES: &str = "PK_lectures";
    pub const FK_LECTURES_CLASSROOM_ID: &str = "FK_lectures_classroom_id";
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "lectures")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub classroom_id: Uuid,
    pub name: String,
    pub document: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Classroom,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Classroom => Entity::belongs_to(classrooms::Entity)
                .from(Column::ClassroomId)
                .to(classrooms::Column::Id)
                .into(),
        }
    }
}

impl Related<classrooms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classroom.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Entity {
    #[inline]
    pub fn find_in_classroom(classroom_id: Uuid) -> Select<Entity> {
        Self::find().filter(Column::ClassroomId.eq(classroom_id))
    }
}
