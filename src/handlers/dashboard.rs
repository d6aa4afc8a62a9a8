use crate::{error::Result, Json, StateTrait};
use axum::extract::State;
use entity::{classrooms, users};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde::Serialize;

#[derive(Serialize)]
pub struct Dashboard {
    teachers: u64,
    students: u64,
    classrooms: u64,
}

pub async fn index<S: StateTrait>(State(state): State<S>) -> Result<Json<Dashboard>> {
    let teachers = users::Entity::find_with_role(users::Role::Teacher)
        .count(state.db())
        .await?;
    let students = users::Entity::find_with_role(users::Role::Student)
        .count(state.db())
        .await?;
    let classrooms = classrooms::Entity::find().count(state.db()).await?;

    Ok(Json(Dashboard {
        teachers,
        students,
        classrooms,
    }))
}
