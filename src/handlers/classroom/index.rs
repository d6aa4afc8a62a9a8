use super::visible_to;
use crate::{error::Result, policy::Principal, Json, StateTrait};
use axum::extract::State;
use entity::classrooms;
use sea_orm::{FromQueryResult, QuerySelect};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, FromQueryResult, Serialize)]
pub struct ListItem {
    id: Uuid,
    name: String,
}

pub async fn index<S: StateTrait>(
    State(state): State<S>,
    principal: Principal,
) -> Result<Json<Vec<classrooms::Model>>> {
    let classrooms = visible_to(&principal).all(state.db()).await?;

    Ok(Json(classrooms))
}

pub async fn list<S: StateTrait>(
    State(state): State<S>,
    principal: Principal,
) -> Result<Json<Vec<ListItem>>> {
    let classrooms = visible_to(&principal)
        .select_only()
        .column(classrooms::Column::Id)
        .column(classrooms::Column::Name)
        .into_model::<ListItem>()
        .all(state.db())
        .await?;

    Ok(Json(classrooms))
}
