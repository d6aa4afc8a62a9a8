use crate::{
    error::Result,
    handlers::authorize_classroom,
    policy::{Action, Principal},
    Json, StateTrait,
};
use axum::extract::{Path, State};
use entity::classrooms;
use uuid::Uuid;

pub async fn show<S: StateTrait>(
    State(state): State<S>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<classrooms::Model>> {
    let classroom = authorize_classroom(state.db(), &principal, Action::ClassroomShow, id).await?;

    Ok(Json(classroom))
}
