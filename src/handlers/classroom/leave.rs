use crate::{
    error::{self, Result},
    policy::Principal,
    Json, StateTrait,
};
use axum::{extract::State, http::StatusCode};
use entity::classroom_users;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct Request {
    /// Id of the classroom to leave.
    id: Uuid,
}

pub async fn leave<S: StateTrait>(
    State(state): State<S>,
    principal: Principal,
    Json(request): Json<Request>,
) -> Result<StatusCode> {
    let res = classroom_users::Entity::delete_many()
        .filter(classroom_users::Column::ClassroomId.eq(request.id))
        .filter(classroom_users::Column::UserId.eq(principal.id))
        .exec(state.db())
        .await?;

    if res.rows_affected == 0 {
        return Err(error::USER_NOT_JOINED);
    }

    info!(classroom_id = %request.id, "left classroom");

    Ok(StatusCode::NO_CONTENT)
}
