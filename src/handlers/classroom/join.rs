use crate::{
    error::{self, DatabaseError, Result},
    policy::Principal,
    Json, StateTrait,
};
use axum::extract::State;
use chrono::Utc;
use entity::{
    classroom_users::{self, constraints::PK_CLASSROOM_USERS},
    classrooms,
};
use sea_orm::{EntityTrait, Set};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct Request {
    code: String,
}

pub async fn join<S: StateTrait>(
    State(state): State<S>,
    principal: Principal,
    Json(request): Json<Request>,
) -> Result<Json<classrooms::Model>> {
    let code = request.code.trim().to_ascii_uppercase();

    let classroom = classrooms::Entity::find_by_code(&code)
        .one(state.db())
        .await?
        .ok_or(error::JOIN_CODE_NOT_FOUND)?;

    let membership = classroom_users::ActiveModel {
        classroom_id: Set(classroom.id),
        user_id: Set(principal.id),
        mid_term_obtained_marks: Set(None),
        mid_term_total_marks: Set(None),
        final_term_obtained_marks: Set(None),
        final_term_total_marks: Set(None),
        created_at: Set(Utc::now()),
    };

    match classroom_users::Entity::insert(membership)
        .exec_without_returning(state.db())
        .await
    {
        Ok(_) => {}
        Err(err) if err.unique_violation(PK_CLASSROOM_USERS) => return Err(error::ALREADY_JOINED),
        Err(err) => return Err(err.into()),
    }

    info!(classroom_id = %classroom.id, "joined classroom");

    Ok(Json(classroom))
}
