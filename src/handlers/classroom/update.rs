use crate::{
    error::Result,
    handlers::authorize_classroom,
    policy::{Action, Principal},
    utils::set_option,
    Json, StateTrait, ValidatedJson,
};
use axum::extract::{Path, State};
use entity::classrooms;
use sea_orm::{ActiveModelTrait, ActiveValue::Unchanged, TransactionTrait};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct Request {
    #[validate(length(min = 1, max = 255))]
    name: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    description: Option<Option<String>>,
}

pub async fn update<S: StateTrait>(
    State(state): State<S>,
    principal: Principal,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<Request>,
) -> Result<Json<classrooms::Model>> {
    let txn = state.db().begin().await?;

    let classroom = authorize_classroom(&txn, &principal, Action::ClassroomUpdate, id).await?;

    if request.name.is_none() && request.description.is_none() {
        return Ok(Json(classroom));
    }

    let model = classrooms::ActiveModel {
        id: Unchanged(classroom.id),
        name: set_option(request.name),
        description: set_option(request.description),
        ..Default::default()
    };

    let classroom = model.update(&txn).await?;

    txn.commit().await?;

    Ok(Json(classroom))
}
