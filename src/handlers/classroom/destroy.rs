use crate::{
    error::Result,
    handlers::{authorize_classroom, forget_documents},
    policy::{Action, Principal},
    StateTrait,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use entity::classrooms;
use sea_orm::{EntityTrait, TransactionTrait};
use uuid::Uuid;

pub async fn destroy<S: StateTrait>(
    State(state): State<S>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let txn = state.db().begin().await?;

    authorize_classroom(&txn, &principal, Action::ClassroomDestroy, id).await?;

    let documents = super::documents(&txn, id).await?;

    classrooms::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;

    forget_documents(state.storage(), documents).await;

    info!(classroom_id = %id, "deleted classroom");

    Ok(StatusCode::NO_CONTENT)
}
