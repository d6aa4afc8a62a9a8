use crate::{
    error::Result,
    handlers::authorize_classroom,
    policy::{Action, Principal},
    Json, StateTrait,
};
use axum::extract::{Path, State};
use chrono::{DateTime, Utc};
use entity::{classroom_users, users};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct Member {
    #[serde(flatten)]
    user: users::Model,
    mid_term_obtained_marks: Option<i32>,
    mid_term_total_marks: Option<i32>,
    final_term_obtained_marks: Option<i32>,
    final_term_total_marks: Option<i32>,
    joined_at: DateTime<Utc>,
}

pub async fn members<S: StateTrait>(
    State(state): State<S>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Member>>> {
    authorize_classroom(state.db(), &principal, Action::ClassroomMembers, id).await?;

    let rows = classroom_users::Entity::find()
        .filter(classroom_users::Column::ClassroomId.eq(id))
        .order_by_asc(classroom_users::Column::CreatedAt)
        .find_also_related(users::Entity)
        .all(state.db())
        .await?;

    let members = rows
        .into_iter()
        .filter_map(|(membership, user)| {
            Some(Member {
                user: user?,
                mid_term_obtained_marks: membership.mid_term_obtained_marks,
                mid_term_total_marks: membership.mid_term_total_marks,
                final_term_obtained_marks: membership.final_term_obtained_marks,
                final_term_total_marks: membership.final_term_total_marks,
                joined_at: membership.created_at,
            })
        })
        .collect();

    Ok(Json(members))
}
