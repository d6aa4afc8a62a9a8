//! Assignments, quizzes and projects.
//!
//! The three categories share one table shape, so every handler here is written
//! once against [`Assignable`] and mounted three times.

mod crud;
mod submission;

use crate::{
    error::{self, Result},
    middlewares::PermissionsLayer,
    policy::Action,
    StateTrait,
};
use axum::{
    handler::Handler,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use entity::{Assignable, AssignableColumn, SubmissionColumn};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityName, EntityTrait, FromQueryResult, QueryFilter,
    QuerySelect,
};
use serde::Serialize;
use uuid::Uuid;

/// Routes for the assignables of a classroom, mounted at
/// `/classroom/:id/{assignment,quiz,project}`
///
/// GET    /
/// POST   /
/// GET    /:assignable
/// PATCH  /:assignable
/// DELETE /:assignable
pub fn routes<S: StateTrait, A: Assignable>(state: S) -> Router<S> {
    let layer = |action| PermissionsLayer::new(state.clone(), action);

    Router::new()
        .route(
            "/",
            get(crud::index::<S, A>.layer(layer(Action::AssignableIndex)))
                .post(crud::store::<S, A>.layer(layer(Action::AssignableStore))),
        )
        .route(
            "/:assignable",
            get(crud::show::<S, A>.layer(layer(Action::AssignableShow)))
                .patch(crud::update::<S, A>.layer(layer(Action::AssignableUpdate)))
                .delete(crud::destroy::<S, A>.layer(layer(Action::AssignableDestroy))),
        )
}

/// Routes for submitting and marking, mounted at `/{assignment,quiz,project}`
///
/// POST /:id/submit
/// POST /:id/mark
/// GET  /:id/submissions
pub fn submission_routes<S: StateTrait, A: Assignable>(state: S) -> Router<S> {
    let layer = |action| PermissionsLayer::new(state.clone(), action);

    Router::new()
        .route(
            "/:id/submit",
            post(submission::submit::<S, A>.layer(layer(Action::Submit))),
        )
        .route(
            "/:id/mark",
            post(submission::mark::<S, A>.layer(layer(Action::Mark))),
        )
        .route(
            "/:id/submissions",
            get(submission::index::<S, A>.layer(layer(Action::SubmissionIndex))),
        )
}

#[derive(Debug, Clone, FromQueryResult, Serialize)]
pub struct AssignableRow {
    pub id: Uuid,
    pub classroom_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub marks: i32,
    pub document: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromQueryResult, Serialize)]
pub struct SubmissionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub marks: Option<i32>,
    pub document: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Document collection of the assignables, e.g. `quizzes`.
fn collection<A: Assignable>() -> String {
    A::default().table_name().to_owned()
}

/// Document collection of the submissions, e.g. `quiz_users`.
fn submission_collection<A: Assignable>() -> String {
    A::Submission::default().table_name().to_owned()
}

async fn find<A: Assignable, C: ConnectionTrait>(db: &C, id: Uuid) -> Result<AssignableRow> {
    A::find()
        .filter(A::column(AssignableColumn::Id).eq(id))
        .into_model::<AssignableRow>()
        .one(db)
        .await?
        .ok_or(error::ASSIGNABLE_NOT_FOUND)
}

pub(crate) async fn documents_of_classroom<A: Assignable, C: ConnectionTrait>(
    db: &C,
    classroom_id: Uuid,
) -> std::result::Result<Vec<String>, DbErr> {
    let assignables: Vec<Option<String>> = A::find()
        .filter(A::column(AssignableColumn::ClassroomId).eq(classroom_id))
        .select_only()
        .column(A::column(AssignableColumn::Document))
        .into_tuple()
        .all(db)
        .await?;

    let submissions: Vec<Option<String>> = A::Submission::find()
        .inner_join(A::default())
        .filter(A::column(AssignableColumn::ClassroomId).eq(classroom_id))
        .select_only()
        .column(A::submission_column(SubmissionColumn::Document))
        .into_tuple()
        .all(db)
        .await?;

    Ok(assignables
        .into_iter()
        .chain(submissions)
        .flatten()
        .collect())
}

pub(crate) async fn documents_of_user<A: Assignable, C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
) -> std::result::Result<Vec<String>, DbErr> {
    let submissions: Vec<Option<String>> = A::Submission::find()
        .filter(A::submission_column(SubmissionColumn::UserId).eq(user_id))
        .select_only()
        .column(A::submission_column(SubmissionColumn::Document))
        .into_tuple()
        .all(db)
        .await?;

    Ok(submissions.into_iter().flatten().collect())
}
