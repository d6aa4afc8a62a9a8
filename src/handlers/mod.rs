mod assignable;
mod classroom;
mod dashboard;
mod document;
mod lecture;
mod report;
mod user;

use crate::{
    error::{self, Result},
    middlewares::PermissionsLayer,
    policy::{self, Action, Principal, Resource},
    state::StateTrait,
    storage::DocumentStore,
};
use axum::{
    extract::State,
    handler::Handler,
    http::StatusCode,
    routing::get,
    Router,
};
use entity::{assignments, classroom_users, classrooms, projects, quizzes, users::Role};
use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait};
use uuid::Uuid;

pub fn routes<S: StateTrait>(state: S) -> Router<S> {
    Router::new()
        .nest(
            "/v1",
            Router::new()
                .nest("/user", user::routes::<S>(state.clone()))
                .nest("/classroom", classroom::routes::<S>(state.clone()))
                .nest("/classroom/:id/lecture", lecture::routes::<S>(state.clone()))
                .nest(
                    "/classroom/:id/assignment",
                    assignable::routes::<S, assignments::Entity>(state.clone()),
                )
                .nest(
                    "/classroom/:id/quiz",
                    assignable::routes::<S, quizzes::Entity>(state.clone()),
                )
                .nest(
                    "/classroom/:id/project",
                    assignable::routes::<S, projects::Entity>(state.clone()),
                )
                .nest(
                    "/assignment",
                    assignable::submission_routes::<S, assignments::Entity>(state.clone()),
                )
                .nest(
                    "/quiz",
                    assignable::submission_routes::<S, quizzes::Entity>(state.clone()),
                )
                .nest(
                    "/project",
                    assignable::submission_routes::<S, projects::Entity>(state.clone()),
                )
                .nest("/report", report::routes::<S>(state.clone()))
                .route(
                    "/document/*key",
                    get(document::show::<S>
                        .layer(PermissionsLayer::new(state.clone(), Action::DocumentShow))),
                )
                .route(
                    "/dashboard",
                    get(dashboard::index::<S>
                        .layer(PermissionsLayer::new(state, Action::Dashboard))),
                ),
        )
        .route("/livez", get(liveness::<S>))
        .route("/readyz", get(|| async {}))
}

async fn liveness<S: StateTrait>(State(state): State<S>) -> StatusCode {
    if state.db().execute_unprepared("select 1").await.is_err() {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }

    StatusCode::OK
}

/// Loads a classroom and checks `action` against it for the principal.
///
/// Membership is only looked up when it can change the decision.
pub(crate) async fn authorize_classroom<C: ConnectionTrait>(
    db: &C,
    principal: &Principal,
    action: Action,
    classroom_id: Uuid,
) -> Result<classrooms::Model> {
    let classroom = classrooms::Entity::find_by_id(classroom_id)
        .one(db)
        .await?
        .ok_or(error::CLASSROOM_NOT_FOUND)?;

    let joined = if principal.role == Role::Admin || principal.id == classroom.user_id {
        false
    } else {
        classroom_users::Entity::find_membership(classroom_id, principal.id)
            .count(db)
            .await?
            > 0
    };

    let resource = Resource::Classroom {
        owner: classroom.user_id,
        joined,
    };

    policy::can(principal, action, resource).into_result()?;

    Ok(classroom)
}

/// Deletes documents that are no longer referenced. Failures are only logged,
/// the owning rows are already gone.
pub(crate) async fn forget_documents<D: DocumentStore>(
    storage: &D,
    keys: impl IntoIterator<Item = String>,
) {
    for key in keys {
        if let Err(error) = storage.delete(&key).await {
            error!(key = %key, "failed to delete document: {}", error);
        }
    }
}
