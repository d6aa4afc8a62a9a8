use super::authorize_classroom;
use crate::{
    error::Result,
    middlewares::PermissionsLayer,
    policy::{Action, Principal},
    report::{compute_report, record_term_marks, Report, TermMarks},
    Json, StateTrait, ValidatedJson,
};
use axum::{
    extract::{Path, State},
    handler::Handler,
    http::StatusCode,
    routing::get,
    Router,
};
use uuid::Uuid;

/// Routes for per-member progress reports
///
/// GET  /report/:classroom
/// GET  /report/:classroom/:user
/// POST /report/:classroom/:user
pub fn routes<S: StateTrait>(state: S) -> Router<S> {
    let layer = |action| PermissionsLayer::new(state.clone(), action);

    Router::new()
        .route(
            "/:classroom",
            get(own::<S>.layer(layer(Action::ReportIndex))),
        )
        .route(
            "/:classroom/:user",
            get(show::<S>.layer(layer(Action::ReportIndex)))
                .post(store::<S>.layer(layer(Action::ReportStore))),
        )
}

async fn own<S: StateTrait>(
    State(state): State<S>,
    principal: Principal,
    Path(classroom_id): Path<Uuid>,
) -> Result<Json<Report>> {
    authorize_classroom(state.db(), &principal, Action::ReportIndex, classroom_id).await?;

    let report = compute_report(state.db(), classroom_id, None, &principal).await?;

    Ok(Json(report))
}

async fn show<S: StateTrait>(
    State(state): State<S>,
    principal: Principal,
    Path((classroom_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Report>> {
    authorize_classroom(state.db(), &principal, Action::ReportIndex, classroom_id).await?;

    let report = compute_report(state.db(), classroom_id, Some(user_id), &principal).await?;

    Ok(Json(report))
}

async fn store<S: StateTrait>(
    State(state): State<S>,
    principal: Principal,
    Path((classroom_id, user_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(marks): ValidatedJson<TermMarks>,
) -> Result<StatusCode> {
    authorize_classroom(state.db(), &principal, Action::ReportStore, classroom_id).await?;

    record_term_marks(state.db(), classroom_id, user_id, &marks).await?;

    info!(%classroom_id, %user_id, "term marks recorded");

    Ok(StatusCode::NO_CONTENT)
}
