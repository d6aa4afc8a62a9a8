use super::{find, submission_collection, SubmissionRow};
use crate::{
    error::{self, DatabaseError, Error, Result},
    handlers::{authorize_classroom, forget_documents},
    policy::{Action, Principal},
    storage::DocumentStore,
    DocumentForm, Json, StateTrait, ValidatedJson,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use entity::{Assignable, SubmissionColumn};
use sea_orm::{
    sea_query::{Expr, Query},
    ColumnTrait, ConnectionTrait, DbErr, EntityName, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, TransactionTrait,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct MarkRequest {
    /// Id of the submission record.
    id: Uuid,
    #[validate(range(min = 0))]
    marks: i32,
}

fn select<A: Assignable>() -> Select<A::Submission> {
    A::Submission::find()
        .select_only()
        .column(A::submission_column(SubmissionColumn::Id))
        .column(A::submission_column(SubmissionColumn::UserId))
        .column(A::submission_column(SubmissionColumn::Marks))
        .column(A::submission_column(SubmissionColumn::Document))
        .column(A::submission_column(SubmissionColumn::CreatedAt))
}

async fn find_owned<A: Assignable, C: ConnectionTrait>(
    db: &C,
    assignable_id: Uuid,
    user_id: Uuid,
) -> std::result::Result<Option<SubmissionRow>, DbErr> {
    select::<A>()
        .filter(A::submission_column(SubmissionColumn::Parent).eq(assignable_id))
        .filter(A::submission_column(SubmissionColumn::UserId).eq(user_id))
        .into_model::<SubmissionRow>()
        .one(db)
        .await
}

/// Returns the submission record of `user_id` for the assignable, creating an
/// empty one on the first submit.
async fn find_or_create<A, C>(db: &C, assignable_id: Uuid, user_id: Uuid) -> Result<SubmissionRow>
where
    A: Assignable,
    C: ConnectionTrait + TransactionTrait,
{
    if let Some(row) = find_owned::<A, _>(db, assignable_id, user_id).await? {
        return Ok(row);
    }

    let submission = A::Submission::default();
    let unique = format!(
        "UC_{}_{}_id_user_id",
        submission.table_name(),
        A::NAME
    );

    let stmt = Query::insert()
        .into_table(submission)
        .columns([
            A::submission_column(SubmissionColumn::Id),
            A::submission_column(SubmissionColumn::Parent),
            A::submission_column(SubmissionColumn::UserId),
            A::submission_column(SubmissionColumn::CreatedAt),
        ])
        .values([
            Uuid::new_v4().into(),
            assignable_id.into(),
            user_id.into(),
            Utc::now().into(),
        ])
        .map_err(Error::internal)?
        .to_owned();

    // a failed insert must not abort the surrounding transaction
    let savepoint = db.begin().await?;

    match savepoint
        .execute(savepoint.get_database_backend().build(&stmt))
        .await
    {
        Ok(_) => savepoint.commit().await?,
        Err(err) if err.unique_violation(&unique) => {
            savepoint.rollback().await?;
            debug!(assignable = A::NAME, "submission created concurrently");
        }
        Err(err) => return Err(err.into()),
    }

    find_owned::<A, _>(db, assignable_id, user_id)
        .await?
        .ok_or_else(|| Error::internal("submission record vanished after insert"))
}

pub async fn submit<S: StateTrait, A: Assignable>(
    State(state): State<S>,
    principal: Principal,
    Path(id): Path<Uuid>,
    mut form: DocumentForm,
) -> Result<StatusCode> {
    let document = form.required_document()?;

    let txn = state.db().begin().await?;

    let assignable = find::<A, _>(&txn, id).await?;
    authorize_classroom(&txn, &principal, Action::Submit, assignable.classroom_id).await?;

    let submission = find_or_create::<A, _>(&txn, id, principal.id).await?;

    let key = state
        .storage()
        .put(&submission_collection::<A>(), &document.file_name, document.data)
        .await?;

    let result = async {
        A::Submission::update_many()
            .col_expr(
                A::submission_column(SubmissionColumn::Document),
                Expr::value(Some(key.clone())),
            )
            .filter(A::submission_column(SubmissionColumn::Id).eq(submission.id))
            .exec(&txn)
            .await?;
        txn.commit().await
    }
    .await;

    if let Err(err) = result {
        forget_documents(state.storage(), [key]).await;
        return Err(err.into());
    }

    // the new document replaces the old one
    forget_documents(state.storage(), submission.document).await;

    info!(assignable = A::NAME, %id, "submitted");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn mark<S: StateTrait, A: Assignable>(
    State(state): State<S>,
    principal: Principal,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<MarkRequest>,
) -> Result<StatusCode> {
    let txn = state.db().begin().await?;

    let assignable = find::<A, _>(&txn, id).await?;
    authorize_classroom(&txn, &principal, Action::Mark, assignable.classroom_id).await?;

    let res = A::Submission::update_many()
        .col_expr(
            A::submission_column(SubmissionColumn::Marks),
            Expr::value(request.marks),
        )
        .filter(A::submission_column(SubmissionColumn::Id).eq(request.id))
        .filter(A::submission_column(SubmissionColumn::Parent).eq(id))
        .exec(&txn)
        .await?;

    if res.rows_affected == 0 {
        return Err(error::SUBMISSION_NOT_FOUND);
    }

    txn.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn index<S: StateTrait, A: Assignable>(
    State(state): State<S>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<SubmissionRow>>> {
    let assignable = find::<A, _>(state.db(), id).await?;
    authorize_classroom(
        state.db(),
        &principal,
        Action::SubmissionIndex,
        assignable.classroom_id,
    )
    .await?;

    let rows = select::<A>()
        .filter(A::submission_column(SubmissionColumn::Parent).eq(id))
        .order_by_asc(A::submission_column(SubmissionColumn::CreatedAt))
        .into_model::<SubmissionRow>()
        .all(state.db())
        .await?;

    Ok(Json(rows))
}
