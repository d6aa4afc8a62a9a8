use super::{collection, find, AssignableRow};
use crate::{
    error::{self, Error, Result},
    handlers::{authorize_classroom, forget_documents},
    policy::{Action, Principal},
    storage::DocumentStore,
    DocumentForm, Json, StateTrait,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use entity::{Assignable, AssignableColumn, SubmissionColumn};
use sea_orm::{
    sea_query::{Expr, Query},
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
};
use uuid::Uuid;
use validator::Validate;

#[derive(Validate)]
struct Fields {
    #[validate(length(min = 1, max = 255))]
    name: Option<String>,
    description: Option<String>,
    #[validate(range(min = 0))]
    marks: Option<i32>,
}

impl Fields {
    fn from_form(form: &mut DocumentForm) -> Result<Self> {
        let fields = Self {
            name: form.text("name"),
            description: form.text("description"),
            marks: form.parse("marks")?,
        };

        fields.validate().map_err(|_| error::MULTIPART_INVALID)?;

        Ok(fields)
    }
}

async fn find_in_classroom<A: Assignable, C: ConnectionTrait>(
    db: &C,
    classroom_id: Uuid,
    id: Uuid,
) -> Result<AssignableRow> {
    let row = find::<A, _>(db, id).await?;

    if row.classroom_id != classroom_id {
        return Err(error::ASSIGNABLE_NOT_FOUND);
    }

    Ok(row)
}

pub async fn index<S: StateTrait, A: Assignable>(
    State(state): State<S>,
    principal: Principal,
    Path(classroom_id): Path<Uuid>,
) -> Result<Json<Vec<AssignableRow>>> {
    authorize_classroom(state.db(), &principal, Action::AssignableIndex, classroom_id).await?;

    let rows = A::find()
        .filter(A::column(AssignableColumn::ClassroomId).eq(classroom_id))
        .order_by_asc(A::column(AssignableColumn::CreatedAt))
        .into_model::<AssignableRow>()
        .all(state.db())
        .await?;

    Ok(Json(rows))
}

pub async fn show<S: StateTrait, A: Assignable>(
    State(state): State<S>,
    principal: Principal,
    Path((classroom_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<AssignableRow>> {
    authorize_classroom(state.db(), &principal, Action::AssignableShow, classroom_id).await?;

    Ok(Json(find_in_classroom::<A, _>(state.db(), classroom_id, id).await?))
}

pub async fn store<S: StateTrait, A: Assignable>(
    State(state): State<S>,
    principal: Principal,
    Path(classroom_id): Path<Uuid>,
    mut form: DocumentForm,
) -> Result<(StatusCode, Json<AssignableRow>)> {
    let fields = Fields::from_form(&mut form)?;
    let (Some(name), Some(marks)) = (fields.name, fields.marks) else {
        return Err(error::MULTIPART_INVALID);
    };
    let document = form.required_document()?;

    let txn = state.db().begin().await?;

    authorize_classroom(&txn, &principal, Action::AssignableStore, classroom_id).await?;

    let key = state
        .storage()
        .put(&collection::<A>(), &document.file_name, document.data)
        .await?;

    let row = AssignableRow {
        id: Uuid::new_v4(),
        classroom_id,
        name,
        description: fields.description.filter(|description| !description.is_empty()),
        marks,
        document: Some(key.clone()),
        created_at: Utc::now(),
    };

    let stmt = Query::insert()
        .into_table(A::default())
        .columns([
            A::column(AssignableColumn::Id),
            A::column(AssignableColumn::ClassroomId),
            A::column(AssignableColumn::Name),
            A::column(AssignableColumn::Description),
            A::column(AssignableColumn::Marks),
            A::column(AssignableColumn::Document),
            A::column(AssignableColumn::CreatedAt),
        ])
        .values([
            row.id.into(),
            row.classroom_id.into(),
            row.name.clone().into(),
            row.description.clone().into(),
            row.marks.into(),
            row.document.clone().into(),
            row.created_at.into(),
        ])
        .map_err(Error::internal)?
        .to_owned();

    let result = async {
        txn.execute(txn.get_database_backend().build(&stmt)).await?;
        txn.commit().await
    }
    .await;

    if let Err(err) = result {
        forget_documents(state.storage(), [key]).await;
        return Err(err.into());
    }

    info!(assignable = A::NAME, id = %row.id, "created assignable");

    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn update<S: StateTrait, A: Assignable>(
    State(state): State<S>,
    principal: Principal,
    Path((classroom_id, id)): Path<(Uuid, Uuid)>,
    mut form: DocumentForm,
) -> Result<Json<AssignableRow>> {
    let fields = Fields::from_form(&mut form)?;

    let txn = state.db().begin().await?;

    authorize_classroom(&txn, &principal, Action::AssignableUpdate, classroom_id).await?;
    let row = find_in_classroom::<A, _>(&txn, classroom_id, id).await?;

    let mut update = A::update_many().filter(A::column(AssignableColumn::Id).eq(id));
    let mut changed = false;

    if let Some(name) = fields.name {
        update = update.col_expr(A::column(AssignableColumn::Name), Expr::value(name));
        changed = true;
    }

    if let Some(description) = fields.description {
        let description = Some(description).filter(|description| !description.is_empty());
        update = update.col_expr(
            A::column(AssignableColumn::Description),
            Expr::value(description),
        );
        changed = true;
    }

    if let Some(marks) = fields.marks {
        update = update.col_expr(A::column(AssignableColumn::Marks), Expr::value(marks));
        changed = true;
    }

    let key = match form.document.take() {
        Some(document) => {
            let key = state
                .storage()
                .put(&collection::<A>(), &document.file_name, document.data)
                .await?;

            update = update.col_expr(
                A::column(AssignableColumn::Document),
                Expr::value(Some(key.clone())),
            );
            changed = true;

            Some(key)
        }
        None => None,
    };

    if !changed {
        return Ok(Json(row));
    }

    let result = async {
        update.exec(&txn).await?;
        let updated = find::<A, _>(&txn, id).await;
        txn.commit().await?;
        Ok::<_, DbErr>(updated)
    }
    .await;

    let updated = match result {
        Ok(updated) => updated?,
        Err(err) => {
            forget_documents(state.storage(), key).await;
            return Err(err.into());
        }
    };

    if key.is_some() {
        forget_documents(state.storage(), row.document).await;
    }

    Ok(Json(updated))
}

pub async fn destroy<S: StateTrait, A: Assignable>(
    State(state): State<S>,
    principal: Principal,
    Path((classroom_id, id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode> {
    let txn = state.db().begin().await?;

    authorize_classroom(&txn, &principal, Action::AssignableDestroy, classroom_id).await?;
    let row = find_in_classroom::<A, _>(&txn, classroom_id, id).await?;

    let submissions: Vec<Option<String>> = A::Submission::find()
        .filter(A::submission_column(SubmissionColumn::Parent).eq(id))
        .select_only()
        .column(A::submission_column(SubmissionColumn::Document))
        .into_tuple()
        .all(&txn)
        .await?;

    A::delete_many()
        .filter(A::column(AssignableColumn::Id).eq(id))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    let documents = row.document.into_iter().chain(submissions.into_iter().flatten());
    forget_documents(state.storage(), documents).await;

    Ok(StatusCode::NO_CONTENT)
}
