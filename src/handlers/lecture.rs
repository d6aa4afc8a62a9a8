use super::{authorize_classroom, forget_documents};
use crate::{
    error::{self, Result},
    middlewares::PermissionsLayer,
    policy::{Action, Principal},
    storage::DocumentStore,
    utils::set_option,
    DocumentForm, Json, StateTrait,
};
use axum::{
    extract::{Path, State},
    handler::Handler,
    http::StatusCode,
    routing::get,
    Router,
};
use chrono::Utc;
use entity::lectures;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, ConnectionTrait, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;
use validator::Validate;

const COLLECTION: &str = "lectures";

/// Routes for the lectures of a classroom
///
/// GET    /classroom/:id/lecture
/// POST   /classroom/:id/lecture
/// GET    /classroom/:id/lecture/:lecture
/// PATCH  /classroom/:id/lecture/:lecture
/// DELETE /classroom/:id/lecture/:lecture
pub fn routes<S: StateTrait>(state: S) -> Router<S> {
    let layer = |action| PermissionsLayer::new(state.clone(), action);

    Router::new()
        .route(
            "/",
            get(index::<S>.layer(layer(Action::LectureIndex)))
                .post(store::<S>.layer(layer(Action::LectureStore))),
        )
        .route(
            "/:lecture",
            get(show::<S>.layer(layer(Action::LectureShow)))
                .patch(update::<S>.layer(layer(Action::LectureUpdate)))
                .delete(destroy::<S>.layer(layer(Action::LectureDestroy))),
        )
}

#[derive(Validate)]
struct Fields {
    #[validate(length(min = 1, max = 255))]
    name: Option<String>,
}

impl Fields {
    fn from_form(form: &mut DocumentForm) -> Result<Self> {
        let fields = Self {
            name: form.text("name"),
        };

        fields.validate().map_err(|_| error::MULTIPART_INVALID)?;

        Ok(fields)
    }
}

async fn find<C: ConnectionTrait>(db: &C, classroom_id: Uuid, id: Uuid) -> Result<lectures::Model> {
    lectures::Entity::find_in_classroom(classroom_id)
        .filter(lectures::Column::Id.eq(id))
        .one(db)
        .await?
        .ok_or(error::LECTURE_NOT_FOUND)
}

async fn index<S: StateTrait>(
    State(state): State<S>,
    principal: Principal,
    Path(classroom_id): Path<Uuid>,
) -> Result<Json<Vec<lectures::Model>>> {
    authorize_classroom(state.db(), &principal, Action::LectureIndex, classroom_id).await?;

    let lectures = lectures::Entity::find_in_classroom(classroom_id)
        .order_by_asc(lectures::Column::CreatedAt)
        .all(state.db())
        .await?;

    Ok(Json(lectures))
}

async fn show<S: StateTrait>(
    State(state): State<S>,
    principal: Principal,
    Path((classroom_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<lectures::Model>> {
    authorize_classroom(state.db(), &principal, Action::LectureShow, classroom_id).await?;

    Ok(Json(find(state.db(), classroom_id, id).await?))
}

async fn store<S: StateTrait>(
    State(state): State<S>,
    principal: Principal,
    Path(classroom_id): Path<Uuid>,
    mut form: DocumentForm,
) -> Result<(StatusCode, Json<lectures::Model>)> {
    let name = Fields::from_form(&mut form)?
        .name
        .ok_or(error::MULTIPART_INVALID)?;
    let document = form.required_document()?;

    let txn = state.db().begin().await?;

    authorize_classroom(&txn, &principal, Action::LectureStore, classroom_id).await?;

    let key = state
        .storage()
        .put(COLLECTION, &document.file_name, document.data)
        .await?;

    let lecture = lectures::Model {
        id: Uuid::new_v4(),
        classroom_id,
        name,
        document: Some(key.clone()),
        created_at: Utc::now(),
    };

    let model = lectures::ActiveModel {
        id: Set(lecture.id),
        classroom_id: Set(lecture.classroom_id),
        name: Set(lecture.name.clone()),
        document: Set(lecture.document.clone()),
        created_at: Set(lecture.created_at),
    };

    let result = async {
        lectures::Entity::insert(model)
            .exec_without_returning(&txn)
            .await?;
        txn.commit().await
    }
    .await;

    if let Err(err) = result {
        forget_documents(state.storage(), [key]).await;
        return Err(err.into());
    }

    Ok((StatusCode::CREATED, Json(lecture)))
}

async fn update<S: StateTrait>(
    State(state): State<S>,
    principal: Principal,
    Path((classroom_id, id)): Path<(Uuid, Uuid)>,
    mut form: DocumentForm,
) -> Result<Json<lectures::Model>> {
    let fields = Fields::from_form(&mut form)?;

    let txn = state.db().begin().await?;

    authorize_classroom(&txn, &principal, Action::LectureUpdate, classroom_id).await?;
    let lecture = find(&txn, classroom_id, id).await?;

    if fields.name.is_none() && form.document.is_none() {
        return Ok(Json(lecture));
    }

    let key = match form.document.take() {
        Some(document) => Some(
            state
                .storage()
                .put(COLLECTION, &document.file_name, document.data)
                .await?,
        ),
        None => None,
    };

    let model = lectures::ActiveModel {
        id: Unchanged(lecture.id),
        name: set_option(fields.name),
        document: set_option(key.clone().map(Some)),
        ..Default::default()
    };

    let result = async {
        let updated = model.update(&txn).await?;
        txn.commit().await?;
        Ok::<_, sea_orm::DbErr>(updated)
    }
    .await;

    let updated = match result {
        Ok(updated) => updated,
        Err(err) => {
            forget_documents(state.storage(), key).await;
            return Err(err.into());
        }
    };

    if key.is_some() {
        forget_documents(state.storage(), lecture.document).await;
    }

    Ok(Json(updated))
}

async fn destroy<S: StateTrait>(
    State(state): State<S>,
    principal: Principal,
    Path((classroom_id, id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode> {
    let txn = state.db().begin().await?;

    authorize_classroom(&txn, &principal, Action::LectureDestroy, classroom_id).await?;
    let lecture = find(&txn, classroom_id, id).await?;

    lectures::Entity::delete_by_id(lecture.id).exec(&txn).await?;

    txn.commit().await?;

    forget_documents(state.storage(), lecture.document).await;

    Ok(StatusCode::NO_CONTENT)
}
