use super::{assignable, classroom, forget_documents};
use crate::{
    error::{self, DatabaseError, Result},
    middlewares::PermissionsLayer,
    policy::Action,
    utils::set_option,
    Json, StateTrait, ValidatedJson,
};
use axum::{
    extract::{Path, State},
    handler::Handler,
    http::StatusCode,
    routing::get,
    Router,
};
use chrono::Utc;
use entity::{
    assignments, classrooms, projects, quizzes,
    users::{self, constraints::UC_USERS_EMAIL, Role},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Routes for user management, admins only
///
/// GET    /user
/// POST   /user
/// GET    /user/:id
/// PATCH  /user/:id
/// DELETE /user/:id
pub fn routes<S: StateTrait>(state: S) -> Router<S> {
    let layer = |action| PermissionsLayer::new(state.clone(), action);

    Router::new()
        .route(
            "/",
            get(index::<S>.layer(layer(Action::UserIndex)))
                .post(store::<S>.layer(layer(Action::UserStore))),
        )
        .route(
            "/:id",
            get(show::<S>.layer(layer(Action::UserShow)))
                .patch(update::<S>.layer(layer(Action::UserUpdate)))
                .delete(destroy::<S>.layer(layer(Action::UserDestroy))),
        )
}

#[derive(Deserialize, Validate)]
pub struct StoreRequest {
    #[validate(length(min = 1, max = 255))]
    name: String,
    #[validate(email, length(max = 255))]
    email: String,
    role: Role,
}

#[derive(Deserialize, Validate)]
pub struct UpdateRequest {
    #[validate(length(min = 1, max = 255))]
    name: Option<String>,
    #[validate(email, length(max = 255))]
    email: Option<String>,
    role: Option<Role>,
}

async fn index<S: StateTrait>(State(state): State<S>) -> Result<Json<Vec<users::Model>>> {
    let users = users::Entity::find()
        .order_by_asc(users::Column::CreatedAt)
        .all(state.db())
        .await?;

    Ok(Json(users))
}

async fn store<S: StateTrait>(
    State(state): State<S>,
    ValidatedJson(request): ValidatedJson<StoreRequest>,
) -> Result<(StatusCode, Json<users::Model>)> {
    let user = users::Model {
        id: Uuid::new_v4(),
        name: request.name,
        email: request.email,
        role: request.role,
        created_at: Utc::now(),
    };

    let model = users::ActiveModel {
        id: Set(user.id),
        name: Set(user.name.clone()),
        email: Set(user.email.clone()),
        role: Set(user.role),
        created_at: Set(user.created_at),
    };

    match users::Entity::insert(model)
        .exec_without_returning(state.db())
        .await
    {
        Ok(_) => {}
        Err(err) if err.unique_violation(UC_USERS_EMAIL) => return Err(error::DUPLICATE_EMAIL),
        Err(err) => return Err(err.into()),
    }

    info!(user_id = %user.id, role = ?user.role, "created user");

    Ok((StatusCode::CREATED, Json(user)))
}

async fn show<S: StateTrait>(
    State(state): State<S>,
    Path(id): Path<Uuid>,
) -> Result<Json<users::Model>> {
    let user = users::Entity::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or(error::USER_NOT_FOUND)?;

    Ok(Json(user))
}

async fn update<S: StateTrait>(
    State(state): State<S>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateRequest>,
) -> Result<Json<users::Model>> {
    let txn = state.db().begin().await?;

    let user = users::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(error::USER_NOT_FOUND)?;

    if request.name.is_none() && request.email.is_none() && request.role.is_none() {
        return Ok(Json(user));
    }

    let model = users::ActiveModel {
        id: Unchanged(user.id),
        name: set_option(request.name),
        email: set_option(request.email),
        role: set_option(request.role),
        ..Default::default()
    };

    let user = match model.update(&txn).await {
        Ok(user) => user,
        Err(err) if err.unique_violation(UC_USERS_EMAIL) => return Err(error::DUPLICATE_EMAIL),
        Err(err) => return Err(err.into()),
    };

    txn.commit().await?;

    Ok(Json(user))
}

async fn destroy<S: StateTrait>(
    State(state): State<S>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let txn = state.db().begin().await?;

    let owned: Vec<Uuid> = classrooms::Entity::find_owned_by(id)
        .select_only()
        .column(classrooms::Column::Id)
        .into_tuple()
        .all(&txn)
        .await?;

    let mut documents = Vec::new();
    for classroom_id in owned {
        documents.extend(classroom::documents(&txn, classroom_id).await?);
    }
    documents.extend(assignable::documents_of_user::<assignments::Entity, _>(&txn, id).await?);
    documents.extend(assignable::documents_of_user::<quizzes::Entity, _>(&txn, id).await?);
    documents.extend(assignable::documents_of_user::<projects::Entity, _>(&txn, id).await?);

    let res = users::Entity::delete_many()
        .filter(users::Column::Id.eq(id))
        .exec(&txn)
        .await?;

    if res.rows_affected == 0 {
        return Err(error::USER_NOT_FOUND);
    }

    txn.commit().await?;

    forget_documents(state.storage(), documents).await;

    info!(user_id = %id, "deleted user");

    Ok(StatusCode::NO_CONTENT)
}
