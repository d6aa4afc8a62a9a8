mod destroy;
mod index;
mod join;
mod leave;
mod members;
mod show;
mod store;
mod update;

use super::assignable;
use crate::{
    middlewares::PermissionsLayer,
    policy::{Action, Principal},
    StateTrait,
};
use axum::{
    handler::Handler,
    routing::{get, post},
    Router,
};
use entity::{assignments, classrooms, lectures, projects, quizzes, users::Role};
use sea_orm::{ConnectionTrait, DbErr, EntityTrait, QueryOrder, QuerySelect, Select};
use uuid::Uuid;

/// Routes for classroom management
///
/// # Everyone
/// GET    /classroom
/// GET    /classroom/list
/// GET    /classroom/:id
///
/// # Teachers
/// POST   /classroom
///
/// # Owner actions
/// PATCH  /classroom/:id
/// DELETE /classroom/:id
/// GET    /classroom/:id/users
///
/// # Student actions
/// POST   /classroom/join
/// POST   /classroom/leave
pub fn routes<S: StateTrait>(state: S) -> Router<S> {
    let layer = |action| PermissionsLayer::new(state.clone(), action);

    Router::new()
        .route(
            "/",
            get(index::index::<S>.layer(layer(Action::ClassroomIndex)))
                .post(store::store::<S>.layer(layer(Action::ClassroomStore))),
        )
        .route(
            "/list",
            get(index::list::<S>.layer(layer(Action::ClassroomList))),
        )
        .route(
            "/join",
            post(join::join::<S>.layer(layer(Action::ClassroomJoin))),
        )
        .route(
            "/leave",
            post(leave::leave::<S>.layer(layer(Action::ClassroomLeave))),
        )
        .route(
            "/:id",
            get(show::show::<S>.layer(layer(Action::ClassroomShow)))
                .patch(update::update::<S>.layer(layer(Action::ClassroomUpdate)))
                .delete(destroy::destroy::<S>.layer(layer(Action::ClassroomDestroy))),
        )
        .route(
            "/:id/users",
            get(members::members::<S>.layer(layer(Action::ClassroomMembers))),
        )
}

/// Classrooms the principal may see: owned ones for teachers, joined ones for
/// students, all of them for admins.
fn visible_to(principal: &Principal) -> Select<classrooms::Entity> {
    let select = match principal.role {
        Role::Admin => classrooms::Entity::find(),
        Role::Teacher => classrooms::Entity::find_owned_by(principal.id),
        Role::Student => classrooms::Entity::find_joined_by(principal.id),
    };

    select.order_by_asc(classrooms::Column::CreatedAt)
}

/// Every stored document that belongs to the classroom.
pub(crate) async fn documents<C: ConnectionTrait>(
    db: &C,
    classroom_id: Uuid,
) -> Result<Vec<String>, DbErr> {
    let lectures: Vec<Option<String>> = lectures::Entity::find_in_classroom(classroom_id)
        .select_only()
        .column(lectures::Column::Document)
        .into_tuple()
        .all(db)
        .await?;

    let mut documents: Vec<String> = lectures.into_iter().flatten().collect();

    documents.extend(
        assignable::documents_of_classroom::<assignments::Entity, _>(db, classroom_id).await?,
    );
    documents.extend(
        assignable::documents_of_classroom::<quizzes::Entity, _>(db, classroom_id).await?,
    );
    documents.extend(
        assignable::documents_of_classroom::<projects::Entity, _>(db, classroom_id).await?,
    );

    Ok(documents)
}
