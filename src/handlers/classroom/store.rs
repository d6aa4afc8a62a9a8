use crate::{
    error::{self, DatabaseError, Result},
    policy::Principal,
    utils::generate_join_code,
    Json, StateTrait, ValidatedJson,
};
use axum::{extract::State, http::StatusCode};
use chrono::Utc;
use entity::classrooms::{self, constraints::UC_CLASSROOMS_CODE};
use sea_orm::{EntityTrait, Set, TransactionTrait};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

const JOIN_CODE_ATTEMPTS: usize = 16;

#[derive(Deserialize, Validate)]
pub struct Request {
    #[validate(length(min = 1, max = 255))]
    name: String,
    description: Option<String>,
}

pub async fn store<S: StateTrait>(
    State(state): State<S>,
    principal: Principal,
    ValidatedJson(request): ValidatedJson<Request>,
) -> Result<(StatusCode, Json<classrooms::Model>)> {
    let txn = state.db().begin().await?;

    for _ in 0..JOIN_CODE_ATTEMPTS {
        let classroom = classrooms::Model {
            id: Uuid::new_v4(),
            user_id: principal.id,
            code: generate_join_code(&mut state.rng()),
            name: request.name.clone(),
            description: request.description.clone(),
            created_at: Utc::now(),
        };

        let model = classrooms::ActiveModel {
            id: Set(classroom.id),
            user_id: Set(classroom.user_id),
            code: Set(classroom.code.clone()),
            name: Set(classroom.name.clone()),
            description: Set(classroom.description.clone()),
            created_at: Set(classroom.created_at),
        };

        // a failed statement poisons a postgres transaction, so every attempt gets a savepoint
        let attempt = txn.begin().await?;

        match classrooms::Entity::insert(model)
            .exec_without_returning(&attempt)
            .await
        {
            Ok(_) => {
                attempt.commit().await?;
                txn.commit().await?;

                info!(classroom_id = %classroom.id, "created classroom");

                return Ok((StatusCode::CREATED, Json(classroom)));
            }
            Err(err) if err.unique_violation(UC_CLASSROOMS_CODE) => {
                attempt.rollback().await?;
                debug!("join code collision, retrying");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Err(error::FAILED_TO_GENERATE_JOIN_CODE)
}
