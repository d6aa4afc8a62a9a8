use anyhow::Context;
use chrono::{Duration, Utc};
use classroom_backend::jwt::Claims;
use dotenvy::dotenv;
use entity::users::{self, Role};
use jsonwebtoken::{EncodingKey, Header};
use sea_orm::{ColumnTrait, Database, EntityTrait, QueryFilter, Set};
use std::env::{self, args};
use uuid::Uuid;

fn parse_role(role: &str) -> anyhow::Result<Role> {
    match role {
        "admin" => Ok(Role::Admin),
        "teacher" => Ok(Role::Teacher),
        "student" => Ok(Role::Student),
        other => anyhow::bail!("unknown role {other:?}, expected admin, teacher or student"),
    }
}

/// `create_user <email> [role] [name]`
///
/// Creates a user with the given email unless it already exists, then prints a
/// token for it, valid for a day. The role defaults to admin.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let email = args().nth(1).context("no email given")?;
    let role = match args().nth(2) {
        Some(role) => parse_role(&role)?,
        None => Role::Admin,
    };
    let name = args().nth(3).unwrap_or_else(|| email.clone());

    let database_url = env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
    let secret = env::var("JWT_SECRET").context("JWT_SECRET is not set")?;

    let db = Database::connect(database_url).await?;

    let existing = users::Entity::find()
        .filter(users::Column::Email.eq(email.as_str()))
        .one(&db)
        .await?;

    let id = match existing {
        Some(user) if user.role == role => user.id,
        Some(user) => anyhow::bail!("{} is registered as {:?}", user.email, user.role),
        None => {
            let id = Uuid::new_v4();

            users::Entity::insert(users::ActiveModel {
                id: Set(id),
                name: Set(name),
                email: Set(email),
                role: Set(role),
                created_at: Set(Utc::now()),
            })
            .exec_without_returning(&db)
            .await?;

            id
        }
    };

    let claims = Claims {
        sub: id,
        exp: (Utc::now() + Duration::days(1)).timestamp(),
    };

    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    println!("{token}");

    Ok(())
}
