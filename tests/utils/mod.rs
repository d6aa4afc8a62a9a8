pub mod macros;
pub mod prelude;
mod request;
mod response;
mod user;

pub use user::*;

use chrono::Utc;
use classroom_backend::{config::Config, State};
use migration::MigratorTrait;
use request::RequestBuilder;
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use sea_orm::{ConnectOptions, Database, DbConn, EntityTrait, Set};
use serde_json::{json, Value};
use std::{
    net::{Ipv4Addr, SocketAddr},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tracing::log::LevelFilter;
use uuid::Uuid;

pub const JWT_SECRET: &str = "test-secret";

#[derive(Debug)]
struct AppInner {
    addr: SocketAddr,
    db: DbConn,
    client: Client,
    _storage: TempDir,
}

#[derive(Clone, Debug)]
pub struct App {
    inner: Arc<AppInner>,
}

impl App {
    pub async fn new() -> Self {
        let storage = TempDir::new().expect("failed to create temp dir");

        let database_url = format!(
            "sqlite://{}?mode=rwc",
            storage.path().join("test.db").display()
        );

        let db = connect(&database_url).await;

        migration::Migrator::up(&db, None)
            .await
            .expect("failed to apply migrations");

        let config = Config {
            database_url,
            jwt_secret: JWT_SECRET.to_owned(),
            storage_path: storage.path().join("documents"),
            port: 0,
            max_upload_size: 1024 * 1024,
        };

        let listener = TcpListener::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, 0)))
            .await
            .expect("failed to bind tcp listener");
        let addr = listener.local_addr().unwrap();

        // the server gets its own pool on the same file, tests seed through `db`
        let state = State::with_database(connect(&config.database_url).await, &config)
            .await
            .expect("failed to create state");

        tokio::spawn(async move {
            classroom_backend::run(listener, state).await.unwrap();
        });

        App {
            inner: Arc::new(AppInner {
                addr,
                db,
                client: Client::new(),
                _storage: storage,
            }),
        }
    }

    pub fn db(&self) -> &DbConn {
        &self.inner.db
    }

    fn url(&self, url: &str) -> String {
        format!("http://{}{}", self.inner.addr, url)
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        RequestBuilder::new(self.inner.client.get(self.url(url)))
    }

    pub fn post(&self, url: &str) -> RequestBuilder {
        RequestBuilder::new(self.inner.client.post(self.url(url)))
    }

    #[allow(unused)]
    pub fn patch(&self, url: &str) -> RequestBuilder {
        RequestBuilder::new(self.inner.client.patch(self.url(url)))
    }

    #[allow(unused)]
    pub fn delete(&self, url: &str) -> RequestBuilder {
        RequestBuilder::new(self.inner.client.delete(self.url(url)))
    }

    /// Inserts a user row directly, bypassing the admin only endpoint.
    pub async fn create_user(&self, role: Role) -> User {
        static USER_COUNT: AtomicU64 = AtomicU64::new(0);

        let number = USER_COUNT.fetch_add(1, Ordering::Relaxed);
        let id = Uuid::new_v4();

        let user = entity::users::ActiveModel {
            id: Set(id),
            name: Set(format!("Test User {number}")),
            email: Set(format!("test-user-{number}@test.test")),
            role: Set(role),
            created_at: Set(Utc::now()),
        };

        entity::users::Entity::insert(user)
            .exec_without_returning(self.db())
            .await
            .expect("failed to insert user");

        User::new(id, role)
    }

    #[allow(unused)]
    pub async fn create_classroom(&self, owner: &User) -> Classroom {
        let res = self
            .post("/v1/classroom")
            .user(owner)
            .json(&json!({
                "name": "Test Classroom",
            }))
            .send()
            .await;

        assert_eq!(res.status(), http::StatusCode::CREATED);

        let body = res.json::<Value>().await;

        Classroom {
            id: body["id"].as_str().expect("no id").parse().expect("not uuid"),
            code: body["code"].as_str().expect("no code").to_owned(),
        }
    }

    #[allow(unused)]
    pub async fn join(&self, user: &User, classroom: &Classroom) {
        let res = self
            .post("/v1/classroom/join")
            .user(user)
            .json(&json!({
                "code": classroom.code,
            }))
            .send()
            .await;

        assert_eq!(res.status(), http::StatusCode::OK);
    }

    /// Creates an assignment, quiz or project and returns its id.
    #[allow(unused)]
    pub async fn create_assignable(
        &self,
        owner: &User,
        classroom: &Classroom,
        kind: &str,
        marks: i32,
    ) -> Uuid {
        let form = Form::new()
            .text("name", format!("Test {kind}"))
            .text("marks", marks.to_string())
            .part("document", document("task.pdf"));

        let res = self
            .post(&format!("/v1/classroom/{}/{kind}", classroom.id))
            .user(owner)
            .multipart(form)
            .send()
            .await;

        assert_eq!(res.status(), http::StatusCode::CREATED);

        let body = res.json::<Value>().await;
        body["id"].as_str().expect("no id").parse().expect("not uuid")
    }

    #[allow(unused)]
    pub async fn submit(&self, user: &User, kind: &str, id: Uuid) {
        let form = Form::new().part("document", document("answer.pdf"));

        let res = self
            .post(&format!("/v1/{kind}/{id}/submit"))
            .user(user)
            .multipart(form)
            .send()
            .await;

        assert_eq!(res.status(), http::StatusCode::NO_CONTENT);
    }

    /// Returns the id of the submission record `user` has for the assignable.
    #[allow(unused)]
    pub async fn submission_of(&self, owner: &User, kind: &str, id: Uuid, user: &User) -> Uuid {
        let res = self
            .get(&format!("/v1/{kind}/{id}/submissions"))
            .user(owner)
            .send()
            .await;

        assert_eq!(res.status(), http::StatusCode::OK);

        let body = res.json::<Value>().await;
        let user_id = user.id.to_string();

        body.as_array()
            .expect("not an array")
            .iter()
            .find(|submission| submission["user_id"] == user_id.as_str())
            .and_then(|submission| submission["id"].as_str())
            .expect("no submission")
            .parse()
            .expect("not uuid")
    }

    #[allow(unused)]
    pub async fn mark(&self, owner: &User, kind: &str, id: Uuid, submission: Uuid, marks: i32) {
        let res = self
            .post(&format!("/v1/{kind}/{id}/mark"))
            .user(owner)
            .json(&json!({
                "id": submission,
                "marks": marks,
            }))
            .send()
            .await;

        assert_eq!(res.status(), http::StatusCode::NO_CONTENT);
    }
}

async fn connect(url: &str) -> DbConn {
    let mut opts = ConnectOptions::new(url.to_owned());
    opts.sqlx_logging_level(LevelFilter::Debug);

    Database::connect(opts)
        .await
        .expect("failed to connect to database")
}

#[derive(Debug, Clone)]
pub struct Classroom {
    pub id: Uuid,
    pub code: String,
}

#[allow(unused)]
pub fn document(file_name: &str) -> Part {
    Part::bytes(b"%PDF-1.4 test document".to_vec())
        .file_name(file_name.to_owned())
        .mime_str("application/pdf")
        .expect("invalid mime")
}
