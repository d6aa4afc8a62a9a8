use crate::{
    config::Config,
    jwt::{Jwt, JwtTrait},
    storage::{DocumentStore, FilesystemStore},
};
use rand::{
    rngs::{adapter::ReseedingRng, OsRng},
    Rng, SeedableRng,
};
use rand_chacha::ChaCha20Core;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DbConn, TransactionTrait};
use std::sync::Arc;
use tracing::log::LevelFilter;

pub trait StateTrait: Send + Sync + Clone + 'static {
    type Db: ConnectionTrait + TransactionTrait + Send + Sync;
    type Jwt: JwtTrait;
    type Storage: DocumentStore;
    type Rand: Rng;

    fn db(&self) -> &Self::Db;
    fn jwt(&self) -> &Self::Jwt;
    fn storage(&self) -> &Self::Storage;
    fn rng(&self) -> Self::Rand;
    fn max_upload_size(&self) -> usize;
}

pub struct State {
    database: DbConn,
    jwt: Jwt,
    storage: FilesystemStore,
    max_upload_size: usize,
}

impl State {
    pub async fn new(config: &Config) -> anyhow::Result<Arc<Self>> {
        Self::with_database(Self::connect_database(&config.database_url).await?, config).await
    }

    pub async fn with_database(conn: DbConn, config: &Config) -> anyhow::Result<Arc<Self>> {
        let storage = FilesystemStore::new(config.storage_path.clone()).await?;

        Ok(Arc::new(Self {
            database: conn,
            jwt: Jwt::new(&config.jwt_secret),
            storage,
            max_upload_size: config.max_upload_size,
        }))
    }

    async fn connect_database(url: &str) -> anyhow::Result<DbConn> {
        info!("Trying to connect to database");

        let mut opts = ConnectOptions::new(url);
        opts.sqlx_logging_level(LevelFilter::Debug);

        let db = Database::connect(opts).await?;

        info!("Connected to database");

        Ok(db)
    }
}

thread_local! {
    static CHACHA_THREAD_RNG: ReseedingRng<ChaCha20Core, OsRng> = {
        let rng = ChaCha20Core::from_entropy();
        ReseedingRng::new(rng, 1024*64, OsRng)
    }
}

impl StateTrait for Arc<State> {
    type Db = DbConn;
    type Jwt = Jwt;
    type Storage = FilesystemStore;
    type Rand = ReseedingRng<ChaCha20Core, OsRng>;

    fn db(&self) -> &Self::Db {
        &self.database
    }

    fn jwt(&self) -> &Self::Jwt {
        &self.jwt
    }

    fn storage(&self) -> &Self::Storage {
        &self.storage
    }

    fn rng(&self) -> Self::Rand {
        CHACHA_THREAD_RNG.with(|x| x.clone())
    }

    fn max_upload_size(&self) -> usize {
        self.max_upload_size
    }
}
