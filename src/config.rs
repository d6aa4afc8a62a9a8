use anyhow::Context;
use std::{env, path::PathBuf};

const DEFAULT_STORAGE_PATH: &str = "./storage";
const DEFAULT_PORT: u16 = 3002;
const DEFAULT_MAX_UPLOAD_SIZE: usize = 16 * 1024 * 1024;

/// Runtime configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub storage_path: PathBuf,
    pub port: u16,
    /// Upper bound for request bodies, in bytes.
    pub max_upload_size: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET is not set")?;

        let storage_path = env::var("STORAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORAGE_PATH));

        let port = match env::var("PORT") {
            Ok(port) => port.parse().context("PORT is not a valid port number")?,
            Err(_) => DEFAULT_PORT,
        };

        let max_upload_size = match env::var("MAX_UPLOAD_SIZE") {
            Ok(size) => size
                .parse()
                .context("MAX_UPLOAD_SIZE is not a valid byte count")?,
            Err(_) => DEFAULT_MAX_UPLOAD_SIZE,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            storage_path,
            port,
            max_upload_size,
        })
    }
}
