#[macro_use]
extern crate tracing;

pub mod config;
pub mod error;
mod extractors;
mod handlers;
pub mod jwt;
mod middlewares;
pub mod policy;
pub mod report;
mod state;
pub mod storage;
mod utils;

use crate::{middlewares::middlewares, utils::shutdown_signal};
use error::Error;
use extractors::*;
pub use state::*;
use tokio::net::TcpListener;

pub async fn run<S: StateTrait>(listener: TcpListener, state: S) -> anyhow::Result<()> {
    info!("listening on port {}", listener.local_addr()?.port());

    let routes = handlers::routes::<S>(state.clone());
    let app = middlewares(state, routes);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
