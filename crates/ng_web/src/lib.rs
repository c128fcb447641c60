use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

pub mod error;
pub mod handlers;
pub mod models;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/api/news/collect", post(handlers::collect_news))
        .route("/api/generate", post(handlers::generate))
        .route("/api/generate/async", post(handlers::start_generate_job))
        .route("/api/generate/status/:job_id", get(handlers::job_status))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub async fn serve(state: AppState, addr: SocketAddr) -> ng_core::Result<()> {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);
    axum::serve(listener, app)
        .await
        .map_err(ng_core::Error::Io)?;
    Ok(())
}

pub mod prelude {
    pub use crate::{create_app, AppState};
    pub use ng_core::{Result, Error};
}
