//! `api` crate — HTTP REST API layer.
//!
//! Exposes:
//!   GET    /workouts
//!   GET    /workouts/{id}
//!   POST   /workouts
//!   PUT    /workouts/{id}
//!   DELETE /workouts/{id}

pub mod handlers;

use axum::{
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub use handlers::AppState;

use db::DbPool;

/// Build the application router around a shared pool.
pub fn router(pool: DbPool) -> Router {
    let state = AppState { pool };

    Router::new()
        .route(
            "/workouts",
            get(handlers::workouts::list).post(handlers::workouts::create),
        )
        .route(
            "/workouts/{id}",
            get(handlers::workouts::get)
                .put(handlers::workouts::update)
                .delete(handlers::workouts::delete),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `bind` and serve requests until the process is stopped.
pub async fn serve(bind: &str, pool: DbPool) -> std::io::Result<()> {
    let app = router(pool);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await
}
