use crate::db::DbPool;
use crate::handlers;
use axum::routing::{delete, get};
use axum::Router;
use std::path::Path;
use tower::ServiceBuilder;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Create the Axum router with all routes. Static files are resolved
/// against `asset_root`, not the process working directory.
pub fn create_router(pool: DbPool, asset_root: &Path) -> Router {
    let api = Router::new()
        .route("/users", get(handlers::list_users))
        .route(
            "/users/:user_id/reservations",
            get(handlers::list_user_reservations).post(handlers::create_reservation),
        )
        .route("/restaurants", get(handlers::list_restaurants))
        .route("/reservations/:id", delete(handlers::delete_reservation))
        .with_state(pool);

    Router::new()
        .route_service("/", ServeFile::new(asset_root.join("index.html")))
        .nest_service("/dist", ServeDir::new(asset_root.join("dist")))
        .nest("/api", api)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
