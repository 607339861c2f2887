use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod service;

use service::PlayerDirectory;

/// Build the HTTP application around a player directory.
pub fn app(directory: PlayerDirectory) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Root and health
        .route("/", get(|| async { "Roster API - v1.0" }))
        .route("/health", get(routes::health::health_check))

        // Player endpoints
        .route(
            "/api/players",
            get(routes::players::get_players).post(routes::players::create_player),
        )
        .route(
            "/api/players/{id}",
            get(routes::players::get_player_by_id)
                .put(routes::players::update_player)
                .delete(routes::players::delete_player),
        )

        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(directory)
}
