pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, patch};
use axum::Router;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(root: PathBuf) -> Router {
    let app_state = state::AppState::new(root);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(routes::health::health))
        // Videos
        .route("/api/videos/phases", get(routes::videos::list_phases))
        .route(
            "/api/videos",
            get(routes::videos::list_videos).post(routes::videos::create_video),
        )
        .route(
            "/api/videos/{name}",
            get(routes::videos::get_video)
                .put(routes::videos::replace_video)
                .delete(routes::videos::delete_video),
        )
        .route(
            "/api/videos/{name}/{aspect}",
            patch(routes::videos::update_aspect),
        )
        // Aspects
        .route("/api/editing/aspects", get(routes::aspects::list_aspects))
        .route(
            "/api/editing/aspects/{key}/fields",
            get(routes::aspects::get_aspect_fields),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Start the REST server.
pub async fn serve(root: PathBuf, port: u16, open_browser: bool) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_on(root, listener, open_browser).await
}

/// Start the REST server on a pre-bound listener.
///
/// Unlike `serve`, this accepts a `TcpListener` that was already bound so the
/// caller can read the actual port before starting (useful when `port = 0` and
/// the OS picks a free port).
pub async fn serve_on(
    root: PathBuf,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let app = build_router(root);

    tracing::info!("vidflow API listening on http://localhost:{actual_port}");

    if open_browser {
        let url = format!("http://localhost:{actual_port}/api/videos/phases");
        let _ = open::that(&url);
    }

    axum::serve(listener, app).await?;
    Ok(())
}
