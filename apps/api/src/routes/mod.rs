pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::editor::handlers as editor_handlers;
use crate::resolver::handlers as view_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Public views
        .route("/api/v1/portfolio", get(view_handlers::handle_home))
        .route(
            "/api/v1/portfolio/:username",
            get(view_handlers::handle_public_view),
        )
        // Authenticated dashboard
        .route("/api/v1/me/portfolio", get(view_handlers::handle_my_view))
        .route(
            "/api/v1/me/profile",
            put(editor_handlers::handle_save_profile),
        )
        .route(
            "/api/v1/me/config",
            put(editor_handlers::handle_save_config),
        )
        .route(
            "/api/v1/me/content",
            put(editor_handlers::handle_save_content),
        )
        .route(
            "/api/v1/me/content/:kind/:id",
            delete(editor_handlers::handle_delete_content),
        )
        .route("/api/v1/me/sync", post(editor_handlers::handle_sync))
        .route("/api/v1/me/polish", post(editor_handlers::handle_polish))
        .with_state(state)
}
