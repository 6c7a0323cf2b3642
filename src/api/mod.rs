mod handlers;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::Database;
use crate::github::GitHubClient;
use crate::llm::NotesClient;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub github: Arc<GitHubClient>,
    pub notes: Arc<NotesClient>,
}

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        // Pull requests
        .route("/prs", get(handlers::list_merged_prs))
        .route("/prs/{number}", get(handlers::get_pr))
        .route("/prs/{number}/notes", get(handlers::stream_notes))
        // History
        .route("/history", get(handlers::list_history))
        .route("/history", post(handlers::create_history))
        .route("/history/{id}", delete(handlers::delete_history))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
