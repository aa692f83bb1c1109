//! Axum router: maps all URL paths to handlers.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{
    proteins::{
        create_protein, destroy_protein, list_proteins, partial_update_protein, retrieve_protein,
        update_protein,
    },
    root::api_root,
};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router. Every route is mounted under
/// `api.base_path`.
pub fn build_router(state: AppState) -> Router {
    let base = state.api.normalized_base_path();
    let shared: SharedState = Arc::new(state);

    Router::new()
        .route(&format!("{}/", base), get(api_root))
        .route(
            &format!("{}/proteins/", base),
            get(list_proteins).post(create_protein),
        )
        .route(
            &format!("{}/proteins/{{id}}/", base),
            get(retrieve_protein)
                .put(update_protein)
                .patch(partial_update_protein)
                .delete(destroy_protein),
        )
        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(CorsLayer::permissive()),
        )
        .with_state(shared)
}
