//! API root: links to every registered resource.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::SharedState;

/// GET / - Resource index
pub async fn api_root(State(state): State<SharedState>) -> Json<Value> {
    let base = state.api.normalized_base_path();
    Json(json!({ "proteins": format!("{}/proteins/", base) }))
}
