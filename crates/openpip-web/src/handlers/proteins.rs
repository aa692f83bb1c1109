//! Protein resource: list, create, retrieve, update, delete.

use axum::{
    extract::{rejection::JsonRejection, OriginalUri, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use openpip_common::ApiError;
use openpip_db::{Protein, ProteinQuery};

use crate::pagination::{self, Page};
use crate::serializer::{self, Mode};
use crate::state::SharedState;

/// Query parameters accepted by the list endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl ListParams {
    fn to_query(&self) -> ProteinQuery {
        let mut query = ProteinQuery::new();
        if let Some(search) = &self.search {
            query = query.search(search);
        }
        if let Some(ordering) = &self.ordering {
            query = query.ordering(ordering);
        }
        query
    }
}

/// GET /proteins/ - List proteins, optionally searched, ordered and paginated
pub async fn list_proteins(
    State(state): State<SharedState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<ListParams>,
) -> Result<Response, ApiError> {
    let query = params.to_query();

    let Some(size) = pagination::page_size(&state.api, params.page_size.as_deref()) else {
        let proteins = state.proteins.list(&query).await?;
        return Ok(Json(proteins).into_response());
    };

    let count = state.proteins.count(&query).await?;
    let window = pagination::resolve_page(params.page.as_deref(), size, count)?;
    let results = state
        .proteins
        .list(&query.page(window.offset(), window.size))
        .await?;

    let link = |page| pagination::page_link(uri.path(), uri.query(), page);
    let page = Page {
        count,
        next: window.has_next().then(|| link(window.number + 1)),
        previous: window.has_previous().then(|| link(window.number - 1)),
        results,
    };
    Ok(Json(page).into_response())
}

/// POST /proteins/ - Create a protein
pub async fn create_protein(
    State(state): State<SharedState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Protein>), ApiError> {
    let body = json_body(payload)?;
    let new = serializer::parse_new_protein(&body)?;
    let protein = state.proteins.insert(&new).await?;
    Ok((StatusCode::CREATED, Json(protein)))
}

/// GET /proteins/{id}/ - Single protein
pub async fn retrieve_protein(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Protein>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.proteins.get(id).await?))
}

/// PUT /proteins/{id}/ - Replace a protein's fields
pub async fn update_protein(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Protein>, ApiError> {
    apply_update(&state, &id, payload, Mode::Full).await
}

/// PATCH /proteins/{id}/ - Update only the fields provided
pub async fn partial_update_protein(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Protein>, ApiError> {
    apply_update(&state, &id, payload, Mode::Partial).await
}

/// DELETE /proteins/{id}/ - Delete a protein
pub async fn destroy_protein(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.proteins.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn apply_update(
    state: &SharedState,
    id: &str,
    payload: Result<Json<Value>, JsonRejection>,
    mode: Mode,
) -> Result<Json<Protein>, ApiError> {
    let id = parse_id(id)?;
    // Unknown ids are reported before payload problems.
    state.proteins.get(id).await?;

    let body = json_body(payload)?;
    let changes = serializer::parse_changes(&body, mode)?;
    Ok(Json(state.proteins.update(id, &changes).await?))
}

/// Path ids that are not integers cannot name a row.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::NotFound(format!("protein {}", raw)))
}

fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected request body");
            Err(ApiError::BadRequest(format!("JSON parse error - {}", rejection.body_text())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_numeric_ids_are_not_found() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(matches!(parse_id("abc"), Err(ApiError::NotFound(_))));
        assert!(matches!(parse_id("1.5"), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn list_params_build_repository_query() {
        let params = ListParams {
            search: Some("tumor p53".into()),
            ordering: Some("-created_at".into()),
            ..Default::default()
        };
        let query = params.to_query();
        assert_eq!(query.search, vec!["tumor", "p53"]);
        assert_eq!(query.ordering, vec![openpip_db::SortKey::desc(openpip_db::SortField::CreatedAt)]);
        assert_eq!(query.limit, None);
    }
}
