//! End-to-end tests of the protein API against an in-memory database.
//!
//! Run with: cargo test -p openpip-web --test api_proteins

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use openpip_db::load_sample_proteins;
use openpip_web::{config::ApiConfig, router::build_router, state::AppState};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;

async fn app_with(api: ApiConfig, seed: bool) -> Router {
    let state = AppState::in_memory(api).await.unwrap();
    if seed {
        load_sample_proteins(&state.proteins).await.unwrap();
    }
    build_router(state)
}

async fn app() -> Router {
    app_with(ApiConfig::default(), false).await
}

async fn seeded_app() -> Router {
    app_with(ApiConfig::default(), true).await
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn gene_names(list: &Value) -> Vec<&str> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|p| p["gene_name"].as_str().unwrap())
        .collect()
}

fn tp53() -> Value {
    json!({
        "gene_name": "TP53",
        "protein_name": "Cellular tumor antigen p53",
        "uniprot_id": "P04637",
        "ensembl_id": "ENSG00000141510",
        "entrez_id": "7157",
        "description": "Acts as a tumor suppressor in many tumor types",
        "sequence": "MEEPQSDPSVEPPLSQETFSDLWKLLPEN",
    })
}

#[tokio::test]
async fn create_then_retrieve_returns_same_fields() {
    let app = app().await;
    let (status, created) = send(&app, Method::POST, "/proteins/", Some(tp53())).await;
    assert_eq!(status, StatusCode::CREATED);

    let id = created["id"].as_i64().unwrap();
    let (status, fetched) = send(&app, Method::GET, &format!("/proteins/{id}/"), None).await;
    assert_eq!(status, StatusCode::OK);

    for (key, value) in tp53().as_object().unwrap() {
        assert_eq!(&fetched[key], value, "field {key}");
    }
    assert_eq!(fetched["created_at"], created["created_at"]);
    assert_eq!(fetched.as_object().unwrap().len(), 10);
}

#[tokio::test]
async fn server_controlled_fields_are_ignored_on_create() {
    let app = app().await;
    let mut body = tp53();
    body["id"] = json!(777);
    body["created_at"] = json!("2000-01-01T00:00:00Z");

    let (status, created) = send(&app, Method::POST, "/proteins/", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(created["id"], json!(777));
    assert_ne!(created["created_at"], json!("2000-01-01T00:00:00Z"));
}

#[tokio::test]
async fn duplicate_uniprot_id_conflicts_and_keeps_one_row() {
    let app = app().await;
    let (status, _) = send(&app, Method::POST, "/proteins/", Some(tp53())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::POST, "/proteins/", Some(tp53())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body,
        json!({ "uniprot_id": ["protein with this uniprot id already exists."] })
    );

    let (_, list) = send(&app, Method::GET, "/proteins/?search=P04637", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn delete_then_retrieve_is_not_found() {
    let app = seeded_app().await;
    let (_, list) = send(&app, Method::GET, "/proteins/", None).await;
    let id = list[0]["id"].as_i64().unwrap();

    let (status, body) = send(&app, Method::DELETE, &format!("/proteins/{id}/"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, Method::GET, &format!("/proteins/{id}/"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "Not found." }));

    let (status, _) = send(&app, Method::DELETE, &format!("/proteins/{id}/"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_returns_only_matching_records() {
    let app = seeded_app().await;

    let (status, list) = send(&app, Method::GET, "/proteins/?search=EGFR", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(gene_names(&list), vec!["EGFR"]);

    let (_, list) = send(&app, Method::GET, "/proteins/?search=p53", None).await;
    assert_eq!(gene_names(&list), vec!["TP53"]);

    let (_, list) = send(&app, Method::GET, "/proteins/?search=tumor%20suppressor", None).await;
    assert_eq!(gene_names(&list), vec!["TP53"]);

    let (_, list) = send(&app, Method::GET, "/proteins/?search=nothing-like-this", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn ordering_by_gene_name() {
    let app = seeded_app().await;

    let (_, list) = send(&app, Method::GET, "/proteins/", None).await;
    assert_eq!(gene_names(&list), vec!["BRCA1", "EGFR", "KRAS", "MYC", "TP53"]);

    let (_, list) = send(&app, Method::GET, "/proteins/?ordering=-gene_name", None).await;
    assert_eq!(gene_names(&list), vec!["TP53", "MYC", "KRAS", "EGFR", "BRCA1"]);

    let (_, list) = send(&app, Method::GET, "/proteins/?ordering=bogus", None).await;
    assert_eq!(gene_names(&list), vec!["BRCA1", "EGFR", "KRAS", "MYC", "TP53"]);
}

#[tokio::test]
async fn patch_description_refreshes_updated_at_only() {
    let app = app().await;
    let (_, created) = send(&app, Method::POST, "/proteins/", Some(tp53())).await;
    let id = created["id"].as_i64().unwrap();

    tokio::time::sleep(Duration::from_millis(5)).await;
    let (status, updated) = send(
        &app,
        Method::PATCH,
        &format!("/proteins/{id}/"),
        Some(json!({ "description": "Guardian of the genome", "created_at": "2000-01-01T00:00:00Z" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["description"], "Guardian of the genome");
    assert_eq!(updated["gene_name"], "TP53");
    assert_eq!(updated["created_at"], created["created_at"]);
    assert_ne!(updated["updated_at"], created["updated_at"]);
}

#[tokio::test]
async fn put_requires_required_fields() {
    let app = app().await;
    let (_, created) = send(&app, Method::POST, "/proteins/", Some(tp53())).await;
    let uri = format!("/proteins/{}/", created["id"]);

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "description": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "gene_name": ["This field is required."],
            "uniprot_id": ["This field is required."],
        })
    );

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "gene_name": "TP53", "uniprot_id": "P04637", "protein_name": "p53" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["protein_name"], "p53");
    assert_eq!(body["entrez_id"], "7157");
}

#[tokio::test]
async fn update_into_existing_uniprot_id_conflicts() {
    let app = seeded_app().await;
    let (_, list) = send(&app, Method::GET, "/proteins/?search=EGFR", None).await;
    let uri = format!("/proteins/{}/", list[0]["id"]);

    let (status, _) = send(&app, Method::PATCH, &uri, Some(json!({ "uniprot_id": "P04637" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn validation_errors_list_offending_fields() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/proteins/",
        Some(json!({ "gene_name": "", "protein_name": null })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "gene_name": ["This field may not be blank."],
            "protein_name": ["This field may not be null."],
            "uniprot_id": ["This field is required."],
        })
    );
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/proteins/")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{\"gene_name\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["detail"].as_str().unwrap().starts_with("JSON parse error"));
}

#[tokio::test]
async fn unknown_and_non_numeric_ids_are_not_found() {
    let app = app().await;
    for uri in ["/proteins/999/", "/proteins/abc/"] {
        let (status, _) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
    }
    let (status, _) = send(&app, Method::PATCH, "/proteins/999/", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn pagination_envelope_and_links() {
    let api = ApiConfig { page_size: Some(2), ..ApiConfig::default() };
    let app = app_with(api, true).await;

    let (status, page) = send(&app, Method::GET, "/proteins/?ordering=-gene_name", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["count"], 5);
    assert_eq!(gene_names(&page["results"]), vec!["TP53", "MYC"]);
    assert_eq!(page["previous"], Value::Null);
    assert_eq!(page["next"], "/proteins/?ordering=-gene_name&page=2");

    let (_, page) = send(&app, Method::GET, "/proteins/?ordering=-gene_name&page=3", None).await;
    assert_eq!(gene_names(&page["results"]), vec!["BRCA1"]);
    assert_eq!(page["next"], Value::Null);
    assert_eq!(page["previous"], "/proteins/?ordering=-gene_name&page=2");

    let (_, page) = send(&app, Method::GET, "/proteins/?page=2&page_size=3", None).await;
    assert_eq!(gene_names(&page["results"]), vec!["MYC", "TP53"]);
    assert_eq!(page["previous"], "/proteins/?page_size=3");

    let (status, body) = send(&app, Method::GET, "/proteins/?page=9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "Invalid page." }));
}

#[tokio::test]
async fn routes_mount_under_base_path() {
    let api = ApiConfig { base_path: "/api/".into(), ..ApiConfig::default() };
    let app = app_with(api, true).await;

    let (status, root) = send(&app, Method::GET, "/api/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(root, json!({ "proteins": "/api/proteins/" }));

    let (status, list) = send(&app, Method::GET, "/api/proteins/?search=kras", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(gene_names(&list), vec!["KRAS"]);

    let (status, _) = send(&app, Method::GET, "/proteins/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
