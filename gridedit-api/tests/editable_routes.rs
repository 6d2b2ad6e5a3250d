//! Router-level tests for the editable grid endpoints.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use gridedit_api::{create_api_router, ApiConfig, AppState};
use gridedit_columns::EditableGrid;
use gridedit_core::{FieldValue, GridConfig, RecordId};
use gridedit_test_utils::{
    article_repository, InMemoryRepository, RecordRepository, ARTICLE_GRID_TOML,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

fn article_app(repository: Arc<InMemoryRepository>) -> Result<Router, String> {
    let config = GridConfig::from_toml_str(ARTICLE_GRID_TOML).map_err(|e| e.to_string())?;
    let grid = EditableGrid::from_config(&config, repository).map_err(|e| e.to_string())?;
    Ok(create_api_router(AppState::new(grid), &ApiConfig::default()))
}

async fn send(app: Router, request: Request<Body>) -> Result<Response, String> {
    app.oneshot(request)
        .await
        .map_err(|e| format!("Request failed: {:?}", e))
}

async fn get(app: Router, uri: &str) -> Result<Response, String> {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .map_err(|e| e.to_string())?;
    send(app, request).await
}

async fn post_form(app: Router, uri: &str, body: &str) -> Result<Response, String> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, FORM_CONTENT_TYPE)
        .body(Body::from(body.to_string()))
        .map_err(|e| e.to_string())?;
    send(app, request).await
}

async fn body_text(response: Response) -> Result<String, String> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .map_err(|e| e.to_string())?;
    String::from_utf8(bytes.to_vec()).map_err(|e| e.to_string())
}

async fn body_json(response: Response) -> Result<JsonValue, String> {
    let text = body_text(response).await?;
    serde_json::from_str(&text).map_err(|e| e.to_string())
}

// ============================================================================
// ROW FORM
// ============================================================================

#[tokio::test]
async fn test_row_form_rejects_non_digit_id() -> Result<(), String> {
    let response = get(article_app(article_repository())?, "/articles/editable/form/42a").await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await?;
    assert_eq!(body["code"], "INVALID_INPUT");
    Ok(())
}

#[tokio::test]
async fn test_row_form_unknown_record_is_not_found() -> Result<(), String> {
    let response = get(article_app(article_repository())?, "/articles/editable/form/9999999").await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await?;
    assert_eq!(body["code"], "RECORD_NOT_FOUND");
    assert_eq!(body["message"], "Record 9999999 not found");
    Ok(())
}

#[tokio::test]
async fn test_row_form_has_every_configured_column() -> Result<(), String> {
    let response = get(article_app(article_repository())?, "/articles/editable/form/3").await?;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await?;
    assert!(html.contains("action=\"/articles/editable/form/3\""));
    for column in ["Title", "Body", "Published", "Rating", "Status"] {
        let name = format!("name=\"Articles[EditableColumns][3][{}]\"", column);
        assert!(html.contains(&name), "missing input {}", name);
    }
    assert!(html.contains(">Headline</label>"));
    Ok(())
}

#[tokio::test]
async fn test_row_form_accepts_post() -> Result<(), String> {
    let response = post_form(article_app(article_repository())?, "/articles/editable/form/5", "").await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

// ============================================================================
// GRID
// ============================================================================

#[tokio::test]
async fn test_grid_renders_as_html() -> Result<(), String> {
    let response = get(article_app(article_repository())?, "/articles").await?;
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let html = body_text(response).await?;
    assert!(html.contains("<th class=\"col-Title\">Headline</th>"));
    assert!(html.contains("<tr data-id=\"7\">"));
    assert!(html.contains("name=\"Articles[EditableColumns][7][Rating]\""));
    Ok(())
}

#[tokio::test]
async fn test_save_processes_only_valid_entries() -> Result<(), String> {
    let repository = article_repository();
    let app = article_app(repository.clone())?;

    let body = "Articles%5BEditableColumns%5D%5B5%5D%5BTitle%5D=Hi\
                &Articles%5BEditableColumns%5D%5Babc%5D%5BTitle%5D=X\
                &Articles%5BEditableColumns%5D%5B7%5D=not-a-map";
    let response = post_form(app, "/articles", body).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let report = body_json(response).await?;
    assert_eq!(
        report,
        json!({
            "saved": [5],
            "skipped": [
                {"key": "abc", "reason": "invalid_id"},
                {"key": "7", "reason": "not_a_mapping"}
            ]
        })
    );

    assert_eq!(repository.write_log().map_err(|e| e.to_string())?, vec![RecordId(5)]);
    let saved = repository
        .get(RecordId(5))
        .map_err(|e| e.to_string())?
        .ok_or("record 5 missing")?;
    assert_eq!(saved.get("Title"), &FieldValue::text("Hi"));
    // Clear-missing: configured columns absent from the post are blanked.
    assert_eq!(saved.get("Body"), &FieldValue::Null);
    Ok(())
}

#[tokio::test]
async fn test_save_skips_locked_record() -> Result<(), String> {
    let repository = article_repository();
    repository.lock(RecordId(5)).map_err(|e| e.to_string())?;
    let app = article_app(repository.clone())?;

    let response = post_form(
        app,
        "/articles",
        "Articles%5BEditableColumns%5D%5B5%5D%5BTitle%5D=Hi",
    )
    .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let report = body_json(response).await?;
    assert_eq!(report["saved"], json!([]));
    assert_eq!(report["skipped"][0]["reason"], "not_editable");
    assert!(repository.write_log().map_err(|e| e.to_string())?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_save_ignores_other_grids() -> Result<(), String> {
    let repository = article_repository();
    let app = article_app(repository.clone())?;

    let response = post_form(
        app,
        "/articles",
        "Comments%5BEditableColumns%5D%5B5%5D%5BTitle%5D=Hi&csrf=token",
    )
    .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await?, json!({"saved": [], "skipped": []}));
    assert!(repository.write_log().map_err(|e| e.to_string())?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_save_survives_deeply_nested_sibling_key() -> Result<(), String> {
    let repository = article_repository();
    let app = article_app(repository.clone())?;

    let body = format!(
        "Articles%5BEditableColumns%5D%5B5%5D%5BTitle%5D=Hi&junk{}=x",
        "[x]".repeat(100_000)
    );
    let response = post_form(app, "/articles", &body).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let report = body_json(response).await?;
    assert_eq!(report, json!({"saved": [5], "skipped": []}));
    assert_eq!(repository.write_log().map_err(|e| e.to_string())?, vec![RecordId(5)]);
    Ok(())
}

#[tokio::test]
async fn test_save_rejects_non_form_body() -> Result<(), String> {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/articles")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"Articles\":{}}"))
        .map_err(|e| e.to_string())?;
    let response = send(article_app(article_repository())?, request).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_grid_with_empty_link_is_served_from_root() -> Result<(), String> {
    let mut config = GridConfig::from_toml_str(ARTICLE_GRID_TOML).map_err(|e| e.to_string())?;
    config.link = String::new();
    let grid = EditableGrid::from_config(&config, article_repository()).map_err(|e| e.to_string())?;
    let app = create_api_router(AppState::new(grid), &ApiConfig::default());

    let response = get(app.clone(), "/").await?;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await?;
    assert!(html.contains("<form action=\"/\""));

    let response = get(app, "/editable/form/3").await?;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await?;
    assert!(html.contains("action=\"/editable/form/3\""));
    Ok(())
}

// ============================================================================
// HEALTH AND DOCS
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() -> Result<(), String> {
    let app = article_app(article_repository())?;

    let response = get(app.clone(), "/health/ping").await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await?, "pong");

    let response = get(app.clone(), "/health/live").await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app, "/health/ready").await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["details"]["grid"], "Articles");
    assert_eq!(body["details"]["repository"]["records"], 3);
    Ok(())
}

#[tokio::test]
async fn test_openapi_document_is_served() -> Result<(), String> {
    let response = get(article_app(article_repository())?, "/openapi.json").await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await?;
    assert!(body["paths"]["/grid/editable/form/{id}"].is_object());
    Ok(())
}

#[tokio::test]
async fn test_unknown_route_is_json_not_found() -> Result<(), String> {
    let response = get(article_app(article_repository())?, "/nowhere").await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await?;
    assert_eq!(body["code"], "ROUTE_NOT_FOUND");
    Ok(())
}
