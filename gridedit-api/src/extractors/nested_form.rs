//! Urlencoded form bodies decoded into a nested tree.
//!
//! Browsers post grid inputs as flat pairs such as
//! `Articles[EditableColumns][5][Title]=Hi`. `NestedForm` folds those
//! pairs into `{"Articles": {"EditableColumns": {"5": {"Title": "Hi"}}}}`
//! so handlers can pick out the grid's submitted value.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Form,
};
use gridedit_core::parse_form_tree;
use serde_json::Value as JsonValue;

use crate::error::ApiError;

/// Extractor for bracket-notation form bodies.
///
/// # Example
///
/// ```rust,ignore
/// async fn save(NestedForm(tree): NestedForm) -> ApiResult<impl IntoResponse> {
///     let submitted = tree.get("Articles").cloned().unwrap_or_default();
///     // ...
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NestedForm(pub JsonValue);

#[async_trait]
impl<S> FromRequest<S> for NestedForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(pairs): Form<Vec<(String, String)>> = Form::from_request(req, state)
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected form body");
                ApiError::invalid_input(format!("Invalid form body: {}", e.body_text()))
            })?;

        Ok(NestedForm(parse_form_tree(pairs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use axum::body::Body;
    use axum::http::{header, Method, Request as HttpRequest};
    use serde_json::json;

    fn form_request(body: &'static str, content_type: &str) -> Result<Request, String> {
        HttpRequest::builder()
            .method(Method::POST)
            .uri("/articles")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .map_err(|e| e.to_string())
    }

    #[tokio::test]
    async fn test_bracket_pairs_become_nested_tree() -> Result<(), String> {
        let request = form_request(
            "Articles%5BEditableColumns%5D%5B5%5D%5BTitle%5D=Hi\
             &Articles%5BEditableColumns%5D%5B5%5D%5BBody%5D=Text+here\
             &csrf=abc",
            "application/x-www-form-urlencoded",
        )?;

        let NestedForm(tree) = NestedForm::from_request(request, &())
            .await
            .map_err(|e| e.to_string())?;

        assert_eq!(
            tree,
            json!({
                "Articles": {"EditableColumns": {"5": {"Title": "Hi", "Body": "Text here"}}},
                "csrf": "abc"
            })
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_wrong_content_type_is_invalid_input() -> Result<(), String> {
        let request = form_request("{\"a\":1}", "application/json")?;
        let err = NestedForm::from_request(request, &())
            .await
            .expect_err("json is not a form body");
        assert_eq!(err.code, ErrorCode::InvalidInput);
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_body_is_empty_tree() -> Result<(), String> {
        let request = form_request("", "application/x-www-form-urlencoded")?;
        let NestedForm(tree) = NestedForm::from_request(request, &())
            .await
            .map_err(|e| e.to_string())?;
        assert_eq!(tree, json!({}));
        Ok(())
    }
}
