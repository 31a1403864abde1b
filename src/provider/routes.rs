//! HTTP surface of the Content Provider

use axum::{
    extract::{Path, Query as QueryParams, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

use super::{CoreService, ErrorBody, PostController, ProviderError, Query};

/// Routes for `/api/posts` and `/api/posts/:id`
pub fn routes<S>(controller: Arc<PostController<S>>) -> Router
where
    S: CoreService + 'static,
{
    Router::new()
        .route("/api/posts", get(find::<S>))
        .route("/api/posts/:id", get(find_one::<S>))
        .with_state(controller)
}

async fn find<S: CoreService + 'static>(
    State(controller): State<Arc<PostController<S>>>,
    QueryParams(params): QueryParams<HashMap<String, String>>,
) -> Response {
    let query = match Query::from_params(&params) {
        Ok(query) => query,
        Err(e) => return error_response(&e),
    };
    match controller.find(query).await {
        Ok(envelope) => Json(envelope).into_response(),
        Err(e) => error_response(&e),
    }
}

async fn find_one<S: CoreService + 'static>(
    State(controller): State<Arc<PostController<S>>>,
    Path(id): Path<String>,
    QueryParams(params): QueryParams<HashMap<String, String>>,
) -> Response {
    let query = match Query::from_params(&params) {
        Ok(query) => query,
        Err(e) => return error_response(&e),
    };
    match controller.find_one(&id, query).await {
        Ok(Some(envelope)) => Json(envelope).into_response(),
        Ok(None) => error_body(StatusCode::NOT_FOUND, "NotFoundError", "Not Found"),
        Err(e) => error_response(&e),
    }
}

fn error_response(e: &ProviderError) -> Response {
    match e {
        ProviderError::InvalidQuery(message) => {
            error_body(StatusCode::BAD_REQUEST, "ValidationError", message)
        }
        ProviderError::Schema(message) => {
            tracing::error!("Provider schema error: {}", message);
            error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                "ApplicationError",
                "Internal Server Error",
            )
        }
    }
}

fn error_body(status: StatusCode, name: &str, message: &str) -> Response {
    let body = ErrorBody {
        status: status.as_u16(),
        name: name.to_string(),
        message: message.to_string(),
    };
    (status, Json(json!({ "data": null, "error": body }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::placeholder_posts;
    use crate::provider::{seed_from_posts, CollectionService};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        let service = CollectionService::new(seed_from_posts(&placeholder_posts())).unwrap();
        routes(Arc::new(PostController::new(service)))
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_list_posts_with_relations() {
        let (status, body) = get_json("/api/posts").await;
        assert_eq!(status, StatusCode::OK);
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 3);
        assert!(data[0]["featuredImage"]["url"].is_string());
        assert!(data[0]["seo"]["metaImage"]["url"].is_string());
        assert_eq!(body["meta"]["pagination"]["total"], 3);
    }

    #[tokio::test]
    async fn test_populate_param_cannot_drop_relations() {
        let (status, body) = get_json("/api/posts?populate=author").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"][0]["ogImage"].is_object());
    }

    #[tokio::test]
    async fn test_filter_by_slug() {
        let (status, body) =
            get_json("/api/posts?filters%5Bslug%5D%5B%24eq%5D=economics-of-paper-recycling").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["id"], 3);
    }

    #[tokio::test]
    async fn test_invalid_query_is_400() {
        let (status, body) = get_json("/api/posts?sort=content:asc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["data"].is_null());
        assert_eq!(body["error"]["status"], 400);
    }

    #[tokio::test]
    async fn test_find_one_and_missing() {
        let (status, body) = get_json("/api/posts/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"]["slug"],
            "revolutionary-plastic-bottle-recycling-technology"
        );

        let (status, body) = get_json("/api/posts/99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["name"], "NotFoundError");
    }
}
