use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use utoipa::ToSchema;

/// Service metadata served at `/`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceIndex {
    pub message: String,
    pub version: String,
    /// Path of the interactive API documentation
    pub documentation: String,
    /// Named entry points, e.g. `"health" -> "/api/health"`
    pub endpoints: BTreeMap<String, String>,
}

impl ServiceIndex {
    pub fn new(message: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            version: version.into(),
            documentation: "/docs".to_string(),
            endpoints: BTreeMap::new(),
        }
    }

    pub fn documentation(mut self, path: impl Into<String>) -> Self {
        self.documentation = path.into();
        self
    }

    pub fn endpoint(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.endpoints.insert(name.into(), path.into());
        self
    }
}

async fn index_handler(State(index): State<Arc<ServiceIndex>>) -> Json<ServiceIndex> {
    Json(index.as_ref().clone())
}

/// Router serving `index` at `GET /`.
pub fn index_router(index: ServiceIndex) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .with_state(Arc::new(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_index_lists_endpoints() {
        let index = ServiceIndex::new("Shop API", "1.0.0")
            .endpoint("products", "/api/products")
            .endpoint("health", "/api/health");

        let response = index_router(index)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["message"], "Shop API");
        assert_eq!(json["documentation"], "/docs");
        assert_eq!(json["endpoints"]["health"], "/api/health");
    }
}
