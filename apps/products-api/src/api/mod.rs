//! API routes module

pub mod health;
pub mod products;
pub mod root;

use axum::Router;
use domain_products::{ProductRepository, ProductService};
use std::io;

use crate::openapi::ApiDoc;

/// Routes mounted under `/api`
pub fn routes<R: ProductRepository + 'static>(service: &ProductService<R>) -> Router {
    Router::new()
        .nest("/products", products::router(service))
        .merge(health::router(service))
}

/// The full application: `/`, `/api/*`, documentation and middleware
pub fn app<R: ProductRepository + 'static>(service: &ProductService<R>) -> io::Result<Router> {
    axum_helpers::create_router::<ApiDoc>(routes(service), root::router())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use domain_products::{InMemoryProductRepository, Product};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn test_app(repo: &InMemoryProductRepository) -> Router {
        app(&ProductService::new(repo.clone())).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_root_metadata() {
        let response = test_app(&InMemoryProductRepository::new())
            .oneshot(get("/"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = json_body(response.into_body()).await;
        assert_eq!(body["message"], "E-commerce API");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(body["documentation"], "/docs");
        assert_eq!(
            body["endpoints"],
            json!({ "products": "/api/products", "health": "/api/health" })
        );
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let repo = InMemoryProductRepository::new();

        let response = test_app(&repo).oneshot(get("/api/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = json_body(response.into_body()).await;
        assert_eq!(body, json!({ "status": "healthy", "database": "connected" }));

        repo.set_unavailable(true);
        let response = test_app(&repo).oneshot(get("/api/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = json_body(response.into_body()).await;
        assert_eq!(body["error"], "SERVICE_UNAVAILABLE");
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_mug_lifecycle() {
        let repo = InMemoryProductRepository::new();

        let response = test_app(&repo)
            .oneshot(json_request(
                "POST",
                "/api/products",
                json!({
                    "name": "Mug",
                    "description": "Ceramic mug",
                    "price": 9.99,
                    "category": "Kitchen",
                    "stock_quantity": 100
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: Product = json_body(response.into_body()).await;
        assert!(!created.id.is_empty());
        assert_eq!(created.created_at, created.updated_at);

        let response = test_app(&repo)
            .oneshot(get("/api/products?category=kit"))
            .await
            .unwrap();
        let listed: Vec<Product> = json_body(response.into_body()).await;
        assert_eq!(listed, vec![created.clone()]);

        let item_uri = format!("/api/products/{}", created.id);
        let response = test_app(&repo)
            .oneshot(json_request("PUT", &item_uri, json!({ "stock_quantity": 80 })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let updated: Product = json_body(response.into_body()).await;
        assert_eq!(updated.stock_quantity, 80);
        assert_eq!(updated.price, 9.99);
        assert_eq!(updated.name, "Mug");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > updated.created_at);

        let response = test_app(&repo)
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(&item_uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = test_app(&repo).oneshot(get(&item_uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = json_body(response.into_body()).await;
        assert_eq!(
            body["message"],
            format!("Product with ID {} not found", created.id)
        );
    }

    #[tokio::test]
    async fn test_unsupported_method_is_json_405() {
        let response = test_app(&InMemoryProductRepository::new())
            .oneshot(json_request("PATCH", "/api/products/some-id", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let body: Value = json_body(response.into_body()).await;
        assert_eq!(body["error"], "METHOD_NOT_ALLOWED");
    }

    #[tokio::test]
    async fn test_openapi_lists_product_paths() {
        let response = test_app(&InMemoryProductRepository::new())
            .oneshot(get("/openapi.json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let doc: Value = json_body(response.into_body()).await;
        let paths = doc["paths"].as_object().unwrap();
        assert!(paths.contains_key("/api/products"));
        assert!(paths.contains_key("/api/products/{id}"));
        assert!(paths.contains_key("/api/products/category/{category}"));
        assert!(paths.contains_key("/api/health"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let response = test_app(&InMemoryProductRepository::new())
            .oneshot(get("/api/nothing-here"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
