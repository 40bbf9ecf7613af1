//! Both routers end to end, on requests that never touch the database.

#![allow(clippy::unwrap_used)]

use axum::body::Body;
use axum::http::{Request, StatusCode, header};

use cafe_ancestral_integration_tests::{admin_app, body_text, send, storefront_app};

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_storefront_health() {
    let response = send(storefront_app(), get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn test_new_visitor_sees_empty_cart() {
    let response = send(storefront_app(), get("/cart")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Tu carrito está esperando por algo delicioso."));
}

#[tokio::test]
async fn test_cart_badge_starts_at_zero() {
    let response = send(storefront_app(), get("/cart/count")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains('0'));
}

#[tokio::test]
async fn test_checkout_with_empty_cart_returns_to_cart() {
    let response = send(storefront_app(), get("/cart/checkout")).await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/cart");
}

#[tokio::test]
async fn test_add_to_cart_rejects_malformed_id() {
    let request = Request::builder()
        .method("POST")
        .uri("/cart/add")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("product_id=espresso"))
        .unwrap();

    let response = send(storefront_app(), request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_pages_require_login() {
    for uri in ["/", "/categories", "/products/new", "/hero-banners"] {
        let response = send(admin_app(), get(uri)).await;
        assert!(response.status().is_redirection(), "{uri}");
        assert_eq!(location(&response), "/auth/login", "{uri}");
    }
}

#[tokio::test]
async fn test_admin_upload_requires_login() {
    let request = Request::builder()
        .method("POST")
        .uri("/uploads")
        .body(Body::empty())
        .unwrap();

    let response = send(admin_app(), request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_login_page_renders() {
    let response = send(admin_app(), get("/auth/login")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("action=\"/auth/login\""));
    assert!(html.contains("name=\"password\""));
}
