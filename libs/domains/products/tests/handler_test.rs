//! Handler tests for the Products domain
//!
//! Drive the products router over the in-memory store:
//! - defaults and derived stock status
//! - list filters and pagination
//! - validation and not-found responses

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    let service = ProductService::new(InMemoryProductRepository::new());
    Router::new().nest("/api/products", handlers::router(service))
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, json_body(response.into_body()).await)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, product) = send(app, json_request("POST", "/api/products", body)).await;
    assert_eq!(status, StatusCode::CREATED, "{product}");
    product
}

async fn seed_catalog(app: &Router) {
    let catalog = [
        ("Nike Air Max", 129.99, "Sports", true, 75),
        ("The Great Gatsby", 12.99, "Books", true, 100),
        ("Garden Tool Set", 49.99, "Home & Garden", true, 25),
        ("Levi's 501 Jeans", 79.99, "Clothing", true, 60),
        ("LEGO Architecture Set", 89.99, "Toys", false, 0),
        ("Organic Coffee Beans", 24.99, "Food", true, 40),
    ];
    for (name, price, category, in_stock, quantity) in catalog {
        create(
            app,
            json!({
                "name": name,
                "description": format!("{name} from the sample catalog"),
                "price": price,
                "category": category,
                "inStock": in_stock,
                "quantity": quantity
            }),
        )
        .await;
    }
}

fn names(body: &Value) -> Vec<String> {
    let mut names: Vec<String> = body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_create_product_defaults() {
    let app = app();
    let product = create(
        &app,
        json!({ "name": "Desk Lamp", "price": 19.99, "category": "Home & Garden" }),
    )
    .await;

    assert_eq!(product["quantity"], 0);
    assert_eq!(product["inStock"], true);
    assert_eq!(product["stockStatus"], "Out of Stock");
    assert_eq!(product["category"], "Home & Garden");
    assert_eq!(product["_id"], product["id"]);
    assert!(product.get("description").is_none());
}

#[tokio::test]
async fn test_create_product_validation() {
    let app = app();
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/products",
            json!({ "name": "Desk Lamp", "price": -2, "category": "Lighting" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(
        body["details"][0],
        json!({
            "field": "category",
            "message": "Category must be one of: Electronics, Clothing, Books, Home & Garden, Sports, Toys, Food, Other",
            "value": "Lighting"
        })
    );
    assert_eq!(body["details"][1]["field"], "price");
    assert_eq!(body["details"][1]["message"], "Price must be a positive number");
}

#[tokio::test]
async fn test_create_product_rejects_wrong_types() {
    let app = app();
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/products",
            json!({ "name": "Desk Lamp", "price": "abc", "category": "Other" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request body");
}

#[tokio::test]
async fn test_price_range_filter() {
    let app = app();
    seed_catalog(&app).await;

    let (status, body) = get(&app, "/api/products?minPrice=50&maxPrice=100").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), ["LEGO Architecture Set", "Levi's 501 Jeans"]);
    for product in body["products"].as_array().unwrap() {
        let price = product["price"].as_f64().unwrap();
        assert!((50.0..=100.0).contains(&price));
    }
    assert_eq!(body["pagination"]["totalProducts"], 2);
}

#[tokio::test]
async fn test_category_stock_and_search_filters() {
    let app = app();
    seed_catalog(&app).await;

    let (_, body) = get(&app, "/api/products?category=Home%20%26%20Garden").await;
    assert_eq!(names(&body), ["Garden Tool Set"]);

    let (_, body) = get(&app, "/api/products?category=Gadgets").await;
    assert!(names(&body).is_empty());

    let (_, body) = get(&app, "/api/products?inStock=false").await;
    assert_eq!(names(&body), ["LEGO Architecture Set"]);

    let (_, body) = get(&app, "/api/products?inStock=true").await;
    assert_eq!(body["pagination"]["totalProducts"], 5);

    let (_, body) = get(&app, "/api/products?search=COFFEE").await;
    assert_eq!(names(&body), ["Organic Coffee Beans"]);

    let (_, body) = get(&app, "/api/products?search=&category=").await;
    assert_eq!(body["pagination"]["totalProducts"], 6);
}

#[tokio::test]
async fn test_pagination_metadata() {
    let app = app();
    seed_catalog(&app).await;

    let (_, body) = get(&app, "/api/products?page=2&limit=4").await;
    assert_eq!(body["products"].as_array().unwrap().len(), 2);
    assert_eq!(
        body["pagination"],
        json!({
            "currentPage": 2,
            "totalPages": 2,
            "totalProducts": 6,
            "hasNext": false,
            "hasPrev": true
        })
    );

    let (_, body) = get(&app, "/api/products?limit=0").await;
    assert_eq!(body["products"].as_array().unwrap().len(), 6);
    assert_eq!(body["pagination"]["totalPages"], 1);
}

#[tokio::test]
async fn test_non_numeric_price_bound() {
    let app = app();
    let (status, body) = get(&app, "/api/products?minPrice=cheap").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["details"],
        json!([{ "field": "minPrice", "message": "minPrice must be a number", "value": "cheap" }])
    );
}

#[tokio::test]
async fn test_update_quantity_changes_stock_status() {
    let app = app();
    let product = create(
        &app,
        json!({ "name": "Desk Lamp", "price": 19.99, "category": "Home & Garden" }),
    )
    .await;
    let id = product["id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        json_request("PUT", &format!("/api/products/{id}"), json!({ "quantity": 5 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["quantity"], 5);
    assert_eq!(updated["stockStatus"], "Low Stock");
    assert_eq!(updated["name"], "Desk Lamp");
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let app = app();
    let product = create(
        &app,
        json!({ "name": "Desk Lamp", "price": 19.99, "category": "Other" }),
    )
    .await;
    let id = product["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        Request::delete(format!("/api/products/{id}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product deleted successfully");
    assert_eq!(body["deletedProduct"]["name"], "Desk Lamp");

    let (status, body) = get(&app, &format!("/api/products/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product not found");
}

#[tokio::test]
async fn test_malformed_id() {
    let app = app();
    let (status, body) = get(&app, "/api/products/not-an-id").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["message"], "Invalid ID format");
    assert_eq!(body["details"][0]["value"], "not-an-id");
}

#[tokio::test]
async fn test_repeated_filter_returns_json_error() {
    let app = app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/products?inStock=true&inStock=false")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()["content-type"], "application/json");

    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(body["details"][0]["field"], "query");
}
