//! Integration tests for product endpoints.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_create_product_in_category() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    let category_id = app.create_category(&token, "Hardware").await["id"]
        .as_i64()
        .unwrap();

    let product = app.create_product(&token, "Hammer", 12.5, category_id).await;

    assert_eq!(product["name"], "Hammer");
    assert_eq!(product["categoryId"], category_id);
    assert_eq!(product["version"], 0);
    assert_eq!(product["quantity"], 5);
}

#[tokio::test]
async fn test_create_product_in_missing_category_is_not_found() {
    let app = TestApp::new();
    let token = app.admin_token().await;

    let response = app
        .request(
            "POST",
            "/products",
            Some(json!({ "name": "Hammer", "price": 1.0, "quantity": 1, "categoryId": 42 })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_price_and_quantity_are_bad_requests() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    let category_id = app.create_category(&token, "Hardware").await["id"]
        .as_i64()
        .unwrap();

    for body in [
        json!({ "name": "Hammer", "price": 0.0, "quantity": 1, "categoryId": category_id }),
        json!({ "name": "Hammer", "price": 1.0, "quantity": -1, "categoryId": category_id }),
        json!({ "name": "Hammer", "quantity": 1, "categoryId": category_id }),
    ] {
        let response = app
            .request("POST", "/products", Some(body), Some(&token))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_stale_product_update_conflicts() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    let category_id = app.create_category(&token, "Hardware").await["id"]
        .as_i64()
        .unwrap();
    let id = app.create_product(&token, "Hammer", 12.5, category_id).await["id"]
        .as_i64()
        .unwrap();
    let path = format!("/products/{id}");
    let body = |price: f64, version: i64| {
        json!({
            "name": "Hammer",
            "price": price,
            "quantity": 5,
            "categoryId": category_id,
            "version": version,
        })
    };

    let first = app.request("PUT", &path, Some(body(15.0, 0)), Some(&token)).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["version"], 1);
    assert_eq!(first.body["price"], 15.0);

    let second = app.request("PUT", &path, Some(body(11.0, 0)), Some(&token)).await;
    assert_eq!(second.status, StatusCode::CONFLICT);

    let current = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(current.body["price"], 15.0);
}

#[tokio::test]
async fn test_reader_cannot_delete_product() {
    let app = TestApp::new();
    let admin = app.admin_token().await;
    let viewer = app.viewer_token().await;
    let category_id = app.create_category(&admin, "Hardware").await["id"]
        .as_i64()
        .unwrap();
    let id = app.create_product(&admin, "Hammer", 12.5, category_id).await["id"]
        .as_i64()
        .unwrap();

    let response = app
        .request("DELETE", &format!("/products/{id}"), None, Some(&viewer))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let still_there = app
        .request("GET", &format!("/products/{id}"), None, Some(&viewer))
        .await;
    assert_eq!(still_there.status, StatusCode::OK);
}

#[tokio::test]
async fn test_list_sorted_by_price_descending() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    let category_id = app.create_category(&token, "Hardware").await["id"]
        .as_i64()
        .unwrap();
    for (name, price) in [("Nail", 0.1), ("Saw", 30.0), ("Drill", 89.9)] {
        app.create_product(&token, name, price, category_id).await;
    }

    let response = app
        .request("GET", "/products?sortBy=price&sortDir=DESC", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<&str> = response.body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Drill", "Saw", "Nail"]);
}
