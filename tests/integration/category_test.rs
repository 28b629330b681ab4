//! Integration tests for category endpoints.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_create_starts_at_version_zero() {
    let app = TestApp::new();
    let token = app.admin_token().await;

    let created = app.create_category(&token, "Hardware").await;

    assert_eq!(created["name"], "Hardware");
    assert_eq!(created["version"], 0);
    assert!(created["id"].as_i64().is_some());
}

#[tokio::test]
async fn test_create_with_version_conflicts() {
    let app = TestApp::new();
    let token = app.admin_token().await;

    let response = app
        .request(
            "POST",
            "/categories",
            Some(json!({ "name": "Hardware", "version": 0 })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_with_current_version_then_stale_version() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    let id = app.create_category(&token, "Hardware").await["id"]
        .as_i64()
        .unwrap();
    let path = format!("/categories/{id}");

    let first = app
        .request(
            "PUT",
            &path,
            Some(json!({ "name": "Tools", "version": 0 })),
            Some(&token),
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["version"], 1);

    let stale = app
        .request(
            "PUT",
            &path,
            Some(json!({ "name": "Garden", "version": 0 })),
            Some(&token),
        )
        .await;
    assert_eq!(stale.status, StatusCode::CONFLICT);
    assert_eq!(stale.body["error"], "CONFLICT");

    let current = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(current.body["name"], "Tools");
    assert_eq!(current.body["version"], 1);
}

#[tokio::test]
async fn test_update_without_version_is_accepted_at_any_stored_version() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    let id = app.create_category(&token, "Hardware").await["id"]
        .as_i64()
        .unwrap();
    let path = format!("/categories/{id}");

    let versioned = app
        .request(
            "PUT",
            &path,
            Some(json!({ "name": "Tools", "version": 0 })),
            Some(&token),
        )
        .await;
    assert_eq!(versioned.status, StatusCode::OK);
    assert_eq!(versioned.body["version"], 1);

    let unversioned = app
        .request("PUT", &path, Some(json!({ "name": "Garden" })), Some(&token))
        .await;
    assert_eq!(unversioned.status, StatusCode::OK);
    assert_eq!(unversioned.body["name"], "Garden");
    assert_eq!(unversioned.body["version"], 2);
}

#[tokio::test]
async fn test_reader_cannot_replace_category() {
    let app = TestApp::new();
    let admin = app.admin_token().await;
    let viewer = app.viewer_token().await;
    let id = app.create_category(&admin, "Hardware").await["id"]
        .as_i64()
        .unwrap();
    let path = format!("/categories/{id}");

    let response = app
        .request(
            "PUT",
            &path,
            Some(json!({ "name": "Tools", "version": 0 })),
            Some(&viewer),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let unchanged = app.request("GET", &path, None, Some(&viewer)).await;
    assert_eq!(unchanged.body["name"], "Hardware");
    assert_eq!(unchanged.body["version"], 0);
}

#[tokio::test]
async fn test_missing_category_is_not_found() {
    let app = TestApp::new();
    let token = app.viewer_token().await;

    let response = app
        .request("GET", "/categories/999", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Category not found with id: 999");
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let app = TestApp::new();
    let token = app.viewer_token().await;

    let response = app
        .request("GET", "/categories/abc", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_short_name_is_bad_request() {
    let app = TestApp::new();
    let token = app.admin_token().await;

    let response = app
        .request("POST", "/categories", Some(json!({ "name": "ab" })), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_delete_refused_while_products_reference_it() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    let category_id = app.create_category(&token, "Hardware").await["id"]
        .as_i64()
        .unwrap();
    let product_id = app
        .create_product(&token, "Hammer", 9.5, category_id)
        .await["id"]
        .as_i64()
        .unwrap();

    let refused = app
        .request("DELETE", &format!("/categories/{category_id}"), None, Some(&token))
        .await;
    assert_eq!(refused.status, StatusCode::CONFLICT);

    let removed = app
        .request("DELETE", &format!("/products/{product_id}"), None, Some(&token))
        .await;
    assert_eq!(removed.status, StatusCode::NO_CONTENT);

    let deleted = app
        .request("DELETE", &format!("/categories/{category_id}"), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let gone = app
        .request("GET", &format!("/categories/{category_id}"), None, Some(&token))
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_is_paged_and_sorted() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    for name in ["Hardware", "Garden", "Kitchen"] {
        app.create_category(&token, name).await;
    }

    let response = app
        .request(
            "GET",
            "/categories?page=0&pageSize=2&sortBy=name&sortDir=ASC",
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<&str> = response.body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Garden", "Hardware"]);
    assert_eq!(response.body["totalItems"], 3);
    assert_eq!(response.body["totalPages"], 2);
    assert_eq!(response.body["hasNext"], true);
}

#[tokio::test]
async fn test_page_far_past_the_end_is_empty() {
    let app = TestApp::new();
    let token = app.admin_token().await;
    app.create_category(&token, "Hardware").await;

    let response = app
        .request("GET", "/categories?page=18446744073709551615", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["items"].as_array().unwrap().is_empty());
    assert_eq!(response.body["hasNext"], false);
    assert_eq!(response.body["hasPrevious"], true);
}

#[tokio::test]
async fn test_unknown_sort_field_is_bad_request() {
    let app = TestApp::new();
    let token = app.viewer_token().await;

    let response = app
        .request("GET", "/categories?sortBy=price", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
