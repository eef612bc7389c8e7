//! Integration tests for the stats and back-office user APIs.
//!
//! Run with: cargo test -p tazabag-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use tazabag_integration_tests::{base_url, client, unique_suffix};

#[tokio::test]
#[ignore = "requires running server and database"]
async fn test_stats_shape_and_growth() {
    let resp = client()
        .get(format!("{}/stats", base_url()))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let before: Value = resp.json().await.expect("invalid JSON");
    let products_before = before["totalProducts"].as_i64().expect("totalProducts");
    assert!(before["totalRevenue"].is_string());

    // Creating a product invalidates the cached summary
    let resp = client()
        .post(format!("{}/products", base_url()))
        .json(&json!({
            "name": format!("Stats Product {}", unique_suffix()),
            "category": "fruit",
            "price": "50.00",
            "unit": "kg"
        }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client()
        .get(format!("{}/stats", base_url()))
        .send()
        .await
        .expect("request failed");
    let after: Value = resp.json().await.expect("invalid JSON");
    assert_eq!(
        after["totalProducts"].as_i64().expect("totalProducts"),
        products_before + 1
    );
}

#[tokio::test]
#[ignore = "requires running server and database"]
async fn test_user_creation_and_duplicate_username() {
    let username = format!("admin_{}", unique_suffix());
    let body = json!({
        "username": username,
        "email": format!("{username}@tazabag.pk"),
        "password": "correct horse battery"
    });

    let resp = client()
        .post(format!("{}/users", base_url()))
        .json(&body)
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let user: Value = resp.json().await.expect("invalid JSON");
    assert_eq!(user["username"], username.as_str());
    assert_eq!(user["role"], "user");
    assert!(user.get("passwordHash").is_none());
    let id = user["id"].as_i64().expect("id");

    // Same username again conflicts
    let resp = client()
        .post(format!("{}/users", base_url()))
        .json(&body)
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Lookups by id and username
    let resp = client()
        .get(format!("{}/users/{id}", base_url()))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client()
        .get(format!("{}/users/username/{username}", base_url()))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Value = resp.json().await.expect("invalid JSON");
    assert_eq!(fetched["id"].as_i64(), Some(id));
}

#[tokio::test]
#[ignore = "requires running server"]
async fn test_health_endpoints() {
    let resp = client()
        .get(format!("{}/health", base_url()))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client()
        .get(format!("{}/health/ready", base_url()))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
}
