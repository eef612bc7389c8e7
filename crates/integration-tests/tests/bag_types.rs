//! Integration tests for the bag template API.
//!
//! Run with: cargo test -p tazabag-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use tazabag_integration_tests::{base_url, client, unique_suffix};

async fn create_product(name: &str) -> i64 {
    let resp = client()
        .post(format!("{}/products", base_url()))
        .json(&json!({
            "name": name,
            "category": "fruit",
            "price": "100.00",
            "unit": "kg"
        }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let product: Value = resp.json().await.expect("invalid JSON");
    product["id"].as_i64().expect("id")
}

#[tokio::test]
#[ignore = "requires running server and database"]
async fn test_bag_type_create_returns_exact_slot_arrays() {
    let suffix = unique_suffix();
    let fixed = create_product(&format!("Fixed {suffix}")).await;
    let pick_a = create_product(&format!("Pick A {suffix}")).await;
    let pick_b = create_product(&format!("Pick B {suffix}")).await;

    let resp = client()
        .post(format!("{}/bag-types", base_url()))
        .json(&json!({
            "name": format!("Test Bag {suffix}"),
            "category": "fruit",
            "price": "1500.00",
            "itemsLimit": 5,
            "fixedItems": [fixed],
            "customizableItems": [pick_a, pick_b]
        }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let bag: Value = resp.json().await.expect("invalid JSON");
    assert_eq!(bag["fixedItems"], json!([fixed]));
    assert_eq!(bag["customizableItems"], json!([pick_a, pick_b]));
    assert_eq!(bag["itemsLimit"], 5);

    let id = bag["id"].as_i64().expect("id");
    let resp = client()
        .get(format!("{}/bag-types", base_url()))
        .send()
        .await
        .expect("request failed");
    let bags: Vec<Value> = resp.json().await.expect("invalid JSON");
    let listed = bags
        .iter()
        .find(|b| b["id"].as_i64() == Some(id))
        .expect("created bag listed");
    assert_eq!(listed["fixedItems"], json!([fixed]));
}

#[tokio::test]
#[ignore = "requires running server and database"]
async fn test_update_with_empty_lists_clears_slots_idempotently() {
    let suffix = unique_suffix();
    let fixed = create_product(&format!("Clear Me {suffix}")).await;

    let resp = client()
        .post(format!("{}/bag-types", base_url()))
        .json(&json!({
            "name": format!("Clearable Bag {suffix}"),
            "category": "fruit",
            "price": "1000.00",
            "itemsLimit": 3,
            "fixedItems": [fixed],
            "customizableItems": []
        }))
        .send()
        .await
        .expect("request failed");
    let bag: Value = resp.json().await.expect("invalid JSON");
    let id = bag["id"].as_i64().expect("id");

    let update = json!({
        "name": format!("Clearable Bag {suffix}"),
        "category": "fruit",
        "price": "1000.00",
        "itemsLimit": 3,
        "fixedItems": [],
        "customizableItems": []
    });

    // Applying the same replace-children update twice lands in the same
    // state both times.
    for _ in 0..2 {
        let resp = client()
            .put(format!("{}/bag-types/{id}", base_url()))
            .json(&update)
            .send()
            .await
            .expect("request failed");
        assert_eq!(resp.status(), StatusCode::OK);
        let updated: Value = resp.json().await.expect("invalid JSON");
        assert_eq!(updated["fixedItems"], json!([]));
        assert_eq!(updated["customizableItems"], json!([]));
    }
}

#[tokio::test]
#[ignore = "requires running server and database"]
async fn test_inactive_bags_are_not_listed() {
    let suffix = unique_suffix();
    let resp = client()
        .post(format!("{}/bag-types", base_url()))
        .json(&json!({
            "name": format!("Retired Bag {suffix}"),
            "category": "mixed",
            "price": "2000.00",
            "itemsLimit": 4,
            "isActive": false
        }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let bag: Value = resp.json().await.expect("invalid JSON");
    let id = bag["id"].as_i64().expect("id");

    let resp = client()
        .get(format!("{}/bag-types", base_url()))
        .send()
        .await
        .expect("request failed");
    let bags: Vec<Value> = resp.json().await.expect("invalid JSON");
    assert!(bags.iter().all(|b| b["id"].as_i64() != Some(id)));
}
