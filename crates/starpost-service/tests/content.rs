//! Content feed and pin promotion integration tests.

mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use common::TestHarness;
use serde_json::json;
use starpost_core::AccountId;

// ============================================================================
// Creation and feed
// ============================================================================

#[tokio::test]
async fn created_content_starts_unpinned() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/v1/content")
        .add_header("authorization", harness.auth_header())
        .json(&json!({ "kind": "post", "caption": "first light" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["kind"], "post");
    assert_eq!(body["caption"], "first light");
    assert_eq!(body["star_count"], 0);
    assert_eq!(body["pinned"], false);
    assert!(body["pinned_until"].is_null());
}

#[tokio::test]
async fn feed_orders_pinned_item_before_newer_content() {
    let harness = TestHarness::new();
    let owner = harness.account_id.clone();

    // Creation order A, B, C (C newest); B is a story so it can be pinned
    // while C remains the newest item overall.
    let a = harness.create_content(&owner, "post", "A").await;
    let b = harness.create_content(&owner, "story", "B").await;
    let c = harness.create_content(&owner, "post", "C").await;

    harness.add_stars(&owner, 300).await;
    harness
        .server
        .post("/v1/content/pin")
        .add_header("authorization", harness.auth_header())
        .json(&json!({ "content_type": "story", "hours": 1 }))
        .await
        .assert_status_ok();

    let response = harness
        .server
        .get("/v1/content/feed")
        .add_header("authorization", harness.auth_header())
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let ids: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap())
        .collect();

    assert_eq!(ids, vec![b.as_str(), c.as_str(), a.as_str()]);
}

// ============================================================================
// Pin
// ============================================================================

#[tokio::test]
async fn pin_targets_most_recent_item_of_kind() {
    let harness = TestHarness::new();
    let owner = harness.account_id.clone();

    let _first = harness.create_content(&owner, "post", "older").await;
    let second = harness.create_content(&owner, "post", "newer").await;

    harness.add_stars(&owner, 200).await;
    let response = harness
        .server
        .post("/v1/content/pin")
        .add_header("authorization", harness.auth_header())
        .json(&json!({ "content_type": "post", "hours": 1 }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["content_id"], second);
    assert_eq!(body["price"], 200);
    assert_eq!(body["balance"], 0);
}

#[tokio::test]
async fn pin_prices_story_hours() {
    let harness = TestHarness::new();
    let owner = harness.account_id.clone();
    harness.create_content(&owner, "story", "promo me").await;

    harness.add_stars(&owner, 1000).await;
    let response = harness
        .server
        .post("/v1/content/pin")
        .add_header("authorization", harness.auth_header())
        .json(&json!({ "content_type": "story", "hours": 3 }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["hours"], 3);
    assert_eq!(body["price"], 900);
    assert_eq!(body["balance"], 100);
}

#[tokio::test]
async fn pin_clamps_out_of_range_hours() {
    let harness = TestHarness::new();
    let owner = harness.account_id.clone();
    harness.create_content(&owner, "post", "all day").await;

    harness.add_stars(&owner, 5000).await;

    // 30 hours clamps to 24
    let response = harness
        .server
        .post("/v1/content/pin")
        .add_header("authorization", harness.auth_header())
        .json(&json!({ "content_type": "post", "hours": 30 }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["hours"], 24);
    assert_eq!(body["price"], 4800);

    // 0 hours clamps to 1
    let response = harness
        .server
        .post("/v1/content/pin")
        .add_header("authorization", harness.auth_header())
        .json(&json!({ "content_type": "post", "hours": 0 }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["hours"], 1);
    assert_eq!(body["price"], 200);
}

#[tokio::test]
async fn pin_without_content_fails() {
    let harness = TestHarness::new();
    harness.add_stars(&harness.account_id, 1000).await;

    let response = harness
        .server
        .post("/v1/content/pin")
        .add_header("authorization", harness.auth_header())
        .json(&json!({ "content_type": "story", "hours": 2 }))
        .await;

    response.assert_status_not_found();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "no_content_found");

    assert_eq!(harness.balance(&harness.account_id).await, 1000);
}

#[tokio::test]
async fn pin_insufficient_funds_leaves_item_unpinned() {
    let harness = TestHarness::new();
    let owner = harness.account_id.clone();
    harness.create_content(&owner, "story", "too poor").await;

    let response = harness
        .server
        .post("/v1/content/pin")
        .add_header("authorization", harness.auth_header())
        .json(&json!({ "content_type": "story", "hours": 1 }))
        .await;

    response.assert_status(StatusCode::PAYMENT_REQUIRED);

    let response = harness
        .server
        .get("/v1/content/feed")
        .add_header("authorization", harness.auth_header())
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["items"][0]["pinned"], false);
}

#[tokio::test]
async fn repinning_overwrites_previous_expiry() {
    let harness = TestHarness::new();
    let owner = harness.account_id.clone();
    harness.create_content(&owner, "post", "twice").await;

    harness.add_stars(&owner, 5000).await;

    let response = harness
        .server
        .post("/v1/content/pin")
        .add_header("authorization", harness.auth_header())
        .json(&json!({ "content_type": "post", "hours": 10 }))
        .await;
    response.assert_status_ok();
    let first: serde_json::Value = response.json();
    let first_until: DateTime<Utc> = first["pinned_until"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();

    // A shorter repurchase moves the expiry earlier, not later
    let response = harness
        .server
        .post("/v1/content/pin")
        .add_header("authorization", harness.auth_header())
        .json(&json!({ "content_type": "post", "hours": 1 }))
        .await;
    response.assert_status_ok();
    let second: serde_json::Value = response.json();
    let second_until: DateTime<Utc> = second["pinned_until"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();

    assert!(second_until < first_until);
}

// ============================================================================
// Isolation
// ============================================================================

#[tokio::test]
async fn pin_only_considers_callers_own_content() {
    let harness = TestHarness::new();
    let other = AccountId::generate();
    harness.create_content(&other, "post", "not yours").await;

    harness.add_stars(&harness.account_id, 1000).await;
    let response = harness
        .server
        .post("/v1/content/pin")
        .add_header("authorization", harness.auth_header())
        .json(&json!({ "content_type": "post", "hours": 1 }))
        .await;

    response.assert_status_not_found();
}
