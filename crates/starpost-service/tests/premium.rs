//! Premium entitlement integration tests.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::TestHarness;
use serde_json::json;
use starpost_core::{Entitlement, Tier};
use starpost_store::Store;

// ============================================================================
// Trial
// ============================================================================

#[tokio::test]
async fn first_status_read_grants_trial() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/v1/premium")
        .add_header("authorization", harness.auth_header())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["active"], true);
    assert_eq!(body["tier"], "standard");
    assert_eq!(body["is_trial"], true);
    assert_eq!(body["max_video_seconds"], 300);
    assert!(body["expires_at"].is_string());
}

#[tokio::test]
async fn trial_grant_is_idempotent() {
    let harness = TestHarness::new();

    let first = harness
        .server
        .get("/v1/premium")
        .add_header("authorization", harness.auth_header())
        .await;
    first.assert_status_ok();
    let first: serde_json::Value = first.json();

    let second = harness
        .server
        .get("/v1/premium")
        .add_header("authorization", harness.auth_header())
        .await;
    second.assert_status_ok();
    let second: serde_json::Value = second.json();

    assert_eq!(first, second);
}

// ============================================================================
// Expiry
// ============================================================================

#[tokio::test]
async fn expired_entitlement_self_heals_on_read() {
    let harness = TestHarness::new();

    // Seed an entitlement whose expiry has already passed
    let mut expired = Entitlement::purchased(Tier::Blogger, Utc::now());
    expired.expires_at = Some(Utc::now() - Duration::hours(1));
    harness
        .store
        .set_entitlement(&harness.account_id, &expired)
        .unwrap();

    let response = harness
        .server
        .get("/v1/premium")
        .add_header("authorization", harness.auth_header())
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["active"], false);
    assert_eq!(body["is_trial"], false);
    assert!(body["expires_at"].is_null());

    // The lapse is persisted: a later read stays inactive and does not
    // re-grant a trial
    let response = harness
        .server
        .get("/v1/premium")
        .add_header("authorization", harness.auth_header())
        .await;
    response.assert_status_ok();
    let again: serde_json::Value = response.json();
    assert_eq!(body, again);

    let stored = harness
        .store
        .get_account(&harness.account_id)
        .unwrap()
        .unwrap()
        .entitlement
        .unwrap();
    assert!(!stored.active);
    assert_eq!(stored.expires_at, None);
}

#[tokio::test]
async fn expired_trial_does_not_regrant() {
    let harness = TestHarness::new();

    let mut trial = Entitlement::trial(Utc::now());
    trial.expires_at = Some(Utc::now() - Duration::days(1));
    harness
        .store
        .set_entitlement(&harness.account_id, &trial)
        .unwrap();

    let response = harness
        .server
        .get("/v1/premium")
        .add_header("authorization", harness.auth_header())
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["active"], false);
    assert_eq!(body["is_trial"], false);
}

// ============================================================================
// Purchase
// ============================================================================

#[tokio::test]
async fn purchase_with_wrong_amount_is_price_mismatch() {
    let harness = TestHarness::new();
    harness.add_stars(&harness.account_id, 500).await;

    let response = harness
        .server
        .post("/v1/premium/purchase")
        .add_header("authorization", harness.auth_header())
        .json(&json!({ "tier": "standard", "amount": 180 }))
        .await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "price_mismatch");
    assert_eq!(body["error"]["details"]["expected"], 120);
    assert_eq!(body["error"]["details"]["supplied"], 180);

    assert_eq!(harness.balance(&harness.account_id).await, 500);
}

#[tokio::test]
async fn purchase_without_amount_is_invalid() {
    let harness = TestHarness::new();
    harness.add_stars(&harness.account_id, 500).await;

    let response = harness
        .server
        .post("/v1/premium/purchase")
        .add_header("authorization", harness.auth_header())
        .json(&json!({ "tier": "standard" }))
        .await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "invalid_amount");
}

#[tokio::test]
async fn purchase_standard_sets_tier_and_debits() {
    let harness = TestHarness::new();
    harness.add_stars(&harness.account_id, 500).await;

    let response = harness
        .server
        .post("/v1/premium/purchase")
        .add_header("authorization", harness.auth_header())
        .json(&json!({ "tier": "standard", "amount": 120 }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["balance"], 380);
    assert_eq!(body["entitlement"]["active"], true);
    assert_eq!(body["entitlement"]["tier"], "standard");
    assert_eq!(body["entitlement"]["is_trial"], false);
    assert_eq!(body["entitlement"]["max_video_seconds"], 300);
}

#[tokio::test]
async fn purchase_blogger_raises_video_cap() {
    let harness = TestHarness::new();
    harness.add_stars(&harness.account_id, 200).await;

    let response = harness
        .server
        .post("/v1/premium/purchase")
        .add_header("authorization", harness.auth_header())
        .json(&json!({ "tier": "blogger", "amount": 180 }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["balance"], 20);
    assert_eq!(body["entitlement"]["tier"], "blogger");
    assert_eq!(body["entitlement"]["max_video_seconds"], 1080);
}

#[tokio::test]
async fn purchase_insufficient_funds_grants_nothing() {
    let harness = TestHarness::new();
    harness.add_stars(&harness.account_id, 100).await;

    let response = harness
        .server
        .post("/v1/premium/purchase")
        .add_header("authorization", harness.auth_header())
        .json(&json!({ "tier": "standard", "amount": 120 }))
        .await;

    response.assert_status(StatusCode::PAYMENT_REQUIRED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "insufficient_funds");

    assert_eq!(harness.balance(&harness.account_id).await, 100);
    let stored = harness
        .store
        .get_account(&harness.account_id)
        .unwrap()
        .unwrap();
    assert!(stored.entitlement.is_none());
}

#[tokio::test]
async fn purchase_replaces_trial_without_stacking() {
    let harness = TestHarness::new();

    // Grant the trial first
    harness
        .server
        .get("/v1/premium")
        .add_header("authorization", harness.auth_header())
        .await
        .assert_status_ok();

    harness.add_stars(&harness.account_id, 120).await;

    let response = harness
        .server
        .post("/v1/premium/purchase")
        .add_header("authorization", harness.auth_header())
        .json(&json!({ "tier": "standard", "amount": 120 }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["entitlement"]["is_trial"], false);

    // The stored expiry is ~30 days out, not trial remainder + 30 days
    let stored = harness
        .store
        .get_account(&harness.account_id)
        .unwrap()
        .unwrap()
        .entitlement
        .unwrap();
    let expires_at = stored.expires_at.unwrap();
    let days = (expires_at - Utc::now()).num_days();
    assert!((29..=30).contains(&days), "expiry {days} days out");
}
