//! Common test utilities for starpost integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use tempfile::TempDir;

use starpost_core::AccountId;
use starpost_service::{create_router, AppState, ServiceConfig};
use starpost_store::RocksStore;

/// Account id configured as privileged in every test harness.
pub const PRIVILEGED_ACCOUNT: &str = "ops-admin";

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Direct store handle for seeding state the API cannot produce.
    pub store: Arc<RocksStore>,
    /// Temporary directory for the database (kept alive for test duration).
    pub _temp_dir: TempDir,
    /// A test account id for authenticated requests.
    pub account_id: AccountId,
}

impl TestHarness {
    /// Create a new test harness with a fresh database.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = Arc::new(RocksStore::open(temp_dir.path()).expect("Failed to open store"));

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            data_dir: temp_dir.path().to_string_lossy().to_string(),
            privileged_accounts: vec![PRIVILEGED_ACCOUNT.into()],
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        };

        let state = AppState::new(Arc::clone(&store), config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");
        let account_id = AccountId::generate();

        Self {
            server,
            store,
            _temp_dir: temp_dir,
            account_id,
        }
    }

    /// Get the authorization header for the harness's default account.
    pub fn auth_header(&self) -> String {
        Self::auth_header_for(&self.account_id)
    }

    /// Get the authorization header for an arbitrary account.
    pub fn auth_header_for(account_id: &AccountId) -> String {
        format!("Bearer host-user:{account_id}")
    }

    /// Get the authorization header for the privileged account.
    pub fn privileged_auth_header() -> String {
        format!("Bearer host-user:{PRIVILEGED_ACCOUNT}")
    }

    /// Add stars to an account through the API.
    pub async fn add_stars(&self, account_id: &AccountId, amount: i64) {
        self.server
            .post("/v1/stars/add")
            .add_header("authorization", Self::auth_header_for(account_id))
            .json(&serde_json::json!({ "amount": amount }))
            .await
            .assert_status_ok();
    }

    /// Create a content item for an account, returning its id.
    ///
    /// Sleeps briefly afterwards so consecutive creations get distinct ULID
    /// timestamps and a stable "most recent" ordering.
    pub async fn create_content(&self, account_id: &AccountId, kind: &str, caption: &str) -> String {
        let response = self
            .server
            .post("/v1/content")
            .add_header("authorization", Self::auth_header_for(account_id))
            .json(&serde_json::json!({ "kind": kind, "caption": caption }))
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        let id = body["id"].as_str().expect("content id").to_string();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        id
    }

    /// Read an account's balance through the API.
    pub async fn balance(&self, account_id: &AccountId) -> i64 {
        let response = self
            .server
            .get("/v1/stars/balance")
            .add_header("authorization", Self::auth_header_for(account_id))
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        body["balance"].as_i64().expect("balance")
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
