//! Starpost HTTP client implementation.

use reqwest::Client;
use std::time::Duration;

use crate::error::ClientError;
use crate::types::{
    AmountRequest, ApiErrorResponse, Balance, EntitlementStatus, Feed, GiftRequest, PinRequest,
    PinResult, PurchaseRequest, PurchaseResult, WithdrawResult,
};

/// Starpost API client.
///
/// Acts on behalf of one host-platform user; the bearer token identifies
/// the account every call is charged to.
#[derive(Debug, Clone)]
pub struct StarpostClient {
    client: Client,
    base_url: String,
    bearer_token: String,
}

impl StarpostClient {
    /// Create a new starpost client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the starpost service (e.g., `"http://starpost:8080"`)
    /// * `bearer_token` - Host-issued token identifying the user
    #[must_use]
    pub fn new(base_url: impl Into<String>, bearer_token: impl Into<String>) -> Self {
        Self::with_options(base_url, bearer_token, ClientOptions::default())
    }

    /// Create a new starpost client with custom options.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built (should not happen with
    /// default settings).
    #[must_use]
    pub fn with_options(
        base_url: impl Into<String>,
        bearer_token: impl Into<String>,
        options: ClientOptions,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bearer_token: bearer_token.into(),
        }
    }

    /// Get the current star balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn balance(&self) -> Result<Balance, ClientError> {
        let url = format!("{}/v1/stars/balance", self.base_url);
        let response = self.get(&url).send().await?;
        self.handle_response(response).await
    }

    /// Add stars (reporting a completed host payment).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn add_stars(&self, amount: i64) -> Result<Balance, ClientError> {
        let url = format!("{}/v1/stars/add", self.base_url);
        let response = self.post(&url).json(&AmountRequest { amount }).send().await?;
        self.handle_response(response).await
    }

    /// Withdraw stars to an external payout.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn withdraw(&self, amount: i64) -> Result<WithdrawResult, ClientError> {
        let url = format!("{}/v1/stars/withdraw", self.base_url);
        let response = self.post(&url).json(&AmountRequest { amount }).send().await?;
        self.handle_response(response).await
    }

    /// Gift stars to a content item.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn gift(
        &self,
        content_id: impl Into<String>,
        amount: i64,
    ) -> Result<Balance, ClientError> {
        let url = format!("{}/v1/stars/gift", self.base_url);
        let response = self
            .post(&url)
            .json(&GiftRequest {
                content_id: content_id.into(),
                amount,
            })
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Get the current premium status.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn entitlement(&self) -> Result<EntitlementStatus, ClientError> {
        let url = format!("{}/v1/premium", self.base_url);
        let response = self.get(&url).send().await?;
        self.handle_response(response).await
    }

    /// Purchase a premium tier. The amount must match the tier's canonical
    /// price.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn purchase_entitlement(
        &self,
        tier: impl Into<String>,
        amount: i64,
    ) -> Result<PurchaseResult, ClientError> {
        let url = format!("{}/v1/premium/purchase", self.base_url);
        let response = self
            .post(&url)
            .json(&PurchaseRequest {
                tier: tier.into(),
                amount,
            })
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Pin the caller's latest content item of a kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn pin(
        &self,
        content_type: impl Into<String>,
        hours: i64,
    ) -> Result<PinResult, ClientError> {
        let url = format!("{}/v1/content/pin", self.base_url);
        let response = self
            .post(&url)
            .json(&PinRequest {
                content_type: content_type.into(),
                hours,
            })
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Get the content feed.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn feed(&self) -> Result<Feed, ClientError> {
        let url = format!("{}/v1/content/feed", self.base_url);
        let response = self.get(&url).send().await?;
        self.handle_response(response).await
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header("authorization", format!("Bearer {}", self.bearer_token))
    }

    fn post(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .header("authorization", format!("Bearer {}", self.bearer_token))
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Try to parse error response
        let error_body: Result<ApiErrorResponse, _> = response.json().await;

        match error_body {
            Ok(api_error) => {
                let code = api_error.error.code.as_str();
                let message = api_error.error.message.clone();
                tracing::debug!(code = %code, status = %status, "API request failed");
                let detail = |field: &str| {
                    api_error
                        .error
                        .details
                        .as_ref()
                        .and_then(|d| d.get(field))
                        .and_then(serde_json::Value::as_i64)
                        .unwrap_or(0)
                };

                // Map specific error codes to typed errors
                match code {
                    "insufficient_funds" => Err(ClientError::InsufficientFunds {
                        balance: detail("balance"),
                        required: detail("required"),
                    }),
                    "below_minimum" => Err(ClientError::BelowMinimum {
                        minimum: detail("minimum"),
                        requested: detail("requested"),
                    }),
                    "price_mismatch" => Err(ClientError::PriceMismatch {
                        expected: detail("expected"),
                        supplied: detail("supplied"),
                    }),
                    "target_not_found" | "no_content_found" => {
                        Err(ClientError::ContentNotFound { message })
                    }
                    _ => Err(ClientError::Api {
                        code: code.to_string(),
                        message,
                        status: status.as_u16(),
                    }),
                }
            }
            Err(_) => Err(ClientError::Api {
                code: "unknown".to_string(),
                message: format!("HTTP {status}"),
                status: status.as_u16(),
            }),
        }
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}
