//! HTTP client for the MyRepairApp API.
//!
//! This module provides the `ShopClient` struct for making authenticated
//! requests to the MyRepairApp REST API.
//!
//! # Retry Logic
//!
//! Rate limiting (HTTP 429) is the only retried failure: the client sleeps
//! for a jittered delay sampled uniformly from the configured range, then
//! retries, up to the configured attempt bound. All other non-success
//! statuses map to their taxonomy fault immediately, and transport-level
//! failures surface as [`WrenchError::Transport`] without retry.
//!
//! # Security
//!
//! The API key is never logged. All error messages are sanitized before
//! logging.

use std::time::Duration;

use rand::Rng;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;

use crate::config::Config;
use crate::error::WrenchError;
use crate::models::{CheckInTicket, InventoryItem, RecordKind};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The authentication header attached to every request.
const API_KEY_HEADER: &str = "X-Api-Key";

/// Default number of attempts before a rate-limited request gives up.
const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default backoff range for rate-limited requests (seconds).
const DEFAULT_BACKOFF_MIN_SECS: u64 = 10;
const DEFAULT_BACKOFF_MAX_SECS: u64 = 60;

/// Maximum length for HTTP error response bodies kept in fault messages.
const MAX_ERROR_BODY_LEN: usize = 500;

/// Retry policy for rate-limited requests.
///
/// The service answers bursts with HTTP 429; each retry waits a delay
/// sampled uniformly from `[min_delay, max_delay]`. Both the attempt
/// bound and the delay range are configurable.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts (including the first) before giving up with
    /// [`WrenchError::TooManyRequests`].
    pub max_attempts: u32,

    /// Lower bound of the jittered backoff delay.
    pub min_delay: Duration,

    /// Upper bound of the jittered backoff delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            min_delay: Duration::from_secs(DEFAULT_BACKOFF_MIN_SECS),
            max_delay: Duration::from_secs(DEFAULT_BACKOFF_MAX_SECS),
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with the given bound and delay range.
    pub fn new(max_attempts: u32, min_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts,
            min_delay,
            max_delay,
        }
    }

    /// Samples a backoff delay uniformly from the configured range.
    fn sample_delay(&self) -> Duration {
        if self.max_delay <= self.min_delay {
            return self.min_delay;
        }
        let secs = rand::thread_rng()
            .gen_range(self.min_delay.as_secs_f64()..=self.max_delay.as_secs_f64());
        Duration::from_secs_f64(secs)
    }
}

/// A record passed to [`ShopClient::update_item`].
///
/// Update dispatch matches on the record kind; only inventory items are
/// supported by the service today.
#[derive(Debug, Clone, Copy)]
pub enum UpdateTarget<'a> {
    /// An inventory item to patch.
    Inventory(&'a InventoryItem),
    /// A checkin ticket. Not updatable yet; passing one surfaces
    /// [`WrenchError::UnsupportedUpdate`].
    Ticket(&'a CheckInTicket),
}

impl UpdateTarget<'_> {
    /// The kind of the wrapped record.
    pub fn kind(&self) -> RecordKind {
        match self {
            UpdateTarget::Inventory(item) => item.kind(),
            UpdateTarget::Ticket(ticket) => ticket.kind(),
        }
    }
}

/// HTTP client for the MyRepairApp API.
///
/// Handles authentication, the retry loop, and response parsing for all
/// service operations. Each public call synchronously drives one
/// request/retry cycle to completion; the 429 backoff suspends the
/// calling task cooperatively without blocking unrelated work.
///
/// # Example
///
/// ```ignore
/// let config = Config::from_env()?;
/// let client = ShopClient::connect(&config).await?;
///
/// let items = client.search_inventory("iPhone 13 screen").await?;
/// ```
#[derive(Clone)]
pub struct ShopClient {
    /// The underlying HTTP client (cloning is cheap).
    http: Client,

    /// Base URL for the API (e.g. `https://www.myrepairapp.com/api/v2`).
    base_url: String,

    /// API key for authentication.
    /// SECURITY: Never log this value!
    api_key: String,

    /// Retry policy applied to rate-limited requests.
    retry: RetryPolicy,
}

impl ShopClient {
    /// Creates a new client from configuration, without probing the
    /// service. Use [`ShopClient::connect`] to also validate the API key.
    ///
    /// # Errors
    ///
    /// Returns `WrenchError::HttpClient` if the HTTP client fails to
    /// initialize.
    pub fn new(config: &Config) -> Result<Self, WrenchError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(WrenchError::HttpClient)?;

        Ok(Self {
            http,
            base_url: Self::normalize_base_url(&config.base_url),
            api_key: config.api_key.clone(),
            retry: RetryPolicy::default(),
        })
    }

    /// Replaces the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Creates a client and probes the service to validate the API key.
    ///
    /// The probe is a GET on the inventory collection endpoint. A 401
    /// means the key was rejected and construction fails with
    /// [`WrenchError::Forbidden`]. A 405 is expected - the service
    /// refuses to list the entire inventory - and any other status is
    /// tolerated. A transport failure logs a warning but still yields a
    /// client, since the service may become reachable later.
    pub async fn connect(config: &Config) -> Result<Self, WrenchError> {
        let client = Self::new(config)?;
        client.probe().await?;
        Ok(client)
    }

    /// Probes the inventory collection endpoint to validate the API key.
    /// See [`ShopClient::connect`] for the exact semantics.
    pub async fn probe(&self) -> Result<(), WrenchError> {
        let url = format!("{}/inventory", self.base_url);
        match self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
        {
            Ok(response) => match response.status() {
                StatusCode::UNAUTHORIZED => Err(WrenchError::Forbidden),
                _ => Ok(()),
            },
            Err(e) => {
                tracing::warn!(
                    error = %WrenchError::sanitize_message(&e.to_string(), &self.api_key),
                    "failed to connect to MyRepairApp - are you connected to the internet?"
                );
                Ok(())
            }
        }
    }

    /// Normalizes the base URL to ensure it includes the API path.
    fn normalize_base_url(url: &str) -> String {
        let url = url.trim_end_matches('/');
        if url.ends_with("/api/v2") {
            url.to_string()
        } else if url.ends_with("/api") {
            format!("{}/v2", url)
        } else {
            format!("{}/api/v2", url)
        }
    }

    /// Searches the inventory.
    ///
    /// # Arguments
    ///
    /// * `query` - Free-text search (name, SKU, serial, ...)
    ///
    /// # Returns
    ///
    /// The matching items, each converted through
    /// [`InventoryItem::from_wire`]. An item with an invalid
    /// condition/category/type string fails the whole call with the
    /// validation fault naming the offending input.
    pub async fn search_inventory(&self, query: &str) -> Result<Vec<InventoryItem>, WrenchError> {
        let url = format!("{}/inventory/search", self.base_url);
        let response = self
            .request(Method::GET, &url, Some(&[("query", query)]), None)
            .await?;

        // The search endpoint answers with a bare JSON array.
        let entries: Vec<Value> = serde_json::from_value(response)?;
        entries.iter().map(InventoryItem::from_wire).collect()
    }

    /// Searches checkin tickets.
    ///
    /// # Arguments
    ///
    /// * `query` - Free-text search (ticket number, customer, ...)
    /// * `include_closed` - Whether closed tickets are included
    ///
    /// # Returns
    ///
    /// The tickets from the response envelope, with nested items and
    /// activities converted to typed objects.
    pub async fn search_tickets(
        &self,
        query: &str,
        include_closed: bool,
    ) -> Result<Vec<CheckInTicket>, WrenchError> {
        // The ticket endpoint takes its parameters embedded in the URL,
        // with `closed` spelled as a capitalized boolean string.
        let closed = if include_closed { "True" } else { "False" };
        let url = format!(
            "{}/checkin-ticket?query={}&closed={}",
            self.base_url,
            urlencoding::encode(query),
            closed
        );
        let response = self.request(Method::GET, &url, None, None).await?;

        #[derive(Debug, serde::Deserialize)]
        struct TicketSearchResponse {
            #[serde(default)]
            tickets: Vec<Value>,
        }

        let envelope: TicketSearchResponse = serde_json::from_value(response)?;
        envelope.tickets.iter().map(CheckInTicket::from_wire).collect()
    }

    /// Updates a record with a partial changed-fields mapping.
    ///
    /// Dispatches on the target's kind. Only inventory items can be
    /// updated today; passing a ticket surfaces
    /// [`WrenchError::UnsupportedUpdate`].
    ///
    /// # Returns
    ///
    /// The decoded JSON response from the service.
    pub async fn update_item(
        &self,
        target: UpdateTarget<'_>,
        changed: &serde_json::Map<String, Value>,
    ) -> Result<Value, WrenchError> {
        match target {
            UpdateTarget::Inventory(item) => self.patch_inventory(item, changed).await,
            UpdateTarget::Ticket(ticket) => {
                Err(WrenchError::unsupported_update(ticket.kind().to_string()))
            }
        }
    }

    /// PATCHes an inventory item.
    ///
    /// The changed-fields mapping is filtered down to keys that exist in
    /// the item's wire export; unknown keys are silently dropped before
    /// sending.
    async fn patch_inventory(
        &self,
        item: &InventoryItem,
        changed: &serde_json::Map<String, Value>,
    ) -> Result<Value, WrenchError> {
        let export = item.to_wire();
        let filtered: serde_json::Map<String, Value> = changed
            .iter()
            .filter(|(key, _)| export.contains_key(key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let Some(id) = item.item_id.as_deref() else {
            return Err(WrenchError::validation(
                "cannot update an inventory item without an id",
            ));
        };

        let url = format!("{}/inventory/{}", self.base_url, urlencoding::encode(id));
        self.request(Method::PATCH, &url, None, Some(Value::Object(filtered)))
            .await
    }

    /// Performs one HTTP exchange with the bounded 429 retry loop.
    ///
    /// Status mapping:
    /// - 200: decoded JSON body returned
    /// - 401: [`WrenchError::Forbidden`], no retry
    /// - 405: [`WrenchError::MethodNotAllowed`], no retry
    /// - 429: jittered backoff and retry while the budget lasts, then
    ///   [`WrenchError::TooManyRequests`]
    /// - 400: [`WrenchError::BadRequest`] with the decoded payload
    /// - 500: [`WrenchError::InternalServerError`] on reads; on the
    ///   update path the decoded body travels in a
    ///   [`WrenchError::BadRequest`]
    /// - anything else: [`WrenchError::UnexpectedStatus`]
    ///
    /// A transport-level failure surfaces as [`WrenchError::Transport`]
    /// immediately; stale responses are never returned.
    async fn request(
        &self,
        method: Method,
        url: &str,
        query: Option<&[(&str, &str)]>,
        body: Option<Value>,
    ) -> Result<Value, WrenchError> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            tracing::debug!(method = %method, url = %url, attempt = attempts, "requesting");

            let mut req = self
                .http
                .request(method.clone(), url)
                .header(API_KEY_HEADER, &self.api_key);
            if let Some(query) = query {
                req = req.query(query);
            }
            if let Some(ref body) = body {
                req = req.json(body);
            }

            let response = req.send().await.map_err(WrenchError::Transport)?;
            let status = response.status();

            match status {
                StatusCode::OK => {
                    let text = response.text().await.map_err(WrenchError::Transport)?;
                    return serde_json::from_str(&text).map_err(WrenchError::from);
                }
                StatusCode::UNAUTHORIZED => return Err(WrenchError::Forbidden),
                StatusCode::METHOD_NOT_ALLOWED => return Err(WrenchError::MethodNotAllowed),
                StatusCode::TOO_MANY_REQUESTS => {
                    if attempts >= max_attempts {
                        return Err(WrenchError::TooManyRequests { attempts });
                    }
                    let delay = self.retry.sample_delay();
                    tracing::warn!(
                        "too many requests - trying again in {:.2}s",
                        delay.as_secs_f64()
                    );
                    tokio::time::sleep(delay).await;
                }
                StatusCode::BAD_REQUEST => {
                    return Err(WrenchError::BadRequest {
                        payload: self.error_payload(response).await,
                    })
                }
                StatusCode::INTERNAL_SERVER_ERROR => {
                    // The update path surfaces the service's error body.
                    if method == Method::PATCH {
                        return Err(WrenchError::BadRequest {
                            payload: self.error_payload(response).await,
                        });
                    }
                    return Err(WrenchError::InternalServerError);
                }
                _ => {
                    let body = self.error_body(response).await;
                    return Err(WrenchError::UnexpectedStatus { status, body });
                }
            }
        }
    }

    /// Decodes an error response body as JSON, falling back to the raw
    /// (sanitized) text.
    async fn error_payload(&self, response: reqwest::Response) -> Value {
        let body = response.text().await.unwrap_or_default();
        let body = WrenchError::sanitize_message(&body, &self.api_key);
        serde_json::from_str(&body).unwrap_or(Value::String(body))
    }

    /// Reads an error response body as sanitized, truncated text.
    async fn error_body(&self, response: reqwest::Response) -> String {
        let body = response.text().await.unwrap_or_default();
        let body = WrenchError::sanitize_message(&body, &self.api_key);
        if body.len() > MAX_ERROR_BODY_LEN {
            format!("{}...[truncated]", &body[..MAX_ERROR_BODY_LEN])
        } else {
            body
        }
    }
}
