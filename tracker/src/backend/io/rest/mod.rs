//! # REST Repository Client
//!
//! Async HTTP client for the tracker backend (`/api/v1/...`).
//!
//! ## Key Responsibilities
//!
//! - **CRUD**: one module per entity (`baby_apis`, `feeding_apis`, ...) with
//!   typed list/get/create/update/delete calls over the shared DTOs
//! - **Errors**: every failure becomes an [`ApiError`] carrying the HTTP
//!   status and the backend's `detail` message
//! - **Cancellation**: reads race a [`CancelToken`] and resolve to
//!   [`ApiError::Cancelled`] once it fires
//! - **Mapping**: `mappers` turn DTOs into domain models and drop records
//!   whose timestamps cannot be parsed
//!
//! Collection routes end in a trailing slash (`/api/v1/feeding/`), item
//! routes do not (`/api/v1/feeding/{id}`).

pub mod baby_apis;
pub mod diaper_apis;
pub mod error;
pub mod feeding_apis;
pub mod growth_apis;
pub mod mappers;
pub mod sleep_apis;

use log::{debug, info, warn};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shared::{ActivityListQuery, HealthStatus};
use std::time::Duration;

pub use error::ApiError;

use crate::backend::config::TrackerConfig;
use crate::backend::storage::CancelToken;

const API_PREFIX: &str = "api/v1";

/// HTTP client bound to one backend base URL
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
}

impl RestClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &TrackerConfig) -> Result<Self, ApiError> {
        Self::new(&config.api_base_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, resource: &str) -> String {
        format!("{}/{}/{}/", self.base_url, API_PREFIX, resource)
    }

    fn item_url(&self, resource: &str, id: &str) -> String {
        format!("{}/{}/{}/{}", self.base_url, API_PREFIX, resource, id)
    }

    /// Send a request and turn non-2xx responses into [`ApiError::Status`]
    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_status(status.as_u16(), &body);
        if status == StatusCode::NOT_FOUND {
            debug!("Backend returned 404: {}", err.user_message());
        } else {
            warn!("Backend rejected request with {}: {}", status, err.user_message());
        }
        Err(err)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(format!("{} in body: {}", e, truncate(&body))))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        Self::decode(response).await
    }

    /// Run a read unless or until the token fires
    async fn cancellable<T, F>(&self, cancel: &CancelToken, fut: F) -> Result<T, ApiError>
    where
        F: std::future::Future<Output = Result<T, ApiError>>,
    {
        if cancel.is_cancelled() {
            return Err(ApiError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ApiError::Cancelled),
            result = fut => result,
        }
    }

    pub(crate) async fn list<T: DeserializeOwned>(
        &self,
        resource: &str,
        query: &ActivityListQuery,
        cancel: &CancelToken,
    ) -> Result<Vec<T>, ApiError> {
        let request = self.http.get(self.collection_url(resource)).query(query);
        let items: Vec<Value> = self.cancellable(cancel, self.send_json(request)).await?;
        Ok(decode_items(resource, items))
    }

    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        resource: &str,
        id: &str,
        cancel: &CancelToken,
    ) -> Result<T, ApiError> {
        let request = self.http.get(self.item_url(resource, id));
        self.cancellable(cancel, self.send_json(request)).await
    }

    pub(crate) async fn create<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        resource: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        info!("POST /{}/{}/", API_PREFIX, resource);
        let request = self.http.post(self.collection_url(resource)).json(body);
        self.send_json(request).await
    }

    pub(crate) async fn update<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        resource: &str,
        id: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        info!("PUT /{}/{}/{}", API_PREFIX, resource, id);
        let request = self.http.put(self.item_url(resource, id)).json(body);
        self.send_json(request).await
    }

    pub(crate) async fn remove(&self, resource: &str, id: &str) -> Result<(), ApiError> {
        info!("DELETE /{}/{}/{}", API_PREFIX, resource, id);
        self.send(self.http.delete(self.item_url(resource, id))).await?;
        Ok(())
    }

    /// `GET /health` on the backend root
    pub async fn health_check(&self) -> Result<HealthStatus, ApiError> {
        let request = self.http.get(format!("{}/health", self.base_url));
        self.send_json(request).await
    }
}

/// Decode each element of a collection on its own, so one record the client
/// does not understand is dropped instead of failing the whole list
pub(crate) fn decode_items<T: DeserializeOwned>(resource: &str, items: Vec<Value>) -> Vec<T> {
    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Dropping undecodable {} item: {}", resource, e);
                None
            }
        })
        .collect();
    if decoded.len() < total {
        warn!("Decoded {} of {} {} items", decoded.len(), total, resource);
    }
    decoded
}

fn truncate(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
