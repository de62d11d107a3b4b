//! Typed DocuChat API client
//!
//! One submodule per backend resource, each adding methods to [`ApiClient`].
//! Every call goes through the [`AuthPipeline`], so callers only deal with
//! the final outcome.

pub mod auth;
pub mod chunks;
pub mod pdfs;
pub mod prompt;
pub mod rag;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::events::SessionEvents;
use crate::pipeline::AuthPipeline;
use crate::token::{MemoryTokenStorage, TokenStorage, TokenStore};
use crate::transport::{self, ApiRequest, Transport};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// DocuChat API client
#[derive(Clone, Debug)]
pub struct ApiClient {
    pipeline: AuthPipeline,
}

impl ApiClient {
    /// Client for `base_url` with in-memory token storage
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.pipeline.transport().base_url()
    }

    pub const fn tokens(&self) -> &TokenStore {
        self.pipeline.tokens()
    }

    pub const fn events(&self) -> &SessionEvents {
        self.pipeline.events()
    }

    pub const fn pipeline(&self) -> &AuthPipeline {
        &self.pipeline
    }

    /// Send a request through the pipeline and decode the JSON response
    pub async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        let response = self.pipeline.send(&request).await?;
        transport::decode_json(response).await
    }
}

/// Builder for [`ApiClient`]
#[derive(Default)]
pub struct ApiClientBuilder {
    config: ClientConfig,
    storage: Option<Arc<dyn TokenStorage>>,
    events: Option<SessionEvents>,
}

impl ApiClientBuilder {
    /// Start from a full configuration
    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the base URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Durable slot for the bearer token
    #[must_use]
    pub fn token_storage(mut self, storage: Arc<dyn TokenStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Share an existing event hub
    #[must_use]
    pub fn events(mut self, events: SessionEvents) -> Self {
        self.events = Some(events);
        self
    }

    /// Build the client, restoring any persisted token
    pub fn build(self) -> Result<ApiClient, ClientError> {
        let transport = Transport::new(&self.config)?;
        let storage = self
            .storage
            .unwrap_or_else(|| Arc::new(MemoryTokenStorage::new()));
        let tokens = TokenStore::open(storage);
        let events = self.events.unwrap_or_default();

        Ok(ApiClient {
            pipeline: AuthPipeline::new(transport, tokens, events),
        })
    }
}
