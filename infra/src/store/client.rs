//! HTTP client for the managed store
//!
//! One `reqwest::Client` shared by every repository, with the
//! service-role headers attached to each request. Non-2xx responses
//! surface as `DomainError::StoreUnavailable`; the body is logged, not
//! returned to callers.

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use kas_core::errors::DomainError;
use kas_shared::config::StoreConfig;

use crate::InfrastructureError;

pub struct StoreClient {
    http: reqwest::Client,
    config: StoreConfig,
}

impl StoreClient {
    /// Build a client with the configured request timeout
    pub fn new(config: StoreConfig) -> Result<Self, InfrastructureError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.config.service_role_key)
            .bearer_auth(&self.config.service_role_key)
    }

    /// Request against a PostgREST table endpoint
    pub fn table(&self, method: Method, table: &str) -> RequestBuilder {
        self.authed(self.http.request(method, self.config.table_url(table)))
    }

    /// Request against the GoTrue admin API
    pub fn auth_admin(&self, method: Method, path: &str) -> RequestBuilder {
        self.authed(self.http.request(method, self.config.auth_admin_url(path)))
    }

    /// Request against the public GoTrue API
    pub fn auth(&self, method: Method, path: &str) -> RequestBuilder {
        self.authed(self.http.request(method, self.config.auth_url(path)))
    }

    /// Send a request whose response body is a JSON array of rows
    pub async fn rows<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        context: &'static str,
    ) -> Result<Vec<T>, DomainError> {
        self.json(builder, context).await
    }

    /// Send a request whose response body is a single JSON value
    pub async fn json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        context: &'static str,
    ) -> Result<T, DomainError> {
        let response = builder
            .send()
            .await
            .map_err(|e| store_unavailable(context, &e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(store_failure(context, status, &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| store_unavailable(context, &e.to_string()))
    }
}

fn store_unavailable(context: &'static str, detail: &str) -> DomainError {
    tracing::error!(
        context = context,
        detail = detail,
        event = "store_request_failed",
        "Managed store request failed"
    );
    DomainError::StoreUnavailable {
        message: context.to_string(),
    }
}

fn store_failure(context: &'static str, status: StatusCode, body: &str) -> DomainError {
    tracing::error!(
        context = context,
        status = %status,
        body = body,
        event = "store_request_failed",
        "Managed store returned an error status"
    );
    DomainError::StoreUnavailable {
        message: format!("{} ({})", context, status),
    }
}
