//! Shared request plumbing: URL joining, sending and status checks.

use std::time::Duration;

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::error::UpstreamError;

/// One upstream service: its name, base URL and the shared client.
#[derive(Debug, Clone)]
pub(crate) struct Endpoint {
    service: &'static str,
    client: reqwest::Client,
    base_url: String,
}

impl Endpoint {
    pub(crate) fn new(service: &'static str, client: reqwest::Client, base_url: &str) -> Self {
        Self {
            service,
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub(crate) fn service(&self) -> &'static str {
        self.service
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub(crate) fn get(&self, path: &str, timeout: Duration) -> RequestBuilder {
        self.client.get(self.url(path)).timeout(timeout)
    }

    pub(crate) fn post(&self, path: &str, timeout: Duration) -> RequestBuilder {
        self.client.post(self.url(path)).timeout(timeout)
    }

    /// Send `request` and fail on anything but a 2xx answer.
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, UpstreamError> {
        let response = request
            .send()
            .await
            .map_err(|source| UpstreamError::unreachable(self.service, source))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                service: self.service,
                status,
            });
        }
        Ok(response)
    }

    /// Send `request` and decode a JSON body.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, UpstreamError> {
        let response = self.send(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|source| UpstreamError::body(self.service, source))
    }
}
