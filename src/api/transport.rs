//! HTTP transport: exactly one request/response per backend operation.
//!
//! No retries and no cancellation. Without a configured timeout a hung
//! backend call waits indefinitely.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::dto::common_dto::detail_message;
use super::operation::Operation;
use crate::error::{BackendFailure, ClientError, ConfigError};

/// Thin wrapper around [`reqwest::Client`] bound to one backend.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base: String,
}

impl HttpTransport {
    /// Creates a transport for the backend at `api_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the HTTP client cannot be
    /// built (e.g. TLS backend initialization failure).
    pub fn new(api_url: &Url, timeout: Option<Duration>) -> Result<Self, ConfigError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            base: api_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Full URL for `operation`.
    #[must_use]
    pub fn endpoint(&self, operation: Operation) -> String {
        format!("{}{}", self.base, operation.path())
    }

    /// Sends `operation` without a body.
    ///
    /// # Errors
    ///
    /// Returns the operation's [`ClientError`] on any failure.
    pub async fn send<R>(&self, operation: Operation) -> Result<R, ClientError>
    where
        R: DeserializeOwned,
    {
        let request = self
            .client
            .request(operation.method(), self.endpoint(operation));
        self.execute(operation, request).await
    }

    /// Sends `operation` with `body` encoded as JSON.
    ///
    /// # Errors
    ///
    /// Returns the operation's [`ClientError`] on any failure.
    pub async fn send_json<B, R>(&self, operation: Operation, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self
            .client
            .request(operation.method(), self.endpoint(operation))
            .json(body);
        self.execute(operation, request).await
    }

    async fn execute<R>(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<R, ClientError>
    where
        R: DeserializeOwned,
    {
        let response = request.send().await.map_err(|e| {
            reject(
                operation,
                BackendFailure::Transport {
                    reason: e.to_string(),
                },
            )
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            reject(
                operation,
                BackendFailure::Transport {
                    reason: e.to_string(),
                },
            )
        })?;

        if !status.is_success() {
            return Err(reject(
                operation,
                BackendFailure::Backend {
                    status: status.as_u16(),
                    detail: detail_message(&body),
                },
            ));
        }

        // Empty success bodies decode as `{}` so lenient acks still resolve.
        let payload: &[u8] = if body.is_empty() { b"{}" } else { &body };
        let decoded = serde_json::from_slice(payload).map_err(|e| {
            reject(
                operation,
                BackendFailure::Decode {
                    reason: e.to_string(),
                },
            )
        })?;

        tracing::debug!(
            operation = operation.name(),
            status = status.as_u16(),
            "backend call succeeded"
        );
        Ok(decoded)
    }
}

/// Logs `failure` and collapses it into the caller-facing error.
fn reject(operation: Operation, failure: BackendFailure) -> ClientError {
    tracing::warn!(operation = operation.name(), %failure, "backend call failed");
    failure.into_client_error(operation)
}
