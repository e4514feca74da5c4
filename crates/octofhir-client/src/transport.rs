//! The HTTP seam.
//!
//! [`HttpTransport`] is the only place a request leaves the process. The
//! default [`ReqwestTransport`] is backed by `reqwest`; tests and embedders can
//! supply their own implementation.

use async_trait::async_trait;

use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::request::{FhirRequest, RequestBody};
use crate::response::FhirResponse;

/// Executes a fully-built request.
///
/// Implementations must return `Err` for non-2xx responses as well as for
/// network failures; the client passes both through unchanged.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: FhirRequest) -> Result<FhirResponse, TransportError>;
}

/// Transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
        })
    }

    /// Wraps an existing client, keeping its pool and settings.
    pub fn from_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: FhirRequest) -> Result<FhirResponse, TransportError> {
        let FhirRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let mut builder = self.http.request(method, &url).headers(headers);
        builder = match body {
            Some(RequestBody::Json(value)) => builder.json(&value),
            Some(RequestBody::Form(form)) => builder.body(form),
            None => builder,
        };

        let resp = builder.send().await?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let text = resp.text().await?;
        let response = FhirResponse::from_text(status, headers, &text);

        if !status.is_success() {
            return Err(TransportError::Status {
                status,
                response: Box::new(response),
            });
        }
        Ok(response)
    }
}
