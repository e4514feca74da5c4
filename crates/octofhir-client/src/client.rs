use serde_json::Value;

use crate::auth::RequestOptions;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::params::QueryParams;
use crate::request::{self, FhirRequest};
use crate::response::FhirResponse;
use crate::transport::{HttpTransport, ReqwestTransport};

/// Async FHIR REST client.
///
/// Holds no per-call state: every operation takes the server base URL and
/// its own [`RequestOptions`], so one instance can be shared freely across
/// tasks. Validation errors are returned before the transport is invoked;
/// transport errors are returned unchanged.
pub struct FhirApi<T: HttpTransport = ReqwestTransport> {
    transport: T,
    config: ClientConfig,
}

impl FhirApi<ReqwestTransport> {
    /// Creates a client with the default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self { transport, config })
    }
}

impl<T: HttpTransport> FhirApi<T> {
    pub fn with_transport(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn send(&self, request: FhirRequest) -> Result<FhirResponse> {
        tracing::debug!(method = %request.method, url = %request.url, "Sending FHIR request");
        let method = request.method.clone();
        let url = request.url.clone();

        match self.transport.execute(request).await {
            Ok(response) => {
                tracing::debug!(%method, %url, status = %response.status, "FHIR request completed");
                Ok(response)
            }
            Err(e) => {
                tracing::warn!("FHIR request {} {} failed: {}", method, url, e);
                Err(e.into())
            }
        }
    }

    /// Fetches resource(s) from an absolute URL, e.g. a bundle's `next` link.
    pub async fn fetch_by_url(
        &self,
        url: &str,
        params: &QueryParams,
        options: &RequestOptions,
    ) -> Result<FhirResponse> {
        let request = request::fetch_by_url(url, params, options)?;
        self.send(request).await
    }

    /// Reads `{base}/{type}/{id}`. `id` of `None` is rejected, `Some("")` is sent.
    pub async fn fetch_resource(
        &self,
        fhir_base_url: &str,
        resource_type: &str,
        id: Option<&str>,
        params: &QueryParams,
        options: &RequestOptions,
    ) -> Result<FhirResponse> {
        let request = request::fetch_resource(fhir_base_url, resource_type, id, params, options)?;
        self.send(request).await
    }

    /// Searches `{base}/{type}` with a GET.
    pub async fn fetch_resources(
        &self,
        fhir_base_url: &str,
        resource_type: &str,
        params: &QueryParams,
        options: &RequestOptions,
    ) -> Result<FhirResponse> {
        let request = request::fetch_resources(fhir_base_url, resource_type, params, options)?;
        self.send(request).await
    }

    /// Searches `{base}/{type}/_search` with a form-encoded POST.
    ///
    /// The body encoding comes from [`ClientConfig::search_post_encoding`].
    pub async fn fetch_resources_post(
        &self,
        fhir_base_url: &str,
        resource_type: &str,
        params: &QueryParams,
        options: &RequestOptions,
    ) -> Result<FhirResponse> {
        let request = request::fetch_resources_post(
            fhir_base_url,
            resource_type,
            params,
            options,
            self.config.search_post_encoding,
        )?;
        self.send(request).await
    }

    /// Creates a resource. Transaction bundles are posted to the server root.
    pub async fn submit_resource(
        &self,
        fhir_base_url: &str,
        resource: &Value,
        options: &RequestOptions,
    ) -> Result<FhirResponse> {
        let request = request::submit_resource(fhir_base_url, resource, options)?;
        self.send(request).await
    }

    /// Posts a resource unchanged to `url`.
    pub async fn submit_resource_to_url(
        &self,
        url: &str,
        resource: &Value,
        options: &RequestOptions,
    ) -> Result<FhirResponse> {
        let request = request::submit_resource_to_url(url, resource, options)?;
        self.send(request).await
    }

    /// Replaces `{base}/{type}/{id}` with the given resource.
    pub async fn update_resource(
        &self,
        fhir_base_url: &str,
        resource: &Value,
        options: &RequestOptions,
    ) -> Result<FhirResponse> {
        let request = request::update_resource(fhir_base_url, resource, options)?;
        self.send(request).await
    }

    /// Conditional update: PUT to `{base}/{type}` with the identifying query.
    pub async fn update_resource_by_url(
        &self,
        fhir_base_url: &str,
        resource: &Value,
        params: &QueryParams,
        options: &RequestOptions,
    ) -> Result<FhirResponse> {
        let request = request::update_resource_by_url(fhir_base_url, resource, params, options)?;
        self.send(request).await
    }

    pub async fn delete_resource(
        &self,
        fhir_base_url: &str,
        resource: &Value,
        options: &RequestOptions,
    ) -> Result<FhirResponse> {
        let request = request::delete_resource(fhir_base_url, resource, options)?;
        self.send(request).await
    }

    pub async fn delete_resource_by_id(
        &self,
        fhir_base_url: &str,
        resource_type: &str,
        id: Option<&str>,
        options: &RequestOptions,
    ) -> Result<FhirResponse> {
        let request = request::delete_resource_by_id(fhir_base_url, resource_type, id, options)?;
        self.send(request).await
    }
}
