//! Shortcuts for commonly fetched resource types.

use crate::auth::RequestOptions;
use crate::client::FhirApi;
use crate::error::Result;
use crate::params::QueryParams;
use crate::response::FhirResponse;
use crate::transport::HttpTransport;

impl<T: HttpTransport> FhirApi<T> {
    /// Fetches the server's CapabilityStatement from `{base}/metadata`.
    pub async fn fetch_conformance_statement(
        &self,
        fhir_base_url: &str,
        params: &QueryParams,
        options: &RequestOptions,
    ) -> Result<FhirResponse> {
        self.fetch_resources(fhir_base_url, "metadata", params, options)
            .await
    }

    pub async fn fetch_patient(
        &self,
        fhir_base_url: &str,
        id: Option<&str>,
        params: &QueryParams,
        options: &RequestOptions,
    ) -> Result<FhirResponse> {
        self.fetch_resource(fhir_base_url, "Patient", id, params, options)
            .await
    }

    pub async fn fetch_patients(
        &self,
        fhir_base_url: &str,
        params: &QueryParams,
        options: &RequestOptions,
    ) -> Result<FhirResponse> {
        self.fetch_resources(fhir_base_url, "Patient", params, options)
            .await
    }

    pub async fn fetch_questionnaire(
        &self,
        fhir_base_url: &str,
        id: Option<&str>,
        params: &QueryParams,
        options: &RequestOptions,
    ) -> Result<FhirResponse> {
        self.fetch_resource(fhir_base_url, "Questionnaire", id, params, options)
            .await
    }

    pub async fn fetch_questionnaires(
        &self,
        fhir_base_url: &str,
        params: &QueryParams,
        options: &RequestOptions,
    ) -> Result<FhirResponse> {
        self.fetch_resources(fhir_base_url, "Questionnaire", params, options)
            .await
    }

    pub async fn fetch_value_set(
        &self,
        fhir_base_url: &str,
        id: Option<&str>,
        params: &QueryParams,
        options: &RequestOptions,
    ) -> Result<FhirResponse> {
        self.fetch_resource(fhir_base_url, "ValueSet", id, params, options)
            .await
    }

    pub async fn fetch_value_sets(
        &self,
        fhir_base_url: &str,
        params: &QueryParams,
        options: &RequestOptions,
    ) -> Result<FhirResponse> {
        self.fetch_resources(fhir_base_url, "ValueSet", params, options)
            .await
    }
}
