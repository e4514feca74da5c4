//! Request construction.
//!
//! Every client operation has a pure builder here that validates its
//! arguments and returns a fully-formed [`FhirRequest`]. Nothing in this
//! module performs I/O, so a validation failure can never reach the network.
//!
//! URLs are assembled by plain concatenation: `{base}/{type}/{id}`. Neither
//! the base URL nor the path segments are parsed or re-encoded.

use reqwest::Method;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;

use crate::auth::RequestOptions;
use crate::error::{self, ClientError, Result};
use crate::params::{FormEncoding, QueryParams, attach_query};

const JSON_CONTENT_TYPE: &str = "application/json";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Body of an outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    Form(String),
}

/// A request ready to be handed to a transport.
#[derive(Debug, Clone)]
pub struct FhirRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<RequestBody>,
}

impl FhirRequest {
    fn new(method: Method, url: String, headers: HeaderMap) -> Self {
        Self {
            method,
            url,
            headers,
            body: None,
        }
    }

    fn with_body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Header value as a string, for inspection.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

fn headers(options: &RequestOptions, content_type: Option<&'static str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    if let Some(ct) = content_type {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(ct));
    }
    options.apply(&mut headers)?;
    Ok(headers)
}

fn require(value: &str, message: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ClientError::argument(message));
    }
    Ok(())
}

fn require_id<'a>(id: Option<&'a str>, message: &str) -> Result<&'a str> {
    id.ok_or_else(|| ClientError::argument(message))
}

/// `null` and `false` both count as no resource.
fn require_resource(resource: &Value, message: &str) -> Result<()> {
    if matches!(resource, Value::Null | Value::Bool(false)) {
        return Err(ClientError::argument(message));
    }
    Ok(())
}

/// The resource's `resourceType`, when it is a non-empty string. Any other
/// JSON value is treated as missing.
pub fn resource_type(resource: &Value) -> Option<&str> {
    resource
        .get("resourceType")
        .and_then(Value::as_str)
        .filter(|rt| !rt.is_empty())
}

/// The resource's `id` rendered for a URL path. Absent and `null` give `None`;
/// an empty string is a valid id.
pub fn resource_id(resource: &Value) -> Option<String> {
    match resource.get("id") {
        None | Some(Value::Null) => None,
        Some(Value::String(id)) => Some(id.clone()),
        Some(other) => Some(other.to_string()),
    }
}

fn require_resource_type(resource: &Value) -> Result<&str> {
    resource_type(resource).ok_or_else(|| ClientError::schema(error::RESOURCE_TYPE_MISSING))
}

/// A transaction bundle is posted to the server root rather than `/Bundle`.
fn is_transaction_bundle(resource: &Value) -> bool {
    resource_type(resource) == Some("Bundle")
        && resource.get("type").and_then(Value::as_str) == Some("transaction")
}

/// GET an arbitrary URL, e.g. a bundle `next` link.
pub fn fetch_by_url(url: &str, params: &QueryParams, options: &RequestOptions) -> Result<FhirRequest> {
    require(url, error::FETCH_URL_MISSING)?;

    let url = attach_query(url.to_string(), &params.to_query_string());
    Ok(FhirRequest::new(Method::GET, url, headers(options, None)?))
}

/// GET `{base}/{type}/{id}`.
pub fn fetch_resource(
    fhir_base_url: &str,
    resource_type: &str,
    id: Option<&str>,
    params: &QueryParams,
    options: &RequestOptions,
) -> Result<FhirRequest> {
    require(fhir_base_url, error::FETCH_BASE_URL_MISSING)?;
    require(resource_type, error::FETCH_RESOURCE_TYPE_MISSING)?;
    let id = require_id(id, error::FETCH_ID_MISSING)?;

    let url = attach_query(
        format!("{fhir_base_url}/{resource_type}/{id}"),
        &params.to_query_string(),
    );
    Ok(FhirRequest::new(Method::GET, url, headers(options, None)?))
}

/// GET `{base}/{type}` with search parameters.
pub fn fetch_resources(
    fhir_base_url: &str,
    resource_type: &str,
    params: &QueryParams,
    options: &RequestOptions,
) -> Result<FhirRequest> {
    require(fhir_base_url, error::FETCH_BASE_URL_MISSING)?;
    require(resource_type, error::FETCH_RESOURCE_TYPE_MISSING)?;

    let url = attach_query(
        format!("{fhir_base_url}/{resource_type}"),
        &params.to_query_string(),
    );
    Ok(FhirRequest::new(Method::GET, url, headers(options, None)?))
}

/// POST `{base}/{type}/_search` with the parameters as a form body.
pub fn fetch_resources_post(
    fhir_base_url: &str,
    resource_type: &str,
    params: &QueryParams,
    options: &RequestOptions,
    encoding: FormEncoding,
) -> Result<FhirRequest> {
    require(fhir_base_url, error::FETCH_BASE_URL_MISSING)?;
    require(resource_type, error::FETCH_RESOURCE_TYPE_MISSING)?;

    let url = format!("{fhir_base_url}/{resource_type}/_search");
    let body = params.to_form_body(encoding);
    Ok(
        FhirRequest::new(Method::POST, url, headers(options, Some(FORM_CONTENT_TYPE))?)
            .with_body(RequestBody::Form(body)),
    )
}

/// POST a new resource to `{base}/{type}`, or a transaction bundle to `{base}/`.
pub fn submit_resource(
    fhir_base_url: &str,
    resource: &Value,
    options: &RequestOptions,
) -> Result<FhirRequest> {
    require(fhir_base_url, error::SUBMIT_BASE_URL_MISSING)?;
    require_resource(resource, error::SUBMIT_RESOURCE_MISSING)?;
    let resource_type = require_resource_type(resource)?;

    let url = if is_transaction_bundle(resource) {
        format!("{fhir_base_url}/")
    } else {
        format!("{fhir_base_url}/{resource_type}")
    };
    Ok(
        FhirRequest::new(Method::POST, url, headers(options, Some(JSON_CONTENT_TYPE))?)
            .with_body(RequestBody::Json(resource.clone())),
    )
}

/// POST a resource as-is to an arbitrary URL. `resourceType` is not checked.
pub fn submit_resource_to_url(
    url: &str,
    resource: &Value,
    options: &RequestOptions,
) -> Result<FhirRequest> {
    require(url, error::SUBMIT_URL_MISSING)?;
    require_resource(resource, error::SUBMIT_RESOURCE_MISSING)?;

    Ok(FhirRequest::new(
        Method::POST,
        url.to_string(),
        headers(options, Some(JSON_CONTENT_TYPE))?,
    )
    .with_body(RequestBody::Json(resource.clone())))
}

/// PUT `{base}/{type}/{id}`; the resource must carry its id.
pub fn update_resource(
    fhir_base_url: &str,
    resource: &Value,
    options: &RequestOptions,
) -> Result<FhirRequest> {
    require(fhir_base_url, error::SUBMIT_BASE_URL_MISSING)?;
    require_resource(resource, error::SUBMIT_RESOURCE_MISSING)?;
    let resource_type = require_resource_type(resource)?;
    let id = resource_id(resource).ok_or_else(|| ClientError::schema(error::UPDATE_ID_MISSING))?;

    let url = format!("{fhir_base_url}/{resource_type}/{id}");
    Ok(
        FhirRequest::new(Method::PUT, url, headers(options, Some(JSON_CONTENT_TYPE))?)
            .with_body(RequestBody::Json(resource.clone())),
    )
}

/// PUT `{base}/{type}?{params}` (conditional update). No id is required.
pub fn update_resource_by_url(
    fhir_base_url: &str,
    resource: &Value,
    params: &QueryParams,
    options: &RequestOptions,
) -> Result<FhirRequest> {
    require(fhir_base_url, error::SUBMIT_BASE_URL_MISSING)?;
    require_resource(resource, error::SUBMIT_RESOURCE_MISSING)?;
    let resource_type = require_resource_type(resource)?;

    let url = attach_query(
        format!("{fhir_base_url}/{resource_type}"),
        &params.to_query_string(),
    );
    Ok(
        FhirRequest::new(Method::PUT, url, headers(options, Some(JSON_CONTENT_TYPE))?)
            .with_body(RequestBody::Json(resource.clone())),
    )
}

/// DELETE `{base}/{type}/{id}` taken from the resource body.
pub fn delete_resource(
    fhir_base_url: &str,
    resource: &Value,
    options: &RequestOptions,
) -> Result<FhirRequest> {
    require(fhir_base_url, error::DELETE_BASE_URL_MISSING)?;
    require_resource(resource, error::DELETE_RESOURCE_MISSING)?;
    let resource_type = require_resource_type(resource)?;
    let id = resource_id(resource).ok_or_else(|| ClientError::schema(error::DELETE_ID_MISSING))?;

    let url = format!("{fhir_base_url}/{resource_type}/{id}");
    Ok(FhirRequest::new(
        Method::DELETE,
        url,
        headers(options, Some(JSON_CONTENT_TYPE))?,
    ))
}

/// DELETE `{base}/{type}/{id}`.
pub fn delete_resource_by_id(
    fhir_base_url: &str,
    resource_type: &str,
    id: Option<&str>,
    options: &RequestOptions,
) -> Result<FhirRequest> {
    require(fhir_base_url, error::DELETE_BASE_URL_MISSING)?;
    require(resource_type, error::DELETE_RESOURCE_TYPE_MISSING)?;
    let id = require_id(id, error::DELETE_ID_MISSING)?;

    let url = format!("{fhir_base_url}/{resource_type}/{id}");
    Ok(FhirRequest::new(
        Method::DELETE,
        url,
        headers(options, Some(JSON_CONTENT_TYPE))?,
    ))
}
