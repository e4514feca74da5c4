use reqwest::StatusCode;
use thiserror::Error;

use crate::response::FhirResponse;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors raised by client operations.
///
/// `Argument` and `Schema` are raised before any request is sent. Everything
/// the transport reports is passed through as `Transport` without translation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A required argument (base URL, URL, resource, resource type or id) is missing.
    #[error("{0}")]
    Argument(String),

    /// A supplied resource lacks `resourceType`, or `id` where one is required.
    #[error("{0}")]
    Schema(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ClientError {
    /// Create a new Argument error
    pub fn argument(message: impl Into<String>) -> Self {
        Self::Argument(message.into())
    }

    /// Create a new Schema error
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }

    pub fn is_argument(&self) -> bool {
        matches!(self, Self::Argument(_))
    }

    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema(_))
    }

    /// Returns the HTTP status when the server answered with a non-success code.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Transport(TransportError::Status { status, .. }) => Some(*status),
            Self::Transport(TransportError::Request(e)) => e.status(),
            _ => None,
        }
    }
}

/// Failures surfaced by an [`HttpTransport`](crate::transport::HttpTransport).
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection, TLS, timeout or body read failure reported by reqwest.
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status. The full response is kept.
    #[error("HTTP error: status {status}")]
    Status {
        status: StatusCode,
        response: Box<FhirResponse>,
    },

    /// Failure reported by a custom transport implementation.
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    /// The server response attached to a status failure.
    pub fn response(&self) -> Option<&FhirResponse> {
        match self {
            Self::Status { response, .. } => Some(response),
            _ => None,
        }
    }
}

// Messages below are part of the public contract: callers match on them.

pub(crate) const FETCH_URL_MISSING: &str =
    "Fetching the resource(s) failed because the given url was null or undefined";
pub(crate) const FETCH_BASE_URL_MISSING: &str =
    "Fetching the resources failed because the given fhirBaseUrl was null or undefined";
pub(crate) const FETCH_RESOURCE_TYPE_MISSING: &str =
    "Fetching the resources failed because the given resourceType was null or undefined";
pub(crate) const FETCH_ID_MISSING: &str =
    "Fetching the resource failed because the given id was null or undefined";

pub(crate) const SUBMIT_BASE_URL_MISSING: &str =
    "Resource was not submitted because the given fhirBaseUrl was null or undefined";
pub(crate) const SUBMIT_URL_MISSING: &str =
    "Resource was not submitted because the given url was null or undefined";
pub(crate) const SUBMIT_RESOURCE_MISSING: &str =
    "Resource was not submitted because the given resource was null or undefined";
pub(crate) const UPDATE_ID_MISSING: &str =
    "Can not update resource, resource body must contain an ID element for update (PUT) operation";

pub(crate) const DELETE_BASE_URL_MISSING: &str =
    "Resource was not deleted because the given fhirBaseUrl was null or undefined";
pub(crate) const DELETE_RESOURCE_MISSING: &str =
    "Resource was not deleted because the given resource was null or undefined";
pub(crate) const DELETE_RESOURCE_TYPE_MISSING: &str =
    "Resource was not deleted because the given resourceType was null or undefined";
pub(crate) const DELETE_ID_MISSING: &str =
    "Can not delete resource, resource body must contain an ID element for delete (DELETE) operation";

pub(crate) const RESOURCE_TYPE_MISSING: &str =
    "Invalid JSON content detected, missing required element: 'resourceType'";
