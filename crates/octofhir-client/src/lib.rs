//! Thin async client for FHIR REST servers.
//!
//! The crate builds request URLs and headers, encodes search parameters,
//! sends requests through a pluggable [`HttpTransport`] and flattens search
//! bundles into plain resource lists. Resources are opaque
//! `serde_json::Value`s; only `resourceType` and `id` are ever inspected.
//!
//! # Example
//!
//! ```ignore
//! use octofhir_client::{FhirApi, QueryParams, RequestOptions, map_fhir_response};
//!
//! let api = FhirApi::new()?;
//! let base = "https://fhir.example.org/baseR4";
//!
//! let patient = api
//!     .fetch_resource(base, "Patient", Some("209"), &QueryParams::none(), &RequestOptions::bearer(token))
//!     .await?;
//!
//! let search = api
//!     .fetch_patients(base, &SearchParams::new().with("name", "Smith").into(), &RequestOptions::new())
//!     .await?;
//! let patients = map_fhir_response(&search);
//! ```

pub mod auth;
pub mod bundle;
pub mod client;
pub mod config;
pub mod error;
pub mod params;
pub mod request;
pub mod resources;
pub mod response;
pub mod transport;

pub use auth::RequestOptions;
pub use bundle::{map_fhir_data, map_fhir_response};
pub use client::FhirApi;
pub use config::ClientConfig;
pub use error::{ClientError, Result, TransportError};
pub use params::{FormEncoding, ParamValue, QueryParams, SearchParams};
pub use request::{FhirRequest, RequestBody};
pub use response::FhirResponse;
pub use transport::{HttpTransport, ReqwestTransport};
