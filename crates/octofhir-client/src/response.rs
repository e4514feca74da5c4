use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde_json::Value;

/// HTTP response as returned by the transport.
///
/// The body is decoded as JSON when possible. An empty body becomes
/// `Value::Null` and anything that is not JSON is kept as `Value::String`.
#[derive(Debug, Clone)]
pub struct FhirResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl FhirResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Value) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Builds a response from raw body text.
    pub fn from_text(status: StatusCode, headers: HeaderMap, text: &str) -> Self {
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
        };
        Self::new(status, headers, body)
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// `resourceType` of the body, if the body is a resource.
    pub fn resource_type(&self) -> Option<&str> {
        self.body.get("resourceType").and_then(Value::as_str)
    }

    /// Value of the `Location` header set by create and conditional update.
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    pub fn into_body(self) -> Value {
        self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderValue, LOCATION};
    use serde_json::json;

    #[test]
    fn test_from_text_parses_json() {
        let resp = FhirResponse::from_text(
            StatusCode::OK,
            HeaderMap::new(),
            r#"{"resourceType":"Patient","id":"209"}"#,
        );
        assert_eq!(resp.body, json!({"resourceType": "Patient", "id": "209"}));
        assert_eq!(resp.resource_type(), Some("Patient"));
        assert!(resp.is_success());
    }

    #[test]
    fn test_from_text_empty_is_null() {
        let resp = FhirResponse::from_text(StatusCode::NO_CONTENT, HeaderMap::new(), "");
        assert_eq!(resp.body, Value::Null);
        assert_eq!(resp.resource_type(), None);
    }

    #[test]
    fn test_from_text_keeps_non_json() {
        let resp = FhirResponse::from_text(StatusCode::OK, HeaderMap::new(), "<html/>");
        assert_eq!(resp.body, Value::String("<html/>".into()));
    }

    #[test]
    fn test_location_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            LOCATION,
            HeaderValue::from_static("https://h/fhir/Patient/1/_history/1"),
        );
        let resp = FhirResponse::new(StatusCode::CREATED, headers, Value::Null);
        assert_eq!(resp.location(), Some("https://h/fhir/Patient/1/_history/1"));
    }
}
