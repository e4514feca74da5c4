//! Flattening of search bundles into plain resource lists.
//!
//! ```
//! use octofhir_client::bundle::map_fhir_data;
//! use serde_json::json;
//!
//! let bundle = json!({
//!     "resourceType": "Bundle",
//!     "type": "searchset",
//!     "total": 2,
//!     "entry": [
//!         { "fullUrl": "https://h/fhir/Patient/6", "resource": { "resourceType": "Patient", "id": "6" } },
//!         { "fullUrl": "https://h/fhir/Patient/8", "resource": { "resourceType": "Patient", "id": "8" } }
//!     ]
//! });
//!
//! let patients = map_fhir_data(&bundle);
//! assert_eq!(patients, vec![
//!     json!({ "resourceType": "Patient", "id": "6" }),
//!     json!({ "resourceType": "Patient", "id": "8" }),
//! ]);
//! ```

use serde_json::Value;

use crate::response::FhirResponse;

/// Maps a bundle to the `resource` of each entry, in entry order.
///
/// Returns an empty list when `data` has no `entry` array. Entries without a
/// `resource` yield `Value::Null` so positions stay aligned with `entry`.
pub fn map_fhir_data(data: &Value) -> Vec<Value> {
    let Some(entries) = data.get("entry").and_then(Value::as_array) else {
        return Vec::new();
    };
    entries
        .iter()
        .map(|entry| entry.get("resource").cloned().unwrap_or(Value::Null))
        .collect()
}

/// Maps the body of a search response. See [`map_fhir_data`].
pub fn map_fhir_response(response: &FhirResponse) -> Vec<Value> {
    map_fhir_data(&response.body)
}
