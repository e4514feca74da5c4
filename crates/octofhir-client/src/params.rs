//! FHIR query parameters and their wire encodings.
//!
//! Parameters come in two shapes:
//! - [`QueryParams::Raw`] - an already-encoded query string, sent verbatim
//! - [`QueryParams::Structured`] - an ordered key/value map whose values may be
//!   a single scalar or a sequence
//!
//! Structured parameters are attached to GET/PUT URLs with repeat-key array
//! encoding (`status=a&status=b`). The body of a POST `_search` is encoded
//! according to a [`FormEncoding`] chosen in the client configuration.
//!
//! # Example
//!
//! ```
//! use octofhir_client::params::{QueryParams, SearchParams};
//!
//! let params = SearchParams::new()
//!     .with("status", vec!["a", "b"])
//!     .with("_count", 10);
//! let query = QueryParams::from(params).to_query_string();
//! assert_eq!(query, "status=a&status=b&_count=10");
//! ```

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Value of a single search parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    One(String),
    Many(Vec<String>),
}

impl ParamValue {
    /// Iterates the individual values (one for `One`, each element for `Many`).
    pub fn values(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            Self::One(v) => std::slice::from_ref(v),
            Self::Many(vs) => vs,
        };
        slice.iter().map(String::as_str)
    }

    /// Comma-joined rendering, as a form container stringifies a sequence.
    pub fn joined(&self) -> String {
        match self {
            Self::One(v) => v.clone(),
            Self::Many(vs) => vs.join(","),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::One(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::One(v)
    }
}

impl From<&String> for ParamValue {
    fn from(v: &String) -> Self {
        Self::One(v.clone())
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::One(v.to_string())
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ParamValue {
                fn from(v: $t) -> Self {
                    Self::One(v.to_string())
                }
            }
        )*
    };
}

impl_from_integer!(i32, i64, u32, u64, usize);

impl<T: Into<String>> From<Vec<T>> for ParamValue {
    fn from(vs: Vec<T>) -> Self {
        Self::Many(vs.into_iter().map(Into::into).collect())
    }
}

/// Insertion-ordered map of search parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    inner: IndexMap<String, ParamValue>,
}

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, replacing any previous value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.inner.insert(key.into(), value.into());
    }

    /// Adds a value to `key`, turning an existing single value into a sequence.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        match self.inner.entry(key.into()) {
            indexmap::map::Entry::Occupied(mut slot) => {
                let current = slot.get_mut();
                match current {
                    ParamValue::Many(values) => values.push(value),
                    ParamValue::One(existing) => {
                        let first = std::mem::take(existing);
                        *current = ParamValue::Many(vec![first, value]);
                    }
                }
            }
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(ParamValue::One(value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.inner.get(key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Repeat-key encoding: `status=a&status=b`, values form-escaped.
    pub fn to_repeat_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.iter() {
            for v in value.values() {
                serializer.append_pair(key, v);
            }
        }
        serializer.finish()
    }

    /// One pair per key, sequences comma-joined into a single escaped value.
    pub fn to_url_search_params(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.iter() {
            serializer.append_pair(key, &value.joined());
        }
        serializer.finish()
    }

    /// Repeat-key pairs with neither index suffixes nor escaping.
    pub fn to_unencoded(&self) -> String {
        self.iter()
            .flat_map(|(key, value)| value.values().map(move |v| format!("{key}={v}")))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K, V> FromIterator<(K, V)> for SearchParams
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// Query parameters handed to an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryParams {
    /// Pre-encoded query string, used as-is. A leading `?` is ignored.
    Raw(String),
    Structured(SearchParams),
}

impl Default for QueryParams {
    fn default() -> Self {
        Self::Structured(SearchParams::default())
    }
}

impl QueryParams {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn raw(query: impl Into<String>) -> Self {
        Self::Raw(query.into())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Raw(q) => q.trim_start_matches('?').is_empty(),
            Self::Structured(p) => p.is_empty(),
        }
    }

    /// Encoding used for URL query strings.
    pub fn to_query_string(&self) -> String {
        match self {
            Self::Raw(q) => q.trim_start_matches('?').to_string(),
            Self::Structured(p) => p.to_repeat_query(),
        }
    }

    /// Encoding used for a form-encoded POST body.
    pub fn to_form_body(&self, encoding: FormEncoding) -> String {
        match self {
            Self::Raw(q) => q.trim_start_matches('?').to_string(),
            Self::Structured(p) => match encoding {
                FormEncoding::UrlSearchParams => p.to_url_search_params(),
                FormEncoding::Unencoded => p.to_unencoded(),
            },
        }
    }
}

impl From<SearchParams> for QueryParams {
    fn from(p: SearchParams) -> Self {
        Self::Structured(p)
    }
}

impl From<&str> for QueryParams {
    fn from(q: &str) -> Self {
        Self::Raw(q.to_string())
    }
}

impl From<String> for QueryParams {
    fn from(q: String) -> Self {
        Self::Raw(q)
    }
}

/// Appends an encoded query to `url`, joining with `&` when the URL already has one.
pub(crate) fn attach_query(url: String, query: &str) -> String {
    if query.is_empty() {
        return url;
    }
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}{query}")
}

/// How search parameters are written into the body of a POST `_search`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormEncoding {
    /// One escaped pair per key; sequences are comma-joined.
    #[default]
    UrlSearchParams,
    /// Repeat-key pairs, no index suffixes, no escaping.
    Unencoded,
}

impl fmt::Display for FormEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UrlSearchParams => f.write_str("url-search-params"),
            Self::Unencoded => f.write_str("unencoded"),
        }
    }
}

impl FromStr for FormEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "url-search-params" => Ok(Self::UrlSearchParams),
            "unencoded" => Ok(Self::Unencoded),
            other => Err(format!(
                "Unknown form encoding: {other}. Expected url-search-params or unencoded"
            )),
        }
    }
}
