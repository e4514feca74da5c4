use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::params::FormEncoding;

/// Client configuration.
///
/// Can be built in code with the `with_*` methods or deserialized, e.g. from
/// a TOML table:
///
/// ```toml
/// timeout_ms = 1500
/// user_agent = "my-app/1.0"
/// search_post_encoding = "unencoded"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Whole-request timeout in milliseconds. `None` leaves it to the transport (no timeout).
    pub timeout_ms: Option<u64>,

    /// `User-Agent` sent by the default transport.
    pub user_agent: String,

    /// Body encoding for POST `_search`.
    pub search_post_encoding: FormEncoding,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_ms: None,
            user_agent: format!("octofhir-client/{}", env!("CARGO_PKG_VERSION")),
            search_post_encoding: FormEncoding::default(),
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn with_search_post_encoding(mut self, encoding: FormEncoding) -> Self {
        self.search_post_encoding = encoding;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}
