use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::error::TransportError;

/// Per-call authentication options.
///
/// `token` is sent as `Authorization: Bearer <token>`, or as
/// `Authorization: Basic <token>` when `use_basic_auth` is set. The token is
/// used as given; acquiring or refreshing it is up to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub token: Option<String>,
    pub use_basic_auth: bool,
}

impl RequestOptions {
    /// No credentials.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            use_basic_auth: false,
        }
    }

    /// `token` must already be the base64 `user:password` pair.
    pub fn basic(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            use_basic_auth: true,
        }
    }

    /// Encodes `username:password` for the Basic scheme.
    pub fn basic_credentials(username: &str, password: &str) -> Self {
        Self::basic(STANDARD.encode(format!("{username}:{password}")))
    }

    fn authorization(&self) -> Option<String> {
        let token = self.token.as_deref().filter(|t| !t.is_empty())?;
        let scheme = if self.use_basic_auth { "Basic" } else { "Bearer" };
        Some(format!("{scheme} {token}"))
    }

    /// Writes the `Authorization` header, if any. A token that is not a valid
    /// header value fails the request instead of sending it unauthenticated.
    pub(crate) fn apply(&self, headers: &mut HeaderMap) -> Result<(), TransportError> {
        let Some(value) = self.authorization() else {
            return Ok(());
        };
        let mut value = HeaderValue::from_str(&value).map_err(|e| {
            TransportError::other(format!("Invalid character in header content [\"Authorization\"]: {e}"))
        })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}
