use anyhow::{Context, Result};
use octofhir_client::{ClientConfig, FhirApi, RequestOptions};

use crate::auth;
use crate::config;

/// Everything a command needs to talk to one server.
pub struct Session {
    pub api: FhirApi,
    pub base_url: String,
    pub options: RequestOptions,
}

impl Session {
    pub fn open(cli_server: &Option<String>, profile: &str) -> Result<Self> {
        let base_url = config::resolve_server(cli_server, profile)?;
        let profile_cfg = config::load_profile(profile)?;

        let mut client_cfg = ClientConfig::default()
            .with_user_agent(format!("octofhir-cli/{}", env!("CARGO_PKG_VERSION")));
        if let Some(encoding) = profile_cfg.post_encoding {
            client_cfg = client_cfg.with_search_post_encoding(encoding);
        }

        let api = FhirApi::with_config(client_cfg).context("Failed to create HTTP client")?;
        let options = auth::request_options(profile)?;
        tracing::debug!(server = %base_url, profile, "Opened session");

        Ok(Self {
            api,
            base_url,
            options,
        })
    }
}
