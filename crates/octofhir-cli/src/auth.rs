use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use octofhir_client::RequestOptions;
use serde::{Deserialize, Serialize};

/// Stored credentials: Basic Auth or a Bearer token obtained elsewhere
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StoredCredentials {
    #[serde(rename = "basic")]
    Basic {
        server: String,
        username: String,
        password: String,
    },
    #[serde(rename = "bearer")]
    Bearer {
        server: String,
        access_token: String,
    },
}

impl StoredCredentials {
    pub fn server(&self) -> &str {
        match self {
            Self::Basic { server, .. } | Self::Bearer { server, .. } => server,
        }
    }

    pub fn to_request_options(&self) -> RequestOptions {
        match self {
            Self::Basic {
                username, password, ..
            } => RequestOptions::basic_credentials(username, password),
            Self::Bearer { access_token, .. } => RequestOptions::bearer(access_token),
        }
    }
}

/// Per-profile credential files under a config directory.
pub struct CredentialStore {
    dir: PathBuf,
}

impl CredentialStore {
    pub fn open() -> Result<Self> {
        Ok(Self::at(crate::config::config_dir()?))
    }

    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, profile: &str) -> PathBuf {
        self.dir.join(format!("credentials.{profile}.json"))
    }

    pub fn load(&self, profile: &str) -> Result<Option<StoredCredentials>> {
        let path = self.path(profile);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let creds = serde_json::from_str(&content)
            .with_context(|| format!("Corrupt credentials file: {}", path.display()))?;
        Ok(Some(creds))
    }

    pub fn save(&self, profile: &str, creds: &StoredCredentials) -> Result<()> {
        fs::write(self.path(profile), serde_json::to_string_pretty(creds)?)?;
        Ok(())
    }

    /// Returns whether a file was removed.
    pub fn remove(&self, profile: &str) -> Result<bool> {
        let path = self.path(profile);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        Ok(true)
    }
}

pub fn load_credentials(profile: &str) -> Result<Option<StoredCredentials>> {
    CredentialStore::open()?.load(profile)
}

pub fn save_credentials(profile: &str, creds: &StoredCredentials) -> Result<()> {
    CredentialStore::open()?.save(profile, creds)
}

pub fn remove_credentials(profile: &str) -> Result<bool> {
    CredentialStore::open()?.remove(profile)
}

/// Request options for `profile`; no stored credentials means no auth header.
pub fn request_options(profile: &str) -> Result<RequestOptions> {
    Ok(load_credentials(profile)?
        .map(|c| c.to_request_options())
        .unwrap_or_default())
}
