use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use octofhir_client::FormEncoding;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProfileConfig {
    pub server: Option<String>,
    pub format: Option<String>,
    pub post_encoding: Option<FormEncoding>,
}

pub type ConfigFile = HashMap<String, ProfileConfig>;

pub(crate) fn config_dir() -> Result<PathBuf> {
    let dir = dirs::home_dir()
        .context("Cannot determine home directory")?
        .join(".octofhir");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

fn read_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::new());
    }
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).with_context(|| format!("Invalid config file: {}", path.display()))
}

fn write_profile(path: &Path, profile: &str, config: &ProfileConfig) -> Result<()> {
    let mut all = read_config(path)?;
    all.insert(profile.to_string(), config.clone());
    fs::write(path, toml::to_string_pretty(&all)?)?;
    Ok(())
}

pub fn load_profile(profile: &str) -> Result<ProfileConfig> {
    let mut all = read_config(&config_path()?)?;
    Ok(all.remove(profile).unwrap_or_default())
}

pub fn save_profile(profile: &str, config: &ProfileConfig) -> Result<()> {
    write_profile(&config_path()?, profile, config)
}

/// Applies `config set <key> <value>`.
pub fn set_key(config: &mut ProfileConfig, key: &str, value: &str) -> Result<()> {
    match key {
        "server" => config.server = Some(value.trim_end_matches('/').to_string()),
        "format" => config.format = Some(value.to_string()),
        "post_encoding" => {
            config.post_encoding = Some(value.parse::<FormEncoding>().map_err(anyhow::Error::msg)?);
        }
        other => {
            anyhow::bail!("Unknown config key: {other}. Valid keys: server, format, post_encoding")
        }
    }
    Ok(())
}

pub fn resolve_server(cli_server: &Option<String>, profile: &str) -> Result<String> {
    // --server flag / OCTOFHIR_URL env
    if let Some(s) = cli_server {
        return Ok(s.trim_end_matches('/').to_string());
    }
    let cfg = load_profile(profile)?;
    if let Some(s) = cfg.server {
        return Ok(s);
    }
    if let Ok(Some(creds)) = crate::auth::load_credentials(profile) {
        return Ok(creds.server().to_string());
    }
    anyhow::bail!(
        "No server URL configured. Use --server, set OCTOFHIR_URL env var, or run: octofhir config set server <url>"
    )
}
