use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};
use colored::Colorize;
use octofhir_client::{FhirResponse, QueryParams, request};
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::client::Session;
use crate::commands::search::parse_params;
use crate::output::{print_response, print_success};

fn parse_reference(reference: &str) -> Result<(&str, &str)> {
    match reference.split_once('/') {
        Some((rt, id)) if !rt.is_empty() => Ok((rt, id)),
        _ => anyhow::bail!("Invalid reference \"{reference}\". Expected format: ResourceType/id"),
    }
}

fn read_body(file: &Option<String>) -> Result<Value> {
    let content = match file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
    };
    serde_json::from_str(&content).context("Invalid JSON")
}

/// `Type/id` of the response body, falling back to the submitted resource.
fn describe(response: &FhirResponse, submitted: &Value) -> String {
    let rt = response
        .resource_type()
        .or_else(|| request::resource_type(submitted))
        .unwrap_or("?");
    let id = request::resource_id(&response.body)
        .or_else(|| request::resource_id(submitted))
        .unwrap_or_else(|| "?".to_string());
    format!("{}/{}", rt.cyan(), id.cyan())
}

pub async fn get(
    session: &Session,
    reference: &str,
    raw_params: &[String],
    format: OutputFormat,
) -> Result<()> {
    let (rt, id) = parse_reference(reference)?;
    let params = QueryParams::from(parse_params(raw_params)?);
    let response = session
        .api
        .fetch_resource(&session.base_url, rt, Some(id), &params, &session.options)
        .await?;
    print_response(&response, format);
    Ok(())
}

pub async fn fetch_url(session: &Session, url: &str, format: OutputFormat) -> Result<()> {
    let response = session
        .api
        .fetch_by_url(url, &QueryParams::none(), &session.options)
        .await?;
    print_response(&response, format);
    Ok(())
}

pub async fn create(
    session: &Session,
    file: &Option<String>,
    url: &Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let body = read_body(file)?;
    let response = match url {
        Some(url) => {
            session
                .api
                .submit_resource_to_url(url, &body, &session.options)
                .await?
        }
        None => {
            session
                .api
                .submit_resource(&session.base_url, &body, &session.options)
                .await?
        }
    };
    print_success(&format!("Created {}", describe(&response, &body)));
    print_response(&response, format);
    Ok(())
}

pub async fn update(session: &Session, file: &Option<String>, format: OutputFormat) -> Result<()> {
    let body = read_body(file)?;
    let response = session
        .api
        .update_resource(&session.base_url, &body, &session.options)
        .await?;
    print_success(&format!("Updated {}", describe(&response, &body)));
    print_response(&response, format);
    Ok(())
}

pub async fn upsert(
    session: &Session,
    file: &Option<String>,
    raw_params: &[String],
    format: OutputFormat,
) -> Result<()> {
    let body = read_body(file)?;
    let params = QueryParams::from(parse_params(raw_params)?);
    let response = session
        .api
        .update_resource_by_url(&session.base_url, &body, &params, &session.options)
        .await?;
    print_success(&format!(
        "Stored {} (HTTP {})",
        describe(&response, &body),
        response.status.as_u16()
    ));
    print_response(&response, format);
    Ok(())
}

pub async fn delete(session: &Session, reference: &str) -> Result<()> {
    let (rt, id) = parse_reference(reference)?;
    session
        .api
        .delete_resource_by_id(&session.base_url, rt, Some(id), &session.options)
        .await?;
    print_success(&format!("Deleted {}/{}", rt.cyan(), id.cyan()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reference() {
        assert_eq!(parse_reference("Patient/123").unwrap(), ("Patient", "123"));
        assert_eq!(
            parse_reference("Patient/123/_history/2").unwrap(),
            ("Patient", "123/_history/2")
        );
        assert_eq!(parse_reference("Patient/").unwrap(), ("Patient", ""));
        assert!(parse_reference("Patient").is_err());
        assert!(parse_reference("/123").is_err());
    }
}
