use anyhow::Result;
use colored::Colorize;
use octofhir_client::QueryParams;

use crate::cli::OutputFormat;
use crate::client::Session;
use crate::output::print_value;

pub async fn metadata(session: &Session, format: OutputFormat) -> Result<()> {
    let response = session
        .api
        .fetch_conformance_statement(&session.base_url, &QueryParams::none(), &session.options)
        .await?;
    let cs = &response.body;

    if !matches!(format, OutputFormat::Table) {
        print_value(cs, format);
        return Ok(());
    }

    let field = |path: &[&str]| {
        path.iter()
            .try_fold(cs, |v, key| v.get(*key))
            .and_then(|v| v.as_str())
            .unwrap_or("unknown")
    };

    println!(
        "{}: {} {}",
        "Server".cyan(),
        field(&["software", "name"]),
        field(&["software", "version"])
    );
    println!("{}: {}", "FHIR Version".cyan(), field(&["fhirVersion"]));
    println!("{}: {}", "Status".cyan(), field(&["status"]));

    let rest = cs.get("rest").and_then(|v| v.as_array());
    for r in rest.into_iter().flatten() {
        if let Some(resources) = r.get("resource").and_then(|v| v.as_array()) {
            println!("{}: {} resource types", "Resources".cyan(), resources.len());
            let types: Vec<&str> = resources
                .iter()
                .filter_map(|r| r.get("type").and_then(|v| v.as_str()))
                .collect();
            if !types.is_empty() {
                println!("  {}", types.join(", "));
            }
        }
    }
    Ok(())
}
