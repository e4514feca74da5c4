use crate::cli::OutputFormat;
use colored::Colorize;
use octofhir_client::{FhirResponse, map_fhir_data};
use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;

pub fn print_value(value: &Value, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => print_as_table(value),
    }
}

pub fn print_response(response: &FhirResponse, format: OutputFormat) {
    if response.body.is_null() {
        println!("HTTP {}", response.status);
        return;
    }
    print_value(&response.body, format);
}

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(_) => println!("{value}"),
    }
}

fn print_as_table(value: &Value) {
    if is_bundle(value) {
        let resources = map_fhir_data(value);
        if resources.is_empty() {
            println!("No resources found.");
            return;
        }
        println!("{}", resource_table(&resources));
        if let Some(total) = value.get("total").and_then(|v| v.as_u64()) {
            println!("Total: {total}");
        }
    } else {
        let rt = str_field(value, "resourceType").unwrap_or("Resource");
        let id = str_field(value, "id").unwrap_or("-");
        println!("{} {}/{}", "Resource:".cyan(), rt.cyan(), id.cyan());
        print_json(value);
    }
}

fn is_bundle(value: &Value) -> bool {
    str_field(value, "resourceType") == Some("Bundle")
}

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(|v| v.as_str())
}

/// One row per resource; entries without a resource render as dashes.
pub(crate) fn resource_table(resources: &[Value]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["ID", "ResourceType", "LastUpdated"]);
    for resource in resources {
        let id = str_field(resource, "id").unwrap_or("-");
        let rt = str_field(resource, "resourceType").unwrap_or("-");
        let updated = resource
            .get("meta")
            .and_then(|m| m.get("lastUpdated"))
            .and_then(|v| v.as_str())
            .unwrap_or("-");
        builder.push_record([id, rt, updated]);
    }
    builder.build().with(Style::rounded()).to_string()
}
