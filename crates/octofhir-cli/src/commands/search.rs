use anyhow::Result;
use octofhir_client::{QueryParams, SearchParams, map_fhir_response};

use crate::cli::{OutputFormat, SearchArgs};
use crate::client::Session;
use crate::output::{print_response, print_value};

/// Parses `key=value` arguments. A repeated key collects several values,
/// which the client sends as repeated query keys.
pub(crate) fn parse_params(raw_params: &[String]) -> Result<SearchParams> {
    let mut params = SearchParams::new();
    for raw in raw_params {
        let Some((key, value)) = raw.split_once('=') else {
            anyhow::bail!("Invalid parameter \"{raw}\". Expected format: key=value");
        };
        if key.is_empty() {
            anyhow::bail!("Invalid parameter \"{raw}\". Parameter name is empty");
        }
        params.append(key, value);
    }
    Ok(params)
}

pub async fn search(session: &Session, args: &SearchArgs, format: OutputFormat) -> Result<()> {
    let mut params = parse_params(&args.params)?;
    if let Some(c) = args.count {
        params.insert("_count", c);
    }
    let params = QueryParams::from(params);

    let response = if args.post {
        session
            .api
            .fetch_resources_post(&session.base_url, &args.resource_type, &params, &session.options)
            .await?
    } else {
        session
            .api
            .fetch_resources(&session.base_url, &args.resource_type, &params, &session.options)
            .await?
    };

    if args.resources {
        let resources = serde_json::Value::Array(map_fhir_response(&response));
        print_value(&resources, format);
    } else {
        print_response(&response, format);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use octofhir_client::ParamValue;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_params_repeats() {
        let params = parse_params(&args(&["status=a", "name=Smith", "status=b"])).unwrap();
        assert_eq!(
            params.get("status"),
            Some(&ParamValue::Many(vec!["a".into(), "b".into()]))
        );
        assert_eq!(params.to_repeat_query(), "status=a&status=b&name=Smith");
    }

    #[test]
    fn test_parse_params_value_may_contain_equals() {
        let params = parse_params(&args(&["_filter=name eq x=y"])).unwrap();
        assert_eq!(
            params.get("_filter"),
            Some(&ParamValue::One("name eq x=y".into()))
        );
    }

    #[test]
    fn test_parse_params_rejects_malformed() {
        assert!(parse_params(&args(&["status"])).is_err());
        assert!(parse_params(&args(&["=a"])).is_err());
    }
}
