//! Dry-run tool: prints the request the client would send for an endpoint.
//!
//! Usage: `sso-client <endpoint> [json-body]`, where the body is given in domain
//! form (camelCase field names) and serialized as the endpoint's request model.

use anyhow::{bail, Context};
use serde_json::{json, Map, Value};
use sso_client::{ApiClient, ClientConfig};
use sso_client_auth::OutgoingRequest;
use sso_client_core::DomainValue;
use sso_client_models::Endpoint;

fn main() -> anyhow::Result<()> {
    sso_client_observability::init();

    let mut args = std::env::args().skip(1);
    let Some(name) = args.next() else {
        let names: Vec<&str> = Endpoint::all().iter().map(|e| e.name).collect();
        bail!("usage: sso-client <endpoint> [json-body]\nendpoints: {}", names.join(", "));
    };
    let endpoint = Endpoint::by_name(&name).with_context(|| format!("unknown endpoint '{name}'"))?;

    let body = args
        .next()
        .map(|raw| serde_json::from_str::<Value>(&raw).context("body is not valid JSON"))
        .transpose()?
        .map(|wire| DomainValue::from_wire(&wire));

    let config = ClientConfig::from_env().context("invalid client configuration")?;
    let client = ApiClient::from_config(config)?;

    let request = client.prepare(endpoint, body.as_ref());
    println!("{}", serde_json::to_string_pretty(&describe(&request))?);
    Ok(())
}

fn describe(request: &OutgoingRequest) -> Value {
    let headers: Map<String, Value> = request
        .headers
        .iter()
        .flatten()
        .map(|(name, value)| {
            let shown = if value.is_sensitive() {
                "<redacted>"
            } else {
                value.to_str().unwrap_or("<binary>")
            };
            (name.to_string(), Value::from(shown))
        })
        .collect();

    json!({
        "method": request.method.as_str(),
        "uri": request.uri,
        "headers": headers,
        "query": request.query,
        "basic_auth": request.auth.as_ref().map(|c| c.username.as_str()),
        "body": request.body,
    })
}
