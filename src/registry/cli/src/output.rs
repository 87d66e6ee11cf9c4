use std::fmt::Write as _;

use serde_json::{Map, Value};
use stakepool_registry::TenantConfig;

/// Output format selected with `--output`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human readable key/value lines
    Text,
    /// Pretty JSON with alphabetically ordered keys
    Json,
}

impl OutputFormat {
    /// Parses a `--output` value; anything other than `text` or `json` is rejected.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

// Rebuilds objects with sorted keys so the output does not depend on the map
// implementation serde_json was compiled with.
fn sorted(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, sorted(v)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sorted).collect()),
        other => other,
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&sorted(serde_json::to_value(value)?))
}

fn tenant_text(tenant: &TenantConfig) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(out, "name: {}", tenant.name);
    let _ = writeln!(out, "display name: {}", tenant.display_name);
    let _ = writeln!(out, "pool address: {}", tenant.pool_address);
    if let Some(receipt) = tenant.receipt_type {
        let _ = writeln!(out, "receipt type: {}", receipt.as_str());
    }
    if let Some(standard) = tenant.token_standard {
        let _ = writeln!(out, "token standard: {}", standard.as_str());
    }
    if let Some(hostname) = &tenant.hostname_override {
        let _ = writeln!(out, "hostname override: {hostname}");
    }
    if let Some(redirect) = &tenant.redirect_url {
        let _ = writeln!(out, "redirect url: {redirect}");
    }
    if let Some(website) = &tenant.website_url {
        let _ = writeln!(out, "website url: {website}");
    }
    if let Some(max) = tenant.max_staked_count {
        let _ = writeln!(out, "max staked count: {max}");
    }
    if tenant.is_hidden() {
        out.push_str("hidden: true\n");
    }
    if tenant.is_not_found() {
        out.push_str("not found: true\n");
    }
    if !tenant.links().is_empty() {
        out.push_str("links:\n");
        for link in tenant.links() {
            let _ = writeln!(out, "  {}: {}", link.text, link.value);
        }
    }
    out
}

/// Renders a single tenant
pub fn render_tenant(
    tenant: &TenantConfig,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(tenant_text(tenant)),
        OutputFormat::Json => to_json(tenant),
    }
}

/// Renders a list of tenants: one `name: display name` line each, or a JSON array
pub fn render_tenants(
    tenants: &[&TenantConfig],
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(tenants.iter().fold(String::new(), |mut out, tenant| {
            let _ = writeln!(out, "{}: {}", tenant.name, tenant.display_name);
            out
        })),
        OutputFormat::Json => to_json(&tenants),
    }
}
