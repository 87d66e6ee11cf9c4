//! Load-time checks for hand-maintained tenant records.
//!
//! Duplicate keys are always fatal and are detected by the registry itself. The checks here
//! cover legacy entries that are merely suspicious; the configured [`ValidationPolicy`]
//! decides whether they are logged or reject the load.

use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

use crate::TenantConfig;
use crate::errors::{RegistryError, ValidationIssue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationPolicy {
    /// Log each finding and keep loading
    #[default]
    Warn,
    /// Fail the load if anything is found
    Reject,
}

fn kebab_case() -> &'static Regex {
    static KEBAB: OnceLock<Regex> = OnceLock::new();
    KEBAB.get_or_init(|| {
        Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("kebab-case pattern is valid")
    })
}

/// Whether `name` is lower kebab-case, the recommended form for a URL path segment
pub fn is_kebab_case(name: &str) -> bool {
    kebab_case().is_match(name)
}

/// Runs every legacy-entry check against a single record
pub fn check_tenant(tenant: &TenantConfig) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut push = |message: String| {
        issues.push(ValidationIssue {
            tenant: tenant.name.clone(),
            message,
        })
    };

    if !is_kebab_case(&tenant.name) {
        push("name is not lower kebab-case".to_string());
    }
    if tenant.hidden == Some(false) {
        push("redundant `hidden: false`".to_string());
    }
    if tenant.links.as_ref().is_some_and(Vec::is_empty) {
        push("empty `links` list".to_string());
    }
    if tenant.airdrop_metadata.as_ref().is_some_and(Vec::is_empty) {
        push("empty `airdrop_metadata` list".to_string());
    }
    if let Some(hostname) = &tenant.hostname_override {
        if hostname.contains("://")
            || hostname.contains('/')
            || hostname.contains(char::is_whitespace)
        {
            push(format!("hostname override '{hostname}' is not a bare hostname"));
        }
    }

    issues
}

pub fn check_all(tenants: &[TenantConfig]) -> Vec<ValidationIssue> {
    tenants.iter().flat_map(check_tenant).collect()
}

pub(crate) fn enforce(
    issues: Vec<ValidationIssue>,
    policy: ValidationPolicy,
) -> Result<(), RegistryError> {
    if issues.is_empty() {
        return Ok(());
    }
    match policy {
        ValidationPolicy::Warn => {
            for issue in &issues {
                warn!(tenant = %issue.tenant, "{}", issue.message);
            }
            Ok(())
        }
        ValidationPolicy::Reject => Err(RegistryError::Validation(issues)),
    }
}
