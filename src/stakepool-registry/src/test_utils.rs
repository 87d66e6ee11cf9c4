use std::path::PathBuf;

use crate::{PoolAddress, TenantConfig, TenantRegistry};

/// Minimal tenant whose pool address is 32 copies of `seed`
pub fn tenant(name: &str, seed: u8) -> TenantConfig {
    TenantConfig::new(name, name, PoolAddress::new([seed; 32]))
}

pub fn tenant_with_hostname(name: &str, seed: u8, hostname: &str) -> TenantConfig {
    let mut tenant = tenant(name, seed);
    tenant.hostname_override = Some(hostname.to_string());
    tenant
}

/// Location of the registry data file shipped with this crate
pub fn bundled_data_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join("stake_pools.json")
}

pub fn assert_resolves_to(registry: &TenantRegistry, identifier: &str, expected_name: &str) {
    let found = registry.resolve(identifier);
    assert!(
        found.is_some(),
        "Should resolve '{identifier}' to '{expected_name}'"
    );
    let name = found.map(|t| t.name.as_str()).unwrap_or_default();
    assert_eq!(
        name, expected_name,
        "Should resolve '{identifier}' to '{expected_name}'. Actual tenant: {name}"
    );
}
