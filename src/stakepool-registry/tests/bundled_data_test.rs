use stakepool_registry::errors::RegistryError;
use stakepool_registry::test_utils::{assert_resolves_to, bundled_data_path};
use stakepool_registry::{
    ReceiptType, RegistryOptions, TenantRegistry, TokenStandard, ValidationPolicy,
};

fn bundled() -> TenantRegistry {
    TenantRegistry::load(bundled_data_path(), &RegistryOptions::default())
        .expect("bundled registry should load with the default policy")
}

#[test]
fn test_bundled_registry_loads_in_order() {
    let registry = bundled();
    assert_eq!(registry.len(), 53);

    let names: Vec<&str> = registry.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(&names[..4], &["cardinal", "AOM", "blockasset", "blockasset-smesh-bros"]);
    assert_eq!(names.last(), Some(&"Sweet-Apocalypse"));
}

#[test]
fn test_every_record_is_found_by_its_name() {
    let registry = bundled();
    for tenant in &registry {
        let found = registry.find_by_name(&tenant.name);
        assert_eq!(found, Some(tenant), "lookup by name '{}'", tenant.name);
    }
}

#[test]
fn test_every_record_is_found_by_its_address() {
    let registry = bundled();
    for tenant in &registry {
        let found = registry
            .find_by_address_str(&tenant.pool_address.to_string())
            .unwrap();
        assert_eq!(found, Some(tenant), "lookup by address of '{}'", tenant.name);
    }
}

#[test]
fn test_hostname_overrides() {
    let registry = bundled();
    let mut with_hostname = 0;
    for tenant in &registry {
        match &tenant.hostname_override {
            Some(hostname) => {
                with_hostname += 1;
                assert_eq!(registry.find_by_hostname(hostname), Some(tenant));
                assert_eq!(registry.resolve(hostname), Some(tenant));
            }
            None => {
                assert!(registry.find_by_hostname(&tenant.name).is_none());
                assert_eq!(registry.resolve(&tenant.name), Some(tenant));
            }
        }
    }
    assert_eq!(with_hostname, 4);

    assert_resolves_to(&registry, "stake.1space.me", "onespace");
    assert_resolves_to(&registry, "onespace", "onespace");
    assert_resolves_to(&registry, "stake.roguesharks", "rogue-sharks");
    assert_resolves_to(&registry, "stake.unfrgtn.space", "Orbit");
    assert_resolves_to(&registry, "stake.rebellionbots.io", "rebellionbots");
}

#[test]
fn test_list_visible_excludes_hidden_tenants() {
    let registry = bundled();
    let visible = registry.list_visible();

    assert_eq!(visible.len(), 51);
    assert!(visible.iter().all(|t| !t.is_hidden()));
    assert!(!visible.iter().any(|t| t.name == "whales" || t.name == "hoa-referral"));
    // explicit `hidden: false` stays visible
    assert!(visible.iter().any(|t| t.name == "dictators"));

    let all_visible_in_order: Vec<&str> = registry
        .iter()
        .filter(|t| !t.is_hidden())
        .map(|t| t.name.as_str())
        .collect();
    let listed: Vec<&str> = visible.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(listed, all_visible_in_order);
}

#[test]
fn test_redirected_tenants_are_still_returned() {
    let registry = bundled();

    let aom = registry.find_by_name("AOM").unwrap();
    assert!(aom.is_not_found());
    assert_eq!(aom.redirect_url.as_deref(), Some("https://frame.artofmob.io"));

    let peanuts = registry.find_by_name("presidential-peanuts").unwrap();
    assert!(peanuts.is_not_found());
    assert!(peanuts.redirect_url.is_some());
}

#[test]
fn test_name_lookup_does_not_normalize_case() {
    let registry = bundled();
    assert!(registry.find_by_name("aom").is_none());
    assert!(registry.find_by_name("orbit").is_none());
    assert_eq!(
        registry.find_by_name_ignore_case("orbit").map(|t| t.name.as_str()),
        Some("Orbit")
    );
    assert!(registry.find_by_name("Sussy Sol Cats").is_some());
}

#[test]
fn test_meta_ops_vaults_reference_each_other() {
    let registry = bundled();
    let names = |name: &str| -> Vec<String> {
        registry
            .linked_tenants(name)
            .iter()
            .map(|t| t.name.clone())
            .collect()
    };
    assert_eq!(names("meta-ops"), vec!["meta-ops-founders-vault".to_string()]);
    assert_eq!(names("meta-ops-founders-vault"), vec!["meta-ops".to_string()]);
}

#[test]
fn test_typed_fields_survive_loading() {
    let registry = bundled();

    let blockasset = registry.find_by_name("blockasset").unwrap();
    assert_eq!(blockasset.max_staked_count, Some(11791));
    assert_eq!(blockasset.links().len(), 3);
    assert_eq!(
        blockasset.color_scheme.as_ref().unwrap().accent.as_deref(),
        Some("#1fcfb11c")
    );
    let airdrops = blockasset.airdrop_metadata.as_ref().unwrap();
    assert_eq!(airdrops[0].get("symbol"), Some(&serde_json::json!("LEGENDS")));

    assert!(registry.iter().any(|t| t.receipt_type == Some(ReceiptType::Original)));
    assert!(
        registry
            .iter()
            .any(|t| t.token_standard == Some(TokenStandard::NonFungible))
    );
    assert!(registry.iter().any(|t| t.style_overrides.is_some()));
}

#[test]
fn test_strict_policy_reports_legacy_entries() {
    let strict = RegistryOptions {
        validation: ValidationPolicy::Reject,
    };
    match TenantRegistry::load(bundled_data_path(), &strict) {
        Err(RegistryError::Validation(issues)) => {
            let flagged = |tenant: &str| issues.iter().any(|issue| issue.tenant == tenant);
            assert!(flagged("AOM"));
            assert!(flagged("Sussy Sol Cats"));
            assert!(flagged("dictators"));
            assert!(flagged("block-token"));
            assert!(!flagged("cardinal"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}
