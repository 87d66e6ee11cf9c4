use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::errors::{AddressError, DuplicateKey, KeyKind, RegistryError, ValidationIssue};
use crate::validation::{self, ValidationPolicy};
use crate::{PoolAddress, TenantConfig};

#[derive(Default, Debug, Clone)]
pub struct RegistryOptions {
    pub validation: ValidationPolicy,
    // Add more options as needed
}

/// Normalizes a hostname for comparison: trimmed, ASCII-lowercased, without a `:port`
/// suffix or a trailing root dot.
pub fn normalize_hostname(hostname: &str) -> String {
    let mut host = hostname.trim();
    if let Some((head, port)) = host.rsplit_once(':') {
        if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) {
            host = head;
        }
    }
    host.strip_suffix('.').unwrap_or(host).to_ascii_lowercase()
}

/// Computes the hex-encoded SHA256 digest of the serialized registry source
pub fn compute_fingerprint(source: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source);
    let hash = hasher.finalize();
    format!("{hash:x}")
}

// Indexes `keys` by value, keeping the first position for each value and collecting every
// value claimed more than once in order of first collision.
fn index_unique<K>(
    keys: impl IntoIterator<Item = (usize, K)>,
) -> (HashMap<K, usize>, Vec<(K, Vec<usize>)>)
where
    K: Eq + Hash + Clone,
{
    let mut index = HashMap::new();
    let mut clashes: Vec<(K, Vec<usize>)> = Vec::new();

    for (position, key) in keys {
        match index.get(&key) {
            None => {
                index.insert(key, position);
            }
            Some(&first) => match clashes.iter_mut().find(|(k, _)| *k == key) {
                Some((_, positions)) => positions.push(position),
                None => clashes.push((key, vec![first, position])),
            },
        }
    }

    (index, clashes)
}

fn to_duplicates<'a, K: Display + 'a>(
    kind: KeyKind,
    clashes: Vec<(K, Vec<usize>)>,
    tenants: &'a [TenantConfig],
) -> impl Iterator<Item = DuplicateKey> + 'a {
    clashes.into_iter().map(move |(key, positions)| DuplicateKey {
        kind,
        value: key.to_string(),
        records: positions
            .into_iter()
            .map(|p| (p, tenants[p].name.clone()))
            .collect(),
    })
}

/// Immutable, ordered table of tenant configurations with identity and routing lookups.
///
/// Construction validates the table: names, pool addresses and hostname overrides must be
/// unique. A registry value only exists if that check passed, so every lookup is a pure read.
#[derive(Debug)]
pub struct TenantRegistry {
    tenants: Vec<TenantConfig>,
    by_name: HashMap<String, usize>,
    by_address: HashMap<PoolAddress, usize>,
    by_hostname: HashMap<String, usize>,
    fingerprint: String,
}

impl TenantRegistry {
    /// Reads and builds a registry from a JSON file holding an ordered array of tenants.
    ///
    /// The file is only held open for the read.
    pub fn load(path: impl AsRef<Path>, options: &RegistryOptions) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let source = std::fs::read(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_slice(&source, &path.display().to_string(), options)
    }

    pub fn from_json_str(json: &str, options: &RegistryOptions) -> Result<Self, RegistryError> {
        Self::from_slice(json.as_bytes(), "<inline>", options)
    }

    pub fn from_tenants(
        tenants: Vec<TenantConfig>,
        options: &RegistryOptions,
    ) -> Result<Self, RegistryError> {
        let serialized = serde_json::to_vec(&tenants).map_err(|source| RegistryError::Parse {
            origin: "<in-memory>".to_string(),
            source,
        })?;
        Self::build(tenants, compute_fingerprint(&serialized), options)
    }

    pub(crate) fn from_slice(
        source: &[u8],
        origin: &str,
        options: &RegistryOptions,
    ) -> Result<Self, RegistryError> {
        let tenants: Vec<TenantConfig> =
            serde_json::from_slice(source).map_err(|source| RegistryError::Parse {
                origin: origin.to_string(),
                source,
            })?;
        let registry = Self::build(tenants, compute_fingerprint(source), options)?;
        info!(
            origin,
            tenants = registry.len(),
            fingerprint = %registry.fingerprint,
            "Loaded tenant registry"
        );
        Ok(registry)
    }

    fn build(
        tenants: Vec<TenantConfig>,
        fingerprint: String,
        options: &RegistryOptions,
    ) -> Result<Self, RegistryError> {
        // An override that normalizes to nothing can never be routed to
        let empty_hostnames: Vec<ValidationIssue> = tenants
            .iter()
            .filter(|t| {
                t.hostname_override
                    .as_deref()
                    .is_some_and(|h| normalize_hostname(h).is_empty())
            })
            .map(|t| ValidationIssue {
                tenant: t.name.clone(),
                message: "hostname override is empty".to_string(),
            })
            .collect();
        if !empty_hostnames.is_empty() {
            return Err(RegistryError::Validation(empty_hostnames));
        }

        let (by_name, name_clashes) =
            index_unique(tenants.iter().enumerate().map(|(i, t)| (i, t.name.clone())));
        let (by_address, address_clashes) =
            index_unique(tenants.iter().enumerate().map(|(i, t)| (i, t.pool_address)));
        let (by_hostname, hostname_clashes) =
            index_unique(tenants.iter().enumerate().filter_map(|(i, t)| {
                t.hostname_override
                    .as_deref()
                    .map(|h| (i, normalize_hostname(h)))
            }));

        let duplicates: Vec<DuplicateKey> = to_duplicates(KeyKind::Name, name_clashes, &tenants)
            .chain(to_duplicates(KeyKind::PoolAddress, address_clashes, &tenants))
            .chain(to_duplicates(KeyKind::Hostname, hostname_clashes, &tenants))
            .collect();
        if !duplicates.is_empty() {
            return Err(RegistryError::DuplicateKeys(duplicates));
        }

        validation::enforce(validation::check_all(&tenants), options.validation)?;

        Ok(Self {
            tenants,
            by_name,
            by_address,
            by_hostname,
            fingerprint,
        })
    }

    /// Exact, case-sensitive match on `name`
    pub fn find_by_name(&self, name: &str) -> Option<&TenantConfig> {
        let found = self.by_name.get(name).map(|&i| &self.tenants[i]);
        if found.is_none() {
            debug!(name, "No tenant with this name");
        }
        found
    }

    /// ASCII case-insensitive match on `name`; the first match in registry order wins
    pub fn find_by_name_ignore_case(&self, name: &str) -> Option<&TenantConfig> {
        self.tenants
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn find_by_address(&self, address: &PoolAddress) -> Option<&TenantConfig> {
        self.by_address.get(address).map(|&i| &self.tenants[i])
    }

    /// Decodes `address` and looks it up. A malformed address is an error, not a miss.
    pub fn find_by_address_str(
        &self,
        address: &str,
    ) -> Result<Option<&TenantConfig>, AddressError> {
        let address: PoolAddress = address.parse()?;
        Ok(self.find_by_address(&address))
    }

    /// Matches `hostname_override` only; tenants without an override are never returned
    pub fn find_by_hostname(&self, hostname: &str) -> Option<&TenantConfig> {
        let hostname = normalize_hostname(hostname);
        if hostname.is_empty() {
            return None;
        }
        self.by_hostname.get(&hostname).map(|&i| &self.tenants[i])
    }

    /// Hostname routing first, then the path-based name.
    ///
    /// Every identifier is tried as a hostname, and hostname matching ignores case while name
    /// matching does not. An override `orbit` therefore shadows a tenant named `Orbit`.
    pub fn resolve(&self, identifier: &str) -> Option<&TenantConfig> {
        self.find_by_hostname(identifier)
            .or_else(|| self.find_by_name(identifier))
    }

    /// Tenants not marked hidden, in registry order
    pub fn list_visible(&self) -> Vec<&TenantConfig> {
        self.tenants.iter().filter(|t| !t.is_hidden()).collect()
    }

    pub fn list_all(&self) -> &[TenantConfig] {
        &self.tenants
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TenantConfig> {
        self.tenants.iter()
    }

    /// Tenants referenced by `name`'s internal `/{other}` links, in link order.
    ///
    /// References to unknown tenants are skipped.
    pub fn linked_tenants(&self, name: &str) -> Vec<&TenantConfig> {
        let Some(tenant) = self.find_by_name(name) else {
            return Vec::new();
        };
        tenant
            .links()
            .iter()
            .filter_map(|link| link.internal_target())
            .filter_map(|target| self.find_by_name(target))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tenants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tenants.is_empty()
    }

    /// SHA256 of the source this registry was built from
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

impl<'a> IntoIterator for &'a TenantRegistry {
    type Item = &'a TenantConfig;
    type IntoIter = std::slice::Iter<'a, TenantConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
