//! Process-wide access to a loaded registry.
//!
//! Consumers only ever read. [`init_global`] loads the table once at startup; services that
//! want to pick up a redeployed data file without restarting hold a [`RegistryStore`] and
//! call [`RegistryStore::reload`] from their single maintenance task.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use tracing::{info, warn};

use crate::errors::RegistryError;
use crate::registry::{RegistryOptions, TenantRegistry, compute_fingerprint};

static GLOBAL: OnceLock<TenantRegistry> = OnceLock::new();

/// Loads the registry at `path` into the process-global slot.
///
/// Fails with [`RegistryError::AlreadyInitialized`] if a registry is already installed; a
/// failed load leaves the slot empty.
pub fn init_global(
    path: impl AsRef<Path>,
    options: &RegistryOptions,
) -> Result<&'static TenantRegistry, RegistryError> {
    if GLOBAL.get().is_some() {
        return Err(RegistryError::AlreadyInitialized);
    }
    let registry = TenantRegistry::load(path, options)?;
    GLOBAL
        .set(registry)
        .map_err(|_| RegistryError::AlreadyInitialized)?;
    GLOBAL.get().ok_or(RegistryError::AlreadyInitialized)
}

/// The process-global registry, once [`init_global`] succeeded
pub fn global() -> Option<&'static TenantRegistry> {
    GLOBAL.get()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// The file content changed and the new table is now served
    Replaced,
    /// Same fingerprint as the served table; nothing was rebuilt
    Unchanged,
}

/// A registry loaded from a file that can be swapped for a fresh load of the same file.
///
/// Readers take cheap [`Arc`] snapshots; a snapshot stays valid and unchanged for as long as
/// it is held, even across reloads.
#[derive(Debug)]
pub struct RegistryStore {
    path: PathBuf,
    options: RegistryOptions,
    current: RwLock<Arc<TenantRegistry>>,
}

impl RegistryStore {
    pub fn open(path: impl Into<PathBuf>, options: RegistryOptions) -> Result<Self, RegistryError> {
        let path = path.into();
        let registry = TenantRegistry::load(&path, &options)?;
        Ok(Self {
            path,
            options,
            current: RwLock::new(Arc::new(registry)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot(&self) -> Arc<TenantRegistry> {
        // The guarded value is a plain Arc swap, so a poisoned lock still holds a valid table
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Re-reads the backing file.
    ///
    /// On any error the previously served table stays in place and the error is returned.
    pub fn reload(&self) -> Result<ReloadOutcome, RegistryError> {
        let source = std::fs::read(&self.path).map_err(|source| RegistryError::Io {
            path: self.path.clone(),
            source,
        })?;

        if compute_fingerprint(&source) == self.snapshot().fingerprint() {
            info!(path = %self.path.display(), "Tenant registry unchanged");
            return Ok(ReloadOutcome::Unchanged);
        }

        let origin = self.path.display().to_string();
        let registry = TenantRegistry::from_slice(&source, &origin, &self.options)
            .inspect_err(|e| warn!(path = %origin, error = %e, "Keeping previous registry"))?;

        let mut current = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *current = Arc::new(registry);
        Ok(ReloadOutcome::Replaced)
    }
}
