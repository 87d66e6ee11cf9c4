use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while decoding an on-chain pool address
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum AddressError {
    #[error("Invalid base58 address '{address}': {reason}")]
    InvalidBase58 { address: String, reason: String },
    #[error("Invalid address length for '{address}': expected 32 bytes, got {len}")]
    InvalidLength { address: String, len: usize },
}

/// Which unique key two or more records collided on
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum KeyKind {
    Name,
    PoolAddress,
    Hostname,
}

impl KeyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyKind::Name => "name",
            KeyKind::PoolAddress => "pool_address",
            KeyKind::Hostname => "hostname_override",
        }
    }
}

/// A single collision: the shared key value and every record (by position and name) claiming it
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DuplicateKey {
    pub kind: KeyKind,
    pub value: String,
    pub records: Vec<(usize, String)>,
}

impl fmt::Display for DuplicateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' shared by ", self.kind.as_str(), self.value)?;
        for (i, (index, name)) in self.records.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "#{index} '{name}'")?;
        }
        Ok(())
    }
}

/// A legacy-entry finding reported by load-time validation
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ValidationIssue {
    pub tenant: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}': {}", self.tenant, self.message)
    }
}

fn join_display<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// Top-level error for building and loading a registry. Lookups never fail with
// this type: a missing tenant is an `Option::None`.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to read registry file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse registry data from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Duplicate registry keys: {}", join_display(.0))]
    DuplicateKeys(Vec<DuplicateKey>),
    #[error("Registry validation failed: {}", join_display(.0))]
    Validation(Vec<ValidationIssue>),
    #[error("Global registry has already been initialized")]
    AlreadyInitialized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_key_message_names_all_records() {
        let err = RegistryError::DuplicateKeys(vec![DuplicateKey {
            kind: KeyKind::Name,
            value: "cardinal".to_string(),
            records: vec![(0, "cardinal".to_string()), (4, "cardinal".to_string())],
        }]);

        assert_eq!(
            err.to_string(),
            "Duplicate registry keys: name 'cardinal' shared by #0 'cardinal', #4 'cardinal'"
        );
    }

    #[test]
    fn test_validation_message_lists_findings() {
        let err = RegistryError::Validation(vec![
            ValidationIssue {
                tenant: "AOM".to_string(),
                message: "name is not lower kebab-case".to_string(),
            },
            ValidationIssue {
                tenant: "AOM".to_string(),
                message: "redundant `hidden: false`".to_string(),
            },
        ]);

        assert_eq!(
            err.to_string(),
            "Registry validation failed: 'AOM': name is not lower kebab-case; 'AOM': redundant `hidden: false`"
        );
    }

    #[test]
    fn test_address_error_display() {
        let err = AddressError::InvalidLength {
            address: "abc".to_string(),
            len: 2,
        };
        assert_eq!(
            err.to_string(),
            "Invalid address length for 'abc': expected 32 bytes, got 2"
        );
    }
}
