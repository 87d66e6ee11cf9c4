use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub mod address;
pub mod errors;
pub mod registry;
pub mod store;
pub mod test_utils;
pub mod validation;

pub use address::PoolAddress;
pub use errors::{AddressError, RegistryError};
pub use registry::{RegistryOptions, TenantRegistry};
pub use store::{RegistryStore, ReloadOutcome, global, init_global};
pub use validation::ValidationPolicy;

/// Secondary color used by the stake page when a tenant configures no color scheme
pub const DEFAULT_SECONDARY_COLOR: &str = "rgba(29, 78, 216, 255)";

/// How a staked asset's receipt is represented on chain.
///
/// Codes match the staking program's enum. When a tenant leaves this unset the
/// UI lets the end user choose.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptType {
    /// The original asset is escrowed
    Original,
    /// A separate receipt token is minted
    Receipt,
    None,
}

impl ReceiptType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReceiptType::Original => "original",
            ReceiptType::Receipt => "receipt",
            ReceiptType::None => "none",
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            ReceiptType::Original => 1,
            ReceiptType::Receipt => 2,
            ReceiptType::None => 3,
        }
    }
}

impl TryFrom<u8> for ReceiptType {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ReceiptType::Original),
            2 => Ok(ReceiptType::Receipt),
            3 => Ok(ReceiptType::None),
            other => Err(other),
        }
    }
}

/// Restricts which asset class the stake page displays
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TokenStandard {
    // Fungible, can have more than 1
    Fungible,
    // Non fungible are all unique
    NonFungible,
    None,
}

impl TokenStandard {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenStandard::Fungible => "fungible",
            TokenStandard::NonFungible => "non_fungible",
            TokenStandard::None => "none",
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            TokenStandard::Fungible => 1,
            TokenStandard::NonFungible => 2,
            TokenStandard::None => 3,
        }
    }
}

impl TryFrom<u8> for TokenStandard {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(TokenStandard::Fungible),
            2 => Ok(TokenStandard::NonFungible),
            3 => Ok(TokenStandard::None),
            other => Err(other),
        }
    }
}

/// A single cosmetic style value. Numbers are kept exactly as written (e.g. `fontWeight: 500`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum StyleValue {
    Number(serde_json::Number),
    Text(String),
}

/// Free-form style properties (font family/weight/size, ...) applied to the whole stake page
pub type StyleOverrides = BTreeMap<String, StyleValue>;

// Colors are free-form css strings (hex, rgb, rgba); nothing validates the format
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ColorScheme {
    pub primary: String,
    pub secondary: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub accent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub font_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub font_color_secondary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub background_secondary: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub text: String,
    pub value: String,
}

impl Link {
    /// Name of the tenant this link points at when it is an internal `/{name}` path
    pub fn internal_target(&self) -> Option<&str> {
        let target = self.value.strip_prefix('/')?;
        let target = target.trim_end_matches('/');
        if target.is_empty() || target.contains('/') {
            return None;
        }
        Some(target)
    }
}

/// Airdrop descriptor used on test networks to simulate asset drops.
///
/// The shape belongs to the airdrop tooling; the registry passes it through unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct AirdropMetadata(pub serde_json::Value);

impl AirdropMetadata {
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticKind {
    Staked,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnalyticTotal {
    pub key: String,
    pub value: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnalyticMetadata {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: AnalyticKind,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub totals: Option<Vec<AnalyticTotal>>,
}

/// Analytics shown at the top of a stake pool (trait based or overall totals)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Analytic {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub metadata: Option<AnalyticMetadata>,
}

/// Configuration of one stake pool tenant.
///
/// `name` is the canonical lookup key and the URL path segment (`/{name}`).
/// Optional flags stay `Option<bool>` so a redundant explicit `false` remains visible
/// to validation; use the accessor methods for the effective value.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TenantConfig {
    pub name: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub show_name_in_header: Option<bool>,
    pub pool_address: PoolAddress,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub receipt_type: Option<ReceiptType>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub token_standard: Option<TokenStandard>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub not_found: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hostname_override: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub redirect_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hide_allowed_token_list: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub style_overrides: Option<StyleOverrides>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub color_scheme: Option<ColorScheme>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub secondary_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub background_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub website_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub max_staked_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub links: Option<Vec<Link>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub airdrop_metadata: Option<Vec<AirdropMetadata>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub analytics: Option<Vec<Analytic>>,
}

impl TenantConfig {
    /// Minimal record; every optional field is unset
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        pool_address: PoolAddress,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            show_name_in_header: None,
            pool_address,
            receipt_type: None,
            token_standard: None,
            hidden: None,
            not_found: None,
            hostname_override: None,
            redirect_url: None,
            hide_allowed_token_list: None,
            style_overrides: None,
            color_scheme: None,
            image_url: None,
            secondary_image_url: None,
            background_image_url: None,
            website_url: None,
            max_staked_count: None,
            links: None,
            airdrop_metadata: None,
            analytics: None,
        }
    }

    pub fn shows_name_in_header(&self) -> bool {
        self.show_name_in_header.unwrap_or(false)
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden.unwrap_or(false)
    }

    /// Whether the stake page should render its "not found" state even though the record exists
    pub fn is_not_found(&self) -> bool {
        self.not_found.unwrap_or(false)
    }

    pub fn hides_allowed_token_list(&self) -> bool {
        self.hide_allowed_token_list.unwrap_or(false)
    }

    pub fn secondary_color(&self) -> &str {
        self.color_scheme
            .as_ref()
            .map_or(DEFAULT_SECONDARY_COLOR, |c| c.secondary.as_str())
    }

    pub fn links(&self) -> &[Link] {
        self.links.as_deref().unwrap_or_default()
    }

    /// Percentage of `max_staked_count` that `staked_count` represents.
    ///
    /// Returns `None` when the tenant has no (or a zero) max configured, which disables the
    /// percentage display.
    pub fn staked_percentage(&self, staked_count: u64) -> Option<f64> {
        match self.max_staked_count {
            Some(max) if max > 0 => Some(staked_count as f64 * 100.0 / max as f64),
            _ => None,
        }
    }
}
