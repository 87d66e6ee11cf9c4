//! On-chain pool address codec.
//!
//! Stake pool accounts are 32-byte public keys rendered as base58. The registry only
//! needs to decode and compare them; it never talks to a chain.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::AddressError;

pub const POOL_ADDRESS_LEN: usize = 32;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoolAddress([u8; POOL_ADDRESS_LEN]);

impl PoolAddress {
    pub const fn new(bytes: [u8; POOL_ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; POOL_ADDRESS_LEN] {
        &self.0
    }

    pub fn to_base58(&self) -> String {
        bs58::encode(self.0).into_string()
    }
}

impl FromStr for PoolAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decoded = bs58::decode(s)
            .into_vec()
            .map_err(|e| AddressError::InvalidBase58 {
                address: s.to_string(),
                reason: e.to_string(),
            })?;

        let bytes: [u8; POOL_ADDRESS_LEN] =
            decoded
                .try_into()
                .map_err(|v: Vec<u8>| AddressError::InvalidLength {
                    address: s.to_string(),
                    len: v.len(),
                })?;

        Ok(Self(bytes))
    }
}

impl fmt::Display for PoolAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for PoolAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PoolAddress({})", self.to_base58())
    }
}

impl Serialize for PoolAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for PoolAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
