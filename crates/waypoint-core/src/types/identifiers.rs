//! Principal identity
//!
//! A principal is the authenticated actor performing an operation. The ledger
//! never authenticates; it only compares identities that the hosting
//! environment has already vouched for.

use crate::{Result, WaypointError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Size in bytes of a [`Principal`]
pub const PRINCIPAL_LENGTH: usize = 20;

/// Opaque fixed-size identity of a caller
///
/// Rendered as `0x` followed by 40 lowercase hex digits. Serializes as that
/// string so snapshots and configuration files stay human-readable.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Principal([u8; PRINCIPAL_LENGTH]);

impl Principal {
    /// Create a principal from raw bytes
    pub const fn from_bytes(bytes: [u8; PRINCIPAL_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; PRINCIPAL_LENGTH] {
        &self.0
    }

    /// Convert to lowercase hex with a `0x` prefix
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Parse from hex; the `0x` prefix is optional and case is ignored
    pub fn from_hex(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.len() != PRINCIPAL_LENGTH * 2 {
            return Err(WaypointError::invalid(format!(
                "principal must be {} hex digits, got {}",
                PRINCIPAL_LENGTH * 2,
                digits.len()
            )));
        }

        let mut bytes = [0u8; PRINCIPAL_LENGTH];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| WaypointError::invalid(format!("principal is not valid hex: {e}")))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Principal({self})")
    }
}

impl FromStr for Principal {
    type Err = WaypointError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl From<[u8; PRINCIPAL_LENGTH]> for Principal {
    fn from(bytes: [u8; PRINCIPAL_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl From<Principal> for [u8; PRINCIPAL_LENGTH] {
    fn from(principal: Principal) -> Self {
        principal.0
    }
}

impl Serialize for Principal {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Principal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_display_is_prefixed_lowercase_hex() {
        let p = Principal::from_bytes([0xAB; PRINCIPAL_LENGTH]);
        assert_eq!(p.to_string(), format!("0x{}", "ab".repeat(20)));
    }

    #[test]
    fn test_parse_accepts_mixed_case_and_missing_prefix() {
        let p = Principal::from_bytes([0xAB; PRINCIPAL_LENGTH]);
        assert_eq!(Principal::from_hex(&"AB".repeat(20)).unwrap(), p);
        assert_eq!(format!("0X{}", "aB".repeat(20)).parse::<Principal>().unwrap(), p);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Principal::from_hex("0x1234").is_err());
        assert!(Principal::from_hex(&"zz".repeat(20)).is_err());
        assert!(Principal::from_hex("").is_err());
    }

    #[test]
    fn test_serde_uses_hex_string() {
        let p = Principal::from_bytes([7; PRINCIPAL_LENGTH]);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, format!("\"{p}\""));
        let back: Principal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }

    proptest! {
        #[test]
        fn prop_display_parses_back(bytes in any::<[u8; PRINCIPAL_LENGTH]>()) {
            let p = Principal::from_bytes(bytes);
            prop_assert_eq!(p.to_string().parse::<Principal>().unwrap(), p);
        }

        #[test]
        fn prop_wrong_length_is_rejected(digits in "[0-9a-f]{0,60}") {
            prop_assume!(digits.len() != 2 * PRINCIPAL_LENGTH);
            prop_assert!(Principal::from_hex(&digits).is_err());
        }
    }
}
