//! WARP reserved bytes.
//!
//! Cloudflare stamps every WireGuard packet of a WARP session with three
//! "reserved" bytes taken from the base64 client identifier handed out at
//! registration. Clients that skip them get their traffic dropped.

use std::fmt;

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::constants::RESERVED_LEN;
use crate::error::{ConfigError, Result};

/// The three reserved bytes derived from a client identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservedValue([u8; RESERVED_LEN]);

impl ReservedValue {
    /// Creates a value from raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; RESERVED_LEN]) -> Self {
        Self(bytes)
    }

    /// Decodes the base64 client identifier and keeps its first three bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MalformedReservedSource`] if the identifier is
    /// not base64 or decodes to fewer than three bytes.
    pub fn from_client_id(client_id: &str) -> Result<Self> {
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(client_id)
            .map_err(|e| ConfigError::MalformedReservedSource(format!("client id {client_id:?}: {e}")))?;
        Self::from_slice(&decoded)
    }

    /// Takes the first three bytes of `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MalformedReservedSource`] if fewer than three bytes are given.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let Some(head) = bytes.get(..RESERVED_LEN) else {
            return Err(ConfigError::MalformedReservedSource(format!(
                "expected {RESERVED_LEN} bytes, got {}",
                bytes.len()
            )));
        };
        let mut out = [0u8; RESERVED_LEN];
        out.copy_from_slice(head);
        Ok(Self(out))
    }

    /// Parses the hex rendering produced by [`Self::to_hex`]. The `0x` prefix is optional.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MalformedReservedSource`] for non-hex input or a wrong length.
    pub fn from_hex(s: &str) -> Result<Self> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits)
            .map_err(|e| ConfigError::MalformedReservedSource(format!("hex {s:?}: {e}")))?;
        if bytes.len() != RESERVED_LEN {
            return Err(ConfigError::MalformedReservedSource(format!(
                "expected {RESERVED_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        Self::from_slice(&bytes)
    }

    /// Returns the bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; RESERVED_LEN] {
        &self.0
    }

    /// Decimal form, as written into xray configs.
    #[must_use]
    pub fn to_decimal(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    /// Lowercase hex with a `0x` prefix, e.g. `0x4e8f3a`.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for ReservedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "[{a}, {b}, {c}]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_client_id() {
        // "Tm86" is base64 for b"No:" = [78, 111, 58]
        let value = ReservedValue::from_client_id("Tm86").expect("valid client id");
        assert_eq!(value.to_decimal(), vec![78, 111, 58]);
        assert_eq!(value.to_hex(), "0x4e6f3a");
    }

    #[test]
    fn keeps_first_three_bytes_of_longer_ids() {
        let value = ReservedValue::from_slice(&[1, 2, 3, 4, 5]).expect("enough bytes");
        assert_eq!(value.as_bytes(), &[1, 2, 3]);
    }

    #[test]
    fn short_client_id_rejected() {
        // "AQI=" decodes to two bytes
        let err = ReservedValue::from_client_id("AQI=").expect_err("too short");
        assert!(matches!(err, ConfigError::MalformedReservedSource(_)));
    }

    #[test]
    fn empty_client_id_rejected() {
        assert!(ReservedValue::from_client_id("").is_err());
    }

    #[test]
    fn invalid_base64_rejected() {
        let err = ReservedValue::from_client_id("not base64!").expect_err("bad base64");
        assert!(matches!(err, ConfigError::MalformedReservedSource(_)));
    }

    #[test]
    fn hex_accepts_missing_prefix() {
        let with = ReservedValue::from_hex("0x0a0b0c").expect("valid hex");
        let without = ReservedValue::from_hex("0a0b0c").expect("valid hex");
        assert_eq!(with, without);
        assert_eq!(with.as_bytes(), &[10, 11, 12]);
    }

    #[test]
    fn hex_wrong_length_rejected() {
        assert!(ReservedValue::from_hex("0x0a0b").is_err());
        assert!(ReservedValue::from_hex("0x0a0b0c0d").is_err());
        assert!(ReservedValue::from_hex("0xzzzzzz").is_err());
    }

    #[test]
    fn serializes_as_decimal_array() {
        let json = serde_json::to_string(&ReservedValue::new([1, 22, 255])).expect("serialize");
        assert_eq!(json, "[1,22,255]");
    }

    #[test]
    fn display_lists_decimals() {
        assert_eq!(ReservedValue::new([9, 8, 7]).to_string(), "[9, 8, 7]");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn hex_roundtrip(bytes in prop::array::uniform3(any::<u8>())) {
                let value = ReservedValue::new(bytes);
                let decoded = ReservedValue::from_hex(&value.to_hex());
                prop_assert!(decoded.is_ok());
                prop_assert_eq!(decoded.ok(), Some(value));
            }

            #[test]
            fn client_id_always_yields_three_bytes(bytes in prop::collection::vec(any::<u8>(), 3..32)) {
                let id = base64::engine::general_purpose::STANDARD.encode(&bytes);
                let value = ReservedValue::from_client_id(&id);
                prop_assert!(value.is_ok());
                let dec = value.map(|v| v.to_decimal()).unwrap_or_default();
                prop_assert_eq!(dec.len(), RESERVED_LEN);
                prop_assert_eq!(&dec[..], &bytes[..RESERVED_LEN]);
            }
        }
    }
}
