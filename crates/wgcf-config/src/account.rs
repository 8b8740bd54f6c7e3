//! The WARP account record.
//!
//! This is the registration response returned by the Cloudflare client API,
//! as stored in the account file. Only the fields the generators and the CLI
//! touch are typed; everything else is carried in `extra` maps so that a
//! record read from disk and written back loses nothing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::endpoint::strip_port;
use crate::error::{ConfigError, Result};
use crate::reserved::ReservedValue;

/// A registered WARP device.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Device registration id.
    pub id: String,
    /// Bearer token for authenticated API calls on this device.
    #[serde(default)]
    pub token: String,
    /// Account the device belongs to.
    #[serde(default)]
    pub account: Account,
    /// WireGuard configuration assigned to the device.
    pub config: TunnelConfig,
    /// Remaining response fields, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Account metadata.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Account id.
    #[serde(default)]
    pub id: String,
    /// `free`, `limited`, `unlimited`, `team`.
    #[serde(default)]
    pub account_type: String,
    /// License key, used to bind WARP+ keys.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub license: String,
    /// Whether WARP+ is active.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub warp_plus: bool,
    /// Remaining account fields, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Tunnel parameters of a device.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TunnelConfig {
    /// Base64 client identifier, the source of the reserved bytes.
    pub client_id: String,
    /// Hex rendering of the reserved bytes, filled in at registration.
    #[serde(default)]
    pub reserved_hex: String,
    /// Decimal rendering of the reserved bytes, filled in at registration.
    #[serde(default)]
    pub reserved_dec: Vec<u8>,
    /// Interface private key (base64). The API never returns it; the CLI
    /// stores the locally generated key here.
    #[serde(default)]
    pub private_key: String,
    /// Peers, the first is the WARP relay.
    #[serde(default)]
    pub peers: Vec<Peer>,
    /// Interface settings.
    pub interface: Interface,
    /// Remaining config fields (`services`, ...), kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Interface settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    /// Tunnel addresses.
    pub addresses: Addresses,
}

/// Tunnel addresses assigned to the device, without prefix length.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addresses {
    /// IPv4 address.
    pub v4: String,
    /// IPv6 address.
    pub v6: String,
}

impl Addresses {
    /// IPv4 address as a `/32` CIDR.
    #[must_use]
    pub fn v4_cidr(&self) -> String {
        format!("{}/32", self.v4)
    }

    /// IPv6 address as a `/128` CIDR.
    #[must_use]
    pub fn v6_cidr(&self) -> String {
        format!("{}/128", self.v6)
    }

    /// Both addresses as CIDRs, IPv4 first.
    #[must_use]
    pub fn cidrs(&self) -> Vec<String> {
        vec![self.v4_cidr(), self.v6_cidr()]
    }
}

/// A WireGuard peer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peer {
    /// Peer public key (base64).
    pub public_key: String,
    /// Where the peer can be reached.
    pub endpoint: PeerEndpoint,
}

/// Connection details of a peer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerEndpoint {
    /// IPv4 address.
    #[serde(default)]
    pub v4: String,
    /// IPv6 address.
    #[serde(default)]
    pub v6: String,
    /// Ports the peer listens on, in preference order.
    #[serde(default)]
    pub ports: Vec<u16>,
    /// Domain endpoint (`host:port`).
    #[serde(default)]
    pub host: String,
}

impl AccountRecord {
    /// Parses a record from JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SerializationFailure`] if the bytes are not a valid record.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Encodes the record as JSON with 4-space indentation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SerializationFailure`] if encoding fails.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        crate::generate::to_json_indented(self, 4)
    }

    /// Interface private key.
    #[must_use]
    pub fn private_key(&self) -> &str {
        &self.config.private_key
    }

    /// Tunnel addresses.
    #[must_use]
    pub fn addresses(&self) -> &Addresses {
        &self.config.interface.addresses
    }

    /// Client identifier.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.config.client_id
    }

    /// The peer every generator targets.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IncompleteRecord`] if the record has no peers.
    pub fn primary_peer(&self) -> Result<&Peer> {
        self.config
            .peers
            .first()
            .ok_or_else(|| ConfigError::IncompleteRecord("no peers".to_string()))
    }

    /// Checks the data every generator needs is present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IncompleteRecord`] naming the first missing piece.
    pub fn validate(&self) -> Result<()> {
        if self.config.private_key.is_empty() {
            return Err(ConfigError::IncompleteRecord("private key is empty".to_string()));
        }
        self.primary_peer()?;
        Ok(())
    }

    /// Reserved bytes derived from the client identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MalformedReservedSource`] if the identifier is unusable.
    pub fn reserved(&self) -> Result<ReservedValue> {
        ReservedValue::from_client_id(&self.config.client_id)
    }

    /// Turns a fresh API response into a storable record.
    ///
    /// The API answers with `address:port` peer addresses (port `0`) and
    /// without the private key, which only the client knows. This stores the
    /// key, strips the ports and fills in both reserved renderings.
    ///
    /// # Errors
    ///
    /// Fails if the record has no peers, a peer address has no port
    /// separator, or the client identifier is malformed.
    pub fn complete_registration(&mut self, private_key: &str) -> Result<()> {
        let reserved = self.reserved()?;
        let peer = self
            .config
            .peers
            .first_mut()
            .ok_or_else(|| ConfigError::IncompleteRecord("no peers".to_string()))?;
        peer.endpoint.v4 = strip_port(&peer.endpoint.v4)?.to_string();
        peer.endpoint.v6 = strip_port(&peer.endpoint.v6)?.to_string();

        self.config.private_key = private_key.to_string();
        self.config.reserved_dec = reserved.to_decimal();
        self.config.reserved_hex = reserved.to_hex();
        debug!(id = %self.id, reserved = %reserved, "completed registration record");
        Ok(())
    }

    /// Simplified view of the record for display.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IncompleteRecord`] if the record has no peers.
    pub fn summary(&self) -> Result<AccountSummary> {
        let peer = self.primary_peer()?;
        Ok(AccountSummary {
            endpoint: EndpointSummary {
                v4: peer.endpoint.v4.clone(),
                v6: peer.endpoint.v6.clone(),
            },
            reserved_str: self.config.client_id.clone(),
            reserved_hex: self.config.reserved_hex.clone(),
            reserved_dec: self.config.reserved_dec.clone(),
            private_key: self.config.private_key.clone(),
            public_key: peer.public_key.clone(),
            addresses: self.addresses().clone(),
        })
    }
}

/// Compact account view printed after registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    /// Peer endpoint addresses.
    pub endpoint: EndpointSummary,
    /// Raw client identifier.
    pub reserved_str: String,
    /// Hex reserved bytes.
    pub reserved_hex: String,
    /// Decimal reserved bytes.
    pub reserved_dec: Vec<u8>,
    /// Interface private key.
    pub private_key: String,
    /// Peer public key.
    pub public_key: String,
    /// Tunnel addresses.
    pub addresses: Addresses,
}

/// Peer endpoint addresses in an [`AccountSummary`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EndpointSummary {
    /// IPv4 address.
    pub v4: String,
    /// IPv6 address.
    pub v6: String,
}
