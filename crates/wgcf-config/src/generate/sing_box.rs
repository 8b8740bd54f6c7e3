//! sing-box `wireguard` outbound.
//!
//! The shape is fixed: the domain endpoint, the well-known relay key and the
//! raw client id as `reserved`, always indented by four spaces.

use serde::Serialize;

use crate::account::AccountRecord;
use crate::constants::{DEFAULT_MTU, RELAY_PUBLIC_KEY, RELAY_SERVER_PORT, SING_BOX_TAG, WIREGUARD_PROTOCOL};
use crate::error::Result;

use super::to_json_indented;

#[derive(Serialize)]
struct Outbound<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    tag: &'static str,
    server: &'a str,
    server_port: u16,
    local_address: Vec<String>,
    private_key: &'a str,
    peer_public_key: &'static str,
    reserved: &'a str,
    mtu: u16,
}

/// Renders the sing-box outbound with `server` as the peer address.
///
/// # Errors
///
/// Returns [`crate::ConfigError::SerializationFailure`] if encoding fails.
pub fn generate(record: &AccountRecord, server: &str) -> Result<Vec<u8>> {
    let outbound = Outbound {
        kind: WIREGUARD_PROTOCOL,
        tag: SING_BOX_TAG,
        server,
        server_port: RELAY_SERVER_PORT,
        local_address: record.addresses().cidrs(),
        private_key: record.private_key(),
        peer_public_key: RELAY_PUBLIC_KEY,
        reserved: record.client_id(),
        mtu: DEFAULT_MTU,
    };
    to_json_indented(&outbound, 4)
}
