//! xray-core `wireguard` outbound.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::account::AccountRecord;
use crate::constants::{ALLOWED_IPS, DEFAULT_MTU, DEFAULT_XRAY_INDENT, DEFAULT_XRAY_TAG, WIREGUARD_PROTOCOL};
use crate::endpoint::EndpointSelector;
use crate::error::Result;
use crate::reserved::ReservedValue;

use super::to_json_indented;

/// Options of the xray generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XrayOptions {
    /// `tag` of the outbound.
    pub tag: String,
    /// Top-level key to nest the outbound under (e.g. `outbounds`), as a
    /// one-element array. `None` emits the bare outbound.
    pub module: Option<String>,
    /// Indentation in spaces.
    pub indent_width: u8,
    /// Which peer address form to use as the endpoint.
    pub endpoint: EndpointSelector,
}

impl Default for XrayOptions {
    fn default() -> Self {
        Self {
            tag: DEFAULT_XRAY_TAG.to_string(),
            module: None,
            indent_width: DEFAULT_XRAY_INDENT,
            endpoint: EndpointSelector::Domain,
        }
    }
}

#[derive(Serialize)]
struct Outbound<'a> {
    protocol: &'static str,
    settings: Settings<'a>,
    tag: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Settings<'a> {
    secret_key: &'a str,
    address: Vec<String>,
    peers: [PeerSettings<'a>; 1],
    reserved: &'a ReservedValue,
    mtu: u16,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PeerSettings<'a> {
    public_key: &'a str,
    #[serde(rename = "allowedIPs")]
    allowed_ips: [&'static str; 2],
    endpoint: &'a str,
}

/// Renders the xray outbound.
///
/// `endpoint` is the already resolved peer address and `reserved` the
/// decoded client id; the record must have at least one peer.
///
/// # Errors
///
/// Returns [`crate::ConfigError::IncompleteRecord`] without a peer and
/// [`crate::ConfigError::SerializationFailure`] if encoding fails.
pub fn generate(
    record: &AccountRecord,
    endpoint: &str,
    reserved: &ReservedValue,
    options: &XrayOptions,
) -> Result<Vec<u8>> {
    let peer = record.primary_peer()?;
    let outbound = Outbound {
        protocol: WIREGUARD_PROTOCOL,
        settings: Settings {
            secret_key: record.private_key(),
            address: record.addresses().cidrs(),
            peers: [PeerSettings { public_key: &peer.public_key, allowed_ips: ALLOWED_IPS, endpoint }],
            reserved,
            mtu: DEFAULT_MTU,
        },
        tag: &options.tag,
    };

    match options.module.as_deref().filter(|module| !module.is_empty()) {
        None => to_json_indented(&outbound, options.indent_width),
        Some(module) => {
            let wrapped = BTreeMap::from([(module, [outbound])]);
            to_json_indented(&wrapped, options.indent_width)
        }
    }
}
