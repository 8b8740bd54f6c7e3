//! wg-quick interface file.
//!
//! A fixed template with the record's fields substituted in. Besides the
//! interface and peer stanzas it installs policy routing: everything leaving
//! the tunnel interface or carrying [`FIREWALL_MARK`] is looked up in
//! [`ROUTING_TABLE_ID`], and locally sourced packets from the tunnel
//! addresses are marked via iptables. The peer endpoint is the stored IPv4
//! address as-is.

use std::fmt::Write as FmtWrite;

use crate::account::AccountRecord;
use crate::constants::{ALLOWED_IPS, DEFAULT_MTU, FIREWALL_MARK, ROUTING_TABLE_ID};
use crate::error::Result;

/// Renders the wg-quick file.
///
/// # Errors
///
/// Returns [`crate::ConfigError::IncompleteRecord`] if the record has no peers.
pub fn generate(record: &AccountRecord) -> Result<Vec<u8>> {
    let peer = record.primary_peer()?;
    let addresses = record.addresses();
    let (v4, v6) = (&addresses.v4, &addresses.v6);
    let table = ROUTING_TABLE_ID;
    let mark = FIREWALL_MARK;

    let mut output = String::new();
    output.push('\n');

    output.push_str("[Interface]\n");
    let _ = writeln!(output, "PrivateKey = {}", record.private_key());
    let _ = writeln!(output, "Address = {}", addresses.v4_cidr());
    let _ = writeln!(output, "Address = {}", addresses.v6_cidr());
    let _ = writeln!(output, "MTU = {DEFAULT_MTU}");
    output.push('\n');

    let _ = writeln!(output, "Table = {table}");
    output.push('\n');

    for family in ["", " -6"] {
        let _ = writeln!(output, "PreUp = ip{family} rule add oif %i lookup {table}");
        let _ = writeln!(output, "PostDown = ip{family} rule del oif %i lookup {table}");
    }
    output.push('\n');

    for family in ["", " -6"] {
        let _ = writeln!(output, "PreUp = ip{family} rule add fwmark {mark} lookup {table}");
        let _ = writeln!(output, "PostDown = ip{family} rule del fwmark {mark} lookup {table}");
    }
    output.push('\n');

    for (family, cidr) in [("", addresses.v4_cidr()), (" -6", addresses.v6_cidr())] {
        let _ = writeln!(output, "#PreUp = ip{family} rule add from {cidr} lookup {table}");
        let _ = writeln!(output, "#PostDown = ip{family} rule del from {cidr} lookup {table}");
    }
    output.push_str("# Alternative\n");
    output.push('\n');

    for (tool, source) in [("iptables", v4), ("ip6tables", v6)] {
        let _ = writeln!(output, "PostUp = {tool} -t mangle -A OUTPUT -s {source} -j MARK --set-mark {mark}");
        let _ = writeln!(output, "PreDown = {tool} -t mangle -D OUTPUT -s {source} -j MARK --set-mark {mark}");
    }
    output.push('\n');

    output.push_str("[Peer]\n");
    let _ = writeln!(output, "PublicKey = {}", peer.public_key);
    let _ = writeln!(output, "AllowedIPs = {}", ALLOWED_IPS.join(", "));
    let _ = writeln!(output, "Endpoint = {}", peer.endpoint.v4);

    Ok(output.into_bytes())
}
