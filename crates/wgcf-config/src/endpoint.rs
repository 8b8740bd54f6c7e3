//! Peer endpoint selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::account::Peer;
use crate::error::{ConfigError, Result};

/// Which form of the peer address ends up in the generated config.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndpointSelector {
    /// The peer's domain endpoint, verbatim.
    #[default]
    #[serde(rename = "domain")]
    Domain,
    /// The peer's IPv4 address with its first port.
    #[serde(rename = "ip_v4")]
    IPv4,
    /// The peer's IPv6 address with its first port.
    #[serde(rename = "ip_v6")]
    IPv6,
}

impl EndpointSelector {
    /// All selectors, in declaration order.
    pub const ALL: [Self; 3] = [Self::Domain, Self::IPv4, Self::IPv6];

    /// Canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::IPv4 => "ip_v4",
            Self::IPv6 => "ip_v6",
        }
    }
}

impl fmt::Display for EndpointSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EndpointSelector {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|selector| selector.as_str() == s)
            .ok_or_else(|| ConfigError::UnsupportedEndpointType(s.to_string()))
    }
}

/// Builds the endpoint string for `peer` in the requested form.
///
/// This is plain string composition: addresses are not validated and nothing
/// is looked up in DNS.
///
/// # Errors
///
/// Returns [`ConfigError::UnresolvableEndpoint`] if the host (for
/// [`EndpointSelector::Domain`]) or the address or port list (for the IP
/// forms) is empty.
pub fn resolve(peer: &Peer, selector: EndpointSelector) -> Result<String> {
    let endpoint = &peer.endpoint;
    let unresolvable = |reason: &str| ConfigError::UnresolvableEndpoint {
        selector: selector.to_string(),
        reason: reason.to_string(),
    };

    let address = match selector {
        EndpointSelector::Domain => {
            if endpoint.host.is_empty() {
                return Err(unresolvable("peer has no host"));
            }
            return Ok(endpoint.host.clone());
        }
        EndpointSelector::IPv4 => &endpoint.v4,
        EndpointSelector::IPv6 => &endpoint.v6,
    };
    if address.is_empty() {
        return Err(unresolvable("peer has no address"));
    }
    let port = endpoint.ports.first().ok_or_else(|| unresolvable("peer has no ports"))?;
    Ok(format!("{address}:{port}"))
}

/// Drops the trailing `:port` from an `address:port` string.
///
/// Works for bracketed IPv6 (`[::1]:0` becomes `[::1]`).
///
/// # Errors
///
/// Returns [`ConfigError::InvalidAddress`] if there is no `:` separator.
pub fn strip_port(address: &str) -> Result<&str> {
    address
        .rsplit_once(':')
        .map(|(host, _port)| host)
        .ok_or_else(|| ConfigError::InvalidAddress(address.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::PeerEndpoint;
    use test_case::test_case;

    fn peer(ports: Vec<u16>) -> Peer {
        Peer {
            public_key: "PUB1".into(),
            endpoint: PeerEndpoint {
                v4: "162.159.192.1".into(),
                v6: "[2606:4700:d0::a29f:c001]".into(),
                ports,
                host: "x.example".into(),
            },
        }
    }

    #[test_case(EndpointSelector::Domain, "x.example" ; "domain is verbatim")]
    #[test_case(EndpointSelector::IPv4, "162.159.192.1:2408" ; "ipv4 uses first port")]
    #[test_case(EndpointSelector::IPv6, "[2606:4700:d0::a29f:c001]:2408" ; "ipv6 uses first port")]
    fn resolves(selector: EndpointSelector, expected: &str) {
        let resolved = resolve(&peer(vec![2408, 500]), selector).expect("resolvable");
        assert_eq!(resolved, expected);
    }

    #[test]
    fn ip_without_ports_is_unresolvable() {
        let err = resolve(&peer(Vec::new()), EndpointSelector::IPv4).expect_err("no ports");
        assert!(matches!(err, ConfigError::UnresolvableEndpoint { .. }));
        assert!(resolve(&peer(Vec::new()), EndpointSelector::IPv6).is_err());
    }

    #[test]
    fn domain_ignores_ports() {
        let resolved = resolve(&peer(Vec::new()), EndpointSelector::Domain).expect("resolvable");
        assert_eq!(resolved, "x.example");
    }

    #[test]
    fn empty_host_is_unresolvable() {
        let mut p = peer(vec![2408]);
        p.endpoint.host.clear();
        let err = resolve(&p, EndpointSelector::Domain).expect_err("no host");
        assert!(matches!(err, ConfigError::UnresolvableEndpoint { .. }));
    }

    #[test]
    fn empty_address_is_unresolvable() {
        let mut p = peer(vec![2408]);
        p.endpoint.v6.clear();
        assert!(resolve(&p, EndpointSelector::IPv6).is_err());
    }

    #[test_case("domain", EndpointSelector::Domain)]
    #[test_case("ip_v4", EndpointSelector::IPv4)]
    #[test_case("ip_v6", EndpointSelector::IPv6)]
    fn parses_selector(input: &str, expected: EndpointSelector) {
        let parsed: EndpointSelector = input.parse().expect("known selector");
        assert_eq!(parsed, expected);
        assert_eq!(parsed.to_string(), input);
    }

    #[test_case("ipv4" ; "missing underscore")]
    #[test_case("Domain" ; "wrong case")]
    #[test_case("" ; "empty")]
    fn rejects_unknown_selector(input: &str) {
        let err = input.parse::<EndpointSelector>().expect_err("unknown selector");
        assert!(matches!(err, ConfigError::UnsupportedEndpointType(_)));
    }

    #[test_case("162.159.192.1:0", "162.159.192.1")]
    #[test_case("[2606:4700:d0::a29f:c001]:0", "[2606:4700:d0::a29f:c001]")]
    #[test_case("engage.cloudflareclient.com:2408", "engage.cloudflareclient.com")]
    fn strips_port(input: &str, expected: &str) {
        assert_eq!(strip_port(input).expect("has port"), expected);
    }

    #[test]
    fn strip_port_requires_separator() {
        assert!(matches!(strip_port("162.159.192.1"), Err(ConfigError::InvalidAddress(_))));
    }
}
