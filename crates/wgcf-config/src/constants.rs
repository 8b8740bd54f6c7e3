//! Fixed protocol constants shared by the generators.

/// Tunnel MTU written into every generated config.
pub const DEFAULT_MTU: u16 = 1280;

/// Public key of the Cloudflare WARP relay, used by the sing-box outbound.
pub const RELAY_PUBLIC_KEY: &str = "bmXOC+F1FxEMF9dyiK2H5/1SUtzH0JuVo51h2wPfgyo=";

/// Server port written into the sing-box outbound.
pub const RELAY_SERVER_PORT: u16 = 2408;

/// Policy routing table used by the wg-quick config.
pub const ROUTING_TABLE_ID: u32 = 300;

/// Firewall mark steered into [`ROUTING_TABLE_ID`] by the wg-quick config.
pub const FIREWALL_MARK: u32 = 32975;

/// Allowed IP ranges for the single WARP peer (all traffic, both families).
pub const ALLOWED_IPS: [&str; 2] = ["0.0.0.0/0", "::/0"];

/// Protocol name of the xray and sing-box outbounds.
pub const WIREGUARD_PROTOCOL: &str = "wireguard";

/// Default `tag` of the xray outbound.
pub const DEFAULT_XRAY_TAG: &str = "wireguard";

/// Fixed `tag` of the sing-box outbound.
pub const SING_BOX_TAG: &str = "wireguard-out";

/// Default indentation width of the xray config.
pub const DEFAULT_XRAY_INDENT: u8 = 4;

/// Number of reserved bytes carried by WARP packets.
pub const RESERVED_LEN: usize = 3;
