//! WARP account records and tunnel-client configuration generators.
//!
//! A registered WARP device ([`AccountRecord`]) is rendered into one of three
//! client formats:
//!
//! ```text
//! AccountRecord ──┬─ endpoint::resolve ──┐
//!                 └─ ReservedValue ──────┴─► xray | sing-box | wg-quick ─► bytes
//! ```
//!
//! Everything here is pure: no I/O, no global state. Reading the account
//! file, talking to the Cloudflare API and writing the output belong to the
//! caller.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod account;
pub mod constants;
pub mod endpoint;
pub mod error;
pub mod generate;
pub mod keys;
pub mod reserved;

pub use account::{AccountRecord, AccountSummary, Peer, PeerEndpoint};
pub use endpoint::{resolve, EndpointSelector};
pub use error::{ConfigError, Result};
pub use generate::{dispatch, generate, GenerateOptions, GeneratorKind, GeneratorSelection, XrayOptions};
pub use keys::{KeyPair, PrivateKey, PublicKey, KEY_SIZE};
pub use reserved::ReservedValue;
