//! # wgcf-cli
//!
//! Cloudflare WARP command-line interface.
//!
//! Provides commands for:
//! - Registering a WARP device and storing the account file
//! - Unbinding a device from its license
//! - Generating xray, sing-box and wg-quick configs from the account file
//!
//! # Architecture
//!
//! Registration and unbinding talk to the Cloudflare client API through
//! [`api::WarpClient`]. Generation is offline and delegates to
//! `wgcf-config`.
//!
//! ```text
//! ┌───────────┐   HTTPS    ┌───────────────────────┐
//! │  wgcf-cli │◄──────────►│ api.cloudflareclient  │
//! └─────┬─────┘            └───────────────────────┘
//!       │ account file
//!       ▼
//! ┌─────────────┐
//! │ wgcf-config │──► xray / sing-box / wg-quick
//! └─────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use api::WarpClient;
pub use cli::{Cli, Commands, GenerateArgs, RegisterArgs, UnbindArgs};
pub use error::CliError;
pub use output::OutputTarget;
