//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use wgcf_config::constants::{DEFAULT_XRAY_INDENT, DEFAULT_XRAY_TAG};
use wgcf_config::{EndpointSelector, GenerateOptions, GeneratorSelection, XrayOptions};

use crate::api::DEFAULT_API_BASE;

/// Cloudflare WARP registration and client config generator.
#[derive(Parser, Debug, Clone)]
#[command(name = "wgcf-cli")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Account file to read or write.
    #[arg(short, long, global = true, env = "WGCF_CONFIG", default_value = "wgcf.json")]
    pub config: PathBuf,

    /// Base URL of the Cloudflare client API.
    #[arg(long, global = true, env = "WGCF_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Register a new WARP account.
    Register(RegisterArgs),

    /// Unbind from original license.
    Unbind(UnbindArgs),

    /// Generate a xray/sing-box/wg-quick config.
    Generate(GenerateArgs),
}

/// Arguments for the register command.
#[derive(Args, Debug, Clone)]
pub struct RegisterArgs {
    /// Zero Trust team token to register the device with.
    #[arg(short, long)]
    pub token: Option<String>,

    /// Overwrite an existing account file without asking.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the unbind command.
#[derive(Args, Debug, Clone)]
pub struct UnbindArgs {
    /// Confirm that you want to unbind from original license.
    #[arg(long, required = true)]
    pub yes: bool,
}

/// Arguments for the generate command.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Generate a xray config.
    #[arg(long)]
    pub xray: bool,

    /// Generate a sing-box config.
    #[arg(long)]
    pub sing_box: bool,

    /// Generate a wg-quick config.
    #[arg(long, visible_alias = "wg")]
    pub wg_quick: bool,

    /// Output file name. Supported values: 'default'/'stdout'/any file path.
    #[arg(long, default_value = "default")]
    pub output_file: String,

    /// Top-level xray config module ('outbounds' as example). By default no module is generated.
    #[arg(long)]
    pub xray_module: Option<String>,

    /// 'tag' field of the xray config.
    #[arg(long, default_value = DEFAULT_XRAY_TAG)]
    pub xray_tag: String,

    /// Indentation size of the xray config.
    #[arg(long, default_value_t = DEFAULT_XRAY_INDENT)]
    pub xray_indent_width: u8,

    /// Peer endpoint form of the xray config: domain, ip_v4 or ip_v6.
    #[arg(long, default_value_t = EndpointSelector::Domain)]
    pub xray_endpoint: EndpointSelector,
}

impl GenerateArgs {
    /// The generator flags that were raised.
    #[must_use]
    pub const fn selection(&self) -> GeneratorSelection {
        GeneratorSelection { xray: self.xray, sing_box: self.sing_box, wg_quick: self.wg_quick }
    }

    /// Format options derived from the `--xray-*` flags.
    #[must_use]
    pub fn options(&self) -> GenerateOptions {
        GenerateOptions {
            xray: XrayOptions {
                tag: self.xray_tag.clone(),
                module: self.xray_module.clone().filter(|module| !module.is_empty()),
                indent_width: self.xray_indent_width,
                endpoint: self.xray_endpoint,
            },
        }
    }
}
