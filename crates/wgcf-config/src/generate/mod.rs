//! Client configuration generators.
//!
//! Each submodule renders an [`AccountRecord`] in one target format:
//! - [`xray`] - xray-core `wireguard` outbound (JSON)
//! - [`sing_box`] - sing-box `wireguard` outbound (JSON)
//! - [`wg_quick`] - wg-quick interface file (INI-like text)
//!
//! [`GeneratorSelection`] turns the caller's format flags into exactly one
//! [`GeneratorKind`], and [`generate`] runs it.

pub mod sing_box;
pub mod wg_quick;
pub mod xray;

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::account::AccountRecord;
use crate::endpoint::{self, EndpointSelector};
use crate::error::{ConfigError, Result};

pub use xray::XrayOptions;

/// Target configuration format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeneratorKind {
    /// xray-core outbound.
    Xray,
    /// sing-box outbound.
    SingBox,
    /// wg-quick interface file.
    WgQuick,
}

impl GeneratorKind {
    /// Canonical name, also used for the CLI flags.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Xray => "xray",
            Self::SingBox => "sing-box",
            Self::WgQuick => "wg-quick",
        }
    }

    /// Suffix of the default output file, replacing the account file's extension.
    #[must_use]
    pub const fn file_suffix(self) -> &'static str {
        match self {
            Self::Xray => ".xray.json",
            Self::SingBox => ".sing-box.json",
            Self::WgQuick => ".ini",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The format flags a caller raised. Exactly one must be set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GeneratorSelection {
    /// xray requested.
    pub xray: bool,
    /// sing-box requested.
    pub sing_box: bool,
    /// wg-quick requested.
    pub wg_quick: bool,
}

impl GeneratorSelection {
    /// Resolves the flags to a single generator.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotSpecified`] if no flag is set and
    /// [`ConfigError::MultipleSpecified`] if more than one is.
    pub fn select(self) -> Result<GeneratorKind> {
        let chosen: Vec<GeneratorKind> = [
            (self.xray, GeneratorKind::Xray),
            (self.sing_box, GeneratorKind::SingBox),
            (self.wg_quick, GeneratorKind::WgQuick),
        ]
        .into_iter()
        .filter_map(|(set, kind)| set.then_some(kind))
        .collect();

        match chosen.as_slice() {
            [] => Err(ConfigError::NotSpecified),
            [kind] => Ok(*kind),
            _ => Err(ConfigError::MultipleSpecified),
        }
    }
}

impl From<GeneratorKind> for GeneratorSelection {
    fn from(kind: GeneratorKind) -> Self {
        Self {
            xray: kind == GeneratorKind::Xray,
            sing_box: kind == GeneratorKind::SingBox,
            wg_quick: kind == GeneratorKind::WgQuick,
        }
    }
}

/// Format-specific options. Only the xray generator takes any.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Options for [`GeneratorKind::Xray`].
    pub xray: XrayOptions,
}

/// Renders `record` with the generator picked by `selection`.
///
/// # Errors
///
/// Returns the selection error, [`ConfigError::IncompleteRecord`] if the
/// record lacks a private key or peer, or whatever the generator reports.
pub fn dispatch(
    selection: GeneratorSelection,
    record: &AccountRecord,
    options: &GenerateOptions,
) -> Result<Vec<u8>> {
    generate(selection.select()?, record, options)
}

/// Renders `record` in the `kind` format.
///
/// The record precondition is checked here once; generators assume it holds.
///
/// # Errors
///
/// Returns [`ConfigError::IncompleteRecord`] for an unusable record, or the
/// generator's error unchanged.
pub fn generate(kind: GeneratorKind, record: &AccountRecord, options: &GenerateOptions) -> Result<Vec<u8>> {
    record.validate()?;
    let peer = record.primary_peer()?;
    debug!(id = %record.id, generator = %kind, "generating config");

    match kind {
        GeneratorKind::Xray => {
            let endpoint = endpoint::resolve(peer, options.xray.endpoint)?;
            let reserved = record.reserved()?;
            xray::generate(record, &endpoint, &reserved, &options.xray)
        }
        GeneratorKind::SingBox => {
            let server = endpoint::resolve(peer, EndpointSelector::Domain)?;
            sing_box::generate(record, &server)
        }
        GeneratorKind::WgQuick => wg_quick::generate(record),
    }
}

/// Serializes `value` as pretty JSON indented by `width` spaces.
pub(crate) fn to_json_indented<T: Serialize + ?Sized>(value: &T, width: u8) -> Result<Vec<u8>> {
    let indent = vec![b' '; usize::from(width)];
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent);
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}
