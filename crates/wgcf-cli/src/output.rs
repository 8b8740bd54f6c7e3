//! Account file I/O and output routing.
//!
//! Files written here hold private keys, so they are created with mode 0600
//! on Unix.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use wgcf_config::{AccountRecord, GeneratorKind};

use crate::error::CliError;

/// Where generated bytes go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Standard output.
    Stdout,
    /// Next to the account file, named after the generator.
    Default,
    /// A caller-chosen path.
    Custom(PathBuf),
}

impl OutputTarget {
    /// Interprets the `--output-file` value.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "stdout" => Self::Stdout,
            "default" => Self::Default,
            path => Self::Custom(PathBuf::from(path)),
        }
    }

    /// The file this target writes to, `None` for stdout.
    #[must_use]
    pub fn path(&self, account_path: &Path, kind: GeneratorKind) -> Option<PathBuf> {
        match self {
            Self::Stdout => None,
            Self::Default => Some(default_output_path(account_path, kind)),
            Self::Custom(path) => Some(path.clone()),
        }
    }
}

/// `wgcf.json` becomes `wgcf.xray.json`, `wgcf.sing-box.json` or `wgcf.ini`.
#[must_use]
pub fn default_output_path(account_path: &Path, kind: GeneratorKind) -> PathBuf {
    let mut name: OsString = account_path.with_extension("").into_os_string();
    name.push(kind.file_suffix());
    PathBuf::from(name)
}

/// Asks before replacing an existing file. Only `y`/`Y` continues.
///
/// Missing files need no confirmation.
///
/// # Errors
///
/// Returns [`CliError::Aborted`] if the user declines, or an I/O error.
pub fn confirm_overwrite<R: BufRead, W: Write>(
    path: &Path,
    message: &str,
    input: &mut R,
    prompt: &mut W,
) -> Result<(), CliError> {
    if !path.exists() {
        return Ok(());
    }
    write!(prompt, "Warn: File {} exist, {message} [y/N]: ", path.display())?;
    prompt.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    if answer.trim().eq_ignore_ascii_case("y") {
        Ok(())
    } else {
        Err(CliError::Aborted)
    }
}

/// Writes `bytes` to `path`, readable by the owner only.
///
/// # Errors
///
/// Returns [`CliError::Write`] if the file cannot be created or written.
pub fn write_private_file(path: &Path, bytes: &[u8]) -> Result<(), CliError> {
    let wrap = |source| CliError::Write { path: path.to_path_buf(), source };

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path).map_err(wrap)?;
    file.write_all(bytes).map_err(wrap)?;
    debug!(path = %path.display(), bytes = bytes.len(), "wrote file");
    Ok(())
}

/// Reads and parses the account file.
///
/// # Errors
///
/// Returns [`CliError::ReadAccount`] if the file cannot be read and
/// [`CliError::Json`] if it is not a valid account record.
pub fn load_account(path: &Path) -> Result<AccountRecord, CliError> {
    let bytes = fs::read(path).map_err(|source| CliError::ReadAccount { path: path.to_path_buf(), source })?;
    let record = serde_json::from_slice(&bytes)?;
    debug!(path = %path.display(), "loaded account file");
    Ok(record)
}

/// Writes the account file.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub fn save_account(path: &Path, record: &AccountRecord) -> Result<(), CliError> {
    write_private_file(path, &record.to_json()?)?;
    info!(path = %path.display(), id = %record.id, "saved account file");
    Ok(())
}
