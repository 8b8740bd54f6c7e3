//! License unbind command.
//!
//! Deactivates the device on its account, then refreshes the stored record
//! from the API so the account file reflects the new state.

use std::io::Write;
use std::path::PathBuf;

use tracing::debug;
use wgcf_config::AccountRecord;

use crate::api::WarpClient;
use crate::error::CliError;
use crate::output::{load_account, save_account};

/// Unbind command executor.
pub struct UnbindCommand {
    account_path: PathBuf,
    client: WarpClient,
}

impl UnbindCommand {
    /// Create a new unbind command for the account at `account_path`.
    #[must_use]
    pub fn new(account_path: impl Into<PathBuf>, client: WarpClient) -> Self {
        Self { account_path: account_path.into(), client }
    }

    /// Execute the unbind command.
    ///
    /// # Errors
    ///
    /// Returns an error if the account file is unusable or an API call fails.
    pub async fn execute<W: Write>(&self, out: &mut W) -> Result<(), CliError> {
        let record = load_account(&self.account_path)?;
        self.client.unbind(&record.id, &record.token).await?;
        writeln!(out, "Account unbinded (ID: {}) successfully", record.id)?;

        let mut fresh = self.client.fetch(&record.id, &record.token).await?;
        refresh(&record, &mut fresh)?;
        save_account(&self.account_path, &fresh)?;
        debug!(id = %fresh.id, "refreshed account file");
        Ok(())
    }
}

/// Carries the client-side fields of `local` over to the API's `fresh` copy.
///
/// The API never returns the private key or the token, and reports peer
/// addresses with a port, so the fresh record is completed the same way a new
/// registration is.
fn refresh(local: &AccountRecord, fresh: &mut AccountRecord) -> Result<(), CliError> {
    if fresh.token.is_empty() {
        fresh.token.clone_from(&local.token);
    }
    fresh.complete_registration(local.private_key())?;
    Ok(())
}
