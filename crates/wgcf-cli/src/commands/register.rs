//! Device registration command.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use wgcf_config::KeyPair;

use crate::api::WarpClient;
use crate::cli::RegisterArgs;
use crate::error::CliError;
use crate::output::{confirm_overwrite, save_account};

/// Register command executor.
pub struct RegisterCommand {
    account_path: PathBuf,
    client: WarpClient,
}

impl RegisterCommand {
    /// Create a new register command writing to `account_path`.
    #[must_use]
    pub fn new(account_path: impl Into<PathBuf>, client: WarpClient) -> Self {
        Self { account_path: account_path.into(), client }
    }

    /// Execute the register command.
    ///
    /// # Errors
    ///
    /// Returns an error if the user keeps the existing account file, the API
    /// call fails, the response is unusable, or the file cannot be written.
    pub async fn execute<W: Write, R: BufRead, P: Write>(
        &self,
        args: &RegisterArgs,
        out: &mut W,
        input: &mut R,
        prompt: &mut P,
    ) -> Result<(), CliError> {
        if !args.yes {
            confirm_overwrite(&self.account_path, "are you sure to continue?", input, prompt)?;
        }

        let keys = KeyPair::generate();
        let public_key = keys.public_key().to_base64();
        writeln!(out, "Generated public key: {public_key}")?;

        let mut record = self.client.register(&public_key, args.token.as_deref()).await?;
        record.complete_registration(&keys.private_key().to_base64())?;
        save_account(&self.account_path, &record)?;

        serde_json::to_writer_pretty(&mut *out, &record.summary()?)?;
        writeln!(out)?;
        Ok(())
    }
}
