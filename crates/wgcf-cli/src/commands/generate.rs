//! Config generation command.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use tracing::info;
use wgcf_config::generate;

use crate::cli::GenerateArgs;
use crate::error::CliError;
use crate::output::{confirm_overwrite, load_account, write_private_file, OutputTarget};

/// Generate command executor.
pub struct GenerateCommand {
    account_path: PathBuf,
}

impl GenerateCommand {
    /// Create a new generate command reading `account_path`.
    #[must_use]
    pub fn new(account_path: impl Into<PathBuf>) -> Self {
        Self { account_path: account_path.into() }
    }

    /// Execute the generate command.
    ///
    /// Config bytes or the success message go to `out`; overwrite prompts are
    /// written to `prompt` and answered from `input`.
    ///
    /// # Errors
    ///
    /// Returns an error if the generator selection is invalid, the account
    /// file is unusable, generation fails, or the output cannot be written.
    pub fn execute<W: Write, R: BufRead, P: Write>(
        &self,
        args: &GenerateArgs,
        out: &mut W,
        input: &mut R,
        prompt: &mut P,
    ) -> Result<(), CliError> {
        let target = OutputTarget::parse(&args.output_file);
        let kind = args.selection().select()?;

        let record = load_account(&self.account_path)?;
        let body = generate(kind, &record, &args.options())?;

        let Some(path) = target.path(&self.account_path, kind) else {
            out.write_all(&body)?;
            out.flush()?;
            return Ok(());
        };

        confirm_overwrite(&path, "it will be overwritten. Continue?", input, prompt)?;
        write_private_file(&path, &body)?;
        info!(generator = %kind, path = %path.display(), "generated config");
        writeln!(
            out,
            "Generate {kind} configuration file '{}' (ID: {}) successfully",
            path.display(),
            record.id
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;

    const ACCOUNT: &str = r#"{
        "id": "device-1",
        "config": {
            "client_id": "Tm86",
            "private_key": "PK1",
            "peers": [{
                "public_key": "PUB1",
                "endpoint": {"v4": "162.159.192.1", "v6": "[2606:4700:d0::a29f:c001]", "host": "engage.cloudflareclient.com:2408", "ports": [2408]}
            }],
            "interface": {"addresses": {"v4": "10.0.0.2", "v6": "fd00::2"}}
        }
    }"#;

    fn args(extra: &[&str]) -> GenerateArgs {
        let argv = ["wgcf-cli", "generate"].iter().chain(extra).copied();
        match Cli::parse_from(argv).command {
            Commands::Generate(args) => args,
            other => unreachable!("expected generate, got {other:?}"),
        }
    }

    fn account_file(dir: &Path) -> PathBuf {
        let path = dir.join("wgcf.json");
        fs::write(&path, ACCOUNT).expect("write account");
        path
    }

    fn run(account: &Path, extra: &[&str], answer: &str) -> (Result<(), CliError>, String, String) {
        let mut out = Vec::new();
        let mut prompt = Vec::new();
        let result =
            GenerateCommand::new(account).execute(&args(extra), &mut out, &mut Cursor::new(answer), &mut prompt);
        (
            result,
            String::from_utf8(out).expect("utf8"),
            String::from_utf8(prompt).expect("utf8"),
        )
    }

    #[test]
    fn stdout_target_prints_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let account = account_file(dir.path());
        let (result, out, prompt) = run(&account, &["--wg", "--output-file", "stdout"], "");
        result.expect("generate");
        assert!(out.contains("PrivateKey = PK1\n"));
        assert!(prompt.is_empty());
    }

    #[test]
    fn default_target_writes_next_to_account() {
        let dir = tempfile::tempdir().expect("tempdir");
        let account = account_file(dir.path());
        let (result, out, _) = run(&account, &["--sing-box"], "");
        result.expect("generate");

        let written = dir.path().join("wgcf.sing-box.json");
        let body = fs::read_to_string(&written).expect("output written");
        assert!(body.contains("\"tag\": \"wireguard-out\""));
        assert_eq!(
            out,
            format!(
                "Generate sing-box configuration file '{}' (ID: device-1) successfully\n",
                written.display()
            )
        );
    }

    #[test]
    fn custom_target_declined_keeps_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let account = account_file(dir.path());
        let target = dir.path().join("xray.json");
        fs::write(&target, "keep me").expect("write");

        let target_arg = target.to_str().expect("utf8 path");
        let (result, out, prompt) = run(&account, &["--xray", "--output-file", target_arg], "n\n");
        assert!(matches!(result, Err(CliError::Aborted)));
        assert!(out.is_empty());
        assert!(prompt.contains("it will be overwritten. Continue? [y/N]: "));
        assert_eq!(fs::read_to_string(&target).expect("read"), "keep me");
    }

    #[test]
    fn custom_target_confirmed_overwrites() {
        let dir = tempfile::tempdir().expect("tempdir");
        let account = account_file(dir.path());
        let target = dir.path().join("xray.json");
        fs::write(&target, "old").expect("write");

        let target_arg = target.to_str().expect("utf8 path");
        let (result, _, _) = run(
            &account,
            &["--xray", "--xray-endpoint", "ip_v4", "--output-file", target_arg],
            "y\n",
        );
        result.expect("generate");
        let value: serde_json::Value =
            serde_json::from_slice(&fs::read(&target).expect("read")).expect("json");
        assert_eq!(value["settings"]["peers"][0]["endpoint"], "162.159.192.1:2408");
    }

    #[test]
    fn selection_is_checked_before_reading_account() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("absent.json");
        let (result, _, _) = run(&missing, &[], "");
        assert!(matches!(result, Err(CliError::Config(wgcf_config::ConfigError::NotSpecified))));

        let (result, _, _) = run(&missing, &["--xray", "--wg"], "");
        assert!(matches!(result, Err(CliError::Config(wgcf_config::ConfigError::MultipleSpecified))));
    }

    #[test]
    fn missing_account_file_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (result, _, _) = run(&dir.path().join("absent.json"), &["--xray"], "");
        assert!(matches!(result, Err(CliError::ReadAccount { .. })));
    }
}
