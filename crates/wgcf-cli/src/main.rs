//! WARP CLI binary entrypoint.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use wgcf_cli::api::WarpClient;
use wgcf_cli::cli::{Cli, Commands};
use wgcf_cli::commands::{GenerateCommand, RegisterCommand, UnbindCommand};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), wgcf_cli::CliError> {
    let mut stdout = io::stdout().lock();
    let mut stdin = io::stdin().lock();
    let mut stderr = io::stderr();

    match cli.command {
        Commands::Register(args) => {
            let cmd = RegisterCommand::new(&cli.config, WarpClient::new(cli.api_base)?);
            cmd.execute(&args, &mut stdout, &mut stdin, &mut stderr).await?;
        }
        Commands::Unbind(_) => {
            let cmd = UnbindCommand::new(&cli.config, WarpClient::new(cli.api_base)?);
            cmd.execute(&mut stdout).await?;
        }
        Commands::Generate(args) => {
            let cmd = GenerateCommand::new(&cli.config);
            cmd.execute(&args, &mut stdout, &mut stdin, &mut stderr)?;
        }
    }

    Ok(())
}
