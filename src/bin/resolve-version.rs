//! resolve-version - print the next version of a registry module.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use tfe_release::logging::init_tracing;
use tfe_release::{RegistryClient, ResolverConfig, resolve_next_version};

/// Print the next semantic version of a private registry module.
///
/// Reads TFE_HOSTNAME, TFE_ORG, TFE_MODULE, TFE_PROVIDER, TFE_TOKEN and
/// RELEASE_TYPE (major, minor or patch) from the environment.
#[derive(Parser, Debug)]
#[command(name = "resolve-version")]
#[command(about = "Print the next semantic version of a private registry module")]
#[command(version)]
struct Cli {}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    if let Err(e) = Cli::try_parse() {
        let _ = e.print();
        return if e.use_stderr() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        };
    }

    init_tracing();

    match run().await {
        Ok(version) => {
            println!("{}", version);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<String> {
    let config = ResolverConfig::from_env()?;
    let client = RegistryClient::new(&config.registry)?;

    let next = resolve_next_version(&client, &config.registry.coordinate, &config.release_type)
        .await
        .context("Failed to resolve next version")?;

    Ok(next.to_string())
}
