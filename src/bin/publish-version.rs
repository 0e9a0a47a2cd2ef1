//! publish-version - create a module version in the registry.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use tfe_release::logging::init_tracing;
use tfe_release::publish::validate_publish_inputs;
use tfe_release::{PublishedVersion, PublisherConfig, RegistryClient, publish};

/// Publish a new version of a private registry module.
///
/// Reads TFE_HOSTNAME, TFE_ORG, TFE_MODULE, TFE_PROVIDER, TFE_TOKEN,
/// NEW_VERSION and COMMIT_SHA from the environment.
#[derive(Parser, Debug)]
#[command(name = "publish-version")]
#[command(about = "Publish a new version of a private registry module")]
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
        Ok(published) => {
            println!(
                "✓ Published version {} (id: {})",
                published.version, published.id
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<PublishedVersion> {
    let config = PublisherConfig::from_env()?;
    validate_publish_inputs(&config.version, &config.commit_sha)?;
    let client = RegistryClient::new(&config.registry)?;

    let coordinate = &config.registry.coordinate;
    println!(
        "Publishing {}/{}/{} version {}",
        coordinate.organization, coordinate.module, coordinate.provider, config.version
    );
    println!("Linked to commit: {}", config.commit_sha);

    let published = publish(
        &client,
        &config.registry.coordinate,
        &config.version,
        &config.commit_sha,
    )
    .await
    .with_context(|| format!("Failed to publish version {}", config.version))?;

    Ok(published)
}
