//! CLI definition and execution
//!
//! s3cp has a single command line; the flags decide whether it copies files
//! or persists credentials.

use anyhow::Context;
use clap::Parser;
use s3cp_core::{ClientConfig, Copier, Credentials};
use s3cp_s3::S3Client;

use crate::exit_code::ExitCode;

pub mod cp;
pub mod keys;

/// Build identifier printed by `--version`
///
/// Set `S3CP_BUILD_COMMIT` at compile time to embed a commit hash.
pub const BUILD_ID: &str = match option_env!("S3CP_BUILD_COMMIT") {
    Some(commit) => commit,
    None => env!("CARGO_PKG_VERSION"),
};

/// s3cp - copy files to, from and between S3 buckets
///
/// The last argument is the destination unless --destination is given.
/// Copying several files requires a destination ending in '/'.
#[derive(Parser, Debug)]
#[command(name = "s3cp")]
#[command(version = BUILD_ID, about, long_about = None)]
pub struct Cli {
    /// Setting this makes all the arguments at the end become sources for use with e.g. xargs
    #[arg(short, long)]
    pub destination: Option<String>,

    /// Verbose
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Access key
    #[arg(long)]
    pub access_key: Option<String>,

    /// Secret key
    #[arg(long)]
    pub secret_key: Option<String>,

    /// Write access key and secret key to ~/.aws to avoid having them visible in `ps aux`
    #[arg(long, default_value = "false")]
    pub write_keys: bool,

    /// Region used to look up bucket locations
    #[arg(long, env = "S3CP_REGION")]
    pub region: Option<String>,

    /// Custom endpoint for S3-compatible services
    #[arg(long, env = "S3CP_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Sources, followed by the destination unless --destination is set
    #[arg(value_name = "PATH")]
    pub paths: Vec<String>,
}

/// Execute the command line and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::GeneralError
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let credentials = Credentials::from_flags(cli.access_key, cli.secret_key)?;

    if cli.write_keys {
        return keys::execute(credentials.as_ref());
    }

    let (sources, destination) = split_paths(cli.paths, cli.destination)?;
    Copier::validate(&sources, &destination)?;

    let config = ClientConfig {
        region: cli.region,
        endpoint_url: cli.endpoint_url,
        credentials,
    };
    let client = S3Client::new(config)
        .await
        .context("Failed to create S3 client")?;

    cp::execute(client, sources, &destination).await
}

/// Separate sources from the destination
///
/// Without an explicit destination the last path is the destination.
pub fn split_paths(
    mut paths: Vec<String>,
    destination: Option<String>,
) -> anyhow::Result<(Vec<String>, String)> {
    let destination = match destination {
        Some(destination) => destination,
        None => paths.pop().context("not enough arguments")?,
    };

    if paths.is_empty() {
        anyhow::bail!("not enough arguments");
    }

    Ok((paths, destination))
}
