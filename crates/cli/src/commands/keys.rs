//! Persist credentials
//!
//! Handles `--write-keys`: stores the keys in `~/.aws` so they no longer
//! need to be passed on the command line.

use s3cp_core::{Credentials, CredentialsWriter};

use crate::exit_code::ExitCode;

/// Write the keys and exit
pub fn execute(credentials: Option<&Credentials>) -> anyhow::Result<ExitCode> {
    let Some(credentials) = credentials else {
        anyhow::bail!("writing keys but no keys set");
    };

    let writer = CredentialsWriter::new()?;
    writer.write(credentials)?;

    tracing::info!("Wrote config to {}. Exiting", writer.dir().display());
    Ok(ExitCode::Success)
}
