//! Copy files
//!
//! Runs one copy per source against the destination and turns the report
//! into an exit code. Per-file failures are logged where they happen.

use std::sync::Arc;

use s3cp_core::{Copier, ObjectStore};

use crate::exit_code::ExitCode;

/// Copy every source to `destination`
pub async fn execute(
    store: impl ObjectStore + 'static,
    sources: Vec<String>,
    destination: &str,
) -> anyhow::Result<ExitCode> {
    let copier = Copier::new(Arc::new(store));
    let report = copier.copy(sources, destination).await?;

    tracing::debug!(
        "{} of {} file(s) copied, {} bytes",
        report.succeeded(),
        report.outcomes().len(),
        report.bytes_copied()
    );

    if report.is_success() {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::GeneralError)
    }
}
