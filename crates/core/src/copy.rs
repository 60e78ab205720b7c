//! Copy orchestration
//!
//! Every source argument becomes its own tokio task. Tasks never cancel each
//! other: a source that fails is logged and recorded, and the others keep
//! going. Outcomes are returned through the task handles and folded into a
//! [`CopyReport`] once every task has finished.

use std::sync::Arc;

use futures::future::join_all;
use tokio::fs::File;

use crate::destination::{self, Upload};
use crate::error::{Error, Result};
use crate::path::{Location, is_dir_style, parse_location};
use crate::region::RegionCache;
use crate::traits::{ObjectReader, ObjectStore};

/// Outcome of copying one source
#[derive(Debug)]
pub struct CopyOutcome {
    /// Source argument as given on the command line
    pub source: String,
    /// Bytes written, or why the copy failed
    pub result: Result<u64>,
}

impl CopyOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Aggregate result of a run
#[derive(Debug, Default)]
pub struct CopyReport {
    outcomes: Vec<CopyOutcome>,
}

impl CopyReport {
    /// True only if every source was copied
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(CopyOutcome::is_success)
    }

    /// All outcomes, in source argument order
    pub fn outcomes(&self) -> &[CopyOutcome] {
        &self.outcomes
    }

    /// Outcomes that failed
    pub fn failures(&self) -> impl Iterator<Item = &CopyOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// Number of sources copied successfully
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Total bytes written by successful copies
    pub fn bytes_copied(&self) -> u64 {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .sum()
    }
}

impl FromIterator<CopyOutcome> for CopyReport {
    fn from_iter<I: IntoIterator<Item = CopyOutcome>>(iter: I) -> Self {
        Self {
            outcomes: iter.into_iter().collect(),
        }
    }
}

/// Runs copies against one object store, sharing a region cache
pub struct Copier {
    store: Arc<dyn ObjectStore>,
    regions: Arc<RegionCache>,
}

impl Copier {
    /// Create a copier with an empty region cache
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self {
            store,
            regions: Arc::new(RegionCache::new()),
        }
    }

    /// Region cache shared by every task of this copier
    pub fn regions(&self) -> &RegionCache {
        &self.regions
    }

    /// Check the argument shape before anything is transferred
    ///
    /// Several sources cannot share one exact target name, so they require a
    /// directory-style destination.
    pub fn validate(sources: &[String], destination: &str) -> Result<()> {
        if sources.is_empty() {
            return Err(Error::Usage("not enough arguments".into()));
        }
        if sources.len() > 1 && !is_dir_style(destination) {
            return Err(Error::Usage(
                "Must have a trailing slash (directory indicator) when copying multiple files"
                    .into(),
            ));
        }
        Ok(())
    }

    /// Build the upload target for `destination`
    pub fn prepare(&self, destination: &str) -> Result<Arc<dyn Upload>> {
        destination::prepare(
            destination,
            Arc::clone(&self.store),
            Arc::clone(&self.regions),
        )
    }

    /// Validate, prepare the destination, then copy every source
    ///
    /// Returns `Err` only for setup problems; per-source failures are in the
    /// report.
    pub async fn copy(&self, sources: Vec<String>, destination: &str) -> Result<CopyReport> {
        Self::validate(&sources, destination)?;
        let upload = self.prepare(destination)?;
        Ok(self.run_all(sources, upload).await)
    }

    /// Copy every source concurrently into `upload`
    pub async fn run_all(&self, sources: Vec<String>, upload: Arc<dyn Upload>) -> CopyReport {
        let handles: Vec<_> = sources
            .iter()
            .map(|source| {
                let store = Arc::clone(&self.store);
                let regions = Arc::clone(&self.regions);
                let upload = Arc::clone(&upload);
                let source = source.clone();

                tokio::spawn(async move {
                    let result =
                        copy_one(store.as_ref(), &regions, &source, upload.as_ref()).await;
                    match &result {
                        Ok(size) => tracing::debug!(
                            "Copied '{source}' successfully ({})",
                            humansize::format_size(*size, humansize::BINARY)
                        ),
                        Err(e) => tracing::error!("Failed to copy '{source}': {e}"),
                    }
                    result
                })
            })
            .collect();

        let joined = join_all(handles).await;

        sources
            .into_iter()
            .zip(joined)
            .map(|(source, joined)| {
                let result = joined.unwrap_or_else(|e| {
                    tracing::error!("Failed to copy '{source}': copy task aborted: {e}");
                    Err(Error::General(format!("copy task aborted: {e}")))
                });
                CopyOutcome { source, result }
            })
            .collect()
    }
}

async fn copy_one(
    store: &dyn ObjectStore,
    regions: &RegionCache,
    source: &str,
    upload: &dyn Upload,
) -> Result<u64> {
    let body: ObjectReader = match parse_location(source)? {
        Location::Remote(uri) => {
            let region = regions.resolve(store, &uri.bucket).await?;
            store.get_object(&uri.bucket, &uri.key, &region).await?
        }
        Location::Local(path) => {
            let file = File::open(&path)
                .await
                .map_err(|e| Error::io_at(&path, e))?;
            Box::pin(file)
        }
    };

    upload.upload(source, body).await
}
