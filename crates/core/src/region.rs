//! Bucket region cache
//!
//! Every object request must be sent to the region the bucket lives in.
//! Looking that up is the only remote call shared by all files touching the
//! same bucket, so the answer is cached for the rest of the process.
//!
//! Bucket regions never change during a run: an entry, once resolved, is
//! neither overwritten nor invalidated. Failed lookups store nothing and the
//! next caller retries.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{OnceCell, RwLock};

use crate::error::{Error, Result};
use crate::traits::ObjectStore;

/// Concurrent bucket → region map
///
/// Readers only take the shared lock. The exclusive lock is held just long
/// enough to insert a per-bucket slot; the remote lookup itself runs through
/// the slot, so concurrent cold lookups for one bucket share a single request
/// while lookups for other buckets proceed independently.
#[derive(Debug, Default)]
pub struct RegionCache {
    slots: RwLock<HashMap<String, Arc<OnceCell<String>>>>,
}

impl RegionCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the region of `bucket`, asking `store` only on a cache miss
    pub async fn resolve(&self, store: &dyn ObjectStore, bucket: &str) -> Result<String> {
        let slot = {
            let slots = self.slots.read().await;
            match slots.get(bucket) {
                Some(slot) => {
                    if let Some(region) = slot.get() {
                        return Ok(region.clone());
                    }
                    Some(Arc::clone(slot))
                }
                None => None,
            }
        };

        let slot = match slot {
            Some(slot) => slot,
            // Another caller may have inserted the slot since the read lock was released
            None => Arc::clone(
                self.slots
                    .write()
                    .await
                    .entry(bucket.to_string())
                    .or_default(),
            ),
        };

        let region = slot
            .get_or_try_init(|| async {
                tracing::debug!("Resolving region of bucket '{bucket}'");
                let region = store.get_bucket_region(bucket).await?;
                if region.is_empty() {
                    return Err(Error::General(format!(
                        "empty region returned for bucket '{bucket}'"
                    )));
                }
                tracing::debug!("Bucket '{bucket}' is in {region}");
                Ok::<_, Error>(region)
            })
            .await?;

        Ok(region.clone())
    }

    /// Cached region of `bucket`, without any remote call
    pub async fn cached(&self, bucket: &str) -> Option<String> {
        self.slots
            .read()
            .await
            .get(bucket)
            .and_then(|slot| slot.get().cloned())
    }

    /// Number of buckets with a resolved region
    pub async fn len(&self) -> usize {
        self.slots
            .read()
            .await
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    /// Whether no bucket has been resolved yet
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
