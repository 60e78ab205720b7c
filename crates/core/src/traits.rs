//! ObjectStore trait definition
//!
//! This trait defines the interface for the storage operations the copy
//! orchestrator needs. It allows the core to be decoupled from the specific
//! S3 SDK implementation.

use std::pin::Pin;

use async_trait::async_trait;
use tokio::io::AsyncRead;

use crate::error::Result;

/// Readable byte stream handed between sources and upload targets
///
/// The stream is owned by exactly one copy task and is closed when dropped.
pub type ObjectReader = Pin<Box<dyn AsyncRead + Send>>;

/// Trait for S3-compatible storage operations
///
/// Every object call is scoped to the bucket's region, which callers obtain
/// from [`get_bucket_region`](ObjectStore::get_bucket_region) (normally
/// through the [`RegionCache`](crate::RegionCache)).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Look up the region a bucket lives in
    async fn get_bucket_region(&self, bucket: &str) -> Result<String>;

    /// Open an object for reading
    async fn get_object(&self, bucket: &str, key: &str, region: &str) -> Result<ObjectReader>;

    /// Store the whole body under `key`, returning the number of bytes written
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        region: &str,
        body: ObjectReader,
    ) -> Result<u64>;
}
