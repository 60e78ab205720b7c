//! Destination resolution
//!
//! The destination argument is parsed once per run into an [`Upload`]
//! target that every copy task shares. A directory-style destination (one
//! ending in `/`) receives each source under the source's final path
//! segment; any other destination names the target exactly.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};
use crate::path::{Location, S3Uri, file_name, is_dir_style, parse_location};
use crate::region::RegionCache;
use crate::traits::{ObjectReader, ObjectStore};

/// Places an incoming byte stream at its final location
///
/// Implementations are shared by all copy tasks of a run and must be safe to
/// call concurrently.
#[async_trait]
pub trait Upload: Send + Sync {
    /// Write `body`, read from `source`, to the target; returns bytes written
    async fn upload(&self, source: &str, body: ObjectReader) -> Result<u64>;
}

/// Parse `destination` and build the upload target for it
///
/// Fails before any transfer if a remote destination has no path component.
pub fn prepare(
    destination: &str,
    store: Arc<dyn ObjectStore>,
    regions: Arc<RegionCache>,
) -> Result<Arc<dyn Upload>> {
    match parse_location(destination)? {
        Location::Remote(target) => {
            if !target.has_path() {
                return Err(Error::InvalidPath(format!("no path in {destination}")));
            }
            Ok(Arc::new(RemoteTarget::new(target, store, regions)))
        }
        Location::Local(path) => Ok(Arc::new(LocalTarget::new(
            path,
            is_dir_style(destination),
        ))),
    }
}

/// Upload target in a bucket
pub struct RemoteTarget {
    target: S3Uri,
    store: Arc<dyn ObjectStore>,
    regions: Arc<RegionCache>,
}

impl RemoteTarget {
    pub fn new(target: S3Uri, store: Arc<dyn ObjectStore>, regions: Arc<RegionCache>) -> Self {
        Self {
            target,
            store,
            regions,
        }
    }

    /// Final object location for `source`
    pub fn resolve(&self, source: &str) -> S3Uri {
        if self.target.is_dir {
            self.target.join(file_name(source))
        } else {
            self.target.clone()
        }
    }
}

#[async_trait]
impl Upload for RemoteTarget {
    async fn upload(&self, source: &str, body: ObjectReader) -> Result<u64> {
        let dest = self.resolve(source);
        let region = self
            .regions
            .resolve(self.store.as_ref(), &dest.bucket)
            .await?;

        tracing::debug!("Uploading '{source}' to {dest} ({region})");
        self.store
            .put_object(&dest.bucket, &dest.key, &region, body)
            .await
    }
}

/// Upload target on the local filesystem
#[derive(Debug, Clone)]
pub struct LocalTarget {
    path: PathBuf,
    is_dir: bool,
}

impl LocalTarget {
    pub fn new(path: impl Into<PathBuf>, is_dir: bool) -> Self {
        Self {
            path: path.into(),
            is_dir,
        }
    }

    /// Final file path for `source`
    pub fn resolve(&self, source: &str) -> PathBuf {
        if self.is_dir {
            self.path.join(file_name(source))
        } else {
            self.path.clone()
        }
    }
}

#[async_trait]
impl Upload for LocalTarget {
    async fn upload(&self, source: &str, mut body: ObjectReader) -> Result<u64> {
        let path = self.resolve(source);
        tracing::debug!("Writing '{source}' to {}", path.display());
        write_file(&path, &mut body).await
    }
}

// The file is dropped, and so closed, on every return path.
async fn write_file(path: &Path, body: &mut ObjectReader) -> Result<u64> {
    let mut file = File::create(path)
        .await
        .map_err(|e| Error::io_at(path, e))?;
    let written = tokio::io::copy(body, &mut file)
        .await
        .map_err(|e| Error::io_at(path, e))?;
    file.flush().await.map_err(|e| Error::io_at(path, e))?;
    Ok(written)
}
