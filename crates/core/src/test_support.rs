//! In-memory ObjectStore used by unit tests

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncReadExt;

use crate::error::{Error, Result};
use crate::traits::{ObjectReader, ObjectStore};

/// Object store backed by a HashMap
///
/// Object calls fail unless they carry the bucket's configured region, so
/// tests can tell whether the region was threaded through.
#[derive(Default)]
pub(crate) struct MemoryStore {
    regions: HashMap<String, String>,
    region_delay: Option<Duration>,
    objects: Mutex<HashMap<(String, String), Vec<u8>>>,
    region_calls: AtomicUsize,
    get_calls: AtomicUsize,
    put_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bucket(mut self, bucket: &str, region: &str) -> Self {
        self.regions.insert(bucket.to_string(), region.to_string());
        self
    }

    pub fn with_region_delay(mut self, delay: Duration) -> Self {
        self.region_delay = Some(delay);
        self
    }

    pub fn insert(&self, bucket: &str, key: &str, data: &[u8]) {
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), data.to_vec());
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    pub fn keys(&self, bucket: &str) -> Vec<String> {
        let mut keys: Vec<String> = self
            .objects
            .lock()
            .unwrap()
            .keys()
            .filter(|(b, _)| b == bucket)
            .map(|(_, k)| k.clone())
            .collect();
        keys.sort();
        keys
    }

    pub fn region_calls(&self) -> usize {
        self.region_calls.load(Ordering::SeqCst)
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn put_calls(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }

    fn check_region(&self, bucket: &str, region: &str) -> Result<()> {
        match self.regions.get(bucket) {
            Some(expected) if expected == region => Ok(()),
            Some(expected) => Err(Error::Network(format!(
                "request for {bucket} sent to {region}, bucket lives in {expected}"
            ))),
            None => Err(Error::NotFound(format!("bucket {bucket}"))),
        }
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn get_bucket_region(&self, bucket: &str) -> Result<String> {
        self.region_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.region_delay {
            tokio::time::sleep(delay).await;
        }
        self.regions
            .get(bucket)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("bucket {bucket}")))
    }

    async fn get_object(&self, bucket: &str, key: &str, region: &str) -> Result<ObjectReader> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.check_region(bucket, region)?;
        let data = self
            .object(bucket, key)
            .ok_or_else(|| Error::NotFound(format!("s3://{bucket}/{key}")))?;
        Ok(Box::pin(Cursor::new(data)))
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        region: &str,
        mut body: ObjectReader,
    ) -> Result<u64> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        self.check_region(bucket, region)?;
        let mut data = Vec::new();
        body.read_to_end(&mut data).await?;
        let size = data.len() as u64;
        self.insert(bucket, key, &data);
        Ok(size)
    }
}
