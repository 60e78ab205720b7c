//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from s3cp-core.
//! Object requests are sent to the bucket's own region through a
//! per-operation config override, so one client serves every bucket.

use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_smithy_types::error::display::DisplayErrorContext;
use tokio::io::AsyncReadExt;

use s3cp_core::{ClientConfig, DEFAULT_REGION, Error, ObjectReader, ObjectStore, Result};

/// Region of buckets created without a location constraint
const US_EAST_1: &str = "us-east-1";

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
}

impl S3Client {
    /// Create a new S3 client
    ///
    /// The client region comes from the config, then the SDK's default
    /// provider chain, then [`DEFAULT_REGION`]. Credentials default to the
    /// SDK chain unless static keys are configured.
    pub async fn new(config: ClientConfig) -> Result<Self> {
        let region = RegionProviderChain::first_try(config.region.clone().map(Region::new))
            .or_default_provider()
            .or_else(DEFAULT_REGION);

        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region);

        if let Some(credentials) = &config.credentials {
            loader = loader.credentials_provider(aws_credential_types::Credentials::new(
                credentials.access_key(),
                credentials.secret_key(),
                None, // session token
                None, // expiry
                "s3cp-static-credentials",
            ));
        }

        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        // Credentials resolve on the first request, so local-only copies need none
        let sdk_config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.force_path_style())
            .build();

        tracing::debug!(
            "S3 client ready (region: {})",
            sdk_config.region().map(|r| r.as_ref()).unwrap_or("unset")
        );

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
        })
    }
}

/// Config override that sends a single request to `region`
fn in_region(region: &str) -> aws_sdk_s3::config::Builder {
    aws_sdk_s3::config::Builder::default().region(Region::new(region.to_string()))
}

/// Map a GetBucketLocation constraint to a region name
///
/// Buckets in us-east-1 report no constraint, and old EU buckets report the
/// legacy `EU` value.
pub fn normalize_location(constraint: Option<&str>) -> String {
    match constraint {
        None | Some("") => US_EAST_1.to_string(),
        Some("EU") => "eu-west-1".to_string(),
        Some(region) => region.to_string(),
    }
}

fn map_sdk_error<E, R>(err: SdkError<E, R>, subject: &str) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug + Send + Sync + 'static,
{
    match err.as_service_error().and_then(|e| e.code()) {
        Some("NoSuchKey" | "NoSuchBucket" | "NotFound") => Error::NotFound(subject.to_string()),
        Some("AccessDenied" | "InvalidAccessKeyId" | "SignatureDoesNotMatch") => {
            Error::Auth(format!("{subject}: {}", DisplayErrorContext(&err)))
        }
        _ => Error::Network(DisplayErrorContext(&err).to_string()),
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn get_bucket_region(&self, bucket: &str) -> Result<String> {
        let response = self
            .inner
            .get_bucket_location()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, bucket))?;

        Ok(normalize_location(
            response.location_constraint().map(|c| c.as_str()),
        ))
    }

    async fn get_object(&self, bucket: &str, key: &str, region: &str) -> Result<ObjectReader> {
        tracing::debug!("GetObject s3://{bucket}/{key} ({region})");

        let response = self
            .inner
            .get_object()
            .bucket(bucket)
            .key(key)
            .customize()
            .config_override(in_region(region))
            .send()
            .await
            .map_err(|e| map_sdk_error(e, &format!("s3://{bucket}/{key}")))?;

        Ok(Box::pin(response.body.into_async_read()))
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        region: &str,
        mut body: ObjectReader,
    ) -> Result<u64> {
        let mut data = Vec::new();
        body.read_to_end(&mut data).await?;
        let size = data.len() as u64;

        tracing::debug!("PutObject s3://{bucket}/{key} ({region}, {size} bytes)");

        let mut request = self
            .inner
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(data));

        if let Some(content_type) = mime_guess::from_path(key).first() {
            request = request.content_type(content_type.essence_str());
        }

        request
            .customize()
            .config_override(in_region(region))
            .send()
            .await
            .map_err(|e| map_sdk_error(e, &format!("s3://{bucket}/{key}")))?;

        Ok(size)
    }
}
