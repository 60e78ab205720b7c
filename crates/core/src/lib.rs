//! s3cp-core: Core library for the s3cp copy tool
//!
//! This crate provides the core functionality for s3cp, including:
//! - Path parsing for local paths and `s3://` URIs
//! - ObjectStore trait for the storage operations
//! - Bucket region cache
//! - Destination resolution and the concurrent copy orchestrator
//! - Credential persistence and client configuration
//!
//! This crate is designed to be independent of any specific S3 SDK,
//! allowing for easy testing and potential future support for other backends.

pub mod config;
pub mod copy;
pub mod credentials;
pub mod destination;
pub mod error;
pub mod path;
pub mod region;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{ClientConfig, DEFAULT_REGION};
pub use copy::{CopyOutcome, CopyReport, Copier};
pub use credentials::{Credentials, CredentialsWriter};
pub use destination::{LocalTarget, RemoteTarget, Upload};
pub use error::{Error, Result};
pub use path::{Location, S3Uri, parse_location};
pub use region::RegionCache;
pub use traits::{ObjectReader, ObjectStore};
