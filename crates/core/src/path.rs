//! Path parsing and resolution
//!
//! Handles parsing of remote URIs in the format: s3://bucket[/key]
//! Anything else is a local path and is passed through as-is.
//! Classification is purely syntactic; nothing here touches the filesystem.

use std::path::PathBuf;

use crate::error::{Error, Result};

/// Prefix that marks a location as remote
pub const S3_SCHEME: &str = "s3://";

/// A parsed remote URI pointing to an S3 location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Uri {
    /// Bucket name (the URI host)
    pub bucket: String,
    /// Object key with the leading slash stripped (empty for bucket root)
    pub key: String,
    /// Whether the URI ends with a slash (directory semantics)
    pub is_dir: bool,
    has_path: bool,
}

impl S3Uri {
    /// Parse `s3://bucket/key`
    pub fn parse(uri: &str) -> Result<Self> {
        let rest = uri
            .strip_prefix(S3_SCHEME)
            .ok_or_else(|| Error::InvalidPath(format!("'{uri}' is not an {S3_SCHEME} URI")))?;

        let (bucket, path) = match rest.find('/') {
            Some(pos) => (&rest[..pos], Some(&rest[pos + 1..])),
            None => (rest, None),
        };

        if bucket.is_empty() {
            return Err(Error::InvalidPath(format!("no bucket in {uri}")));
        }

        Ok(Self {
            bucket: bucket.to_string(),
            key: path.unwrap_or_default().to_string(),
            is_dir: is_dir_style(uri),
            has_path: path.is_some(),
        })
    }

    /// Whether the URI had any path component after the bucket
    ///
    /// `s3://bucket/` has one (the root), `s3://bucket` does not.
    pub fn has_path(&self) -> bool {
        self.has_path
    }

    /// Append a file name to this URI's key
    pub fn join(&self, name: &str) -> Self {
        let key = format!("{}{}", self.key, name);
        Self {
            bucket: self.bucket.clone(),
            is_dir: key.ends_with('/'),
            key,
            has_path: true,
        }
    }
}

impl std::fmt::Display for S3Uri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.has_path {
            write!(f, "{S3_SCHEME}{}/{}", self.bucket, self.key)
        } else {
            write!(f, "{S3_SCHEME}{}", self.bucket)
        }
    }
}

/// A location that can be either local or remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Local filesystem path
    Local(PathBuf),
    /// Remote S3 object or prefix
    Remote(S3Uri),
}

impl Location {
    /// Check if this is a remote location
    #[cfg(test)]
    pub fn is_remote(&self) -> bool {
        matches!(self, Location::Remote(_))
    }

    /// Get the remote URI if this is a remote location
    #[cfg(test)]
    pub fn as_remote(&self) -> Option<&S3Uri> {
        match self {
            Location::Remote(uri) => Some(uri),
            Location::Local(_) => None,
        }
    }

    /// Get the local path if this is a local location
    #[cfg(test)]
    pub fn as_local(&self) -> Option<&PathBuf> {
        match self {
            Location::Local(path) => Some(path),
            Location::Remote(_) => None,
        }
    }
}

/// Parse a command-line argument into a [`Location`]
pub fn parse_location(arg: &str) -> Result<Location> {
    if arg.is_empty() {
        return Err(Error::InvalidPath("Path cannot be empty".into()));
    }

    if is_remote(arg) {
        S3Uri::parse(arg).map(Location::Remote)
    } else {
        Ok(Location::Local(PathBuf::from(arg)))
    }
}

/// Whether the argument names a remote location
pub fn is_remote(arg: &str) -> bool {
    arg.starts_with(S3_SCHEME)
}

/// Whether the argument ends with a path separator
pub fn is_dir_style(arg: &str) -> bool {
    arg.ends_with('/')
}

/// Final path segment of a source argument
///
/// Only the last segment is kept when a source lands in a directory-style
/// destination, so `sub/b.txt` and `s3://bucket/sub/b.txt` both yield `b.txt`.
pub fn file_name(source: &str) -> &str {
    source.rsplit('/').next().unwrap_or(source)
}
