//! Credential handling
//!
//! Keys passed on the command line are visible to anyone running `ps`.
//! `--write-keys` stores them once in the shared AWS credentials files so
//! later runs can pick them up through the SDK's default provider chain.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Profile section written to both files
const DEFAULT_PROFILE: &str = "default";

/// Static access key / secret key pair
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key: String,
    secret_key: String,
}

impl Credentials {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Build credentials from the two optional flags
    ///
    /// Either both or neither must be set; empty values count as unset.
    pub fn from_flags(access_key: Option<String>, secret_key: Option<String>) -> Result<Option<Self>> {
        let access_key = access_key.filter(|k| !k.is_empty());
        let secret_key = secret_key.filter(|k| !k.is_empty());

        match (access_key, secret_key) {
            (Some(access_key), Some(secret_key)) => Ok(Some(Self::new(access_key, secret_key))),
            (None, None) => Ok(None),
            _ => Err(Error::Usage(
                "either none or both of --access-key and --secret-key".into(),
            )),
        }
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Writes credentials into an AWS shared configuration directory
#[derive(Debug)]
pub struct CredentialsWriter {
    dir: PathBuf,
}

impl CredentialsWriter {
    /// Create a writer targeting `~/.aws`
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".into()))?;
        Ok(Self {
            dir: home.join(".aws"),
        })
    }

    /// Create a writer with a custom directory (useful for testing)
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Target directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn credentials_path(&self) -> PathBuf {
        self.dir.join("credentials")
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.join("config")
    }

    /// Write the `credentials` and `config` files
    ///
    /// Existing files are replaced. Both files are readable by the owner
    /// only.
    pub fn write(&self, credentials: &Credentials) -> Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| Error::io_at(&self.dir, e))?;
        set_mode(&self.dir, 0o700)?;

        let content = format!(
            "[{DEFAULT_PROFILE}]\naws_access_key_id = {}\naws_secret_access_key = {}\n",
            credentials.access_key, credentials.secret_key
        );
        write_private(&self.credentials_path(), &content)?;
        write_private(&self.config_path(), &format!("[{DEFAULT_PROFILE}]\n"))?;

        tracing::debug!("Wrote credentials to {}", self.dir.display());
        Ok(())
    }
}

/// Replace `path` with `content`, owner-only before any byte is written
fn write_private(path: &Path, content: &str) -> Result<()> {
    let mut file = open_private(path).map_err(|e| Error::io_at(path, e))?;
    file.write_all(content.as_bytes())
        .map_err(|e| Error::io_at(path, e))?;
    file.flush().map_err(|e| Error::io_at(path, e))
}

#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<std::fs::File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // `mode` only applies to new files
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<std::fs::File> {
    std::fs::File::create(path)
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .map_err(|e| Error::io_at(path, e))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}
