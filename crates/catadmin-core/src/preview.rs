//! Local image files and the ephemeral preview handles created for them.
//!
//! A [`PreviewProvider`] hands out revocable `blob:` URLs for files that have
//! not been uploaded yet. Every handle it creates must be revoked exactly once;
//! [`crate::ProductForm`] keeps the ledger that guarantees this.

use std::collections::HashMap;
use std::path::Path;

use uuid::Uuid;

use crate::error::PreviewError;

/// Scheme prefix that marks a locally generated preview URL.
pub const EPHEMERAL_SCHEME: &str = "blob:";

/// An image picked from local disk that has not been uploaded yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl LocalFile {
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = guess_content_type(&file_name).map(str::to_string);
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Reads an image from disk.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::Io`] when the file cannot be read.
    pub fn read(path: &Path) -> Result<Self, PreviewError> {
        let bytes = std::fs::read(path).map_err(|e| PreviewError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let file_name = path
            .file_name()
            .map_or_else(|| "image".to_string(), |n| n.to_string_lossy().into_owned());
        Ok(Self::new(file_name, bytes))
    }
}

fn guess_content_type(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "avif" => Some("image/avif"),
        _ => None,
    }
}

/// A revocable `blob:` URL displaying a [`LocalFile`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EphemeralHandle(String);

impl EphemeralHandle {
    /// Wraps a provider-issued URL.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::ForeignHandle`] unless `url` uses the `blob:`
    /// scheme.
    pub fn new(url: impl Into<String>) -> Result<Self, PreviewError> {
        let url = url.into();
        if url.starts_with(EPHEMERAL_SCHEME) {
            Ok(Self(url))
        } else {
            Err(PreviewError::ForeignHandle(url))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EphemeralHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Platform hook that turns local files into displayable preview URLs.
pub trait PreviewProvider {
    /// Creates a new handle for `file`.
    ///
    /// # Errors
    ///
    /// Returns a [`PreviewError`] when the platform cannot allocate a handle.
    fn create(&mut self, file: &LocalFile) -> Result<EphemeralHandle, PreviewError>;

    /// Releases a handle previously returned by [`PreviewProvider::create`].
    ///
    /// # Errors
    ///
    /// Returns a [`PreviewError`] when the platform refuses the release.
    fn revoke(&mut self, handle: &EphemeralHandle) -> Result<(), PreviewError>;
}

impl<P: PreviewProvider + ?Sized> PreviewProvider for &mut P {
    fn create(&mut self, file: &LocalFile) -> Result<EphemeralHandle, PreviewError> {
        (**self).create(file)
    }

    fn revoke(&mut self, handle: &EphemeralHandle) -> Result<(), PreviewError> {
        (**self).revoke(handle)
    }
}

/// In-process object-URL registry.
///
/// Issues `blob:<origin>/<uuid>` handles and keeps the bytes size of every
/// live one. Revoking an unknown or already revoked handle is a no-op, the
/// same contract browsers give `URL.revokeObjectURL`.
#[derive(Debug)]
pub struct BlobRegistry {
    origin: String,
    live: HashMap<String, usize>,
}

impl BlobRegistry {
    #[must_use]
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            live: HashMap::new(),
        }
    }

    /// Number of handles created and not yet revoked.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Total bytes pinned by live handles.
    #[must_use]
    pub fn live_bytes(&self) -> usize {
        self.live.values().sum()
    }

    #[must_use]
    pub fn is_live(&self, handle: &EphemeralHandle) -> bool {
        self.live.contains_key(handle.as_str())
    }
}

impl Default for BlobRegistry {
    fn default() -> Self {
        Self::new("catadmin")
    }
}

impl PreviewProvider for BlobRegistry {
    fn create(&mut self, file: &LocalFile) -> Result<EphemeralHandle, PreviewError> {
        let handle = EphemeralHandle::new(format!(
            "{EPHEMERAL_SCHEME}{}/{}",
            self.origin,
            Uuid::new_v4()
        ))?;
        self.live.insert(handle.as_str().to_string(), file.bytes.len());
        tracing::debug!(handle = %handle, file = %file.file_name, "created preview handle");
        Ok(handle)
    }

    fn revoke(&mut self, handle: &EphemeralHandle) -> Result<(), PreviewError> {
        if self.live.remove(handle.as_str()).is_none() {
            tracing::debug!(handle = %handle, "revoke of unknown preview handle ignored");
        }
        Ok(())
    }
}
