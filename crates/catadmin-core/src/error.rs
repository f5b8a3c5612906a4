use thiserror::Error;

/// Errors raised while loading [`crate::AppConfig`] from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Failures reported by a [`crate::PreviewProvider`] or while acquiring a
/// local image file.
#[derive(Debug, Error)]
pub enum PreviewError {
    /// The image file could not be read from disk.
    #[error("failed to read image file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create preview for {file_name}: {reason}")]
    Create { file_name: String, reason: String },

    #[error("failed to revoke preview {handle}: {reason}")]
    Revoke { handle: String, reason: String },

    /// A provider handed back a URL outside the `blob:` scheme.
    #[error("preview handle {0} is not an ephemeral blob URL")]
    ForeignHandle(String),
}

/// Rejected edits and validation failures on a [`crate::ProductForm`].
///
/// Every variant leaves the draft exactly as it was before the call.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("unknown form field: {0}")]
    UnknownField(String),

    #[error("invalid number for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("unknown category: {0:?}")]
    UnknownCategory(String),

    #[error("unknown size region: {0:?}")]
    UnknownRegion(String),

    #[error("size {size:?} is not offered in the {region} size chart")]
    SizeOutOfDomain { region: &'static str, size: String },

    #[error("image index {index} is out of range for {len} image(s)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("{0} is required")]
    MissingRequired(&'static str),

    #[error(transparent)]
    Preview(#[from] PreviewError),
}
