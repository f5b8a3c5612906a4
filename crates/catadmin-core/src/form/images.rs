use crate::preview::{EphemeralHandle, LocalFile};

/// One image on a product draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageAttachment {
    /// Picked locally; uploaded with the next submission.
    Pending(LocalFile),
    /// Already stored by the catalog service under `stored_path`.
    Remote { stored_path: String },
}

impl ImageAttachment {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, ImageAttachment::Pending(_))
    }
}

/// Display URL for the image at the same index of the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewUrl {
    /// Locally owned handle; must be revoked.
    Ephemeral(EphemeralHandle),
    /// Derived from a stored path; never revoked.
    Remote(String),
}

impl PreviewUrl {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            PreviewUrl::Ephemeral(handle) => handle.as_str(),
            PreviewUrl::Remote(url) => url,
        }
    }

    #[must_use]
    pub fn is_ephemeral(&self) -> bool {
        matches!(self, PreviewUrl::Ephemeral(_))
    }
}
