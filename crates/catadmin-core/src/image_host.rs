/// Host that serves images the catalog service has stored.
pub const DEFAULT_IMAGE_HOST: &str = "https://backend.pinkstories.ae";

/// Turns stored image paths into displayable URLs.
///
/// The service records paths relative to its source tree (for example
/// `/src/uploads/kurta-1.jpg`); the public URL drops the first `/src`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHost {
    prefix: String,
}

impl ImageHost {
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.trim_end_matches('/').to_string(),
        }
    }

    /// Derives the display URL for a stored path. Absolute URLs pass through.
    #[must_use]
    pub fn url_for(&self, stored_path: &str) -> String {
        if stored_path.starts_with("http://") || stored_path.starts_with("https://") {
            return stored_path.to_string();
        }
        let path = stored_path.replacen("/src", "", 1);
        if path.starts_with('/') {
            format!("{}{path}", self.prefix)
        } else {
            format!("{}/{path}", self.prefix)
        }
    }
}

impl Default for ImageHost {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_HOST)
    }
}
