use crate::preview::LocalFile;

/// Multipart field name shared by every uploaded image.
pub const IMAGE_PART_NAME: &str = "images";

/// Multipart field listing stored images removed during an edit.
pub const REMOVED_IMAGES_PART_NAME: &str = "removedImages";

/// Transport-ready projection of a product draft.
///
/// Text parts keep the order the form lays fields out in; file parts keep the
/// order images were picked in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionPayload {
    pub fields: Vec<(&'static str, String)>,
    pub files: Vec<LocalFile>,
}

impl SubmissionPayload {
    /// Value of the first text part called `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// File parts with their multipart name.
    pub fn file_parts(&self) -> impl Iterator<Item = (&'static str, &LocalFile)> {
        self.files.iter().map(|f| (IMAGE_PART_NAME, f))
    }

    pub(crate) fn push(&mut self, name: &'static str, value: impl Into<String>) {
        self.fields.push((name, value.into()));
    }
}
