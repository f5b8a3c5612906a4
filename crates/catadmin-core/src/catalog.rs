//! Product list view model: search filtering, row summaries, and image
//! thumbnails for the catalog overview.

use crate::image_host::ImageHost;
use crate::record::ProductRecord;

/// First image of a product plus how many images it has in total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub url: Option<String>,
    pub image_count: usize,
}

impl Thumbnail {
    #[must_use]
    pub fn for_record(record: &ProductRecord, host: &ImageHost) -> Self {
        Self {
            url: record.images.first().map(|path| host.url_for(path)),
            image_count: record.images.len(),
        }
    }

    /// Images beyond the one shown, e.g. `+2`.
    #[must_use]
    pub fn extra_count(&self) -> usize {
        self.image_count.saturating_sub(1)
    }
}

/// Display URLs of every stored image of `record`, in stored order.
#[must_use]
pub fn gallery(record: &ProductRecord, host: &ImageHost) -> Vec<String> {
    record.images.iter().map(|path| host.url_for(path)).collect()
}

/// The last fetched product list and the active search term.
#[derive(Debug, Clone, Default)]
pub struct ProductList {
    products: Vec<ProductRecord>,
    search: String,
}

impl ProductList {
    #[must_use]
    pub fn new(products: Vec<ProductRecord>) -> Self {
        Self {
            products,
            search: String::new(),
        }
    }

    /// Sets the search term. Matching is a case-insensitive substring test on
    /// the product name; a blank term shows everything.
    pub fn search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    fn matches(&self, record: &ProductRecord) -> bool {
        let needle = self.search.trim().to_lowercase();
        needle.is_empty() || record.product_name.to_lowercase().contains(&needle)
    }

    /// Rows matching the current search, in fetched order.
    pub fn visible(&self) -> impl Iterator<Item = &ProductRecord> {
        self.products.iter().filter(|p| self.matches(p))
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible().count()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// `Showing X of Y products`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Showing {} of {} products",
            self.visible_count(),
            self.total()
        )
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ProductRecord> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Drops a deleted product from the list. Returns the removed record, or
    /// `None` if no product has that id.
    pub fn remove(&mut self, id: &str) -> Option<ProductRecord> {
        let index = self.products.iter().position(|p| p.id == id)?;
        tracing::debug!(product_id = %id, "removed product from list");
        Some(self.products.remove(index))
    }
}
