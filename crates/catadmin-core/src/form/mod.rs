//! Form state engine shared by the create and edit product flows.
//!
//! [`ProductForm`] owns a [`ProductDraft`], the preview projection that
//! mirrors the draft's images index for index, and the ledger of ephemeral
//! preview handles it has created and not yet revoked. Every handle in the
//! ledger is revoked on removal, on replacement of an emptied image list, on
//! reset, and when the form is closed or dropped.

mod images;
mod payload;

pub use images::{ImageAttachment, PreviewUrl};
pub use payload::{SubmissionPayload, IMAGE_PART_NAME, REMOVED_IMAGES_PART_NAME};

use rust_decimal::Decimal;

use crate::error::{FormError, PreviewError};
use crate::fields::{split_multi_value, Category, MultiValueField, NumericField, TextField};
use crate::image_host::ImageHost;
use crate::preview::{EphemeralHandle, LocalFile, PreviewProvider};
use crate::record::ProductRecord;
use crate::sizes::{SizeRegion, SizeVariantSet};

/// Which catalog operation a form submits to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

impl FormMode {
    #[must_use]
    pub fn is_edit(&self) -> bool {
        matches!(self, FormMode::Edit { .. })
    }
}

/// Editable copy of a product record.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    text: [String; TextField::COUNT],
    /// Stored category value; only picker values can be set, but a stored
    /// value outside the picker set is carried through unchanged.
    category: String,
    numbers: [Option<Decimal>; NumericField::COUNT],
    color_variants: Vec<String>,
    material: Vec<String>,
    sizes_india: SizeVariantSet,
    sizes_pakistan: SizeVariantSet,
    images: Vec<ImageAttachment>,
    removed_images: Vec<String>,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            text: Default::default(),
            category: String::new(),
            numbers: [Some(Decimal::ZERO); NumericField::COUNT],
            color_variants: vec![String::new()],
            material: vec![String::new()],
            sizes_india: SizeVariantSet::new(SizeRegion::India),
            sizes_pakistan: SizeVariantSet::new(SizeRegion::Pakistan),
            images: Vec::new(),
            removed_images: Vec::new(),
        }
    }
}

impl ProductDraft {
    /// Hydrates a draft from a stored record.
    ///
    /// A stored category outside the picker set is kept verbatim so an edit
    /// that never touches it sends it back unchanged.
    #[must_use]
    pub fn from_record(record: &ProductRecord) -> Self {
        let mut draft = Self::default();
        let text_values = [
            (TextField::Sku, &record.sku),
            (TextField::Brand, &record.brand),
            (TextField::Weight, &record.weight),
            (TextField::ProductName, &record.product_name),
            (TextField::DeliveryTime, &record.delivery_time),
            (TextField::ShortDescription, &record.short_description),
            (TextField::ProductDescription, &record.product_description),
            (TextField::CareInstructions, &record.care_instructions),
            (TextField::Neck, &record.neck),
            (TextField::TopDesignStyling, &record.top_design_styling),
            (TextField::TopFabric, &record.top_fabric),
            (TextField::BottomFabric, &record.bottom_fabric),
            (TextField::DupattaFabric, &record.dupatta_fabric),
            (TextField::WeavePattern, &record.weave_pattern),
            (TextField::Stitch, &record.stitch),
            (TextField::PrintOrPattern, &record.print_or_pattern),
        ];
        for (field, value) in text_values {
            draft.text[field.index()].clone_from(value);
        }

        if record.category.parse::<Category>().is_err() {
            tracing::warn!(
                product_id = %record.id,
                category = %record.category,
                "stored category is not offered by the picker; keeping it as stored"
            );
        }
        draft.category.clone_from(&record.category);

        draft.numbers[NumericField::StockQuantity.index()] = Some(record.stock_quantity);
        draft.numbers[NumericField::Price.index()] = Some(record.price);
        draft.numbers[NumericField::Discount.index()] = Some(record.discount);
        draft.color_variants.clone_from(&record.color_variants);
        draft.material.clone_from(&record.material);
        draft.sizes_india = SizeVariantSet::from_stored(
            SizeRegion::India,
            record.sizes(SizeRegion::India).iter().cloned(),
        );
        draft.sizes_pakistan = SizeVariantSet::from_stored(
            SizeRegion::Pakistan,
            record.sizes(SizeRegion::Pakistan).iter().cloned(),
        );
        draft.images = record
            .images
            .iter()
            .map(|path| ImageAttachment::Remote {
                stored_path: path.clone(),
            })
            .collect();
        draft
    }

    #[must_use]
    pub fn text(&self, field: TextField) -> &str {
        &self.text[field.index()]
    }

    /// Picker category, or `None` when the stored value is not offered.
    #[must_use]
    pub fn category(&self) -> Option<Category> {
        self.category.parse().ok()
    }

    /// Category value as it will be submitted.
    #[must_use]
    pub fn category_value(&self) -> &str {
        &self.category
    }

    /// Current numeric value; `None` when the input was cleared.
    #[must_use]
    pub fn number(&self, field: NumericField) -> Option<Decimal> {
        self.numbers[field.index()]
    }

    #[must_use]
    pub fn multi_value(&self, field: MultiValueField) -> &[String] {
        match field {
            MultiValueField::ColorVariants => &self.color_variants,
            MultiValueField::Material => &self.material,
        }
    }

    #[must_use]
    pub fn sizes(&self, region: SizeRegion) -> &SizeVariantSet {
        match region {
            SizeRegion::India => &self.sizes_india,
            SizeRegion::Pakistan => &self.sizes_pakistan,
        }
    }

    #[must_use]
    pub fn images(&self) -> &[ImageAttachment] {
        &self.images
    }

    /// Stored paths of remote images removed since the draft was hydrated.
    #[must_use]
    pub fn removed_images(&self) -> &[String] {
        &self.removed_images
    }

    fn sizes_mut(&mut self, region: SizeRegion) -> &mut SizeVariantSet {
        match region {
            SizeRegion::India => &mut self.sizes_india,
            SizeRegion::Pakistan => &mut self.sizes_pakistan,
        }
    }
}

fn render_number(value: Option<Decimal>) -> String {
    value.map(|v| v.normalize().to_string()).unwrap_or_default()
}

/// A product form bound to one screen lifetime.
///
/// Dropping the form revokes every ephemeral preview handle still
/// outstanding; use [`ProductForm::close`] to observe revoke failures instead
/// of having them logged.
pub struct ProductForm<P: PreviewProvider> {
    mode: FormMode,
    draft: ProductDraft,
    previews: Vec<PreviewUrl>,
    outstanding: Vec<EphemeralHandle>,
    provider: P,
}

impl<P: PreviewProvider> ProductForm<P> {
    /// Opens an empty form for a new product.
    pub fn create(provider: P) -> Self {
        Self {
            mode: FormMode::Create,
            draft: ProductDraft::default(),
            previews: Vec::new(),
            outstanding: Vec::new(),
            provider,
        }
    }

    /// Opens a form hydrated from a stored product.
    pub fn edit(provider: P, record: &ProductRecord, host: &ImageHost) -> Self {
        let draft = ProductDraft::from_record(record);
        let previews = record
            .images
            .iter()
            .map(|path| PreviewUrl::Remote(host.url_for(path)))
            .collect();
        tracing::debug!(product_id = %record.id, images = record.images.len(), "hydrated edit form");
        Self {
            mode: FormMode::Edit {
                id: record.id.clone(),
            },
            draft,
            previews,
            outstanding: Vec::new(),
            provider,
        }
    }

    #[must_use]
    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    #[must_use]
    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    /// Preview URLs, index-aligned with [`ProductDraft::images`].
    #[must_use]
    pub fn previews(&self) -> &[PreviewUrl] {
        &self.previews
    }

    /// Number of ephemeral handles created and not yet revoked.
    #[must_use]
    pub fn outstanding_previews(&self) -> usize {
        self.outstanding.len()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    #[cfg(test)]
    pub(crate) fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub fn set_text_field(&mut self, field: TextField, value: impl Into<String>) {
        self.draft.text[field.index()] = value.into();
    }

    pub fn set_category(&mut self, category: Category) {
        self.draft.category = category.as_str().to_string();
    }

    /// Replaces a numeric field; `None` clears it.
    pub fn set_numeric_field(&mut self, field: NumericField, value: Option<Decimal>) {
        self.draft.numbers[field.index()] = value;
    }

    /// Sets any scalar or list field from raw input keyed by its wire name.
    ///
    /// # Errors
    ///
    /// - [`FormError::UnknownField`] when `name` is not a form field.
    /// - [`FormError::InvalidNumber`] for malformed numeric input.
    /// - [`FormError::UnknownCategory`] for a category outside the picker set.
    pub fn set_field(&mut self, name: &str, raw: &str) -> Result<(), FormError> {
        if let Some(field) = TextField::from_wire_name(name) {
            self.set_text_field(field, raw);
        } else if let Some(field) = NumericField::from_wire_name(name) {
            let value = field.parse(raw)?;
            self.set_numeric_field(field, value);
        } else if let Some(field) = MultiValueField::from_wire_name(name) {
            self.set_multi_value_field(field, raw);
        } else if name == Category::WIRE_NAME {
            self.set_category(raw.parse()?);
        } else {
            return Err(FormError::UnknownField(name.to_string()));
        }
        Ok(())
    }

    /// Replaces a list field with `raw` split on commas.
    pub fn set_multi_value_field(&mut self, field: MultiValueField, raw: &str) {
        let values = split_multi_value(raw);
        match field {
            MultiValueField::ColorVariants => self.draft.color_variants = values,
            MultiValueField::Material => self.draft.material = values,
        }
    }

    /// Flips selection of `size` in `region`; returns whether it is now
    /// selected.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::SizeOutOfDomain`] when `size` is not on the
    /// region's chart. The selection is left unchanged.
    pub fn toggle_size_variant(&mut self, region: SizeRegion, size: &str) -> Result<bool, FormError> {
        self.draft.sizes_mut(region).toggle(size)
    }

    /// Adds newly picked files and a preview handle for each.
    ///
    /// Files are appended when the draft already has images. When it has none,
    /// every outstanding handle is revoked first and the new list installed in
    /// its place.
    ///
    /// # Errors
    ///
    /// Returns the provider's [`PreviewError`] when a handle cannot be created
    /// or a stale one cannot be revoked. Handles created during the failed call
    /// are revoked again and the draft keeps its prior images.
    pub fn add_images(&mut self, files: Vec<LocalFile>) -> Result<(), PreviewError> {
        if files.is_empty() {
            return Ok(());
        }

        let replacing = self.draft.images.is_empty();
        if replacing {
            self.release_all_ephemeral_previews()?;
        }

        let mut created = Vec::with_capacity(files.len());
        for file in &files {
            match self.provider.create(file) {
                Ok(handle) => created.push(handle),
                Err(e) => {
                    for handle in &created {
                        if let Err(revoke_err) = self.provider.revoke(handle) {
                            tracing::warn!(handle = %handle, error = %revoke_err, "add_images: rollback revoke failed");
                        }
                    }
                    return Err(e);
                }
            }
        }

        let new_previews = created.iter().cloned().map(PreviewUrl::Ephemeral);
        if replacing {
            self.previews = new_previews.collect();
            self.draft.images = files.into_iter().map(ImageAttachment::Pending).collect();
        } else {
            self.previews.extend(new_previews);
            self.draft
                .images
                .extend(files.into_iter().map(ImageAttachment::Pending));
        }
        self.outstanding.extend(created);

        tracing::debug!(
            images = self.draft.images.len(),
            replaced = replacing,
            "added images to draft"
        );
        Ok(())
    }

    /// Removes the image at `index` together with its preview.
    ///
    /// An ephemeral preview is revoked first; remote previews are left alone.
    /// Removing a stored image records its path in
    /// [`ProductDraft::removed_images`].
    ///
    /// # Errors
    ///
    /// - [`FormError::IndexOutOfRange`] when `index` is past the end.
    /// - [`FormError::Preview`] when the provider refuses the revoke; nothing
    ///   is removed in that case.
    pub fn remove_image_at(&mut self, index: usize) -> Result<ImageAttachment, FormError> {
        let len = self.draft.images.len();
        if index >= len {
            return Err(FormError::IndexOutOfRange { index, len });
        }

        if let PreviewUrl::Ephemeral(handle) = &self.previews[index] {
            let handle = handle.clone();
            self.revoke_outstanding(&handle)?;
        }

        self.previews.remove(index);
        let removed = self.draft.images.remove(index);
        if let ImageAttachment::Remote { stored_path } = &removed {
            self.draft.removed_images.push(stored_path.clone());
        }
        tracing::debug!(index, remaining = self.draft.images.len(), "removed image from draft");
        Ok(removed)
    }

    /// Revokes every outstanding ephemeral handle exactly once.
    ///
    /// Safe to call repeatedly. All handles are attempted even when one fails;
    /// failed handles stay outstanding for a later attempt.
    ///
    /// # Errors
    ///
    /// Returns the first [`PreviewError`] the provider reported.
    pub fn release_all_ephemeral_previews(&mut self) -> Result<(), PreviewError> {
        let mut first_err = None;
        let mut retained = Vec::new();
        for handle in std::mem::take(&mut self.outstanding) {
            if let Err(e) = self.provider.revoke(&handle) {
                retained.push(handle);
                first_err.get_or_insert(e);
            }
        }
        self.outstanding = retained;
        first_err.map_or(Ok(()), Err)
    }

    /// Projects the draft into a submission payload without touching it.
    #[must_use]
    pub fn serialize_for_submission(&self) -> SubmissionPayload {
        let draft = &self.draft;
        let mut payload = SubmissionPayload::default();

        for field in [
            TextField::Sku,
            TextField::Brand,
            TextField::Weight,
            TextField::ProductName,
        ] {
            payload.push(field.wire_name(), draft.text(field));
        }
        payload.push(Category::WIRE_NAME, draft.category_value());
        for field in [
            TextField::DeliveryTime,
            TextField::ShortDescription,
            TextField::ProductDescription,
            TextField::CareInstructions,
        ] {
            payload.push(field.wire_name(), draft.text(field));
        }
        for field in NumericField::ALL {
            payload.push(field.wire_name(), render_number(draft.number(field)));
        }
        for field in MultiValueField::ALL {
            payload.push(field.wire_name(), draft.multi_value(field).join(","));
        }
        for region in SizeRegion::ALL {
            payload.push(region.wire_name(), draft.sizes(region).joined());
        }
        for field in TextField::FASHION {
            payload.push(field.wire_name(), draft.text(field));
        }
        if self.mode.is_edit() {
            payload.push(REMOVED_IMAGES_PART_NAME, draft.removed_images.join(","));
        }

        payload.files = draft
            .images
            .iter()
            .filter_map(|image| match image {
                ImageAttachment::Pending(file) => Some(file.clone()),
                ImageAttachment::Remote { .. } => None,
            })
            .collect();
        payload
    }

    /// Presentation-level required-field check run before submitting.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::MissingRequired`] naming the first empty required
    /// field: `category`, `productName`, `price`, then `images` when creating
    /// a product without any picked file.
    pub fn check_required(&self) -> Result<(), FormError> {
        if self.draft.category.trim().is_empty() {
            return Err(FormError::MissingRequired(Category::WIRE_NAME));
        }
        if self.draft.text(TextField::ProductName).trim().is_empty() {
            return Err(FormError::MissingRequired(TextField::ProductName.wire_name()));
        }
        if self.draft.number(NumericField::Price).is_none() {
            return Err(FormError::MissingRequired(NumericField::Price.wire_name()));
        }
        if !self.mode.is_edit() && !self.draft.images.iter().any(ImageAttachment::is_pending) {
            return Err(FormError::MissingRequired(IMAGE_PART_NAME));
        }
        Ok(())
    }

    /// Revokes all previews and restores the empty draft, keeping the mode.
    ///
    /// The draft is reset even when a revoke fails.
    ///
    /// # Errors
    ///
    /// Returns the first [`PreviewError`] raised while revoking.
    pub fn reset_draft(&mut self) -> Result<(), PreviewError> {
        let released = self.release_all_ephemeral_previews();
        self.draft = ProductDraft::default();
        self.previews.clear();
        released
    }

    /// Ends the form's lifetime, reporting revoke failures to the caller.
    ///
    /// # Errors
    ///
    /// Returns the first [`PreviewError`] raised while revoking.
    pub fn close(mut self) -> Result<(), PreviewError> {
        self.release_all_ephemeral_previews()
    }

    fn revoke_outstanding(&mut self, handle: &EphemeralHandle) -> Result<(), PreviewError> {
        let Some(pos) = self.outstanding.iter().position(|h| h == handle) else {
            return Ok(());
        };
        self.provider.revoke(handle)?;
        self.outstanding.remove(pos);
        Ok(())
    }
}

impl<P: PreviewProvider> Drop for ProductForm<P> {
    fn drop(&mut self) {
        if let Err(e) = self.release_all_ephemeral_previews() {
            tracing::warn!(
                error = %e,
                outstanding = self.outstanding.len(),
                "failed to revoke preview handles on form teardown"
            );
        }
    }
}

#[cfg(test)]
#[path = "form_test.rs"]
mod tests;
