use serde_json::json;

use super::*;

/// Provider that records every create/revoke and can be told to fail.
#[derive(Debug, Default)]
struct RecordingProvider {
    next_id: usize,
    created: Vec<String>,
    revoked: Vec<String>,
    fail_create_after: Option<usize>,
    fail_revoke: bool,
}

impl RecordingProvider {
    fn revoke_count(&self, handle: &str) -> usize {
        self.revoked.iter().filter(|h| *h == handle).count()
    }

    fn live(&self) -> usize {
        self.created
            .iter()
            .filter(|h| !self.revoked.contains(h))
            .count()
    }
}

impl PreviewProvider for RecordingProvider {
    fn create(&mut self, file: &LocalFile) -> Result<EphemeralHandle, PreviewError> {
        if self.fail_create_after.is_some_and(|n| self.created.len() >= n) {
            return Err(PreviewError::Create {
                file_name: file.file_name.clone(),
                reason: "out of handles".to_string(),
            });
        }
        self.next_id += 1;
        let url = format!("blob:test/{}", self.next_id);
        self.created.push(url.clone());
        EphemeralHandle::new(url)
    }

    fn revoke(&mut self, handle: &EphemeralHandle) -> Result<(), PreviewError> {
        if self.fail_revoke {
            return Err(PreviewError::Revoke {
                handle: handle.to_string(),
                reason: "platform refused".to_string(),
            });
        }
        self.revoked.push(handle.as_str().to_string());
        Ok(())
    }
}

fn file(name: &str) -> LocalFile {
    LocalFile::new(name, name.as_bytes().to_vec())
}

fn pending_names<P: PreviewProvider>(form: &ProductForm<P>) -> Vec<String> {
    form.draft()
        .images()
        .iter()
        .map(|image| match image {
            ImageAttachment::Pending(f) => f.file_name.clone(),
            ImageAttachment::Remote { stored_path } => stored_path.clone(),
        })
        .collect()
}

fn stored_record() -> ProductRecord {
    serde_json::from_value(json!({
        "_id": "p-42",
        "productName": "Anarkali Kurta",
        "category": "kurta",
        "price": 120,
        "colorVariants": ["Rose", "Ivory"],
        "material": ["Cotton"],
        "sizeVariants": { "indian": ["S", "M"], "pakistan": ["38"] },
        "images": ["/src/uploads/a.jpg", "/src/uploads/b.jpg"]
    }))
    .expect("fixture should decode")
}

// ---------------------------------------------------------------------------
// Scalar and list fields
// ---------------------------------------------------------------------------

#[test]
fn new_form_starts_from_empty_draft() {
    let form = ProductForm::create(RecordingProvider::default());
    let draft = form.draft();

    assert_eq!(form.mode(), &FormMode::Create);
    assert_eq!(draft.text(TextField::ProductName), "");
    assert_eq!(draft.category(), Some(Category::Unset));
    assert_eq!(draft.category_value(), "");
    assert_eq!(draft.number(NumericField::Price), Some(Decimal::ZERO));
    assert_eq!(draft.multi_value(MultiValueField::Material), [""]);
    assert!(draft.sizes(SizeRegion::India).is_empty());
    assert!(draft.images().is_empty());
    assert!(form.previews().is_empty());
}

#[test]
fn set_field_routes_by_wire_name() {
    let mut form = ProductForm::create(RecordingProvider::default());
    form.set_field("productName", "Dress A").unwrap();
    form.set_field("price", "49").unwrap();
    form.set_field("category", "saree").unwrap();
    form.set_field("colorVariants", "Red,Blue").unwrap();
    form.set_field("stockQuantity", "").unwrap();

    let draft = form.draft();
    assert_eq!(draft.text(TextField::ProductName), "Dress A");
    assert_eq!(draft.number(NumericField::Price), Some(Decimal::from(49)));
    assert_eq!(draft.category(), Some(Category::Saree));
    assert_eq!(draft.multi_value(MultiValueField::ColorVariants), ["Red", "Blue"]);
    assert_eq!(draft.number(NumericField::StockQuantity), None);
}

#[test]
fn set_field_rejects_unknown_names_without_change() {
    let mut form = ProductForm::create(RecordingProvider::default());
    let before = form.draft().clone();

    assert!(matches!(
        form.set_field("colour", "red"),
        Err(FormError::UnknownField(ref n)) if n == "colour"
    ));
    assert!(matches!(
        form.set_field("price", "abc"),
        Err(FormError::InvalidNumber { field: "price", .. })
    ));
    assert!(matches!(
        form.set_field("category", "gowns"),
        Err(FormError::UnknownCategory(_))
    ));
    assert_eq!(form.draft(), &before);
}

#[test]
fn multi_value_round_trips_through_serialization() {
    let mut form = ProductForm::create(RecordingProvider::default());
    form.set_multi_value_field(MultiValueField::Material, "Cotton,Silk,Linen");

    assert_eq!(
        form.draft().multi_value(MultiValueField::Material),
        ["Cotton", "Silk", "Linen"]
    );
    let payload = form.serialize_for_submission();
    assert_eq!(payload.field("material"), Some("Cotton,Silk,Linen"));
}

#[test]
fn multi_value_keeps_whitespace_and_empty_segments() {
    let mut form = ProductForm::create(RecordingProvider::default());
    form.set_multi_value_field(MultiValueField::ColorVariants, "Red, Blue,");

    assert_eq!(
        form.draft().multi_value(MultiValueField::ColorVariants),
        ["Red", " Blue", ""]
    );
    assert_eq!(
        form.serialize_for_submission().field("colorVariants"),
        Some("Red, Blue,")
    );
}

// ---------------------------------------------------------------------------
// Size variants
// ---------------------------------------------------------------------------

#[test]
fn toggle_size_variant_is_reflected_in_payload() {
    let mut form = ProductForm::create(RecordingProvider::default());
    assert!(form.toggle_size_variant(SizeRegion::India, "M").unwrap());
    assert_eq!(
        form.serialize_for_submission().field("sizeVariantsIndia"),
        Some("M")
    );

    assert!(!form.toggle_size_variant(SizeRegion::India, "M").unwrap());
    assert_eq!(
        form.serialize_for_submission().field("sizeVariantsIndia"),
        Some("")
    );
}

#[test]
fn toggle_out_of_domain_size_leaves_set_unchanged() {
    let mut form = ProductForm::create(RecordingProvider::default());
    form.toggle_size_variant(SizeRegion::India, "S").unwrap();

    let err = form.toggle_size_variant(SizeRegion::India, "99").unwrap_err();
    assert!(matches!(err, FormError::SizeOutOfDomain { .. }));
    assert_eq!(form.draft().sizes(SizeRegion::India).as_slice(), ["S"]);
    assert!(form.draft().sizes(SizeRegion::Pakistan).is_empty());
}

// ---------------------------------------------------------------------------
// Images and previews
// ---------------------------------------------------------------------------

#[test]
fn add_images_to_empty_then_append() {
    let mut provider = RecordingProvider::default();
    let mut form = ProductForm::create(&mut provider);

    form.add_images(vec![file("a.jpg"), file("b.jpg")]).unwrap();
    assert_eq!(pending_names(&form), ["a.jpg", "b.jpg"]);
    let first_previews = form.previews().to_vec();

    form.add_images(vec![file("c.jpg")]).unwrap();
    assert_eq!(pending_names(&form), ["a.jpg", "b.jpg", "c.jpg"]);
    assert_eq!(form.previews().len(), 3);
    assert_eq!(&form.previews()[..2], first_previews.as_slice());
    assert!(form.previews().iter().all(PreviewUrl::is_ephemeral));
}

#[test]
fn remove_all_then_add_replaces_and_releases_each_handle_once() {
    let mut provider = RecordingProvider::default();
    {
        let mut form = ProductForm::create(&mut provider);
        form.add_images(vec![file("a.jpg"), file("b.jpg")]).unwrap();
        form.remove_image_at(1).unwrap();
        form.remove_image_at(0).unwrap();
        assert!(form.draft().images().is_empty());
        assert!(form.previews().is_empty());

        form.add_images(vec![file("c.jpg")]).unwrap();
        assert_eq!(pending_names(&form), ["c.jpg"]);
        assert_eq!(form.previews().len(), 1);
        assert_eq!(form.outstanding_previews(), 1);
    }

    assert_eq!(provider.created.len(), 3);
    for handle in &provider.created {
        assert_eq!(provider.revoke_count(handle), 1, "{handle} revoked wrong number of times");
    }
}

#[test]
fn previews_stay_aligned_through_mixed_edits() {
    fn assert_aligned(form: &ProductForm<RecordingProvider>) {
        assert_eq!(form.previews().len(), form.draft().images().len());
    }

    let mut form = ProductForm::create(RecordingProvider::default());
    form.add_images(vec![file("a"), file("b"), file("c")]).unwrap();
    assert_aligned(&form);
    form.remove_image_at(1).unwrap();
    assert_aligned(&form);
    form.add_images(vec![file("d")]).unwrap();
    assert_aligned(&form);
    assert!(form.remove_image_at(10).is_err());
    assert_aligned(&form);
    form.remove_image_at(0).unwrap();
    assert_aligned(&form);
    form.add_images(vec![]).unwrap();
    assert_aligned(&form);

    assert_eq!(pending_names(&form), ["c", "d"]);
    assert_eq!(form.outstanding_previews(), 2);
}

#[test]
fn remove_out_of_range_is_reported_and_harmless() {
    let mut form = ProductForm::create(RecordingProvider::default());
    form.add_images(vec![file("a.jpg")]).unwrap();

    let err = form.remove_image_at(1).unwrap_err();
    assert!(matches!(err, FormError::IndexOutOfRange { index: 1, len: 1 }));
    assert_eq!(form.draft().images().len(), 1);
    assert_eq!(form.previews().len(), 1);
}

#[test]
fn remove_then_release_all_does_not_double_revoke() {
    let mut provider = RecordingProvider::default();
    {
        let mut form = ProductForm::create(&mut provider);
        form.add_images(vec![file("a.jpg")]).unwrap();
        form.remove_image_at(0).unwrap();
        form.release_all_ephemeral_previews().unwrap();
        form.release_all_ephemeral_previews().unwrap();
    }
    assert_eq!(provider.revoked.len(), 1);
    assert_eq!(provider.live(), 0);
}

#[test]
fn drop_releases_outstanding_handles() {
    let mut provider = RecordingProvider::default();
    {
        let mut form = ProductForm::create(&mut provider);
        form.add_images(vec![file("a.jpg"), file("b.jpg")]).unwrap();
    }
    assert_eq!(provider.created.len(), 2);
    assert_eq!(provider.live(), 0);
}

#[test]
fn close_reports_revoke_failure() {
    let mut form = ProductForm::create(RecordingProvider::default());
    form.add_images(vec![file("a.jpg")]).unwrap();
    form.provider_mut().fail_revoke = true;

    let err = form.close().unwrap_err();
    assert!(matches!(err, PreviewError::Revoke { .. }));
}

#[test]
fn failed_create_rolls_back_and_keeps_draft() {
    let mut provider = RecordingProvider {
        fail_create_after: Some(2),
        ..RecordingProvider::default()
    };
    {
        let mut form = ProductForm::create(&mut provider);
        form.add_images(vec![file("a.jpg")]).unwrap();

        let err = form
            .add_images(vec![file("b.jpg"), file("c.jpg")])
            .unwrap_err();
        assert!(matches!(err, PreviewError::Create { ref file_name, .. } if file_name == "c.jpg"));
        assert_eq!(pending_names(&form), ["a.jpg"]);
        assert_eq!(form.previews().len(), 1);
        assert_eq!(form.outstanding_previews(), 1);
    }
    assert_eq!(provider.live(), 0);
}

#[test]
fn failed_revoke_keeps_image_in_place() {
    let mut provider = RecordingProvider::default();
    let mut form = ProductForm::create(&mut provider);
    form.add_images(vec![file("a.jpg")]).unwrap();
    form.provider_mut().fail_revoke = true;

    let err = form.remove_image_at(0).unwrap_err();
    assert!(matches!(err, FormError::Preview(PreviewError::Revoke { .. })));
    assert_eq!(form.draft().images().len(), 1);
    assert_eq!(form.outstanding_previews(), 1);

    assert!(form.release_all_ephemeral_previews().is_err());
    assert_eq!(form.outstanding_previews(), 1);

    form.provider_mut().fail_revoke = false;
    form.close().unwrap();
}

// ---------------------------------------------------------------------------
// Edit flow
// ---------------------------------------------------------------------------

#[test]
fn edit_form_hydrates_from_record_with_remote_previews() {
    let record = stored_record();
    let form = ProductForm::edit(RecordingProvider::default(), &record, &ImageHost::default());
    let draft = form.draft();

    assert_eq!(
        form.mode(),
        &FormMode::Edit {
            id: "p-42".to_string()
        }
    );
    assert_eq!(draft.text(TextField::ProductName), "Anarkali Kurta");
    assert_eq!(draft.category(), Some(Category::Kurta));
    assert_eq!(draft.number(NumericField::Price), Some(Decimal::from(120)));
    assert_eq!(draft.sizes(SizeRegion::India).as_slice(), ["S", "M"]);
    assert_eq!(draft.sizes(SizeRegion::Pakistan).as_slice(), ["38"]);
    assert_eq!(form.previews().len(), 2);
    assert_eq!(
        form.previews()[0],
        PreviewUrl::Remote("https://backend.pinkstories.ae/uploads/a.jpg".to_string())
    );
    assert_eq!(form.outstanding_previews(), 0);
}

#[test]
fn edit_form_keeps_unknown_stored_category() {
    let mut record = stored_record();
    record.category = "lehenga".to_string();
    let mut form = ProductForm::edit(RecordingProvider::default(), &record, &ImageHost::default());
    assert_eq!(form.draft().category(), None);
    assert_eq!(form.draft().category_value(), "lehenga");

    form.set_field("brand", "Pink Stories").unwrap();
    let payload = form.serialize_for_submission();
    assert_eq!(payload.field("category"), Some("lehenga"));
    assert_eq!(payload.field("brand"), Some("Pink Stories"));
    assert!(form.check_required().is_ok());
}

#[test]
fn picking_a_category_replaces_an_unknown_stored_one() {
    let mut record = stored_record();
    record.category = "lehenga".to_string();
    let mut form = ProductForm::edit(RecordingProvider::default(), &record, &ImageHost::default());
    form.set_category(Category::Saree);
    assert_eq!(form.serialize_for_submission().field("category"), Some("saree"));
}

#[test]
fn removing_remote_image_never_revokes_and_is_reported_on_submit() {
    let record = stored_record();
    let mut provider = RecordingProvider::default();
    {
        let mut form = ProductForm::edit(&mut provider, &record, &ImageHost::default());
        form.add_images(vec![file("new.jpg")]).unwrap();

        let removed = form.remove_image_at(0).unwrap();
        assert_eq!(
            removed,
            ImageAttachment::Remote {
                stored_path: "/src/uploads/a.jpg".to_string()
            }
        );
        assert_eq!(form.draft().removed_images(), ["/src/uploads/a.jpg"]);
        assert_eq!(form.previews().len(), 2);

        let payload = form.serialize_for_submission();
        assert_eq!(payload.field(REMOVED_IMAGES_PART_NAME), Some("/src/uploads/a.jpg"));
        assert_eq!(payload.files.len(), 1, "stored images must not be re-uploaded");
        assert_eq!(payload.files[0].file_name, "new.jpg");
    }
    assert_eq!(provider.revoked.len(), 1);
    assert!(provider.revoked.iter().all(|h| h.starts_with("blob:")));
}

#[test]
fn edit_append_keeps_remote_entries() {
    let record = stored_record();
    let mut form = ProductForm::edit(RecordingProvider::default(), &record, &ImageHost::default());
    form.add_images(vec![file("c.jpg")]).unwrap();

    assert_eq!(
        pending_names(&form),
        ["/src/uploads/a.jpg", "/src/uploads/b.jpg", "c.jpg"]
    );
    assert!(!form.previews()[0].is_ephemeral());
    assert!(form.previews()[2].is_ephemeral());
}

// ---------------------------------------------------------------------------
// Serialization, validation, reset
// ---------------------------------------------------------------------------

#[test]
fn scenario_payload_contains_expected_parts() {
    let mut form = ProductForm::create(RecordingProvider::default());
    form.set_text_field(TextField::ProductName, "Dress A");
    form.set_numeric_field(NumericField::Price, Some(Decimal::from(49)));
    form.toggle_size_variant(SizeRegion::India, "S").unwrap();
    form.toggle_size_variant(SizeRegion::India, "M").unwrap();
    form.add_images(vec![file("x.jpg")]).unwrap();

    let payload = form.serialize_for_submission();
    assert_eq!(payload.field("productName"), Some("Dress A"));
    assert_eq!(payload.field("price"), Some("49"));
    assert_eq!(payload.field("sizeVariantsIndia"), Some("S,M"));
    assert_eq!(payload.field("sizeVariantsPakistan"), Some(""));
    let parts: Vec<_> = payload.file_parts().collect();
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].0, "images");
    assert_eq!(parts[0].1.file_name, "x.jpg");
}

#[test]
fn payload_lists_every_field_once_in_form_order() {
    let form = ProductForm::create(RecordingProvider::default());
    let names: Vec<&str> = form
        .serialize_for_submission()
        .fields
        .iter()
        .map(|(n, _)| *n)
        .collect();

    assert_eq!(
        names,
        [
            "sku",
            "brand",
            "weight",
            "productName",
            "category",
            "deliveryTime",
            "shortDescription",
            "productDescription",
            "careInstructions",
            "stockQuantity",
            "price",
            "discount",
            "colorVariants",
            "material",
            "sizeVariantsIndia",
            "sizeVariantsPakistan",
            "neck",
            "topDesignStyling",
            "topFabric",
            "bottomFabric",
            "dupattaFabric",
            "weavePattern",
            "stitch",
            "printOrPattern",
        ]
    );
}

#[test]
fn serialization_does_not_mutate_draft() {
    let mut form = ProductForm::create(RecordingProvider::default());
    form.add_images(vec![file("a.jpg")]).unwrap();
    let before = form.draft().clone();

    let _ = form.serialize_for_submission();
    let _ = form.serialize_for_submission();

    assert_eq!(form.draft(), &before);
    assert_eq!(form.outstanding_previews(), 1);
}

#[test]
fn cleared_number_serializes_as_empty_string() {
    let mut form = ProductForm::create(RecordingProvider::default());
    form.set_numeric_field(NumericField::Discount, None);
    assert_eq!(form.serialize_for_submission().field("discount"), Some(""));
}

#[test]
fn check_required_walks_category_name_price_then_images() {
    let mut form = ProductForm::create(RecordingProvider::default());
    assert!(matches!(
        form.check_required(),
        Err(FormError::MissingRequired("category"))
    ));

    form.set_category(Category::Kurta);
    assert!(matches!(
        form.check_required(),
        Err(FormError::MissingRequired("productName"))
    ));

    form.set_text_field(TextField::ProductName, "Dress A");
    form.set_numeric_field(NumericField::Price, None);
    assert!(matches!(
        form.check_required(),
        Err(FormError::MissingRequired("price"))
    ));

    form.set_numeric_field(NumericField::Price, Some(Decimal::ZERO));
    assert!(matches!(
        form.check_required(),
        Err(FormError::MissingRequired("images"))
    ));

    form.add_images(vec![file("a.jpg")]).unwrap();
    assert!(form.check_required().is_ok());
}

#[test]
fn create_with_name_and_price_only_is_rejected() {
    let mut form = ProductForm::create(RecordingProvider::default());
    form.set_field("productName", "Dress A").unwrap();
    form.set_field("price", "49").unwrap();
    assert!(form.check_required().is_err());
}

#[test]
fn edit_does_not_require_new_images() {
    let mut form = ProductForm::edit(
        RecordingProvider::default(),
        &stored_record(),
        &ImageHost::default(),
    );
    assert!(form.check_required().is_ok());

    form.remove_image_at(1).unwrap();
    form.remove_image_at(0).unwrap();
    assert!(form.check_required().is_ok());
}

#[test]
fn blank_category_fails_edit_validation() {
    let mut record = stored_record();
    record.category = String::new();
    let form = ProductForm::edit(RecordingProvider::default(), &record, &ImageHost::default());
    assert!(matches!(
        form.check_required(),
        Err(FormError::MissingRequired("category"))
    ));
}

#[test]
fn reset_draft_releases_previews_and_keeps_mode() {
    let record = stored_record();
    let mut provider = RecordingProvider::default();
    {
        let mut form = ProductForm::edit(&mut provider, &record, &ImageHost::default());
        form.add_images(vec![file("c.jpg")]).unwrap();
        form.reset_draft().unwrap();

        assert!(form.draft().images().is_empty());
        assert!(form.previews().is_empty());
        assert_eq!(form.draft(), &ProductDraft::default());
        assert!(form.mode().is_edit());
        assert_eq!(form.outstanding_previews(), 0);
    }
    assert_eq!(provider.revoked.len(), 1);
}
