//! `add` and `edit`: drive a product form from command-line edits.

use std::path::PathBuf;

use anyhow::Context;
use catadmin_client::{CatalogClient, Session};
use catadmin_core::{
    BlobRegistry, ImageHost, LocalFile, PreviewProvider, ProductForm, SizeRegion,
    SubmissionPayload,
};
use clap::Args;

/// Edits applied to a form, in this order: field assignments, size toggles,
/// image removals, then new images.
#[derive(Debug, Clone, Default, Args)]
pub struct FormArgs {
    /// Set a field by its wire name, e.g. `--set productName="Dress A"`
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(String, String)>,
    /// Toggle a size, e.g. `--toggle-size india:M` or `--toggle-size pakistan:38`
    #[arg(long = "toggle-size", value_name = "REGION:SIZE", value_parser = parse_size_toggle)]
    pub toggle_size: Vec<(SizeRegion, String)>,
    /// Remove the image at this index (see `images <id>`)
    #[arg(long = "remove-image", value_name = "INDEX")]
    pub remove_image: Vec<usize>,
    /// Attach a local image file
    #[arg(long = "image", value_name = "PATH")]
    pub image: Vec<PathBuf>,
    /// Print the submission instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}

pub(crate) fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got {raw:?}"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in {raw:?}"));
    }
    Ok((field.to_string(), value.to_string()))
}

pub(crate) fn parse_size_toggle(raw: &str) -> Result<(SizeRegion, String), String> {
    let (region, size) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected REGION:SIZE, got {raw:?}"))?;
    let region = region.parse::<SizeRegion>().map_err(|e| e.to_string())?;
    Ok((region, size.trim().to_string()))
}

pub(crate) fn apply_edits<P: PreviewProvider>(
    form: &mut ProductForm<P>,
    args: &FormArgs,
) -> anyhow::Result<()> {
    for (field, value) in &args.set {
        form.set_field(field, value)?;
    }
    for (region, size) in &args.toggle_size {
        form.toggle_size_variant(*region, size)?;
    }

    // Highest index first so earlier indices still point at the same image.
    let mut removals = args.remove_image.clone();
    removals.sort_unstable_by(|a, b| b.cmp(a));
    removals.dedup();
    for index in removals {
        form.remove_image_at(index)?;
    }

    let files = args
        .image
        .iter()
        .map(|path| LocalFile::read(path))
        .collect::<Result<Vec<_>, _>>()?;
    form.add_images(files)?;
    Ok(())
}

fn print_payload(payload: &SubmissionPayload) {
    for (name, value) in &payload.fields {
        println!("{name:<22}{value}");
    }
    for (name, file) in payload.file_parts() {
        println!(
            "{name:<22}{} ({} bytes, {})",
            file.file_name,
            file.bytes.len(),
            file.content_type.as_deref().unwrap_or("unknown type")
        );
    }
}

/// Validate and project the form without sending it, then close it.
pub(crate) fn dry_run<P: PreviewProvider>(
    form: ProductForm<P>,
) -> anyhow::Result<SubmissionPayload> {
    form.check_required()?;
    let payload = form.serialize_for_submission();
    form.close()?;
    Ok(payload)
}

async fn finish<P: PreviewProvider>(
    client: &CatalogClient,
    session: &Session,
    mut form: ProductForm<P>,
    dry_run_only: bool,
) -> anyhow::Result<()> {
    if dry_run_only {
        print_payload(&dry_run(form)?);
        return Ok(());
    }

    let outcome = client.submit(session, &mut form).await;
    let closed = form.close();
    let ack = outcome?;
    if let Err(e) = closed {
        tracing::warn!(error = %e, "preview handles were not all released");
    }
    println!("{}", ack.message.as_deref().unwrap_or("Saved"));
    Ok(())
}

/// Build a new product from `args` and submit it.
///
/// # Errors
///
/// Returns an error if an edit is rejected, an image cannot be read, or the
/// submission fails.
pub(crate) async fn run_add(
    client: &CatalogClient,
    session: &Session,
    args: &FormArgs,
) -> anyhow::Result<()> {
    let mut form = ProductForm::create(BlobRegistry::default());
    apply_edits(&mut form, args)?;
    finish(client, session, form, args.dry_run).await
}

/// Load a stored product, apply `args`, and submit the update.
///
/// # Errors
///
/// Returns an error if the product cannot be fetched, an edit is rejected, an
/// image cannot be read, or the submission fails.
pub(crate) async fn run_edit(
    client: &CatalogClient,
    session: &Session,
    host: &ImageHost,
    id: &str,
    args: &FormArgs,
) -> anyhow::Result<()> {
    let record = client
        .get_product(session, id)
        .await
        .with_context(|| format!("failed to load product {id}"))?;
    let mut form = ProductForm::edit(BlobRegistry::default(), &record, host);
    apply_edits(&mut form, args)?;
    finish(client, session, form, args.dry_run).await
}
