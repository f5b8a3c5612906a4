//! Read-only catalog commands and delete.

use std::io::{BufRead, Write};

use anyhow::Context;
use catadmin_client::{CatalogClient, Session};
use catadmin_core::{
    gallery, Category, ImageHost, MultiValueField, NumericField, ProductDraft, ProductList,
    SizeRegion, TextField, Thumbnail,
};

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        format!("{}...", s.chars().take(max).collect::<String>())
    } else {
        s.to_string()
    }
}

/// Picker label for a stored category; values outside the picker set are
/// shown as stored.
pub(crate) fn category_label(stored: &str) -> &str {
    match stored.parse::<Category>() {
        Ok(Category::Unset) => "-",
        Ok(category) => category.label(),
        Err(_) => stored,
    }
}

/// Print the product table and the `Showing X of Y products` summary.
///
/// # Errors
///
/// Returns an error if the product list cannot be fetched.
pub(crate) async fn run_list(
    client: &CatalogClient,
    session: &Session,
    host: &ImageHost,
    search: Option<&str>,
) -> anyhow::Result<()> {
    let mut list = ProductList::new(client.list_products(session).await?);
    if let Some(term) = search {
        list.search(term);
    }

    if list.is_empty() {
        println!("no products found");
        return Ok(());
    }

    println!(
        "{:<26}{:<34}{:<22}{:>10}{:>8}  IMAGE",
        "ID", "NAME", "CATEGORY", "PRICE", "STOCK"
    );
    for product in list.visible() {
        let thumb = Thumbnail::for_record(product, host);
        let image = match (&thumb.url, thumb.extra_count()) {
            (None, _) => "-".to_string(),
            (Some(url), 0) => url.clone(),
            (Some(url), extra) => format!("{url} (+{extra})"),
        };
        println!(
            "{:<26}{:<34}{:<22}{:>10}{:>8}  {}",
            product.id,
            truncate(&product.product_name, 30),
            truncate(category_label(&product.category), 20),
            product.price,
            product.stock_quantity,
            image
        );
    }
    println!("{}", list.summary());

    Ok(())
}

/// Print every field of one product, using the form's wire names.
///
/// # Errors
///
/// Returns an error if the product cannot be fetched.
pub(crate) async fn run_show(
    client: &CatalogClient,
    session: &Session,
    id: &str,
) -> anyhow::Result<()> {
    let record = client.get_product(session, id).await?;
    let draft = ProductDraft::from_record(&record);

    println!("{:<22}{}", "_id", record.id);
    for field in TextField::ALL {
        println!("{:<22}{}", field.wire_name(), draft.text(field));
    }
    println!("{:<22}{}", "category", category_label(draft.category_value()));
    for field in NumericField::ALL {
        let value = draft
            .number(field)
            .map_or_else(String::new, |n| n.to_string());
        println!("{:<22}{value}", field.wire_name());
    }
    for field in MultiValueField::ALL {
        println!("{:<22}{}", field.wire_name(), draft.multi_value(field).join(","));
    }
    for region in SizeRegion::ALL {
        println!("{:<22}{}", region.wire_name(), draft.sizes(region).joined());
    }
    println!("{:<22}{}", "images", record.images.len());

    Ok(())
}

/// Print a product's image URLs alongside the indices `edit --remove-image`
/// takes.
///
/// # Errors
///
/// Returns an error if the product cannot be fetched.
pub(crate) async fn run_images(
    client: &CatalogClient,
    session: &Session,
    host: &ImageHost,
    id: &str,
) -> anyhow::Result<()> {
    let record = client.get_product(session, id).await?;
    let urls = gallery(&record, host);
    if urls.is_empty() {
        println!("{} has no images", record.product_name);
        return Ok(());
    }
    for (index, url) in urls.iter().enumerate() {
        println!("{index:>3}  {url}");
    }
    Ok(())
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read confirmation")?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

/// Delete a product after confirmation, then print the updated list summary.
///
/// # Errors
///
/// Returns an error if the product is unknown, the session has no token, or
/// the service rejects the delete.
pub(crate) async fn run_delete(
    client: &CatalogClient,
    session: &Session,
    id: &str,
    yes: bool,
) -> anyhow::Result<()> {
    session.require_token()?;

    let mut list = ProductList::new(client.list_products(session).await?);
    let name = list
        .get(id)
        .map(|p| p.product_name.clone())
        .with_context(|| format!("no product with id {id}"))?;

    if !yes && !confirm(&format!("Delete \"{name}\"?"))? {
        println!("aborted");
        return Ok(());
    }

    let ack = client.delete_product(session, id).await?;
    list.remove(id);
    println!(
        "{}",
        ack.message.as_deref().unwrap_or("Product deleted successfully")
    );
    println!("{}", list.summary());

    Ok(())
}
