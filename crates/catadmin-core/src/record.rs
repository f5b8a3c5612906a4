//! Product records as returned by the catalog service.
//!
//! ## Observed shape
//!
//! ### Missing and null fields
//! Records created by older admin builds omit fields freely. Text fields
//! default to `""`, numbers to `0`, list fields to `[""]` and `images` to `[]`.
//! Numeric text fields (`weight` is sometimes stored as a number) are
//! stringified.
//!
//! ### Size variants
//! Two representations coexist:
//! - flat: `"sizeVariantIndia": ["S", "M"]`, `"sizeVariantPakistan": ["38"]`
//! - legacy nested: `"sizeVariants": {"indian": [...], "pakistan": [...]}`
//!
//! The flat field wins when present; the nested one is consulted only when the
//! flat field is absent or falsy (`null`, `false`, `0`, `""`). Any other flat
//! value that is not an array decodes to no sizes. Pakistan sizes sometimes arrive as numbers.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::sizes::SizeRegion;

/// A product as stored by the catalog service, normalized to the flat
/// per-region size model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawProductRecord", rename_all = "camelCase")]
pub struct ProductRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub sku: String,
    pub brand: String,
    pub weight: String,
    pub product_name: String,
    /// Stored category value; may fall outside the picker set on old records.
    pub category: String,
    pub delivery_time: String,
    pub short_description: String,
    pub product_description: String,
    pub care_instructions: String,
    pub stock_quantity: Decimal,
    pub price: Decimal,
    pub discount: Decimal,
    pub color_variants: Vec<String>,
    pub material: Vec<String>,
    pub size_variant_india: Vec<String>,
    pub size_variant_pakistan: Vec<String>,
    /// Stored image paths, e.g. `/src/uploads/kurta-1.jpg`.
    pub images: Vec<String>,
    pub neck: String,
    pub top_design_styling: String,
    pub top_fabric: String,
    pub bottom_fabric: String,
    pub dupatta_fabric: String,
    pub weave_pattern: String,
    pub stitch: String,
    pub print_or_pattern: String,
}

impl ProductRecord {
    #[must_use]
    pub fn sizes(&self, region: SizeRegion) -> &[String] {
        match region {
            SizeRegion::India => &self.size_variant_india,
            SizeRegion::Pakistan => &self.size_variant_pakistan,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProductRecord {
    #[serde(rename = "_id", default, deserialize_with = "lenient_text")]
    id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    sku: String,
    #[serde(default, deserialize_with = "lenient_text")]
    brand: String,
    #[serde(default, deserialize_with = "lenient_text")]
    weight: String,
    #[serde(default, deserialize_with = "lenient_text")]
    product_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    category: String,
    #[serde(default, deserialize_with = "lenient_text")]
    delivery_time: String,
    #[serde(default, deserialize_with = "lenient_text")]
    short_description: String,
    #[serde(default, deserialize_with = "lenient_text")]
    product_description: String,
    #[serde(default, deserialize_with = "lenient_text")]
    care_instructions: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    stock_quantity: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    price: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    discount: Decimal,
    #[serde(default)]
    color_variants: Option<Value>,
    #[serde(default)]
    material: Option<Value>,
    #[serde(default)]
    size_variant_india: Option<Value>,
    #[serde(default)]
    size_variant_pakistan: Option<Value>,
    #[serde(default)]
    size_variants: Option<Value>,
    #[serde(default)]
    images: Option<Value>,
    #[serde(default, deserialize_with = "lenient_text")]
    neck: String,
    #[serde(default, deserialize_with = "lenient_text")]
    top_design_styling: String,
    #[serde(default, deserialize_with = "lenient_text")]
    top_fabric: String,
    #[serde(default, deserialize_with = "lenient_text")]
    bottom_fabric: String,
    #[serde(default, deserialize_with = "lenient_text")]
    dupatta_fabric: String,
    #[serde(default, deserialize_with = "lenient_text")]
    weave_pattern: String,
    #[serde(default, deserialize_with = "lenient_text")]
    stitch: String,
    #[serde(default, deserialize_with = "lenient_text")]
    print_or_pattern: String,
}

/// Nested size shape written by earlier admin builds.
#[derive(Debug, Default, Deserialize)]
struct LegacySizeVariants {
    #[serde(default)]
    indian: Option<Value>,
    #[serde(default)]
    pakistan: Option<Value>,
}

/// Where a region's sizes were found on a stored record.
#[derive(Debug, PartialEq)]
enum StoredSizes {
    Flat(Value),
    Nested(Value),
    Missing,
}

impl StoredSizes {
    fn locate(flat: Option<Value>, nested: Option<Value>) -> Self {
        match (flat, nested) {
            (Some(flat), _) if !is_blank(&flat) => StoredSizes::Flat(flat),
            (_, Some(nested)) if !is_blank(&nested) => StoredSizes::Nested(nested),
            _ => StoredSizes::Missing,
        }
    }

    fn into_sizes(self) -> Vec<String> {
        match self {
            StoredSizes::Flat(value) | StoredSizes::Nested(value) => {
                string_list(value).unwrap_or_default()
            }
            StoredSizes::Missing => Vec::new(),
        }
    }
}

/// Decodes one region's sizes, preferring the flat field over the legacy
/// nested shape.
fn decode_region_sizes(flat: Option<Value>, nested: Option<Value>) -> Vec<String> {
    StoredSizes::locate(flat, nested).into_sizes()
}

impl From<RawProductRecord> for ProductRecord {
    fn from(raw: RawProductRecord) -> Self {
        let legacy = raw
            .size_variants
            .and_then(|v| serde_json::from_value::<LegacySizeVariants>(v).ok())
            .unwrap_or_default();
        Self {
            id: raw.id,
            sku: raw.sku,
            brand: raw.brand,
            weight: raw.weight,
            product_name: raw.product_name,
            category: raw.category,
            delivery_time: raw.delivery_time,
            short_description: raw.short_description,
            product_description: raw.product_description,
            care_instructions: raw.care_instructions,
            stock_quantity: raw.stock_quantity,
            price: raw.price,
            discount: raw.discount,
            color_variants: raw
                .color_variants
                .and_then(string_list)
                .unwrap_or_else(blank_list),
            material: raw.material.and_then(string_list).unwrap_or_else(blank_list),
            size_variant_india: decode_region_sizes(raw.size_variant_india, legacy.indian),
            size_variant_pakistan: decode_region_sizes(raw.size_variant_pakistan, legacy.pakistan),
            images: raw.images.and_then(string_list).unwrap_or_default(),
            neck: raw.neck,
            top_design_styling: raw.top_design_styling,
            top_fabric: raw.top_fabric,
            bottom_fabric: raw.bottom_fabric,
            dupatta_fabric: raw.dupatta_fabric,
            weave_pattern: raw.weave_pattern,
            stitch: raw.stitch,
            print_or_pattern: raw.print_or_pattern,
        }
    }
}

fn blank_list() -> Vec<String> {
    vec![String::new()]
}

/// Falsy flat values (`null`, `false`, `0`, `""`) defer to the nested shape.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

/// Returns the elements of a JSON array as strings; `None` for non-arrays.
fn string_list(value: Value) -> Option<Vec<String>> {
    let Value::Array(items) = value else {
        return None;
    };
    Some(
        items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                _ => String::new(),
            })
            .collect(),
    )
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let parsed = match value {
        Some(Value::Number(n)) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .ok(),
        Some(Value::String(s)) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    };
    Ok(parsed.unwrap_or_default())
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
