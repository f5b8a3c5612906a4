//! Region-partitioned size charts and the per-region selection sets.

use std::str::FromStr;

use crate::error::FormError;

pub const INDIA_SIZES: [&str; 9] = ["XS", "S", "M", "L", "XL", "XXL", "3XL", "4XL", "5XL"];
pub const PAKISTAN_SIZES: [&str; 6] = ["36", "38", "40", "42", "44", "46"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeRegion {
    India,
    Pakistan,
}

impl SizeRegion {
    pub const ALL: [SizeRegion; 2] = [SizeRegion::India, SizeRegion::Pakistan];

    /// The fixed size chart offered for this region.
    #[must_use]
    pub fn domain(self) -> &'static [&'static str] {
        match self {
            SizeRegion::India => &INDIA_SIZES,
            SizeRegion::Pakistan => &PAKISTAN_SIZES,
        }
    }

    #[must_use]
    pub fn offers(self, size: &str) -> bool {
        self.domain().contains(&size)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SizeRegion::India => "india",
            SizeRegion::Pakistan => "pakistan",
        }
    }

    /// Multipart field the selection is submitted under.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            SizeRegion::India => "sizeVariantsIndia",
            SizeRegion::Pakistan => "sizeVariantsPakistan",
        }
    }
}

impl std::fmt::Display for SizeRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizeRegion {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "india" | "indian" => Ok(SizeRegion::India),
            "pakistan" => Ok(SizeRegion::Pakistan),
            _ => Err(FormError::UnknownRegion(s.to_string())),
        }
    }
}

/// Sizes selected for one region, in the order they were picked.
///
/// A size appears at most once. Equality is set membership, so
/// [`SizeVariantSet::toggle`] is an involution under `==` even though a
/// re-selected size moves to the end of the pick order.
#[derive(Debug, Clone)]
pub struct SizeVariantSet {
    region: SizeRegion,
    sizes: Vec<String>,
}

impl SizeVariantSet {
    #[must_use]
    pub fn new(region: SizeRegion) -> Self {
        Self {
            region,
            sizes: Vec::new(),
        }
    }

    /// Builds a set from sizes the catalog service already stored.
    ///
    /// Duplicates collapse onto their first occurrence. Sizes outside the
    /// region's chart are kept so that editing a product never drops data the
    /// server holds.
    pub fn from_stored<I, S>(region: SizeRegion, stored: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new(region);
        for size in stored {
            let size = size.into();
            if !set.sizes.contains(&size) {
                set.sizes.push(size);
            }
        }
        set
    }

    /// Removes `size` when selected, appends it otherwise.
    ///
    /// Returns whether the size is selected afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::SizeOutOfDomain`] when `size` is not on the
    /// region's chart; the set is left untouched.
    pub fn toggle(&mut self, size: &str) -> Result<bool, FormError> {
        if !self.region.offers(size) {
            return Err(FormError::SizeOutOfDomain {
                region: self.region.as_str(),
                size: size.to_string(),
            });
        }

        if let Some(pos) = self.sizes.iter().position(|s| s == size) {
            self.sizes.remove(pos);
            Ok(false)
        } else {
            self.sizes.push(size.to_string());
            Ok(true)
        }
    }

    #[must_use]
    pub fn contains(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.sizes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Comma-joined selection in pick order, as submitted.
    #[must_use]
    pub fn joined(&self) -> String {
        self.sizes.join(",")
    }
}

impl PartialEq for SizeVariantSet {
    fn eq(&self, other: &Self) -> bool {
        self.region == other.region
            && self.sizes.len() == other.sizes.len()
            && self.sizes.iter().all(|s| other.contains(s))
    }
}

impl Eq for SizeVariantSet {}
