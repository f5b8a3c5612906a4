//! Field catalog for the product form.
//!
//! Each field carries the wire name the catalog service uses in both the JSON
//! records it returns and the multipart bodies it accepts.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::FormError;

/// Free-text scalar fields of a product.
///
/// The discriminants double as indices into the draft's text storage, so the
/// order here must match [`TextField::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Sku,
    Brand,
    Weight,
    ProductName,
    DeliveryTime,
    ShortDescription,
    ProductDescription,
    CareInstructions,
    Neck,
    TopDesignStyling,
    TopFabric,
    BottomFabric,
    DupattaFabric,
    WeavePattern,
    Stitch,
    PrintOrPattern,
}

impl TextField {
    pub const COUNT: usize = 16;

    pub const ALL: [TextField; Self::COUNT] = [
        TextField::Sku,
        TextField::Brand,
        TextField::Weight,
        TextField::ProductName,
        TextField::DeliveryTime,
        TextField::ShortDescription,
        TextField::ProductDescription,
        TextField::CareInstructions,
        TextField::Neck,
        TextField::TopDesignStyling,
        TextField::TopFabric,
        TextField::BottomFabric,
        TextField::DupattaFabric,
        TextField::WeavePattern,
        TextField::Stitch,
        TextField::PrintOrPattern,
    ];

    /// Fashion-specific detail fields, in the order the form lays them out.
    pub const FASHION: [TextField; 8] = [
        TextField::Neck,
        TextField::TopDesignStyling,
        TextField::TopFabric,
        TextField::BottomFabric,
        TextField::DupattaFabric,
        TextField::WeavePattern,
        TextField::Stitch,
        TextField::PrintOrPattern,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            TextField::Sku => "sku",
            TextField::Brand => "brand",
            TextField::Weight => "weight",
            TextField::ProductName => "productName",
            TextField::DeliveryTime => "deliveryTime",
            TextField::ShortDescription => "shortDescription",
            TextField::ProductDescription => "productDescription",
            TextField::CareInstructions => "careInstructions",
            TextField::Neck => "neck",
            TextField::TopDesignStyling => "topDesignStyling",
            TextField::TopFabric => "topFabric",
            TextField::BottomFabric => "bottomFabric",
            TextField::DupattaFabric => "dupattaFabric",
            TextField::WeavePattern => "weavePattern",
            TextField::Stitch => "stitch",
            TextField::PrintOrPattern => "printOrPattern",
        }
    }

    #[must_use]
    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.wire_name() == name)
    }
}

/// Non-negative numeric fields. `StockQuantity` only accepts whole numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    StockQuantity,
    Price,
    Discount,
}

impl NumericField {
    pub const COUNT: usize = 3;

    pub const ALL: [NumericField; Self::COUNT] = [
        NumericField::StockQuantity,
        NumericField::Price,
        NumericField::Discount,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            NumericField::StockQuantity => "stockQuantity",
            NumericField::Price => "price",
            NumericField::Discount => "discount",
        }
    }

    #[must_use]
    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.wire_name() == name)
    }

    /// Parses raw input for this field.
    ///
    /// Blank input clears the value (`Ok(None)`), mirroring an emptied number
    /// box.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidNumber`] for unparseable or negative input,
    /// or a fractional stock quantity.
    pub fn parse(self, raw: &str) -> Result<Option<Decimal>, FormError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let invalid = || FormError::InvalidNumber {
            field: self.wire_name(),
            value: raw.to_string(),
        };

        let value = Decimal::from_str(trimmed).map_err(|_| invalid())?;
        if value.is_sign_negative() && !value.is_zero() {
            return Err(invalid());
        }
        if self == NumericField::StockQuantity && !value.fract().is_zero() {
            return Err(invalid());
        }
        Ok(Some(value.normalize()))
    }
}

/// Comma-delimited list fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MultiValueField {
    ColorVariants,
    Material,
}

impl MultiValueField {
    pub const ALL: [MultiValueField; 2] = [MultiValueField::ColorVariants, MultiValueField::Material];

    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            MultiValueField::ColorVariants => "colorVariants",
            MultiValueField::Material => "material",
        }
    }

    #[must_use]
    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.wire_name() == name)
    }
}

/// Splits raw comma-delimited input exactly as typed: no trimming, empty
/// segments kept.
#[must_use]
pub fn split_multi_value(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_string).collect()
}

/// Product categories offered by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    Unset,
    PartyWears,
    SemiPartyWear,
    CoordSets,
    IndoWesternOutfits,
    Kurta,
    Saree,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Unset,
        Category::PartyWears,
        Category::SemiPartyWear,
        Category::CoordSets,
        Category::IndoWesternOutfits,
        Category::Kurta,
        Category::Saree,
    ];

    pub const WIRE_NAME: &'static str = "category";

    /// Stored value, as sent to and returned by the catalog service.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Unset => "",
            Category::PartyWears => "party wears",
            Category::SemiPartyWear => "semi party wear",
            Category::CoordSets => "co-ord sets",
            Category::IndoWesternOutfits => "indo-western outfits",
            Category::Kurta => "kurta",
            Category::Saree => "saree",
        }
    }

    /// Display label shown in category pickers.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Unset => "Select Category",
            Category::PartyWears => "PARTY WEARS",
            Category::SemiPartyWear => "SEMI-PARTY WEARS",
            Category::CoordSets => "CO-ORD SETS",
            Category::IndoWesternOutfits => "INDO-WESTERN OUTFITS",
            Category::Kurta => "KURTA",
            Category::Saree => "SAREE",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| FormError::UnknownCategory(s.to_string()))
    }
}
