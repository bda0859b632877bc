//! Static vendor attributes.
//!
//! A [`VendorCatalog`] is built once at startup (either the built-in table
//! or one declared in the deployment config) and then shared read-only.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Vendors scored by default, in report column order.
pub const DEFAULT_VENDORS: &[&str] = &["Encompass", "Marcone", "Reliable"];

/// Average shipping speed bucket of a vendor.
///
/// Profiles store the raw integer so a deployment can declare any value;
/// everything at or beyond four days falls into [`ShippingTier::FourPlusDays`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShippingTier {
    SameDay,
    OneDay,
    TwoDays,
    ThreeDays,
    FourPlusDays,
}

impl ShippingTier {
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code {
            0 => Self::SameDay,
            1 => Self::OneDay,
            2 => Self::TwoDays,
            3 => Self::ThreeDays,
            _ => Self::FourPlusDays,
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::SameDay => "same day",
            Self::OneDay => "1 day",
            Self::TwoDays => "2 days",
            Self::ThreeDays => "3 days",
            Self::FourPlusDays => "4 days+",
        }
    }
}

/// Static profile of one vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VendorProfile {
    /// Trust score, 0-100
    pub trust: u8,
    /// Average shipping speed: 0 = same day, 1 = 1 day, ... 4 or more = 4+ days
    pub shipping_tier: u8,
    /// Returnability score, 0 or 100
    pub returnability: u8,
}

impl VendorProfile {
    #[must_use]
    pub const fn new(trust: u8, shipping_tier: u8, returnability: u8) -> Self {
        Self {
            trust,
            shipping_tier,
            returnability,
        }
    }

    #[must_use]
    pub const fn tier(&self) -> ShippingTier {
        ShippingTier::from_code(self.shipping_tier)
    }
}

/// Mapping of vendor name to static profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct VendorCatalog {
    profiles: IndexMap<String, VendorProfile>,
}

static BUILTIN_CATALOG: LazyLock<VendorCatalog> = LazyLock::new(|| {
    VendorCatalog::from_profiles([
        ("Amazon", VendorProfile::new(10, 4, 100)),
        ("Marcone", VendorProfile::new(10, 3, 100)),
        ("Encompass", VendorProfile::new(10, 3, 100)),
        ("Reliable", VendorProfile::new(5, 4, 0)),
        ("Tribbles", VendorProfile::new(5, 4, 0)),
    ])
});

impl VendorCatalog {
    /// The built-in catalog shipped with the tool.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN_CATALOG
    }

    pub fn from_profiles<I, S>(profiles: I) -> Self
    where
        I: IntoIterator<Item = (S, VendorProfile)>,
        S: Into<String>,
    {
        Self {
            profiles: profiles
                .into_iter()
                .map(|(name, profile)| (name.into(), profile))
                .collect(),
        }
    }

    #[must_use]
    pub fn get(&self, vendor: &str) -> Option<&VendorProfile> {
        self.profiles.get(vendor)
    }

    #[must_use]
    pub fn contains(&self, vendor: &str) -> bool {
        self.profiles.contains_key(vendor)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &VendorProfile)> {
        self.profiles.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
