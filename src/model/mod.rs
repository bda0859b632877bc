//! Data model shared by the normalizer, the scoring engine and the reporters.
//!
//! - [`PartsTable`] / [`PartRow`] / [`Cell`]: the uploaded table, column order preserved
//! - [`VendorCatalog`] / [`VendorProfile`]: static per-vendor attributes

mod table;
mod vendor;

pub use table::*;
pub use vendor::*;
