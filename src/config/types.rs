//! Configuration types for multisource.
//!
//! [`AppConfig`] holds deployment settings (vendor catalog, column names,
//! limits, output defaults). Run parameters such as weights and the seed
//! are never stored here; they arrive with each invocation.

use crate::model::{VendorCatalog, DEFAULT_VENDORS};
use crate::reports::ReportFormat;
use crate::scoring::RawParameters;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default configured maximum of simulated orders per run.
pub const DEFAULT_MAX_ORDERS: usize = 2000;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Top-level deployment configuration, loaded from a YAML file or defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Active vendors and their static profiles
    pub vendors: VendorsConfig,
    /// Column names in the uploaded table
    pub columns: ColumnConfig,
    /// Upload format
    pub input: InputConfig,
    /// Run limits
    pub limits: LimitsConfig,
    /// Output defaults
    pub output: OutputConfig,
}

impl AppConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// The catalog in effect: the configured one, or the built-in table.
    #[must_use]
    pub fn catalog(&self) -> &VendorCatalog {
        self.vendors
            .catalog
            .as_ref()
            .unwrap_or_else(|| VendorCatalog::builtin())
    }
}

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the active vendor list.
    pub fn vendors<I, S>(mut self, vendors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.vendors.active = vendors.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the built-in vendor catalog.
    pub fn catalog(mut self, catalog: VendorCatalog) -> Self {
        self.config.vendors.catalog = Some(catalog);
        self
    }

    /// Set the configured maximum number of orders.
    pub const fn max_orders(mut self, max_orders: usize) -> Self {
        self.config.limits.max_orders = max_orders;
        self
    }

    /// Set the upload delimiter.
    pub const fn delimiter(mut self, delimiter: char) -> Self {
        self.config.input.delimiter = delimiter;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Sections
// ============================================================================

/// Which vendors are scored, and their static attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct VendorsConfig {
    /// Vendors scored on every order, in report order
    pub active: Vec<String>,
    /// Vendor profiles; omit to use the built-in catalog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<VendorCatalog>,
}

impl Default for VendorsConfig {
    fn default() -> Self {
        Self {
            active: DEFAULT_VENDORS.iter().map(ToString::to_string).collect(),
            catalog: None,
        }
    }
}

/// Names of the fixed columns in the upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ColumnConfig {
    /// Part identifier column
    pub id: String,
    /// Part title column
    pub title: String,
    /// Popularity weight column used for sampling
    pub weight: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            id: "Part Number".to_string(),
            title: "Title".to_string(),
            weight: "Installs".to_string(),
        }
    }
}

/// Upload format settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct InputConfig {
    /// Field delimiter (single ASCII character)
    pub delimiter: char,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { delimiter: ';' }
    }
}

impl InputConfig {
    /// Delimiter as a byte, if it is ASCII.
    #[must_use]
    pub fn delimiter_byte(&self) -> Option<u8> {
        u8::try_from(self.delimiter).ok().filter(u8::is_ascii)
    }
}

/// Limits applied to every run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum number of simulated orders per run
    pub max_orders: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_orders: DEFAULT_MAX_ORDERS,
        }
    }
}

/// Output defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Report format
    pub format: ReportFormat,
    /// Output file path (stdout when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
    /// Append per-vendor sub-scores to table output
    pub breakdown: bool,
}

// ============================================================================
// Command configurations
// ============================================================================

/// Everything a `score` run needs.
#[derive(Debug, Clone)]
pub struct ScoreConfig {
    /// Uploaded parts file
    pub input: PathBuf,
    /// Run parameters exactly as supplied
    pub parameters: RawParameters,
    /// Deployment settings, merged with CLI overrides
    pub app: AppConfig,
    /// Suppress progress logging
    pub quiet: bool,
}

/// Everything a `preview` run needs.
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    /// Uploaded parts file
    pub input: PathBuf,
    /// Number of rows to show
    pub rows: usize,
    pub app: AppConfig,
}
