//! Configuration module for multisource.
//!
//! This module provides the deployment configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use multisource::config::{AppConfig, load_or_default};
//!
//! let config = AppConfig::builder()
//!     .vendors(["Encompass", "Marcone"])
//!     .max_orders(500)
//!     .build();
//!
//! let (config, loaded_from) = load_or_default(None)?;
//! ```
//!
//! # Configuration File
//!
//! ```yaml
//! vendors:
//!   active: [Encompass, Marcone, Reliable]
//! limits:
//!   max_orders: 2000
//! ```

pub mod file;
mod types;
mod validation;

pub use types::{
    AppConfig, AppConfigBuilder, ColumnConfig, InputConfig, LimitsConfig, OutputConfig,
    PreviewConfig, ScoreConfig, VendorsConfig, DEFAULT_MAX_ORDERS,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config,
    load_config_file, load_or_default, search_paths, ConfigFileError, ConfigOverrides,
    CONFIG_FILE_NAMES,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_lists_sections() {
        let schema = generate_json_schema();
        for section in ["vendors", "columns", "input", "limits", "output"] {
            assert!(schema.contains(section), "schema missing {section}");
        }
    }
}
