//! Configuration validation for multisource.
//!
//! [`Validatable`] is shared by the deployment config sections and by the
//! run parameters, so both report problems as a list of [`ConfigError`]s.

use super::types::{AppConfig, ColumnConfig, InputConfig, LimitsConfig, OutputConfig, VendorsConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.vendors.validate());
        errors.extend(self.columns.validate());
        errors.extend(self.input.validate());
        errors.extend(self.limits.validate());
        errors.extend(self.output.validate());

        for vendor in &self.vendors.active {
            if [&self.columns.id, &self.columns.title, &self.columns.weight].contains(&vendor) {
                errors.push(ConfigError::new(
                    "vendors.active",
                    format!("Vendor '{vendor}' collides with a fixed column name"),
                ));
            }
        }

        errors
    }
}

impl Validatable for VendorsConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.active.is_empty() {
            errors.push(ConfigError::new(
                "vendors.active",
                "At least one vendor must be active",
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for vendor in &self.active {
            if vendor.trim().is_empty() {
                errors.push(ConfigError::new("vendors.active", "Vendor names must not be empty"));
            } else if !seen.insert(vendor.as_str()) {
                errors.push(ConfigError::new(
                    "vendors.active",
                    format!("Vendor '{vendor}' is listed more than once"),
                ));
            }
        }

        if let Some(catalog) = &self.catalog {
            for (name, profile) in catalog.iter() {
                if profile.trust > 100 {
                    errors.push(ConfigError::new(
                        format!("vendors.catalog.{name}.trust"),
                        format!("Trust must be between 0 and 100, got {}", profile.trust),
                    ));
                }
                if !matches!(profile.returnability, 0 | 100) {
                    errors.push(ConfigError::new(
                        format!("vendors.catalog.{name}.returnability"),
                        format!(
                            "Returnability must be 0 or 100, got {}",
                            profile.returnability
                        ),
                    ));
                }
            }
        }

        errors
    }
}

impl Validatable for ColumnConfig {
    fn validate(&self) -> Vec<ConfigError> {
        [
            ("columns.id", &self.id),
            ("columns.title", &self.title),
            ("columns.weight", &self.weight),
        ]
        .into_iter()
        .filter(|(_, name)| name.trim().is_empty())
        .map(|(field, _)| ConfigError::new(field, "Column name must not be empty"))
        .collect()
    }
}

impl Validatable for InputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        match self.delimiter_byte() {
            None => errors.push(ConfigError::new(
                "input.delimiter",
                format!("Delimiter must be a single ASCII character, got '{}'", self.delimiter),
            )),
            Some(b'"' | b'\n' | b'\r') => errors.push(ConfigError::new(
                "input.delimiter",
                "Delimiter cannot be a quote or line break",
            )),
            Some(_) => {}
        }
        errors
    }
}

impl Validatable for LimitsConfig {
    fn validate(&self) -> Vec<ConfigError> {
        if self.max_orders == 0 {
            vec![ConfigError::new(
                "limits.max_orders",
                "Maximum number of orders must be at least 1",
            )]
        } else {
            Vec::new()
        }
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(parent) = self.file.as_ref().and_then(|f| f.parent()) {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                errors.push(ConfigError::new(
                    "output.file",
                    format!("Parent directory does not exist: {}", parent.display()),
                ));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{VendorCatalog, VendorProfile};
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_empty_vendor_list() {
        let config = AppConfig::builder().vendors(Vec::<String>::new()).build();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "vendors.active");
    }

    #[test]
    fn test_duplicate_vendor() {
        let config = AppConfig::builder().vendors(["Marcone", "Marcone"]).build();
        assert!(config
            .validate()
            .iter()
            .any(|e| e.message.contains("more than once")));
    }

    #[test]
    fn test_vendor_colliding_with_column() {
        let config = AppConfig::builder().vendors(["Installs"]).build();
        assert!(config
            .validate()
            .iter()
            .any(|e| e.message.contains("collides")));
    }

    #[test]
    fn test_catalog_ranges() {
        let catalog = VendorCatalog::from_profiles([("Acme", VendorProfile::new(120, 1, 50))]);
        let config = AppConfig::builder().catalog(catalog).build();
        let fields: Vec<_> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            ["vendors.catalog.Acme.trust", "vendors.catalog.Acme.returnability"]
        );
    }

    #[test]
    fn test_delimiter_validation() {
        assert!(!InputConfig { delimiter: '"' }.is_valid());
        assert!(!InputConfig { delimiter: 'é' }.is_valid());
        assert!(InputConfig { delimiter: '\t' }.is_valid());
    }

    #[test]
    fn test_zero_max_orders() {
        assert!(!LimitsConfig { max_orders: 0 }.is_valid());
    }

    #[test]
    fn test_output_file_parent_must_exist() {
        let output = OutputConfig {
            file: Some(PathBuf::from("/nonexistent/dir/report.json")),
            ..OutputConfig::default()
        };
        assert_eq!(output.validate().len(), 1);
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::new("weights.cost", "bad");
        assert_eq!(err.to_string(), "weights.cost: bad");
    }
}
