//! Configuration file loading and discovery.
//!
//! A deployment places `multisource.yaml` next to its data or in the user
//! config directory. Scoring runs only ever read it.

use super::types::AppConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    "multisource.yaml",
    "multisource.yml",
    ".multisource.yaml",
    ".multisource.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. User config directory (`~/.config/multisource/`)
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    user_config_dir().and_then(|dir| find_config_in_dir(&dir))
}

/// Directories searched after an explicit path, in order.
#[must_use]
pub fn search_paths() -> Vec<PathBuf> {
    [std::env::current_dir().ok(), user_config_dir()]
        .into_iter()
        .flatten()
        .collect()
}

fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("multisource"))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
///
/// An explicit path that cannot be loaded is reported as an error; a
/// discovered file that fails to parse is logged and ignored.
pub fn load_or_default(
    explicit_path: Option<&Path>,
) -> Result<(AppConfig, Option<PathBuf>), ConfigFileError> {
    if let Some(path) = explicit_path {
        return load_config_file(path).map(|config| (config, Some(path.to_path_buf())));
    }

    Ok(discover_config_file(None).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => {
                tracing::debug!("Loaded config from {}", path.display());
                (config, Some(path))
            }
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    ))
}

// ============================================================================
// Configuration Merging
// ============================================================================

/// CLI-level overrides layered over the file config.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub vendors: Option<Vec<String>>,
    pub max_orders: Option<usize>,
    pub delimiter: Option<char>,
    pub id_column: Option<String>,
    pub title_column: Option<String>,
    pub weight_column: Option<String>,
    pub format: Option<crate::reports::ReportFormat>,
    pub output_file: Option<PathBuf>,
    pub no_color: bool,
    pub breakdown: bool,
}

impl AppConfig {
    /// Apply CLI overrides; only values that were actually given replace file settings.
    pub fn merge(&mut self, overrides: &ConfigOverrides) {
        if let Some(vendors) = &overrides.vendors {
            self.vendors.active.clone_from(vendors);
        }
        if let Some(max) = overrides.max_orders {
            self.limits.max_orders = max;
        }
        if let Some(delimiter) = overrides.delimiter {
            self.input.delimiter = delimiter;
        }
        if let Some(id) = &overrides.id_column {
            self.columns.id.clone_from(id);
        }
        if let Some(title) = &overrides.title_column {
            self.columns.title.clone_from(title);
        }
        if let Some(weight) = &overrides.weight_column {
            self.columns.weight.clone_from(weight);
        }
        if let Some(format) = overrides.format {
            self.output.format = format;
        }
        if overrides.output_file.is_some() {
            self.output.file.clone_from(&overrides.output_file);
        }
        if overrides.no_color {
            self.output.no_color = true;
        }
        if overrides.breakdown {
            self.output.breakdown = true;
        }
    }

    /// Load from file and merge with CLI overrides.
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<(Self, Option<PathBuf>), ConfigFileError> {
        let (mut config, loaded_from) = load_or_default(config_path)?;
        config.merge(overrides);
        Ok((config, loaded_from))
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file from the defaults.
#[must_use]
pub fn generate_example_config() -> String {
    format!(
        "# Multisource Configuration\n# Place this file at multisource.yaml or ~/.config/multisource/\n\n{}",
        serde_yaml::to_string(&AppConfig::default()).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# Multisource Configuration File
# =============================
#
# Deployment settings for the multisourcing decision engine. Place it at:
#   - multisource.yaml in the working directory
#   - ~/.config/multisource/multisource.yaml for global config
#
# Run parameters (orders, seed, weights, shipping scale) are always given on
# the command line. CLI flags override the settings below.

# Vendors scored on every order, and their static profiles
vendors:
  active:
    - Encompass
    - Marcone
    - Reliable
  # Omit `catalog` to use the built-in profiles.
  # shipping_tier: 0 = same day, 1 = 1 day, 2 = 2 days, 3 = 3 days, 4+ = 4 days+
  # catalog:
  #   Encompass: { trust: 10, shipping_tier: 3, returnability: 100 }
  #   Marcone:   { trust: 10, shipping_tier: 3, returnability: 100 }
  #   Reliable:  { trust: 5,  shipping_tier: 4, returnability: 0 }

# Column names in the uploaded table
columns:
  id: Part Number
  title: Title
  weight: Installs

# Upload format
input:
  delimiter: ';'

# Run limits
limits:
  max_orders: 2000

# Output defaults
output:
  # Format: auto, tui, table, summary, json, csv
  format: auto
  # file: scores.json
  no_color: false
  # Per-vendor sub-scores under the table output
  breakdown: false
"
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::ReportFormat;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("multisource.yaml");
        std::fs::write(&config_path, "limits:\n  max_orders: 10\n").unwrap();

        assert_eq!(find_config_in_dir(tmp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        let yaml = r"
vendors:
  active: [Amazon, Marcone]
  catalog:
    Amazon: { trust: 90, shipping_tier: 1, returnability: 100 }
limits:
  max_orders: 25
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.vendors.active, ["Amazon", "Marcone"]);
        assert_eq!(config.catalog().get("Amazon").map(|p| p.trust), Some(90));
        assert!(!config.catalog().contains("Marcone"));
        assert_eq!(config.limits.max_orders, 25);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/multisource.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let result = load_or_default(Some(Path::new("/nonexistent/multisource.yaml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_yaml() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("multisource.yaml");
        std::fs::write(&config_path, "limits: [unclosed").unwrap();
        assert!(matches!(
            load_config_file(&config_path),
            Err(ConfigFileError::Parse(_))
        ));
    }

    #[test]
    fn test_config_merge() {
        let mut config = AppConfig::default();
        config.merge(&ConfigOverrides {
            vendors: Some(vec!["Amazon".to_string()]),
            max_orders: Some(5),
            format: Some(ReportFormat::Csv),
            no_color: true,
            breakdown: true,
            ..ConfigOverrides::default()
        });

        assert_eq!(config.vendors.active, ["Amazon"]);
        assert_eq!(config.limits.max_orders, 5);
        assert_eq!(config.output.format, ReportFormat::Csv);
        assert!(config.output.no_color);
        assert!(config.output.breakdown);
        assert_eq!(config.columns.id, "Part Number");
    }

    #[test]
    fn test_full_example_config_parses() {
        let config: AppConfig = serde_yaml::from_str(&generate_full_example_config()).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_generate_example_config() {
        let example = generate_example_config();
        assert!(example.contains("vendors:"));
        assert!(example.contains("max_orders"));
    }
}
