//! Unified error types for multisource.
//!
//! The hierarchy mirrors the processing stages: parsing the upload,
//! validating run parameters against the table, and scoring. Validation
//! failures are aggregated so a caller sees every problem at once.

use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for multisource operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EngineError {
    /// Errors while reading or normalizing the parts table
    #[error("Failed to parse parts table: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// One or more run parameters or table columns are invalid
    #[error("{0}")]
    Validation(ValidationFailure),

    /// Errors during score computation
    #[error("Scoring failed: {context}")]
    Scoring {
        context: String,
        #[source]
        source: ScoringErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Malformed delimited text: {0}")]
    Delimited(String),

    #[error("Table has a header row but no data rows")]
    EmptyTable,

    #[error("Column '{0}' appears more than once in the header row")]
    DuplicateColumn(String),

    #[error("Invalid currency value '{value}' in column '{column}' at row {row}")]
    InvalidCurrency {
        column: String,
        row: usize,
        value: String,
    },
}

/// Specific scoring error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ScoringErrorKind {
    #[error("Price for vendor '{vendor}' on part '{part}' must be positive, got {price}")]
    NonPositivePrice {
        part: String,
        vendor: String,
        price: f64,
    },

    #[error("Weighted sampling failed: {0}")]
    Sampling(String),
}

/// Aggregated validation failure.
///
/// Carries every issue found so the caller can report them together
/// instead of stopping at the first one.
#[derive(Debug, Clone, Default)]
pub struct ValidationFailure {
    pub issues: Vec<ConfigError>,
}

impl ValidationFailure {
    #[must_use]
    pub const fn new(issues: Vec<ConfigError>) -> Self {
        Self { issues }
    }

    /// Whether any issue concerns the given field (e.g. `"weights.cost"`).
    #[must_use]
    pub fn mentions(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Please provide valid inputs for all parameters ({} problem{}):",
            self.issues.len(),
            if self.issues.len() == 1 { "" } else { "s" }
        )?;
        for issue in &self.issues {
            write!(f, "\n  - {issue}")?;
        }
        Ok(())
    }
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for multisource operations
pub type Result<T> = std::result::Result<T, EngineError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl EngineError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a parse error for an unparseable currency cell
    pub fn invalid_currency(
        column: impl Into<String>,
        row: usize,
        value: impl Into<String>,
    ) -> Self {
        Self::parse(
            "normalizing vendor prices",
            ParseErrorKind::InvalidCurrency {
                column: column.into(),
                row,
                value: value.into(),
            },
        )
    }

    /// Create a scoring error with context
    pub fn scoring(context: impl Into<String>, source: ScoringErrorKind) -> Self {
        Self::Scoring {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error from collected issues
    pub const fn validation(issues: Vec<ConfigError>) -> Self {
        Self::Validation(ValidationFailure::new(issues))
    }

    /// The aggregated validation failure, if this is one.
    #[must_use]
    pub const fn as_validation(&self) -> Option<&ValidationFailure> {
        match self {
            Self::Validation(failure) => Some(failure),
            _ => None,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<csv::Error> for EngineError {
    fn from(err: csv::Error) -> Self {
        Self::parse(
            "reading delimited text",
            ParseErrorKind::Delimited(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is prepended to the error's existing context,
/// building a chain such as `"loading parts.csv: normalizing vendor prices"`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<EngineError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
///
/// Validation failures are left as-is: their message is user-facing.
fn add_context_to_error(err: EngineError, new_ctx: &str) -> EngineError {
    match err {
        EngineError::Parse {
            context: existing,
            source,
        } => EngineError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        EngineError::Scoring {
            context: existing,
            source,
        } => EngineError::Scoring {
            context: chain_context(new_ctx, &existing),
            source,
        },
        EngineError::Io {
            path,
            message,
            source,
        } => EngineError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        validation @ EngineError::Validation(_) => validation,
    }
}

/// Chain two context strings together.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
