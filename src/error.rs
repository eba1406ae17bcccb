//! Error types for market construction.
//!
//! Only invalid configuration is an error. A full university rejecting an
//! enrollment and a student ending a round without offers are ordinary
//! outcomes and are reported through return values, never through
//! [`MarketError`].

use thiserror::Error;

/// Result type for fallible market operations.
pub type Result<T> = std::result::Result<T, MarketError>;

/// Errors raised while building students, universities, policies or markets.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarketError {
    /// A parameter is outside its admissible range.
    ///
    /// Raised at construction time; values are never silently clamped.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfiguration {
        /// Name of the offending parameter.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// An entity was registered at an index that does not match its id.
    #[error("registry mismatch: {entity} with id {id} registered at index {index}")]
    RegistryMismatch {
        /// `"student"` or `"university"`.
        entity: &'static str,
        /// The id carried by the entity.
        id: usize,
        /// Its position in the registry.
        index: usize,
    },
}

impl MarketError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        MarketError::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}

/// Fails unless `value` is finite and within `[lo, hi]`.
pub(crate) fn ensure_in_range(field: &'static str, value: f64, lo: f64, hi: f64) -> Result<()> {
    if !value.is_finite() || value < lo || value > hi {
        return Err(MarketError::invalid(
            field,
            format!("must lie in [{lo}, {hi}], got {value}"),
        ));
    }
    Ok(())
}

/// Fails unless `value` is finite and non-negative.
pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(MarketError::invalid(
            field,
            format!("must be finite and non-negative, got {value}"),
        ));
    }
    Ok(())
}
