//! Error types for soil scoring
//!
//! Scoring itself is total and never fails; these errors come from catalog
//! loading, parameter parsing and input validation.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SoilError {
    #[error("Unknown soil parameter: '{0}'")]
    UnknownParameter(String),

    #[error("Invalid catalog entry for '{key}': {reason}")]
    InvalidCatalogEntry { key: String, reason: String },

    #[error("Expected {expected} parameter values, got {actual}")]
    WrongValueCount { expected: usize, actual: usize },
}

/// Rejection of a single form value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{key}: Veuillez entrer un nombre valide")]
    NotANumber { key: String },

    #[error("{key}: La valeur doit être entre {min} et {max}")]
    OutOfRange { key: String, min: f64, max: f64 },

    #[error("{key}: Valeur de paramètre invalide")]
    UnknownParameter { key: String },
}
