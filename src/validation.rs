//! Input Validation
//!
//! Checks form values before they become a reading. Scoring never depends on
//! this passing; it is the caller's gate for rejecting obviously bad input.

use serde::{Deserialize, Serialize};

use crate::catalog::{ParameterCatalog, ParameterKey};
use crate::error::ValidationError;
use crate::reading::SoilReading;

/// Where an accepted value sits relative to the optimal band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RangeStatus {
    Optimal,
    OutsideOptimal { min: f64, max: f64 },
}

impl RangeStatus {
    /// Feedback line shown next to the field
    pub fn message(&self) -> String {
        match self {
            RangeStatus::Optimal => "Valeur optimale".to_string(),
            RangeStatus::OutsideOptimal { min, max } => {
                format!("Valeur hors plage optimale ({}-{})", min, max)
            }
        }
    }
}

/// Validate a single value for the named parameter
pub fn validate_parameter(
    key: &str,
    value: f64,
    catalog: &ParameterCatalog,
) -> Result<RangeStatus, ValidationError> {
    let def = catalog
        .lookup(key)
        .ok_or_else(|| ValidationError::UnknownParameter { key: key.to_string() })?;

    if !value.is_finite() {
        return Err(ValidationError::NotANumber { key: key.to_string() });
    }

    if !def.is_possible(value) {
        return Err(ValidationError::OutOfRange {
            key: key.to_string(),
            min: def.minimum_possible,
            max: def.maximum_possible,
        });
    }

    if def.is_optimal(value) {
        Ok(RangeStatus::Optimal)
    } else {
        Ok(RangeStatus::OutsideOptimal {
            min: def.optimal_min,
            max: def.optimal_max,
        })
    }
}

/// Parse and validate a raw form field
pub fn validate_field(
    key: &str,
    raw: &str,
    catalog: &ParameterCatalog,
) -> Result<(f64, RangeStatus), ValidationError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::NotANumber { key: key.to_string() })?;

    validate_parameter(key, value, catalog).map(|status| (value, status))
}

/// Validate every parameter of a reading, collecting all failures.
///
/// A parameter the reading lacks is reported as not a number, matching an
/// empty form field.
pub fn validate_reading(
    reading: &SoilReading,
    catalog: &ParameterCatalog,
) -> Result<Vec<(ParameterKey, RangeStatus)>, Vec<ValidationError>> {
    let (accepted, errors): (Vec<_>, Vec<_>) = ParameterKey::ALL
        .into_iter()
        .map(|key| {
            validate_parameter(key.as_str(), reading.value_or_nan(key), catalog)
                .map(|status| (key, status))
        })
        .partition(Result::is_ok);

    if errors.is_empty() {
        Ok(accepted.into_iter().filter_map(Result::ok).collect())
    } else {
        Err(errors.into_iter().filter_map(Result::err).collect())
    }
}
