//! Soil Reading
//!
//! A submitted analysis: raw parameter values plus metadata that is never
//! scored. The JSON form keeps values and metadata side by side in one flat
//! object, which is how completed analyses are persisted.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::ParameterKey;
use crate::error::SoilError;

pub const DEFAULT_ANALYST_NAME: &str = "Utilisateur";

/// Metadata keys stored alongside the values
pub const METADATA_KEYS: [&str; 3] = ["dateAnalyse", "idAnalyse", "nomUtilisateur"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    #[serde(rename = "dateAnalyse")]
    pub analysed_at: DateTime<Utc>,
    #[serde(rename = "idAnalyse")]
    pub analysis_id: String,
    #[serde(rename = "nomUtilisateur")]
    pub analyst_name: String,
}

impl AnalysisMetadata {
    pub fn new(analyst_name: &str) -> Self {
        let analysed_at = Utc::now();
        Self {
            analysis_id: generate_analysis_id(analysed_at),
            analysed_at,
            analyst_name: analyst_name.to_string(),
        }
    }
}

/// Analysis identifier: `analyse_<unix millis>_<9 base36 chars>`
pub fn generate_analysis_id(at: DateTime<Utc>) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    let mut rng = rand::thread_rng();
    let suffix: String = (0..9)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();

    format!("analyse_{}_{}", at.timestamp_millis(), suffix)
}

/// Raw readings keyed by stored parameter name.
///
/// Values are kept by name rather than by `ParameterKey` so that records
/// carrying extra or unknown fields survive a round-trip through the store;
/// scoring filters them against the parameter allow-list.
///
/// Non-finite values serialize as JSON `null` and read back as NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredReading")]
pub struct SoilReading {
    #[serde(flatten)]
    pub metadata: AnalysisMetadata,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

/// Wire form of `SoilReading` accepting `null` values
#[derive(Deserialize)]
struct StoredReading {
    #[serde(flatten)]
    metadata: AnalysisMetadata,
    #[serde(flatten)]
    values: BTreeMap<String, Option<f64>>,
}

impl From<StoredReading> for SoilReading {
    fn from(stored: StoredReading) -> Self {
        Self {
            metadata: stored.metadata,
            values: stored
                .values
                .into_iter()
                .map(|(key, value)| (key, value.unwrap_or(f64::NAN)))
                .collect(),
        }
    }
}

impl SoilReading {
    pub fn new(analyst_name: &str) -> Self {
        Self {
            metadata: AnalysisMetadata::new(analyst_name),
            values: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, key: ParameterKey, value: f64) -> Self {
        self.values.insert(key.as_str().to_string(), value);
        self
    }

    /// Build a reading from values in evaluation order
    /// (ph, humidite, temperature, azote, phosphore, potassium)
    pub fn from_values(values: [f64; 6], analyst_name: &str) -> Self {
        ParameterKey::ALL
            .into_iter()
            .zip(values)
            .fold(Self::new(analyst_name), |reading, (key, value)| {
                reading.with_value(key, value)
            })
    }

    /// Like `from_values` but from a slice, e.g. parsed command-line arguments
    pub fn from_slice(values: &[f64], analyst_name: &str) -> Result<Self, SoilError> {
        let values: [f64; 6] = values.try_into().map_err(|_| SoilError::WrongValueCount {
            expected: ParameterKey::ALL.len(),
            actual: values.len(),
        })?;
        Ok(Self::from_values(values, analyst_name))
    }

    /// Value of a parameter, `None` if absent
    pub fn get(&self, key: ParameterKey) -> Option<f64> {
        self.values.get(key.as_str()).copied()
    }

    /// Value for rule evaluation; absent parameters read as NaN so that
    /// every threshold comparison on them is false
    pub fn value_or_nan(&self, key: ParameterKey) -> f64 {
        self.get(key).unwrap_or(f64::NAN)
    }

    /// Recognized parameters present in the reading, in evaluation order
    pub fn parameters(&self) -> impl Iterator<Item = (ParameterKey, f64)> + '_ {
        ParameterKey::ALL
            .into_iter()
            .filter_map(move |key| self.get(key).map(|v| (key, v)))
    }
}
