//! Parameter Catalog
//!
//! Optimal and absolute ranges for the six measured soil parameters.
//! The catalog is built once and shared read-only by the scorer, the
//! validator and the engine.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::SoilError;

/// One of the six scored soil parameters.
///
/// Variant order is the evaluation order used everywhere output is ordered
/// (scores, recommendations, reports).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKey {
    Ph,
    Humidite,
    Temperature,
    Azote,
    Phosphore,
    Potassium,
}

impl ParameterKey {
    pub const ALL: [ParameterKey; 6] = [
        ParameterKey::Ph,
        ParameterKey::Humidite,
        ParameterKey::Temperature,
        ParameterKey::Azote,
        ParameterKey::Phosphore,
        ParameterKey::Potassium,
    ];

    /// Key as stored in readings and persisted records
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterKey::Ph => "ph",
            ParameterKey::Humidite => "humidite",
            ParameterKey::Temperature => "temperature",
            ParameterKey::Azote => "azote",
            ParameterKey::Phosphore => "phosphore",
            ParameterKey::Potassium => "potassium",
        }
    }

    /// Human-readable name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            ParameterKey::Ph => "pH",
            ParameterKey::Humidite => "Humidité",
            ParameterKey::Temperature => "Température",
            ParameterKey::Azote => "Azote",
            ParameterKey::Phosphore => "Phosphore",
            ParameterKey::Potassium => "Potassium",
        }
    }

    /// Allow-list lookup; anything else (metadata keys included) is `None`
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }
}

impl fmt::Display for ParameterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterKey {
    type Err = SoilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| SoilError::UnknownParameter(s.to_string()))
    }
}

/// Agronomic weight of a parameter, carried for display only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    High,
    Medium,
}

/// Ranges and metadata for a single parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDefinition {
    pub optimal_min: f64,
    pub optimal_max: f64,
    pub minimum_possible: f64,
    pub maximum_possible: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_importance")]
    pub importance: Importance,
}

fn default_importance() -> Importance {
    Importance::Medium
}

impl ParameterDefinition {
    fn new(
        optimal: (f64, f64),
        possible: (f64, f64),
        unit: &str,
        description: &str,
        importance: Importance,
    ) -> Self {
        Self {
            optimal_min: optimal.0,
            optimal_max: optimal.1,
            minimum_possible: possible.0,
            maximum_possible: possible.1,
            unit: unit.to_string(),
            description: description.to_string(),
            importance,
        }
    }

    /// Centre of the optimal band
    pub fn midpoint(&self) -> f64 {
        (self.optimal_min + self.optimal_max) / 2.0
    }

    pub fn is_optimal(&self, value: f64) -> bool {
        value >= self.optimal_min && value <= self.optimal_max
    }

    pub fn is_possible(&self, value: f64) -> bool {
        value >= self.minimum_possible && value <= self.maximum_possible
    }

    /// Check range ordering: min_possible <= opt_min < opt_max <= max_possible
    fn check(&self, key: &str) -> Result<(), SoilError> {
        let ordered = self.optimal_min < self.optimal_max
            && self.minimum_possible <= self.optimal_min
            && self.optimal_max <= self.maximum_possible;

        if ordered {
            Ok(())
        } else {
            Err(SoilError::InvalidCatalogEntry {
                key: key.to_string(),
                reason: format!(
                    "expected {} <= {} < {} <= {}",
                    self.minimum_possible, self.optimal_min, self.optimal_max, self.maximum_possible
                ),
            })
        }
    }
}

/// Catalog of parameter definitions keyed by parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterCatalog {
    definitions: BTreeMap<ParameterKey, ParameterDefinition>,
}

impl Default for ParameterCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl ParameterCatalog {
    /// The built-in catalog used by the analysis form
    pub fn standard() -> Self {
        use Importance::*;

        let definitions = BTreeMap::from([
            (
                ParameterKey::Ph,
                ParameterDefinition::new(
                    (6.2, 7.2),
                    (3.0, 10.0),
                    "",
                    "Mesure l'acidité ou l'alcalinité du sol",
                    High,
                ),
            ),
            (
                ParameterKey::Humidite,
                ParameterDefinition::new((30.0, 60.0), (0.0, 100.0), "%", "Teneur en eau du sol", High),
            ),
            (
                ParameterKey::Temperature,
                ParameterDefinition::new((15.0, 30.0), (-10.0, 60.0), "°C", "Température du sol", Medium),
            ),
            (
                ParameterKey::Azote,
                ParameterDefinition::new(
                    (20.0, 50.0),
                    (0.0, 200.0),
                    "mg/kg",
                    "Élément essentiel pour la croissance des plantes",
                    High,
                ),
            ),
            (
                ParameterKey::Phosphore,
                ParameterDefinition::new(
                    (30.0, 50.0),
                    (0.0, 150.0),
                    "mg/kg",
                    "Important pour le développement racinaire",
                    High,
                ),
            ),
            (
                ParameterKey::Potassium,
                ParameterDefinition::new(
                    (120.0, 200.0),
                    (0.0, 600.0),
                    "mg/kg",
                    "Améliore la résistance aux maladies",
                    Medium,
                ),
            ),
        ]);

        Self { definitions }
    }

    /// Build a catalog from explicit entries without validating them.
    ///
    /// Degenerate entries (zero-width falloff) are accepted here; the scorer
    /// treats them as unscorable outside the optimal band.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = (ParameterKey, ParameterDefinition)>,
    ) -> Self {
        Self {
            definitions: definitions.into_iter().collect(),
        }
    }

    /// Parse and validate a catalog from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: ParameterCatalog =
            serde_json::from_str(json).with_context(|| "Failed to parse parameter catalog JSON")?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load catalog from JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {:?}", path))?;

        Self::from_json(&contents).with_context(|| format!("Invalid catalog file: {:?}", path))
    }

    /// Verify range ordering of every entry
    pub fn validate(&self) -> Result<(), SoilError> {
        self.definitions
            .iter()
            .try_for_each(|(key, def)| def.check(key.as_str()))
    }

    pub fn get(&self, key: ParameterKey) -> Option<&ParameterDefinition> {
        self.definitions.get(&key)
    }

    /// Lookup by stored key name
    pub fn lookup(&self, key: &str) -> Option<&ParameterDefinition> {
        ParameterKey::from_key(key).and_then(|k| self.get(k))
    }

    pub fn midpoint(&self, key: ParameterKey) -> Option<f64> {
        self.get(key).map(ParameterDefinition::midpoint)
    }

    /// Entries in evaluation order
    pub fn iter(&self) -> impl Iterator<Item = (ParameterKey, &ParameterDefinition)> {
        self.definitions.iter().map(|(k, d)| (*k, d))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_is_valid() {
        let catalog = ParameterCatalog::standard();
        assert_eq!(catalog.len(), 6);
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_key_round_trip_and_allow_list() {
        for key in ParameterKey::ALL {
            assert_eq!(ParameterKey::from_key(key.as_str()), Some(key));
        }
        assert_eq!(ParameterKey::from_key("dateAnalyse"), None);
        assert_eq!(ParameterKey::from_key("PH"), None);
        assert!("nomUtilisateur".parse::<ParameterKey>().is_err());
    }

    #[test]
    fn test_ph_entry() {
        let catalog = ParameterCatalog::standard();
        let ph = catalog.lookup("ph").unwrap();
        assert_eq!(ph.optimal_min, 6.2);
        assert_eq!(ph.optimal_max, 7.2);
        assert_eq!(ph.minimum_possible, 3.0);
        assert_eq!(ph.maximum_possible, 10.0);
        assert_eq!(ph.importance, Importance::High);
        assert!((ph.midpoint() - 6.7).abs() < 1e-9);
    }

    #[test]
    fn test_from_json_rejects_inverted_band() {
        let json = r#"{
            "ph": { "optimal_min": 7.2, "optimal_max": 6.2,
                    "minimum_possible": 3.0, "maximum_possible": 10.0 }
        }"#;
        assert!(ParameterCatalog::from_json(json).is_err());
    }

    #[test]
    fn test_from_json_partial_catalog() {
        let json = r#"{
            "azote": { "optimal_min": 25.0, "optimal_max": 45.0,
                       "minimum_possible": 0.0, "maximum_possible": 100.0,
                       "unit": "mg/kg" }
        }"#;
        let catalog = ParameterCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get(ParameterKey::Ph).is_none());
        assert_eq!(catalog.get(ParameterKey::Azote).unwrap().importance, Importance::Medium);
    }
}
