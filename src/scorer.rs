//! Soil Scorer - per-parameter scores and the aggregate final score
//!
//! All functions here are pure: they read the catalog, never mutate it, and
//! never fail. Includes both sequential and parallel (Rayon) batch scoring.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::{ParameterCatalog, ParameterKey};
use crate::reading::SoilReading;
use crate::utils::normalization::falloff_score;

/// Per-parameter scores in [0, 1], ordered by evaluation order.
///
/// Serializes as a JSON object keyed by stored parameter name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterScores(BTreeMap<ParameterKey, f64>);

impl ParameterScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: ParameterKey, score: f64) {
        self.0.insert(key, score);
    }

    pub fn get(&self, key: ParameterKey) -> Option<f64> {
        self.0.get(&key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParameterKey, f64)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ParameterKey, f64)> for ParameterScores {
    fn from_iter<I: IntoIterator<Item = (ParameterKey, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Display band for a single parameter score bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    Success,
    Warning,
    Danger,
}

impl ScoreBand {
    /// Band from a score in [0, 1]
    pub fn from_score(score: f64) -> Self {
        match score * 100.0 {
            p if p < 50.0 => ScoreBand::Danger,
            p if p < 75.0 => ScoreBand::Warning,
            _ => ScoreBand::Success,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ScoreBand::Success => "bg-success",
            ScoreBand::Warning => "bg-warning",
            ScoreBand::Danger => "bg-danger",
        }
    }
}

/// Score a single parameter against its catalog entry.
///
/// A parameter missing from the catalog is unscorable and scores 0.0.
pub fn score_parameter(value: f64, key: ParameterKey, catalog: &ParameterCatalog) -> f64 {
    match catalog.get(key) {
        Some(def) => falloff_score(value, def),
        None => {
            tracing::debug!("No catalog entry for '{}', scoring 0", key);
            0.0
        }
    }
}

/// Score a parameter by its stored name.
///
/// Unknown names score 0.0 rather than failing; note that a 0.0 pulls the
/// final score down if the caller includes it in the aggregate.
pub fn score_parameter_by_name(value: f64, key: &str, catalog: &ParameterCatalog) -> f64 {
    match ParameterKey::from_key(key) {
        Some(key) => score_parameter(value, key, catalog),
        None => {
            tracing::debug!("Unknown parameter '{}', scoring 0", key);
            0.0
        }
    }
}

/// Score every recognized parameter present in the reading.
///
/// Metadata and unrecognized keys are skipped by name.
pub fn score_all_parameters(reading: &SoilReading, catalog: &ParameterCatalog) -> ParameterScores {
    reading
        .parameters()
        .map(|(key, value)| (key, score_parameter(value, key, catalog)))
        .collect()
}

/// Unweighted mean of the scores as a percentage.
///
/// An empty score map yields 0.0.
pub fn final_score(scores: &ParameterScores) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }

    let total: f64 = scores.iter().map(|(_, s)| s).sum();
    100.0 * total / scores.len() as f64
}

/// Score a batch of readings in parallel.
///
/// Output order matches input order.
pub fn score_batch(
    readings: &[SoilReading],
    catalog: &ParameterCatalog,
) -> Vec<(ParameterScores, f64)> {
    readings
        .par_iter()
        .map(|reading| {
            let scores = score_all_parameters(reading, catalog);
            let final_pct = final_score(&scores);
            (scores, final_pct)
        })
        .collect()
}
