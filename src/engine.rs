//! Soil Quality Engine
//!
//! Stateless service object bundling a catalog and a threshold table behind
//! the four public scoring operations, plus a one-call `analyse` that runs
//! the whole pipeline for a reading.

use serde::Serialize;

use crate::catalog::{ParameterCatalog, ParameterKey};
use crate::explanation::{
    generate_recommendations, interpret_final_score, Interpretation, Recommendations,
    ThresholdTable,
};
use crate::reading::SoilReading;
use crate::scorer::{self, ParameterScores};
use crate::store::AnalysisRecord;

/// Everything the results view renders for one reading
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub reading: SoilReading,
    pub scores: ParameterScores,
    pub final_score: f64,
    pub interpretation: Interpretation,
    pub recommendations: Recommendations,
}

impl AnalysisReport {
    /// The part of the report that gets persisted
    pub fn to_record(&self) -> AnalysisRecord {
        AnalysisRecord {
            reading: self.reading.clone(),
            scores: self.scores.clone(),
            final_score: self.final_score,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SoilQualityEngine {
    catalog: ParameterCatalog,
    thresholds: ThresholdTable,
}

impl SoilQualityEngine {
    pub fn new(catalog: ParameterCatalog, thresholds: ThresholdTable) -> Self {
        Self { catalog, thresholds }
    }

    /// Built-in catalog and threshold table
    pub fn standard() -> Self {
        Self::default()
    }

    pub fn catalog(&self) -> &ParameterCatalog {
        &self.catalog
    }

    pub fn thresholds(&self) -> &ThresholdTable {
        &self.thresholds
    }

    pub fn score_parameter(&self, value: f64, key: &str) -> f64 {
        scorer::score_parameter_by_name(value, key, &self.catalog)
    }

    pub fn score_all_parameters(&self, reading: &SoilReading) -> ParameterScores {
        scorer::score_all_parameters(reading, &self.catalog)
    }

    pub fn final_score(&self, scores: &ParameterScores) -> f64 {
        scorer::final_score(scores)
    }

    pub fn generate_recommendations(&self, reading: &SoilReading, final_score: f64) -> Recommendations {
        generate_recommendations(reading, final_score, &self.thresholds)
    }

    /// Score, interpret and advise in one pass
    pub fn analyse(&self, reading: SoilReading) -> AnalysisReport {
        let scores = self.score_all_parameters(&reading);
        let final_score = self.final_score(&scores);
        let recommendations = self.generate_recommendations(&reading, final_score);

        tracing::debug!(
            "Analysis {}: {} parameters scored, final {:.1}%, {} recommendations",
            reading.metadata.analysis_id,
            scores.len(),
            final_score,
            recommendations.len()
        );

        AnalysisReport {
            interpretation: interpret_final_score(final_score),
            reading,
            scores,
            final_score,
            recommendations,
        }
    }

    /// Rebuild the full report from a persisted record.
    ///
    /// Recommendations are recomputed from the stored reading and the stored
    /// final score; stored scores are shown as-is.
    pub fn report_from_record(&self, record: AnalysisRecord) -> AnalysisReport {
        let recommendations = self.generate_recommendations(&record.reading, record.final_score);
        AnalysisReport {
            interpretation: interpret_final_score(record.final_score),
            recommendations,
            reading: record.reading,
            scores: record.scores,
            final_score: record.final_score,
        }
    }

    /// Catalog midpoints for every parameter, a reading that scores 100%
    pub fn reference_reading(&self, analyst_name: &str) -> SoilReading {
        ParameterKey::ALL
            .into_iter()
            .filter_map(|key| self.catalog.midpoint(key).map(|m| (key, m)))
            .fold(SoilReading::new(analyst_name), |r, (key, m)| r.with_value(key, m))
    }
}
