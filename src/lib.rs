//! Soil Scorer Rust Implementation
//!
//! Scores a soil analysis (pH, humidity, temperature, nitrogen, phosphorus,
//! potassium) against optimal ranges and produces advisory text.
//!
//! - `catalog`: optimal and absolute ranges per parameter
//! - `scorer`: per-parameter falloff scores and the final percentage
//! - `explanation/`: score interpretation and threshold-based recommendations
//! - `store`: persisting an analysis between scoring and display
//! - `engine`: stateless service bundling the above

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod explanation;
pub mod reading;
pub mod scorer;
pub mod store;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use catalog::{ParameterCatalog, ParameterDefinition, ParameterKey};
pub use engine::{AnalysisReport, SoilQualityEngine};
pub use error::{SoilError, ValidationError};
pub use explanation::{generate_recommendations, Recommendations, ThresholdTable};
pub use reading::SoilReading;
pub use scorer::{final_score, score_all_parameters, score_parameter, ParameterScores};
pub use store::{AnalysisRecord, JsonFileStore, KeyValueStore, MemoryStore};
