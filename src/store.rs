//! Analysis Store
//!
//! Persists a completed analysis between the scoring step and the results
//! view. The store itself is an opaque string key/value map; this module owns
//! only the three keys an analysis occupies and their JSON encoding.

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::reading::SoilReading;
use crate::scorer::ParameterScores;

pub const READING_KEY: &str = "donneesAnalyseSol";
pub const SCORES_KEY: &str = "scoresParametres";
pub const FINAL_SCORE_KEY: &str = "scoreFinalAnalyse";

/// String key/value storage, caller serializes
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-process store, lost on drop
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object on disk, rewritten on every change
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store, starting empty if the file does not exist yet
    pub fn open(path: &Path) -> Result<Self> {
        let entries = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read store file: {:?}", path))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse store file: {:?}", path))?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let contents = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write store file: {:?}", self.path))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// The persisted (reading, scores, final score) triple
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub reading: SoilReading,
    pub scores: ParameterScores,
    pub final_score: f64,
}

/// Write an analysis under its three keys
pub fn save_analysis(store: &mut impl KeyValueStore, record: &AnalysisRecord) -> Result<()> {
    store.set(READING_KEY, serde_json::to_string(&record.reading)?)?;
    store.set(SCORES_KEY, serde_json::to_string(&record.scores)?)?;
    store.set(FINAL_SCORE_KEY, record.final_score.to_string())?;

    tracing::info!(
        "Saved analysis {} (score {:.1}%)",
        record.reading.metadata.analysis_id,
        record.final_score
    );
    Ok(())
}

/// Read back the last analysis.
///
/// Returns `Ok(None)` when any of the three keys is missing, which callers
/// show as "no data". Present but unparsable entries are an error.
pub fn load_analysis(store: &impl KeyValueStore) -> Result<Option<AnalysisRecord>> {
    let (Some(reading), Some(scores), Some(final_score)) = (
        store.get(READING_KEY),
        store.get(SCORES_KEY),
        store.get(FINAL_SCORE_KEY),
    ) else {
        tracing::debug!("No complete analysis in store");
        return Ok(None);
    };

    let reading: SoilReading =
        serde_json::from_str(&reading).with_context(|| format!("Corrupt '{}' entry", READING_KEY))?;
    let scores: ParameterScores =
        serde_json::from_str(&scores).with_context(|| format!("Corrupt '{}' entry", SCORES_KEY))?;
    let final_score: f64 = final_score
        .trim()
        .parse()
        .with_context(|| format!("Corrupt '{}' entry", FINAL_SCORE_KEY))?;

    Ok(Some(AnalysisRecord {
        reading,
        scores,
        final_score,
    }))
}

/// Remove a stored analysis
pub fn clear_analysis(store: &mut impl KeyValueStore) -> Result<()> {
    for key in [READING_KEY, SCORES_KEY, FINAL_SCORE_KEY] {
        store.remove(key)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ParameterCatalog, ParameterKey};
    use crate::engine::SoilQualityEngine;
    use crate::scorer::{final_score, score_all_parameters};

    fn record() -> AnalysisRecord {
        let reading = SoilReading::from_values([4.0, 45.0, 22.0, 35.0, 40.0, 150.0], "Awa");
        let scores = score_all_parameters(&reading, &ParameterCatalog::standard());
        let final_score = final_score(&scores);
        AnalysisRecord {
            reading,
            scores,
            final_score,
        }
    }

    #[test]
    fn test_empty_store_has_no_data() {
        let store = MemoryStore::new();
        assert!(load_analysis(&store).unwrap().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        let rec = record();
        save_analysis(&mut store, &rec).unwrap();

        assert!(store.get(READING_KEY).unwrap().contains("\"idAnalyse\""));
        assert_eq!(load_analysis(&store).unwrap(), Some(rec));
    }

    #[test]
    fn test_nan_reading_reloads() {
        let engine = SoilQualityEngine::standard();
        let reading = SoilReading::from_values([f64::NAN, 45.0, 22.0, 35.0, 40.0, 150.0], "Awa");
        let report = engine.analyse(reading);

        let mut store = MemoryStore::new();
        save_analysis(&mut store, &report.to_record()).unwrap();

        let loaded = load_analysis(&store).unwrap().expect("analysis present");
        assert!(loaded.reading.get(ParameterKey::Ph).unwrap().is_nan());
        assert_eq!(loaded.scores, report.scores);
        assert_eq!(loaded.final_score, report.final_score);

        let rebuilt = engine.report_from_record(loaded);
        assert_eq!(rebuilt.recommendations, report.recommendations);
    }

    #[test]
    fn test_partial_store_is_no_data() {
        let mut store = MemoryStore::new();
        save_analysis(&mut store, &record()).unwrap();
        store.remove(SCORES_KEY).unwrap();
        assert!(load_analysis(&store).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_entry_is_error() {
        let mut store = MemoryStore::new();
        save_analysis(&mut store, &record()).unwrap();
        store.set(FINAL_SCORE_KEY, "not a number".to_string()).unwrap();
        assert!(load_analysis(&store).is_err());
    }

    #[test]
    fn test_clear_analysis() {
        let mut store = MemoryStore::new();
        save_analysis(&mut store, &record()).unwrap();
        clear_analysis(&mut store).unwrap();
        assert!(load_analysis(&store).unwrap().is_none());
    }
}
