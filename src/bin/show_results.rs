// Show the last saved analysis from the analysis store
//
// Usage: show_results [--json]

use anyhow::Result;
use soil_scorer_rust::config::{init_tracing, ScorerConfig};
use soil_scorer_rust::explanation::{format_report_text, NO_DATA_MESSAGE};
use soil_scorer_rust::store::load_analysis;
use soil_scorer_rust::{JsonFileStore, SoilQualityEngine, ThresholdTable};

fn main() -> Result<()> {
    init_tracing();

    let as_json = std::env::args().skip(1).any(|a| a == "--json");

    let config = ScorerConfig::from_env();
    let engine = SoilQualityEngine::new(config.load_catalog()?, ThresholdTable::STANDARD);

    let store = JsonFileStore::open(&config.store_path)?;
    let Some(record) = load_analysis(&store)? else {
        eprintln!("{}", NO_DATA_MESSAGE);
        std::process::exit(1);
    };

    let report = engine.report_from_record(record);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", format_report_text(&report));
    }

    Ok(())
}
