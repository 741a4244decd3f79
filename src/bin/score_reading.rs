// Score a soil reading from the command line and save it to the analysis store
//
// Usage: score_reading <ph> <humidite> <temperature> <azote> <phosphore> <potassium>

use anyhow::{Context, Result};
use soil_scorer_rust::config::{init_tracing, ScorerConfig};
use soil_scorer_rust::explanation::format_report_text;
use soil_scorer_rust::store::save_analysis;
use soil_scorer_rust::validation::{validate_reading, RangeStatus};
use soil_scorer_rust::{JsonFileStore, ParameterKey, SoilQualityEngine, SoilReading, ThresholdTable};

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != ParameterKey::ALL.len() {
        let names: Vec<&str> = ParameterKey::ALL.iter().map(|k| k.as_str()).collect();
        eprintln!("Usage: score_reading <{}>", names.join("> <"));
        std::process::exit(2);
    }

    let values = args
        .iter()
        .zip(ParameterKey::ALL)
        .map(|(arg, key)| {
            arg.trim()
                .parse::<f64>()
                .with_context(|| format!("Invalid value for {}: '{}'", key, arg))
        })
        .collect::<Result<Vec<f64>>>()?;

    let config = ScorerConfig::from_env();
    let engine = SoilQualityEngine::new(config.load_catalog()?, ThresholdTable::STANDARD);
    let reading = SoilReading::from_slice(&values, &config.analyst_name)?;

    match validate_reading(&reading, engine.catalog()) {
        Ok(statuses) => {
            for (key, status) in statuses {
                if let RangeStatus::OutsideOptimal { .. } = status {
                    tracing::warn!("{}: {}", key.display_name(), status.message());
                }
            }
        }
        Err(errors) => {
            for err in &errors {
                eprintln!("{}", err);
            }
            anyhow::bail!("Veuillez corriger les erreurs ({} invalides)", errors.len());
        }
    }

    let report = engine.analyse(reading);

    let mut store = JsonFileStore::open(&config.store_path)?;
    save_analysis(&mut store, &report.to_record())?;

    println!("{}", format_report_text(&report));
    Ok(())
}
