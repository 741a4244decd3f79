//! Plain-text rendering of an analysis report for terminal output

use crate::engine::AnalysisReport;
use crate::scorer::ScoreBand;
use crate::utils::format::{format_one_decimal, format_reading};

pub const NO_DATA_MESSAGE: &str =
    "Aucune donnée d'analyse trouvée. Veuillez effectuer une analyse d'abord.";

/// Render a report as text: header, final score, per-parameter bars, advice
pub fn format_report_text(report: &AnalysisReport) -> String {
    let mut lines = Vec::new();
    let meta = &report.reading.metadata;

    lines.push("=".repeat(60));
    lines.push(format!("Analyse {} ({})", meta.analysis_id, meta.analyst_name));
    lines.push(format!("Date: {}", meta.analysed_at.format("%Y-%m-%d %H:%M:%S UTC")));
    lines.push("=".repeat(60));
    lines.push(String::new());

    lines.push(format!(
        "Score final: {}% ({})",
        format_one_decimal(report.final_score),
        report.interpretation.label
    ));
    lines.push(report.interpretation.message.clone());
    lines.push(String::new());

    lines.push("Scores par paramètre:".to_string());
    for (key, score) in report.scores.iter() {
        let value = report
            .reading
            .get(key)
            .map(format_reading)
            .unwrap_or_else(|| "-".to_string());
        lines.push(format!(
            "  {:<12} {:>8}  {:>6}%  [{}]",
            key.display_name(),
            value,
            format_one_decimal(score * 100.0),
            ScoreBand::from_score(score).css_class()
        ));
    }
    lines.push(String::new());

    lines.push("Recommandations:".to_string());
    for rec in &report.recommendations {
        lines.push(format!("  - {}", rec));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SoilQualityEngine;
    use crate::reading::SoilReading;

    #[test]
    fn test_report_text_sections() {
        let engine = SoilQualityEngine::standard();
        let reading = SoilReading::from_values([4.0, 45.0, 22.0, 35.0, 40.0, 150.0], "Awa");
        let text = format_report_text(&engine.analyse(reading));

        assert!(text.contains("(Awa)"));
        assert!(text.contains("Score final: 88.5% (Excellent)"));
        assert!(text.contains("bg-danger"));
        assert!(text.contains("  - Votre pH est trop acide (pH 4.0)"));
    }
}
