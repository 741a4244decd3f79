//! Recommendation Rules
//!
//! Per-parameter advice from fixed threshold tiers. For each parameter the
//! tiers are checked in order (severe-low, severe-high, mild) and the first
//! match wins, so a parameter yields at most one entry.
//!
//! The cutoffs live in their own table and are deliberately not derived from
//! the parameter catalog: the severe tiers have no catalog counterpart, and
//! the mild tiers only happen to coincide with the optimal bands.

use crate::catalog::ParameterKey;
use crate::explanation::types::{ParameterAdvice, Recommendations, RuleTier};
use crate::reading::SoilReading;
use crate::utils::format::{format_one_decimal, format_reading};

/// Final scores below this add the professional consultation entry
pub const LOW_SCORE_THRESHOLD: f64 = 40.0;

pub const CONGRATULATIONS: &str = "Félicitations ! Votre sol est bien équilibré. Continuez vos bonnes pratiques de gestion.";

pub const PROFESSIONAL_CONSULTATION: &str = "Considérant le score global faible, nous recommandons une analyse professionnelle complète et une consultation avec un agronome pour un plan de correction détaillé.";

/// Cutoffs for one parameter. All comparisons are strict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterThresholds {
    pub severe_low: f64,
    pub severe_high: f64,
    /// Mild tier fires below this (when no severe tier did)
    pub mild_low: Option<f64>,
    /// Mild tier fires above this (when no severe tier did)
    pub mild_high: Option<f64>,
}

impl ParameterThresholds {
    const fn new(severe_low: f64, severe_high: f64, mild_low: Option<f64>, mild_high: Option<f64>) -> Self {
        Self {
            severe_low,
            severe_high,
            mild_low,
            mild_high,
        }
    }

    /// First matching tier, if any. NaN matches nothing.
    pub fn classify(&self, value: f64) -> Option<RuleTier> {
        if value < self.severe_low {
            Some(RuleTier::SevereLow)
        } else if value > self.severe_high {
            Some(RuleTier::SevereHigh)
        } else if self.mild_low.is_some_and(|t| value < t) || self.mild_high.is_some_and(|t| value > t) {
            Some(RuleTier::Mild)
        } else {
            None
        }
    }

    /// True when a mild tier fired on the low side of the band
    fn is_mild_low(&self, value: f64) -> bool {
        self.mild_low.is_some_and(|t| value < t)
    }
}

/// Tier cutoffs for all six parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdTable {
    pub ph: ParameterThresholds,
    pub humidite: ParameterThresholds,
    pub temperature: ParameterThresholds,
    pub azote: ParameterThresholds,
    pub phosphore: ParameterThresholds,
    pub potassium: ParameterThresholds,
}

impl ThresholdTable {
    pub const STANDARD: ThresholdTable = ThresholdTable {
        ph: ParameterThresholds::new(5.5, 7.8, Some(6.2), Some(7.2)),
        humidite: ParameterThresholds::new(20.0, 80.0, Some(30.0), Some(60.0)),
        temperature: ParameterThresholds::new(10.0, 35.0, None, None),
        azote: ParameterThresholds::new(10.0, 50.0, Some(20.0), None),
        phosphore: ParameterThresholds::new(15.0, 50.0, Some(30.0), None),
        potassium: ParameterThresholds::new(80.0, 200.0, Some(120.0), None),
    };

    pub fn get(&self, key: ParameterKey) -> &ParameterThresholds {
        match key {
            ParameterKey::Ph => &self.ph,
            ParameterKey::Humidite => &self.humidite,
            ParameterKey::Temperature => &self.temperature,
            ParameterKey::Azote => &self.azote,
            ParameterKey::Phosphore => &self.phosphore,
            ParameterKey::Potassium => &self.potassium,
        }
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Render the advice text for a fired tier
fn advice_text(key: ParameterKey, tier: RuleTier, value: f64, thresholds: &ParameterThresholds) -> String {
    use ParameterKey::*;
    use RuleTier::*;

    let v = format_reading(value);

    match (key, tier) {
        (Ph, SevereLow) => format!(
            "Votre pH est trop acide (pH {}). Ajoutez de la chaux agricole (20-50 kg/100m²) pour le rééquilibrer. Attendez 3-4 semaines avant de planter.",
            format_one_decimal(value)
        ),
        (Ph, SevereHigh) => format!(
            "Votre pH est trop alcalin (pH {}). Utilisez du soufre élémentaire (1-2 kg/100m²) ou de la tourbe blonde pour le corriger.",
            format_one_decimal(value)
        ),
        (Ph, Mild) => format!(
            "Votre pH ({}) est légèrement déséquilibré. Un apport modéré de matière organique (compost) peut aider à le stabiliser.",
            format_one_decimal(value)
        ),

        (Humidite, SevereLow) => format!(
            "Votre sol est trop sec ({}% d'humidité). Augmentez la fréquence d'arrosage (tous les 2-3 jours) et utilisez un paillage organique (paille, copeaux) pour conserver l'humidité.",
            v
        ),
        (Humidite, SevereHigh) => format!(
            "Votre sol est trop humide ({}% d'humidité). Améliorez le drainage avec du sable grossier et réduisez l'arrosage. Évitez de compacter le sol.",
            v
        ),
        (Humidite, Mild) => format!(
            "L'humidité de votre sol ({}%) n'est pas optimale. Ajustez votre programme d'arrosage selon les conditions météorologiques.",
            v
        ),

        // No mild tier for temperature in the standard table; a custom table
        // that adds one reuses the severe advice for the side that fired
        (Temperature, SevereLow) => format!(
            "La température de votre sol est trop basse ({}°C). Utilisez un paillage plastique noir pour capter la chaleur et protégez les cultures avec des voiles d'hivernage.",
            v
        ),
        (Temperature, Mild) if thresholds.is_mild_low(value) => {
            advice_text(Temperature, SevereLow, value, thresholds)
        }
        (Temperature, SevereHigh) | (Temperature, Mild) => format!(
            "La température de votre sol est trop élevée ({}°C). Un paillage clair (paille) peut aider à réduire la température. Arrosez tôt le matin.",
            v
        ),

        (Azote, SevereLow) => format!(
            "Le taux d'azote est très faible ({} mg/kg). Ajoutez un engrais riche en azote (sang séché, fumier composté) ou du compost à raison de 50-100 kg/100m².",
            v
        ),
        (Azote, SevereHigh) => format!(
            "Le taux d'azote est trop élevé ({} mg/kg). Évitez les engrais azotés pendant 2-3 mois. Privilégiez des cultures gourmandes en azote (choux, maïs).",
            v
        ),
        (Azote, Mild) => format!(
            "Le taux d'azote est légèrement faible ({} mg/kg). Un petit apport d'engrais azoté (purin d'ortie dilué) serait bénéfique.",
            v
        ),

        (Phosphore, SevereLow) => format!(
            "Le taux de phosphore est très faible ({} mg/kg). Ajoutez un engrais riche en phosphore (farine d'arêtes, poudre d'os) ou un engrais NPK équilibré.",
            v
        ),
        (Phosphore, SevereHigh) => format!(
            "Le taux de phosphore est trop élevé ({} mg/kg). Évitez les engrais phosphatés pendant un moment. Le phosphore en excès peut bloquer l'absorption d'autres nutriments.",
            v
        ),
        (Phosphore, Mild) => format!(
            "Le taux de phosphore est légèrement faible ({} mg/kg). Un apport modéré de phosphate naturel serait bénéfique.",
            v
        ),

        (Potassium, SevereLow) => format!(
            "Le taux de potassium est insuffisant ({} mg/kg). Ajoutez un engrais riche en potassium (cendre de bois, vinasse de betterave) ou un engrais NPK équilibré.",
            v
        ),
        (Potassium, SevereHigh) => format!(
            "Le taux de potassium est trop élevé ({} mg/kg). Évitez les engrais potassiques pendant 3-4 mois. Arrosez abondamment pour lessiver l'excès.",
            v
        ),
        (Potassium, Mild) => format!(
            "Le taux de potassium est légèrement faible ({} mg/kg). Un petit apport de sulfate de potasse serait bénéfique.",
            v
        ),
    }
}

/// Evaluate every parameter rule against the reading, in evaluation order
pub fn evaluate_rules(reading: &SoilReading, table: &ThresholdTable) -> Vec<ParameterAdvice> {
    ParameterKey::ALL
        .into_iter()
        .filter_map(|key| {
            let value = reading.value_or_nan(key);
            let thresholds = table.get(key);
            thresholds.classify(value).map(|tier| ParameterAdvice {
                parameter: key,
                tier,
                value,
                text: advice_text(key, tier, value, thresholds),
            })
        })
        .collect()
}

/// Generate the ordered advice list for a reading.
///
/// Parameter entries come first in evaluation order; if none fired the list
/// starts with the congratulation entry instead. A final score below
/// `LOW_SCORE_THRESHOLD` appends the consultation entry regardless of which
/// rules fired, even alongside the congratulation.
pub fn generate_recommendations(
    reading: &SoilReading,
    final_score: f64,
    table: &ThresholdTable,
) -> Recommendations {
    let mut items: Vec<String> = evaluate_rules(reading, table)
        .into_iter()
        .map(|advice| advice.text)
        .collect();

    if items.is_empty() {
        items.push(CONGRATULATIONS.to_string());
    }

    if final_score < LOW_SCORE_THRESHOLD {
        items.push(PROFESSIONAL_CONSULTATION.to_string());
    }

    Recommendations::from_vec(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(values: [f64; 6]) -> SoilReading {
        SoilReading::from_values(values, "test")
    }

    const OPTIMAL: [f64; 6] = [6.5, 45.0, 22.0, 35.0, 40.0, 150.0];

    fn with(index: usize, value: f64) -> SoilReading {
        let mut values = OPTIMAL;
        values[index] = value;
        reading(values)
    }

    fn generate(r: &SoilReading, score: f64) -> Vec<String> {
        generate_recommendations(r, score, &ThresholdTable::STANDARD).into_vec()
    }

    #[test]
    fn test_optimal_reading_congratulates() {
        let recs = generate_recommendations(&reading(OPTIMAL), 100.0, &ThresholdTable::STANDARD);
        assert_eq!(recs.as_slice(), &[CONGRATULATIONS.to_string()]);
        assert!(recs.is_all_clear());
    }

    #[test]
    fn test_severe_low_ph() {
        let recs = generate(&with(0, 4.0), 90.0);
        assert_eq!(recs.len(), 1);
        assert!(recs[0].starts_with("Votre pH est trop acide"));
        assert!(recs[0].contains("(pH 4.0)"));
    }

    #[test]
    fn test_low_score_appends_consultation_last() {
        let recs = generate(&with(0, 4.0), 30.0);
        assert_eq!(recs.len(), 2);
        assert!(recs[0].contains("4.0"));
        assert_eq!(recs[1], PROFESSIONAL_CONSULTATION);
    }

    #[test]
    fn test_consultation_independent_of_rules() {
        let recs = generate(&reading(OPTIMAL), 10.0);
        assert_eq!(recs, vec![CONGRATULATIONS.to_string(), PROFESSIONAL_CONSULTATION.to_string()]);

        // Exactly at the threshold: no consultation
        let recs = generate(&reading(OPTIMAL), 40.0);
        assert_eq!(recs, vec![CONGRATULATIONS.to_string()]);
    }

    #[test]
    fn test_ph_boundary_falls_through_to_mild() {
        let recs = generate(&with(0, 5.5), 90.0);
        assert_eq!(recs.len(), 1);
        assert!(recs[0].starts_with("Votre pH (5.5) est légèrement déséquilibré"));

        let recs = generate(&with(0, 7.8), 90.0);
        assert!(recs[0].starts_with("Votre pH (7.8) est légèrement"));

        let recs = generate(&with(0, 7.9), 90.0);
        assert!(recs[0].starts_with("Votre pH est trop alcalin (pH 7.9)"));

        // Band edges are not mild
        assert_eq!(generate(&with(0, 6.2), 90.0), vec![CONGRATULATIONS.to_string()]);
        assert_eq!(generate(&with(0, 7.2), 90.0), vec![CONGRATULATIONS.to_string()]);
    }

    #[test]
    fn test_humidity_tiers() {
        assert!(generate(&with(1, 15.0), 90.0)[0].contains("trop sec (15% d'humidité)"));
        assert!(generate(&with(1, 85.0), 90.0)[0].contains("trop humide (85% d'humidité)"));
        assert!(generate(&with(1, 25.0), 90.0)[0].contains("(25%) n'est pas optimale"));
        assert!(generate(&with(1, 65.5), 90.0)[0].contains("(65.5%) n'est pas optimale"));
    }

    #[test]
    fn test_temperature_has_no_mild_tier() {
        assert_eq!(generate(&with(2, 12.0), 90.0), vec![CONGRATULATIONS.to_string()]);
        assert_eq!(generate(&with(2, 33.0), 90.0), vec![CONGRATULATIONS.to_string()]);
        assert!(generate(&with(2, 9.0), 90.0)[0].contains("trop basse (9°C)"));
        assert!(generate(&with(2, 36.0), 90.0)[0].contains("trop élevée (36°C)"));
    }

    #[test]
    fn test_custom_temperature_mild_tier_follows_side() {
        let table = ThresholdTable {
            temperature: ParameterThresholds {
                severe_low: 10.0,
                severe_high: 35.0,
                mild_low: Some(15.0),
                mild_high: Some(30.0),
            },
            ..ThresholdTable::STANDARD
        };

        let cold = evaluate_rules(&with(2, 12.0), &table);
        assert_eq!(cold.len(), 1);
        assert_eq!(cold[0].tier, RuleTier::Mild);
        assert!(cold[0].text.contains("trop basse (12°C)"));

        let warm = evaluate_rules(&with(2, 32.0), &table);
        assert_eq!(warm.len(), 1);
        assert_eq!(warm[0].tier, RuleTier::Mild);
        assert!(warm[0].text.contains("trop élevée (32°C)"));

        assert!(evaluate_rules(&with(2, 22.0), &table).is_empty());
    }

    #[test]
    fn test_ph_ties_round_up_in_advice() {
        assert!(generate(&with(0, 5.25), 90.0)[0].contains("trop acide (pH 5.3)"));
        assert!(generate(&with(0, 7.25), 90.0)[0].starts_with("Votre pH (7.3) est légèrement"));
    }

    #[test]
    fn test_nutrients_have_no_high_mild_tier() {
        // Above optimal but below severe-high: silent
        assert_eq!(generate(&with(4, 50.0), 90.0), vec![CONGRATULATIONS.to_string()]);
        assert_eq!(generate(&with(5, 200.0), 90.0), vec![CONGRATULATIONS.to_string()]);

        assert!(generate(&with(3, 15.0), 90.0)[0].contains("azote est légèrement faible (15 mg/kg)"));
        assert!(generate(&with(3, 51.0), 90.0)[0].contains("azote est trop élevé (51 mg/kg)"));
        assert!(generate(&with(4, 10.0), 90.0)[0].contains("phosphore est très faible (10 mg/kg)"));
        assert!(generate(&with(5, 100.0), 90.0)[0].contains("potassium est légèrement faible (100 mg/kg)"));
        assert!(generate(&with(5, 79.0), 90.0)[0].contains("potassium est insuffisant (79 mg/kg)"));
    }

    #[test]
    fn test_output_follows_parameter_order() {
        let r = reading([8.5, 10.0, 40.0, 5.0, 60.0, 300.0]);
        let advice = evaluate_rules(&r, &ThresholdTable::STANDARD);
        let keys: Vec<ParameterKey> = advice.iter().map(|a| a.parameter).collect();
        assert_eq!(keys, ParameterKey::ALL.to_vec());
        assert!(advice.iter().all(|a| a.tier != RuleTier::Mild));

        let recs = generate(&r, 5.0);
        assert_eq!(recs.len(), 7);
        assert_eq!(recs[6], PROFESSIONAL_CONSULTATION);
    }

    #[test]
    fn test_missing_values_fire_nothing() {
        let r = SoilReading::new("test").with_value(ParameterKey::Ph, 4.0);
        let advice = evaluate_rules(&r, &ThresholdTable::STANDARD);
        assert_eq!(advice.len(), 1);
        assert_eq!(advice[0].tier, RuleTier::SevereLow);
    }

    #[test]
    fn test_nan_final_score_skips_consultation() {
        assert_eq!(generate(&reading(OPTIMAL), f64::NAN), vec![CONGRATULATIONS.to_string()]);
    }
}
