use crate::explanation::types::{Interpretation, QualityLevel};

/// Interpret the final score (0-100) for display
pub fn interpret_final_score(score: f64) -> Interpretation {
    let level = QualityLevel::from_score(score);

    let message = match level {
        QualityLevel::Excellent => "Votre sol est en excellent état ! Les paramètres sont bien équilibrés et favorables à une croissance optimale.",
        QualityLevel::Good => "Votre sol est de bonne qualité, mais certains paramètres pourraient être améliorés pour une performance optimale.",
        QualityLevel::Average => "Votre sol présente des déséquilibres modérés. Des améliorations sont nécessaires pour une culture réussie.",
        QualityLevel::Poor => "Votre sol présente de graves déséquilibres. Une intervention urgente est nécessaire pour améliorer sa qualité.",
    };

    Interpretation {
        score,
        level,
        label: level.label().to_string(),
        message: message.to_string(),
        color: level.color().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_boundaries() {
        assert_eq!(interpret_final_score(100.0).level, QualityLevel::Excellent);
        assert_eq!(interpret_final_score(80.0).level, QualityLevel::Excellent);
        assert_eq!(interpret_final_score(79.9).level, QualityLevel::Good);
        assert_eq!(interpret_final_score(60.0).level, QualityLevel::Good);
        assert_eq!(interpret_final_score(40.0).level, QualityLevel::Average);
        assert_eq!(interpret_final_score(39.9).level, QualityLevel::Poor);
        assert_eq!(interpret_final_score(0.0).level, QualityLevel::Poor);
    }

    #[test]
    fn test_poor_interpretation_text() {
        let i = interpret_final_score(12.0);
        assert_eq!(i.label, "Faible");
        assert_eq!(i.color, "#dc3545");
        assert!(i.message.contains("intervention urgente"));
    }
}
