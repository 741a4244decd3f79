pub mod types;
pub mod interpretation;
pub mod recommendations;
pub mod report;

pub use types::{Interpretation, ParameterAdvice, QualityLevel, Recommendations, RuleTier};

pub use interpretation::interpret_final_score;
pub use recommendations::{
    evaluate_rules, generate_recommendations, ParameterThresholds, ThresholdTable, CONGRATULATIONS,
    LOW_SCORE_THRESHOLD, PROFESSIONAL_CONSULTATION,
};
pub use report::{format_report_text, NO_DATA_MESSAGE};
