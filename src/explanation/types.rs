use serde::{Deserialize, Serialize};

use crate::catalog::ParameterKey;

/// Overall soil quality bracket derived from the final score (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityLevel {
    Excellent,
    Good,
    Average,
    Poor,
}

impl QualityLevel {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 80.0 => QualityLevel::Excellent,
            s if s >= 60.0 => QualityLevel::Good,
            s if s >= 40.0 => QualityLevel::Average,
            _ => QualityLevel::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QualityLevel::Excellent => "Excellent",
            QualityLevel::Good => "Bon",
            QualityLevel::Average => "Moyen",
            QualityLevel::Poor => "Faible",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            QualityLevel::Excellent => "#28a745",
            QualityLevel::Good => "#ffc107",
            QualityLevel::Average => "#fd7e14",
            QualityLevel::Poor => "#dc3545",
        }
    }
}

/// Final score interpretation shown above the parameter breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    pub score: f64,
    pub level: QualityLevel,
    pub label: String,
    pub message: String,
    pub color: String,
}

/// Which rule tier fired for a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleTier {
    SevereLow,
    SevereHigh,
    Mild,
}

/// A single fired rule with its rendered advice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterAdvice {
    pub parameter: ParameterKey,
    pub tier: RuleTier,
    pub value: f64,
    pub text: String,
}

/// Ordered advisory text for a reading.
///
/// Never empty once generated: when no rule fires it holds the
/// congratulation entry, so an empty sequence can only mean "no data".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recommendations(Vec<String>);

impl Recommendations {
    pub(crate) fn from_vec(items: Vec<String>) -> Self {
        Self(items)
    }

    /// True when no parameter rule fired
    pub fn is_all_clear(&self) -> bool {
        self.0.first().map(String::as_str) == Some(super::recommendations::CONGRATULATIONS)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl IntoIterator for Recommendations {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Recommendations {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
