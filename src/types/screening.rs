//! Screening questionnaire results

use serde::{Deserialize, Serialize};

/// Supported instruments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Instrument {
    /// 7-item anxiety screening
    Gad7,
    /// 9-item depression screening
    Phq9,
}

impl Instrument {
    pub fn item_count(&self) -> usize {
        match self {
            Self::Gad7 => 7,
            Self::Phq9 => 9,
        }
    }

    pub fn max_score(&self) -> u32 {
        self.item_count() as u32 * 3
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Gad7 => "GAD-7",
            Self::Phq9 => "PHQ-9",
        }
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Safety escalation attached to a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyAlert {
    /// Any self-harm thoughts reported (PHQ-9 item 9 > 0)
    Critical,
    /// Moderate or worse total
    Recommendation,
}

/// Scored questionnaire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningResult {
    pub instrument: Instrument,
    pub score: u32,
    pub max_score: u32,
    /// Severity band label, e.g. "Mild Anxiety"
    pub severity: String,
    pub interpretation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<SafetyAlert>,
    /// Severe total, connect to a crisis center now
    pub urgent: bool,
    /// Support lines to show alongside the result
    pub resources: Vec<String>,
}

impl ScreeningResult {
    pub fn needs_follow_up(&self) -> bool {
        self.alert.is_some()
    }
}
