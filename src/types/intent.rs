//! Discrete emotional intent labels

use serde::{Deserialize, Serialize};

/// The closed set of intents the classifier can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntentLabel {
    Joy,
    Anger,
    Sadness,
    Anxiety,
    Overwhelmed,
    Confusion,
    Gratitude,
    Excitement,
}

impl IntentLabel {
    /// All labels in default table order
    pub const ALL: [IntentLabel; 8] = [
        IntentLabel::Joy,
        IntentLabel::Anger,
        IntentLabel::Sadness,
        IntentLabel::Anxiety,
        IntentLabel::Overwhelmed,
        IntentLabel::Confusion,
        IntentLabel::Gratitude,
        IntentLabel::Excitement,
    ];

    /// JOY, GRATITUDE, EXCITEMENT
    pub fn is_positive(&self) -> bool {
        matches!(self, Self::Joy | Self::Gratitude | Self::Excitement)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Joy => "JOY",
            Self::Anger => "ANGER",
            Self::Sadness => "SADNESS",
            Self::Anxiety => "ANXIETY",
            Self::Overwhelmed => "OVERWHELMED",
            Self::Confusion => "CONFUSION",
            Self::Gratitude => "GRATITUDE",
            Self::Excitement => "EXCITEMENT",
        }
    }
}

impl std::fmt::Display for IntentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
