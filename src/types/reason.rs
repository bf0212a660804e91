//! Reason codes for atmosphere and heat decisions
//!
//! Every decision carries the rule that produced it so a turn can be explained.

use serde::{Deserialize, Serialize};

/// Which atmosphere rule fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum AtmosphereRule {
    // =========================================================================
    // R100: Overrides
    // =========================================================================
    /// Crisis verdict triggered upstream
    R100_CRISIS_OVERRIDE,
    /// Empty or whitespace-only input
    R100_EMPTY_INPUT,

    // =========================================================================
    // R101-R104: Intent rules
    // =========================================================================
    /// JOY, GRATITUDE or EXCITEMENT
    R101_POSITIVE_INTENT,
    /// ANXIETY
    R102_ANXIETY_INTENT,
    /// ANGER or OVERWHELMED at intensity >= 1.5
    R103_INTENSE_ANGER_OVERWHELM,
    /// SADNESS
    R104_SADNESS_INTENT,

    // =========================================================================
    // R105: Polarity fallback
    // =========================================================================
    /// polarity * intensity bucketed by threshold
    R105_POLARITY_BUCKET,
}

impl AtmosphereRule {
    pub fn code(&self) -> &'static str {
        match self {
            Self::R100_CRISIS_OVERRIDE => "R100_CRISIS_OVERRIDE",
            Self::R100_EMPTY_INPUT => "R100_EMPTY_INPUT",
            Self::R101_POSITIVE_INTENT => "R101_POSITIVE_INTENT",
            Self::R102_ANXIETY_INTENT => "R102_ANXIETY_INTENT",
            Self::R103_INTENSE_ANGER_OVERWHELM => "R103_INTENSE_ANGER_OVERWHELM",
            Self::R104_SADNESS_INTENT => "R104_SADNESS_INTENT",
            Self::R105_POLARITY_BUCKET => "R105_POLARITY_BUCKET",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::R100_CRISIS_OVERRIDE => "Crisis signals past threshold",
            Self::R100_EMPTY_INPUT => "No text provided",
            Self::R101_POSITIVE_INTENT => "Positive intent detected",
            Self::R102_ANXIETY_INTENT => "Anxiety detected",
            Self::R103_INTENSE_ANGER_OVERWHELM => "Intense anger or overwhelm",
            Self::R104_SADNESS_INTENT => "Sadness detected",
            Self::R105_POLARITY_BUCKET => "Mood score fallback",
        }
    }
}

impl std::fmt::Display for AtmosphereRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}

/// Which heat transition fired (decay always follows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ThermalRule {
    /// ANGER sets heat to maximum
    R201_INSTANT_LAVA,
    /// OVERWHELMED heats rapidly
    R202_RAPID_HEATING,
    /// Positive intent cools fast
    R203_FAST_COOLING,
    /// Positive polarity cools moderately
    R204_MODERATE_COOLING,
    /// Neutral or slightly negative polarity cools gently
    R205_GENTLE_COOLING,
    /// Strongly negative polarity heats up
    R206_HEATING,
    /// Nothing matched, decay only
    R207_DECAY_ONLY,
}

impl ThermalRule {
    pub fn code(&self) -> &'static str {
        match self {
            Self::R201_INSTANT_LAVA => "R201_INSTANT_LAVA",
            Self::R202_RAPID_HEATING => "R202_RAPID_HEATING",
            Self::R203_FAST_COOLING => "R203_FAST_COOLING",
            Self::R204_MODERATE_COOLING => "R204_MODERATE_COOLING",
            Self::R205_GENTLE_COOLING => "R205_GENTLE_COOLING",
            Self::R206_HEATING => "R206_HEATING",
            Self::R207_DECAY_ONLY => "R207_DECAY_ONLY",
        }
    }
}

impl std::fmt::Display for ThermalRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
