//! Response structures for the API and terminal

use serde::{Deserialize, Serialize};

use crate::types::{
    AtmosphereRule, AtmosphereState, CopingSkill, CrisisResource, CrisisVerdict, IntentLabel,
    ThermalRule,
};

/// Message shown whenever the crisis path fires
pub const CRISIS_MESSAGE: &str = "Your words suggest you might be carrying something very heavy right now. \
You don't have to navigate this alone. Please reach out for immediate support.";

/// How a turn was decided, kept out of the wire format
#[derive(Debug, Clone, PartialEq)]
pub struct TurnTrace {
    pub intensity: f64,
    /// Polarity after amplification and clamping
    pub polarity: f64,
    pub rule: AtmosphereRule,
    pub thermal_rule: Option<ThermalRule>,
    pub crisis_score: u32,
}

/// Result of a routine (non-crisis) turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    /// Mood score, 2 decimals
    pub score: f64,
    pub intent: Option<IntentLabel>,
    pub atmosphere: AtmosphereState,
    /// Heat after this turn, 2 decimals
    pub heat_level: f64,
    /// Last few turns were all heavy
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub suggest_screening: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coping_skill: Option<CopingSkill>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub companion: Option<String>,
    /// Non-fatal persistence problems
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(skip)]
    pub trace: Option<TurnTrace>,
}

impl TurnReport {
    /// Neutral response for empty input
    pub fn neutral(heat: f64, crisis_score: u32) -> Self {
        Self {
            score: 0.0,
            intent: None,
            atmosphere: AtmosphereState::FoggyMist,
            heat_level: crate::round2(heat),
            suggest_screening: false,
            coping_skill: None,
            companion: None,
            warnings: Vec::new(),
            trace: Some(TurnTrace {
                intensity: 1.0,
                polarity: 0.0,
                rule: AtmosphereRule::R100_EMPTY_INPUT,
                thermal_rule: None,
                crisis_score,
            }),
        }
    }
}

/// Result of a turn that crossed the crisis threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisReport {
    /// Always CRISIS
    pub atmosphere: AtmosphereState,
    pub is_crisis: bool,
    pub message: String,
    pub resources: Vec<CrisisResource>,
    #[serde(skip)]
    pub verdict: Option<CrisisVerdict>,
}

impl CrisisReport {
    pub fn new(verdict: CrisisVerdict) -> Self {
        Self {
            atmosphere: AtmosphereState::Crisis,
            is_crisis: true,
            message: CRISIS_MESSAGE.to_string(),
            resources: CrisisResource::defaults(),
            verdict: Some(verdict),
        }
    }
}

/// Everything a turn can produce
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProcessOutcome {
    Crisis(CrisisReport),
    /// Empty input, nothing was touched
    Empty(TurnReport),
    Analyzed(TurnReport),
}

impl ProcessOutcome {
    pub fn atmosphere(&self) -> AtmosphereState {
        match self {
            Self::Crisis(c) => c.atmosphere,
            Self::Empty(t) | Self::Analyzed(t) => t.atmosphere,
        }
    }

    pub fn is_crisis(&self) -> bool {
        matches!(self, Self::Crisis(_))
    }

    /// Rule that decided the atmosphere
    pub fn rule(&self) -> Option<AtmosphereRule> {
        match self {
            Self::Crisis(_) => Some(AtmosphereRule::R100_CRISIS_OVERRIDE),
            Self::Empty(t) | Self::Analyzed(t) => t.trace.as_ref().map(|trace| trace.rule),
        }
    }

    /// Routine report, None on the crisis path
    pub fn report(&self) -> Option<&TurnReport> {
        match self {
            Self::Crisis(_) => None,
            Self::Empty(t) | Self::Analyzed(t) => Some(t),
        }
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let state = self.atmosphere();
        let color = state.color_code();
        let reset = AtmosphereState::color_reset();
        match self {
            Self::Crisis(_) => format!("{}{} atmosphere={} | crisis support below{}", color, state.emoji(), state, reset),
            Self::Empty(t) | Self::Analyzed(t) => format!(
                "{}{} score={:.2} | intent={} | atmosphere={} | heat={:.2}{}",
                color,
                state.emoji(),
                t.score,
                t.intent.map(|i| i.as_str()).unwrap_or("NONE"),
                state,
                t.heat_level,
                reset
            ),
        }
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        match self {
            Self::Crisis(c) => format!("atmosphere={} | is_crisis=true", c.atmosphere),
            Self::Empty(t) | Self::Analyzed(t) => format!(
                "score={:.2} | intent={} | atmosphere={} | heat={:.2}",
                t.score,
                t.intent.map(|i| i.as_str()).unwrap_or("NONE"),
                t.atmosphere,
                t.heat_level
            ),
        }
    }
}
