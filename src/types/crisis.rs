//! Crisis verdict and its audit trail

use serde::{Deserialize, Serialize};

/// One signal that contributed to a crisis score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "phrase", rename_all = "snake_case")]
pub enum CrisisSignal {
    /// Direct self-harm or suicide vocabulary
    RedFlag(String),
    /// Lower-severity warning phrase
    Warning(String),
    /// Long text without `.` or `,`
    RunOn,
    /// `!!!` or `???`
    FranticPunctuation,
    /// Very short text with a despair word
    HeavyFragment,
}

impl std::fmt::Display for CrisisSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RedFlag(p) => write!(f, "red flag '{}'", p),
            Self::Warning(p) => write!(f, "warning phrase '{}'", p),
            Self::RunOn => write!(f, "run-on sentence"),
            Self::FranticPunctuation => write!(f, "frantic punctuation"),
            Self::HeavyFragment => write!(f, "heavy fragment"),
        }
    }
}

/// A signal with the weight it added
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedSignal {
    pub signal: CrisisSignal,
    pub weight: u32,
}

/// Outcome of crisis scoring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrisisVerdict {
    /// score >= threshold
    pub triggered: bool,
    /// Sum of all contributing weights
    pub score: u32,
    /// Signals in evaluation order
    pub contributing_signals: Vec<WeightedSignal>,
}

impl CrisisVerdict {
    /// Verdict for input with no signals
    pub fn clear() -> Self {
        Self {
            triggered: false,
            score: 0,
            contributing_signals: Vec::new(),
        }
    }

    /// Build from signals, summing weights against the threshold
    pub fn from_signals(signals: Vec<WeightedSignal>, threshold: u32) -> Self {
        let score = signals.iter().map(|s| s.weight).sum();
        Self {
            triggered: score >= threshold,
            score,
            contributing_signals: signals,
        }
    }

    /// Did this particular signal fire?
    pub fn has_signal(&self, signal: &CrisisSignal) -> bool {
        self.contributing_signals.iter().any(|s| &s.signal == signal)
    }
}

/// A support line shown on the crisis path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrisisResource {
    pub label: String,
    pub contact: String,
}

impl CrisisResource {
    fn new(label: &str, contact: &str) -> Self {
        Self {
            label: label.to_string(),
            contact: contact.to_string(),
        }
    }

    /// 24/7 free and confidential resources
    pub fn defaults() -> Vec<CrisisResource> {
        vec![
            Self::new("Suicide & Crisis Lifeline (call or text)", "988"),
            Self::new("Crisis Text Line (text HELLO)", "741741"),
            Self::new("Website", "https://988lifeline.org"),
            Self::new("Live Chat", "https://988lifeline.org/chat/"),
            Self::new("Emergency (immediate danger)", "911"),
        ]
    }
}
