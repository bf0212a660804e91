//! Innerverse: affect classification and crisis-risk scoring
//!
//! text → crisis scorer → (polarity + intent + intensity) → atmosphere → heat + history

pub mod config;
pub mod core;
pub mod error;
pub mod types;

// =============================================================================
// CRISIS WEIGHTS [C]
// =============================================================================

/// Weight per distinct red-flag phrase
pub const CRISIS_WEIGHT_RED_FLAG: u32 = 5;
/// Weight per distinct warning phrase
pub const CRISIS_WEIGHT_WARNING: u32 = 2;
/// Long text with no `.` or `,`
pub const CRISIS_WEIGHT_RUN_ON: u32 = 3;
/// `!!!` or `???`
pub const CRISIS_WEIGHT_FRANTIC: u32 = 2;
/// Very short text carrying a despair word
pub const CRISIS_WEIGHT_HEAVY_FRAGMENT: u32 = 3;

/// Score at or above which the crisis path takes over
pub const CRISIS_THRESHOLD: u32 = 5;

/// Run-on needs strictly more words than this
pub const RUN_ON_MIN_WORDS: usize = 40;
/// Heavy fragment needs strictly fewer words than this
pub const FRAGMENT_MAX_WORDS: usize = 5;

// =============================================================================
// POLARITY [C]
// =============================================================================

/// Multiplier for shouting (all caps) or `!!!`
pub const POLARITY_AMPLIFIER: f64 = 1.5;

// =============================================================================
// HEAT TRANSITIONS [C]
// =============================================================================

pub const HEAT_OVERWHELMED_RISE: f64 = 0.5;
pub const HEAT_POSITIVE_INTENT_COOL: f64 = 0.4;
pub const HEAT_POSITIVE_POLARITY_COOL: f64 = 0.3;
pub const HEAT_NEUTRAL_COOL: f64 = 0.1;
pub const HEAT_NEGATIVE_RISE: f64 = 0.3;
/// Applied after every transition
pub const HEAT_DECAY: f64 = 0.05;

/// Polarity above this cools moderately
pub const HEAT_POSITIVE_POLARITY: f64 = 0.3;
/// Polarity above this cools gently
pub const HEAT_NEUTRAL_POLARITY: f64 = -0.2;
/// Polarity below this heats up
pub const HEAT_NEGATIVE_POLARITY: f64 = -0.5;

// =============================================================================
// PATTERN TRIGGER [C]
// =============================================================================

/// Trailing records inspected for a sustained heavy pattern
pub const SCREENING_WINDOW: usize = 3;

/// Snippet length stored with history records
pub const SNIPPET_CHARS: usize = 100;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";

/// Round to two decimals for the response surface
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
