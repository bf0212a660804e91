//! Crisis Risk Scorer: additive multi-signal scoring over raw text
//!
//! Signals (all applicable signals fire):
//! - red-flag phrase: +5 per distinct phrase
//! - warning phrase: +2 per distinct phrase
//! - run-on (> 40 words, no `.` or `,`): +3
//! - frantic punctuation (`!!!` or `???`): +2
//! - heavy fragment (< 5 words with a despair word): +3
//!
//! Triggered at score >= 5. Depends on nothing but the text.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::core::lexicon::Lexicon;
use crate::types::{CrisisSignal, CrisisVerdict, WeightedSignal};
use crate::{
    CRISIS_THRESHOLD, CRISIS_WEIGHT_FRANTIC, CRISIS_WEIGHT_HEAVY_FRAGMENT,
    CRISIS_WEIGHT_RED_FLAG, CRISIS_WEIGHT_RUN_ON, CRISIS_WEIGHT_WARNING, FRAGMENT_MAX_WORDS,
    RUN_ON_MIN_WORDS,
};

/// Scores text for crisis risk
#[derive(Debug, Clone)]
pub struct CrisisScorer {
    red_flags: Vec<String>,
    warnings: Vec<String>,
    despair_words: HashSet<String>,
    threshold: u32,
}

impl Default for CrisisScorer {
    fn default() -> Self {
        Self::new(&Lexicon::default())
    }
}

impl CrisisScorer {
    pub fn new(lexicon: &Lexicon) -> Self {
        Self {
            red_flags: dedup(&lexicon.red_flags),
            warnings: dedup(&lexicon.warnings),
            despair_words: lexicon.despair_words.iter().cloned().collect(),
            threshold: CRISIS_THRESHOLD,
        }
    }

    /// Score text and return the verdict with its audit trail
    pub fn score(&self, text: &str) -> CrisisVerdict {
        let clean = text.trim().to_lowercase();
        if clean.is_empty() {
            return CrisisVerdict::clear();
        }

        let words: Vec<&str> = clean.split_whitespace().collect();
        let word_count = words.len();
        let mut signals = Vec::new();

        // Part A: what is said
        for flag in &self.red_flags {
            if clean.contains(flag.as_str()) {
                signals.push(WeightedSignal {
                    signal: CrisisSignal::RedFlag(flag.clone()),
                    weight: CRISIS_WEIGHT_RED_FLAG,
                });
            }
        }
        for phrase in &self.warnings {
            if clean.contains(phrase.as_str()) {
                signals.push(WeightedSignal {
                    signal: CrisisSignal::Warning(phrase.clone()),
                    weight: CRISIS_WEIGHT_WARNING,
                });
            }
        }

        // Part B: how it is said
        if word_count > RUN_ON_MIN_WORDS && !clean.contains('.') && !clean.contains(',') {
            signals.push(WeightedSignal {
                signal: CrisisSignal::RunOn,
                weight: CRISIS_WEIGHT_RUN_ON,
            });
        }
        if text.contains("!!!") || text.contains("???") {
            signals.push(WeightedSignal {
                signal: CrisisSignal::FranticPunctuation,
                weight: CRISIS_WEIGHT_FRANTIC,
            });
        }
        if word_count < FRAGMENT_MAX_WORDS
            && words.iter().any(|w| self.despair_words.contains(strip_punctuation(w)))
        {
            signals.push(WeightedSignal {
                signal: CrisisSignal::HeavyFragment,
                weight: CRISIS_WEIGHT_HEAVY_FRAGMENT,
            });
        }

        for s in &signals {
            debug!(signal = %s.signal, weight = s.weight, "crisis signal");
        }

        let verdict = CrisisVerdict::from_signals(signals, self.threshold);
        if verdict.triggered {
            info!(score = verdict.score, "crisis threshold reached");
        } else {
            debug!(score = verdict.score, "crisis score below threshold");
        }
        verdict
    }

    /// Just the boolean verdict
    pub fn is_crisis(&self, text: &str) -> bool {
        self.score(text).triggered
    }
}

fn dedup(phrases: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    phrases
        .iter()
        .filter(|p| seen.insert(p.as_str()))
        .cloned()
        .collect()
}

/// Trim surrounding punctuation so "done." counts as "done"
fn strip_punctuation(token: &str) -> &str {
    token.trim_matches(|c: char| c.is_ascii_punctuation() && c != '\'')
}

// =============================================================================
// TESTS
// =============================================================================
