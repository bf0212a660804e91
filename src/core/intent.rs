//! Intent classifier and intensity modulator
//!
//! Intent: first category (table order) with any phrase as a substring.
//! Intensity: first tier (high → medium → low) with any qualifier as a substring.

use tracing::debug;

use crate::core::lexicon::{IntensityTier, IntentCategory, Lexicon};
use crate::types::IntentLabel;

/// Factor when no qualifier is present
pub const DEFAULT_INTENSITY: f64 = 1.0;

/// Maps text to at most one intent
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    categories: Vec<IntentCategory>,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new(&Lexicon::default())
    }
}

impl IntentClassifier {
    pub fn new(lexicon: &Lexicon) -> Self {
        Self {
            categories: lexicon.intents.clone(),
        }
    }

    /// Classify text; earlier-declared categories win ties
    pub fn classify(&self, text: &str) -> Option<IntentLabel> {
        let clean = text.trim().to_lowercase();
        if clean.is_empty() {
            return None;
        }

        let hit = self
            .categories
            .iter()
            .find(|category| category.phrases.iter().any(|p| clean.contains(p.as_str())))
            .map(|category| category.label);

        debug!(intent = ?hit, "intent classified");
        hit
    }
}

/// Maps qualifier words to a volume factor
#[derive(Debug, Clone)]
pub struct IntensityModulator {
    tiers: Vec<IntensityTier>,
}

impl Default for IntensityModulator {
    fn default() -> Self {
        Self::new(&Lexicon::default())
    }
}

impl IntensityModulator {
    pub fn new(lexicon: &Lexicon) -> Self {
        Self {
            tiers: lexicon.intensity.clone(),
        }
    }

    /// Factor of the first tier with a substring match, never combined
    pub fn intensity(&self, text: &str) -> f64 {
        let lower = text.to_lowercase();
        if lower.trim().is_empty() {
            return DEFAULT_INTENSITY;
        }

        self.tiers
            .iter()
            .find(|tier| tier.qualifiers.iter().any(|q| lower.contains(q.as_str())))
            .map(|tier| tier.factor)
            .unwrap_or(DEFAULT_INTENSITY)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_has_no_intent() {
        let classifier = IntentClassifier::default();
        assert_eq!(classifier.classify(""), None);
        assert_eq!(classifier.classify("   \n\t"), None);
    }

    #[test]
    fn test_basic_categories() {
        let classifier = IntentClassifier::default();
        assert_eq!(classifier.classify("I'm so happy today"), Some(IntentLabel::Joy));
        assert_eq!(classifier.classify("I am FURIOUS at them"), Some(IntentLabel::Anger));
        assert_eq!(classifier.classify("been crying all night"), Some(IntentLabel::Sadness));
        assert_eq!(classifier.classify("I'm worried about tomorrow"), Some(IntentLabel::Anxiety));
        assert_eq!(classifier.classify("too much on my plate"), Some(IntentLabel::Overwhelmed));
        assert_eq!(classifier.classify("I'm confused by this"), Some(IntentLabel::Confusion));
        assert_eq!(classifier.classify("thanks for listening"), Some(IntentLabel::Gratitude));
        assert_eq!(classifier.classify("can't wait for the trip"), Some(IntentLabel::Excitement));
    }

    #[test]
    fn test_no_match() {
        let classifier = IntentClassifier::default();
        assert_eq!(classifier.classify("The bus was on time."), None);
    }

    #[test]
    fn test_earlier_category_wins_ties() {
        let classifier = IntentClassifier::default();
        // ANGER ("angry") and SADNESS ("crying") both present; ANGER is declared first
        assert_eq!(classifier.classify("crying and angry"), Some(IntentLabel::Anger));
        // JOY ("amazing") beats EXCITEMENT ("can't wait")
        assert_eq!(classifier.classify("can't wait, this is amazing"), Some(IntentLabel::Joy));
    }

    #[test]
    fn test_injected_order_is_respected() {
        let mut lexicon = Lexicon::default();
        lexicon.intents.reverse();
        let classifier = IntentClassifier::new(&lexicon);
        assert_eq!(classifier.classify("crying and angry"), Some(IntentLabel::Sadness));
    }

    #[test]
    fn test_intensity_tiers() {
        let modulator = IntensityModulator::default();
        assert_eq!(modulator.intensity("this is extremely annoying"), 2.0);
        assert_eq!(modulator.intensity("I'm very tired"), 1.5);
        assert_eq!(modulator.intensity("kinda meh"), 0.5);
        assert_eq!(modulator.intensity("just a day"), 1.0);
        assert_eq!(modulator.intensity(""), 1.0);
    }

    #[test]
    fn test_intensity_high_beats_lower_tiers() {
        let modulator = IntensityModulator::default();
        // "totally" (high), "really" (medium), "a little" (low)
        assert_eq!(modulator.intensity("a little really totally"), 2.0);
        assert_eq!(modulator.intensity("a little but really"), 1.5);
    }

    #[test]
    fn test_intensity_matches_inside_words() {
        let modulator = IntensityModulator::default();
        // "so" inside "something"/"also" still counts
        assert_eq!(modulator.intensity("I'm upset about something"), 1.5);
        assert_eq!(modulator.intensity("also tired"), 1.5);
        // "somewhat" carries "so", and medium is checked before low
        assert_eq!(modulator.intensity("somewhat tired"), 1.5);
        assert_eq!(modulator.intensity("I can't handle it"), 2.0);
    }
}
