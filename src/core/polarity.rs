//! Polarity source: continuous sentiment in [-1.0, 1.0]
//!
//! The engine treats polarity as an external collaborator behind
//! [`PolaritySource`]. [`LexiconPolarity`] is the built-in word-list scorer.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::PolarityError;
use crate::POLARITY_AMPLIFIER;

lazy_static! {
    static ref RE_TOKEN: Regex = Regex::new(r"[a-z][a-z']*").unwrap();
}

/// Anything that can rate the sentiment of text
pub trait PolaritySource: Send + Sync {
    /// Raw polarity, expected in [-1.0, 1.0]
    fn polarity(&self, text: &str) -> Result<f64, PolarityError>;
}

/// (word, polarity)
const POLARITY_WORDS: &[(&str, f64)] = &[
    // Positive
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("love", 0.5),
    ("amazing", 0.6),
    ("wonderful", 1.0),
    ("awesome", 1.0),
    ("excellent", 1.0),
    ("fantastic", 0.4),
    ("beautiful", 0.85),
    ("calm", 0.3),
    ("nice", 0.6),
    ("glad", 0.5),
    ("grateful", 0.6),
    ("thankful", 0.6),
    ("excited", 0.4),
    ("hopeful", 0.5),
    ("peaceful", 0.5),
    ("proud", 0.8),
    ("fun", 0.3),
    ("best", 1.0),
    ("better", 0.5),
    ("fine", 0.4),
    ("okay", 0.5),
    ("relaxed", 0.4),
    ("blessed", 0.5),
    ("lovely", 0.5),
    ("pleased", 0.5),
    // Negative
    ("bad", -0.7),
    ("sad", -0.5),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("horrible", -1.0),
    ("worst", -1.0),
    ("worse", -0.4),
    ("angry", -0.5),
    ("furious", -0.8),
    ("hate", -0.8),
    ("upset", -0.5),
    ("depressed", -0.6),
    ("lonely", -0.5),
    ("tired", -0.4),
    ("exhausted", -0.6),
    ("worried", -0.4),
    ("anxious", -0.4),
    ("scared", -0.5),
    ("afraid", -0.6),
    ("nervous", -0.3),
    ("hurt", -0.5),
    ("hurting", -0.5),
    ("miserable", -1.0),
    ("stressed", -0.5),
    ("frustrated", -0.6),
    ("annoyed", -0.4),
    ("pain", -0.6),
    ("broken", -0.6),
    ("hopeless", -0.9),
    ("unbearable", -1.0),
    ("difficult", -0.5),
    ("hard", -0.3),
    ("wrong", -0.5),
    ("overwhelmed", -0.6),
    ("confused", -0.3),
    ("crying", -0.5),
    ("disrespected", -0.5),
];

/// (word, multiplier) applied to the next rated word
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("so", 1.3),
    ("extremely", 1.5),
    ("totally", 1.4),
    ("incredibly", 1.5),
    ("quite", 1.1),
    ("slightly", 0.5),
    ("somewhat", 0.7),
    ("kinda", 0.7),
];

const NEGATIONS: &[&str] = &["not", "never", "no", "don't", "isn't", "wasn't", "can't", "didn't", "aren't"];

/// Flipped polarity is damped rather than mirrored ("not great" is mildly negative)
const NEGATION_FACTOR: f64 = -0.5;

/// Average of rated words, with intensifiers and negation on the following word
#[derive(Debug, Default, Clone)]
pub struct LexiconPolarity;

impl LexiconPolarity {
    pub fn new() -> Self {
        Self
    }

    fn lookup(table: &[(&str, f64)], word: &str) -> Option<f64> {
        table.iter().find(|(w, _)| *w == word).map(|(_, v)| *v)
    }
}

impl PolaritySource for LexiconPolarity {
    fn polarity(&self, text: &str) -> Result<f64, PolarityError> {
        let lower = text.to_lowercase();
        let mut scores = Vec::new();
        let mut multiplier = 1.0;
        let mut negate = false;

        for token in RE_TOKEN.find_iter(&lower).map(|m| m.as_str()) {
            if NEGATIONS.contains(&token) {
                negate = true;
                continue;
            }
            if let Some(m) = Self::lookup(INTENSIFIERS, token) {
                multiplier *= m;
                continue;
            }
            if let Some(value) = Self::lookup(POLARITY_WORDS, token) {
                let mut value = value * multiplier;
                if negate {
                    value *= NEGATION_FACTOR;
                }
                scores.push(value.clamp(-1.0, 1.0));
            }
            multiplier = 1.0;
            negate = false;
        }

        if scores.is_empty() {
            return Ok(0.0);
        }
        Ok(scores.iter().sum::<f64>() / scores.len() as f64)
    }
}

/// All cased characters uppercase, with at least one of them
pub fn is_shouting(text: &str) -> bool {
    let mut has_cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

/// Shouting or `!!!` multiplies by 1.5, then clamp to [-1, 1]
pub fn amplify(raw: f64, text: &str) -> f64 {
    let boosted = if is_shouting(text) || text.contains("!!!") {
        raw * POLARITY_AMPLIFIER
    } else {
        raw
    };
    boosted.clamp(-1.0, 1.0)
}

/// Reject values outside the contract
pub fn validate(raw: f64) -> Result<f64, PolarityError> {
    if raw.is_finite() && (-1.0..=1.0).contains(&raw) {
        Ok(raw)
    } else {
        Err(PolarityError::InvalidValue(raw))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_text() {
        let source = LexiconPolarity::new();
        assert_eq!(source.polarity("The bus arrived at noon").unwrap(), 0.0);
        assert_eq!(source.polarity("").unwrap(), 0.0);
    }

    #[test]
    fn test_positive_and_negative() {
        let source = LexiconPolarity::new();
        assert!(source.polarity("What a wonderful day").unwrap() > 0.5);
        assert!(source.polarity("This is terrible").unwrap() < -0.5);
    }

    #[test]
    fn test_negation_damps_and_flips() {
        let source = LexiconPolarity::new();
        let plain = source.polarity("good").unwrap();
        let negated = source.polarity("not good").unwrap();
        assert!(plain > 0.0);
        assert!(negated < 0.0);
        assert!(negated.abs() < plain);
    }

    #[test]
    fn test_intensifier_strengthens() {
        let source = LexiconPolarity::new();
        let plain = source.polarity("sad").unwrap();
        let intense = source.polarity("very sad").unwrap();
        assert!(intense < plain);
    }

    #[test]
    fn test_always_in_range() {
        let source = LexiconPolarity::new();
        for text in ["extremely incredibly wonderful", "so so so awful", "best worst"] {
            let p = source.polarity(text).unwrap();
            assert!((-1.0..=1.0).contains(&p), "{} → {}", text, p);
        }
    }

    #[test]
    fn test_is_shouting() {
        assert!(is_shouting("I AM FINE"));
        assert!(is_shouting("STOP 123!"));
        assert!(!is_shouting("I am fine"));
        assert!(!is_shouting("123 !!!"));
        assert!(!is_shouting(""));
    }

    #[test]
    fn test_amplify() {
        assert!((amplify(0.4, "THIS IS GREAT") - 0.6).abs() < 1e-9);
        assert!((amplify(-0.4, "ugh!!!") + 0.6).abs() < 1e-9);
        assert_eq!(amplify(0.8, "AMAZING"), 1.0);
        assert_eq!(amplify(-0.9, "no!!!"), -1.0);
        assert_eq!(amplify(0.4, "calm text"), 0.4);
    }

    #[test]
    fn test_validate() {
        assert_eq!(validate(0.5), Ok(0.5));
        assert!(validate(f64::NAN).is_err());
        assert!(validate(1.5).is_err());
        assert!(validate(f64::NEG_INFINITY).is_err());
    }
}
