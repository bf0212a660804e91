//! Phrase tables: intent triggers, intensity qualifiers, crisis vocabulary
//!
//! Tables are versioned configuration data. Order matters: the first intent
//! category with a hit wins and intensity tiers are checked top to bottom.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::types::IntentLabel;

/// (intent, trigger phrases) in priority order
const INTENT_TABLE: &[(IntentLabel, &[&str])] = &[
    (
        IntentLabel::Joy,
        &["i'm so happy", "feeling great", "love this", "i'm excited", "amazing", "wonderful"],
    ),
    (
        IntentLabel::Anger,
        &[
            "i'm frustrated",
            "i'm pissed",
            "felt disrespected",
            "i hate",
            "upset",
            "i'm upset",
            "angry",
            "furious",
        ],
    ),
    (
        IntentLabel::Sadness,
        &[
            "i'm really sad",
            "i'm hurting",
            "this is hard for me",
            "i feel lonely",
            "depressed",
            "crying",
        ],
    ),
    (
        IntentLabel::Anxiety,
        &[
            "i'm anxious",
            "i'm really anxious",
            "i'm worried",
            "my anxiety",
            "freaks me out",
            "nervous",
            "scared",
        ],
    ),
    (
        IntentLabel::Overwhelmed,
        &[
            "i'm totally overwhelmed",
            "too much on my plate",
            "can't handle all of this",
            "can't cope",
            "drowning",
        ],
    ),
    (
        IntentLabel::Confusion,
        &["i'm confused", "i don't get it", "need some clarity", "don't understand"],
    ),
    (
        IntentLabel::Gratitude,
        &["i really appreciate", "thanks for", "i'm grateful", "thankful", "blessed"],
    ),
    (
        IntentLabel::Excitement,
        &["i'm so pumped", "can't wait", "so excited", "hyped"],
    ),
];

/// (factor, qualifiers), highest tier first
const INTENSITY_TABLE: &[(f64, &[&str])] = &[
    (2.0, &["extremely", "totally", "pissed off", "can't handle", "unbearable"]),
    (1.5, &["really", "very", "so", "quite"]),
    (0.5, &["kinda", "sort of", "a little", "somewhat"]),
];

const RED_FLAGS: &[&str] = &[
    // Suicidal ideation
    "kill myself",
    "end my life",
    "want to die",
    "suicide",
    "suicidal",
    "end it all",
    "better off dead",
    "no reason to live",
    "wish i was dead",
    // Self-harm
    "hurt myself",
    "self harm",
    "cut myself",
    "harm myself",
    // Plans
    "have a plan",
    "going to kill",
    "tonight is the night",
    // Desperation
    "can't go on",
    "no way out",
    "give up on life",
];

const WARNING_PHRASES: &[&str] = &[
    "no point",
    "what's the point",
    "tired of living",
    "can't take it anymore",
    "want it to end",
    "everyone better without me",
];

const DESPAIR_WORDS: &[&str] = &["no", "never", "done", "stop", "end", "nothing", "nowhere"];

/// Trigger phrases for one intent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentCategory {
    pub label: IntentLabel,
    pub phrases: Vec<String>,
}

/// Qualifiers sharing one volume factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntensityTier {
    pub factor: f64,
    pub qualifiers: Vec<String>,
}

/// All phrase tables the engine consults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lexicon {
    /// Priority order; earlier categories win ties
    pub intents: Vec<IntentCategory>,
    /// Checked in order; first tier with a match wins
    pub intensity: Vec<IntensityTier>,
    pub red_flags: Vec<String>,
    pub warnings: Vec<String>,
    pub despair_words: Vec<String>,
}

fn owned(phrases: &[&str]) -> Vec<String> {
    phrases.iter().map(|p| p.to_string()).collect()
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            intents: INTENT_TABLE
                .iter()
                .map(|(label, phrases)| IntentCategory {
                    label: *label,
                    phrases: owned(phrases),
                })
                .collect(),
            intensity: INTENSITY_TABLE
                .iter()
                .map(|(factor, qualifiers)| IntensityTier {
                    factor: *factor,
                    qualifiers: owned(qualifiers),
                })
                .collect(),
            red_flags: owned(RED_FLAGS),
            warnings: owned(WARNING_PHRASES),
            despair_words: owned(DESPAIR_WORDS),
        }
    }
}

impl Lexicon {
    /// SHA-256 over every table in order, hex encoded
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for category in &self.intents {
            hasher.update(category.label.as_str().as_bytes());
            hash_list(&mut hasher, &category.phrases);
        }
        for tier in &self.intensity {
            hasher.update(tier.factor.to_le_bytes());
            hash_list(&mut hasher, &tier.qualifiers);
        }
        hash_list(&mut hasher, &self.red_flags);
        hash_list(&mut hasher, &self.warnings);
        hash_list(&mut hasher, &self.despair_words);
        hasher
            .finalize()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }

    /// Short form of the fingerprint for display
    pub fn version_tag(&self) -> String {
        self.fingerprint()[..12].to_string()
    }
}

/// Length-prefix each entry so ["ab","c"] and ["a","bc"] hash differently
fn hash_list(hasher: &mut Sha256, items: &[String]) {
    hasher.update((items.len() as u64).to_le_bytes());
    for item in items {
        hasher.update((item.len() as u64).to_le_bytes());
        hasher.update(item.as_bytes());
    }
}
