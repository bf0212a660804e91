//! GAD-7 and PHQ-9 scoring
//!
//! Pure scoring over completed answer lists. Each answer is 0..=3:
//! 0 not at all, 1 several days, 2 more than half the days, 3 nearly every day.

use tracing::{info, warn};

use crate::error::ScreeningError;
use crate::types::{Instrument, SafetyAlert, ScreeningResult};

pub const ANSWER_SCALE: [&str; 4] = [
    "Not at all",
    "Several days",
    "More than half the days",
    "Nearly every day",
];

pub const GAD7_ITEMS: [&str; 7] = [
    "Feeling nervous, anxious, or on edge",
    "Not being able to stop or control worrying",
    "Worrying too much about different things",
    "Trouble relaxing",
    "Being so restless that it is hard to sit still",
    "Becoming easily annoyed or irritable",
    "Feeling afraid as if something awful might happen",
];

pub const PHQ9_ITEMS: [&str; 9] = [
    "Little interest or pleasure in doing things",
    "Feeling down, depressed, or hopeless",
    "Trouble falling or staying asleep, or sleeping too much",
    "Feeling tired or having little energy",
    "Poor appetite or overeating",
    "Feeling bad about yourself, or that you are a failure",
    "Trouble concentrating on things (e.g., reading)",
    "Moving or speaking slowly, or being fidgety/restless",
    "Thoughts that you would be better off dead, or hurting yourself",
];

/// Totals at or above this get a follow-up recommendation
pub const FOLLOW_UP_SCORE: u32 = 10;
/// PHQ-9 totals at or above this are urgent
pub const PHQ9_URGENT_SCORE: u32 = 20;

const GAD7_RESOURCES: [&str; 2] = [
    "SAMHSA National Helpline: 1-800-662-4357 (24/7)",
    "Anxiety & Depression Association: www.adaa.org",
];

const PHQ9_RESOURCES: [&str; 5] = [
    "Call or Text: 988 (Suicide & Crisis Lifeline)",
    "Text 'HELLO' to: 741741 (Crisis Text Line)",
    "Website: https://988lifeline.org",
    "Online Chat: https://988lifeline.org/chat/",
    "SAMHSA Helpline: 1-800-662-4357 (treatment referral & information)",
];

const SUICIDAL_THOUGHTS_RESOURCES: [&str; 2] = [
    "https://988lifeline.org/help-yourself/suicidal-thoughts/",
    "If you are in immediate danger, call 911 or go to your nearest emergency room",
];

const URGENT_RESOURCE: &str = "Severe depression: please connect to the 988 center immediately or visit an emergency room";

/// (upper bound inclusive, label, interpretation)
const GAD7_BANDS: [(u32, &str, &str); 4] = [
    (4, "Minimal Anxiety", "Your anxiety levels appear to be in the normal range."),
    (9, "Mild Anxiety", "You may be experiencing mild anxiety. Consider stress management techniques."),
    (14, "Moderate Anxiety", "You're experiencing moderate anxiety. Consider speaking with a healthcare provider."),
    (21, "Severe Anxiety", "You're experiencing severe anxiety. Please consult with a mental health professional."),
];

const PHQ9_BANDS: [(u32, &str, &str); 5] = [
    (4, "Minimal Depression", "Your depression symptoms appear to be minimal."),
    (9, "Mild Depression", "You may be experiencing mild depression. Monitor your symptoms."),
    (14, "Moderate Depression", "You're experiencing moderate depression. Consider professional support."),
    (19, "Moderately Severe Depression", "You're experiencing moderately severe depression. Professional help is recommended."),
    (27, "Severe Depression", "You're experiencing severe depression. Please seek immediate professional help."),
];

/// Item wording in answer order
pub fn items(instrument: Instrument) -> &'static [&'static str] {
    match instrument {
        Instrument::Gad7 => &GAD7_ITEMS,
        Instrument::Phq9 => &PHQ9_ITEMS,
    }
}

/// Check count and range, return the total
fn validate(instrument: Instrument, answers: &[u8]) -> Result<u32, ScreeningError> {
    if answers.len() != instrument.item_count() {
        return Err(ScreeningError::WrongAnswerCount {
            expected: instrument.item_count(),
            got: answers.len(),
        });
    }
    if let Some((i, &value)) = answers.iter().enumerate().find(|(_, &v)| v > 3) {
        return Err(ScreeningError::AnswerOutOfRange { item: i + 1, value });
    }
    Ok(answers.iter().map(|&a| a as u32).sum())
}

fn band(bands: &[(u32, &'static str, &'static str)], score: u32) -> (&'static str, &'static str) {
    bands
        .iter()
        .find(|(upper, _, _)| score <= *upper)
        .or_else(|| bands.last())
        .map(|(_, label, text)| (*label, *text))
        .unwrap_or(("", ""))
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// 7-item anxiety screening
pub fn score_gad7(answers: &[u8]) -> Result<ScreeningResult, ScreeningError> {
    let score = validate(Instrument::Gad7, answers)?;
    let (severity, interpretation) = band(&GAD7_BANDS, score);

    let follow_up = score >= FOLLOW_UP_SCORE;
    info!(instrument = "GAD-7", score, severity, "screening scored");

    Ok(ScreeningResult {
        instrument: Instrument::Gad7,
        score,
        max_score: Instrument::Gad7.max_score(),
        severity: severity.to_string(),
        interpretation: interpretation.to_string(),
        alert: follow_up.then_some(SafetyAlert::Recommendation),
        urgent: false,
        resources: if follow_up { owned(&GAD7_RESOURCES) } else { Vec::new() },
    })
}

/// 9-item depression screening with safety overrides
///
/// - item 9 above 0: critical alert plus the suicidal-thoughts resources
/// - total >= 10: recommendation
/// - total >= 20: urgent
pub fn score_phq9(answers: &[u8]) -> Result<ScreeningResult, ScreeningError> {
    let score = validate(Instrument::Phq9, answers)?;
    let (severity, interpretation) = band(&PHQ9_BANDS, score);

    let self_harm = answers[8] > 0;
    let alert = if self_harm {
        Some(SafetyAlert::Critical)
    } else if score >= FOLLOW_UP_SCORE {
        Some(SafetyAlert::Recommendation)
    } else {
        None
    };
    let urgent = score >= PHQ9_URGENT_SCORE;

    let mut resources = Vec::new();
    if alert.is_some() {
        resources.extend(owned(&PHQ9_RESOURCES));
    }
    if self_harm {
        resources.extend(owned(&SUICIDAL_THOUGHTS_RESOURCES));
    }
    if urgent {
        resources.push(URGENT_RESOURCE.to_string());
    }

    if self_harm {
        warn!(instrument = "PHQ-9", score, "self-harm item endorsed");
    }
    info!(instrument = "PHQ-9", score, severity, urgent, "screening scored");

    Ok(ScreeningResult {
        instrument: Instrument::Phq9,
        score,
        max_score: Instrument::Phq9.max_score(),
        severity: severity.to_string(),
        interpretation: interpretation.to_string(),
        alert,
        urgent,
        resources,
    })
}

/// Score by instrument
pub fn score(instrument: Instrument, answers: &[u8]) -> Result<ScreeningResult, ScreeningError> {
    match instrument {
        Instrument::Gad7 => score_gad7(answers),
        Instrument::Phq9 => score_phq9(answers),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_gad7_bands() {
        assert_eq!(score_gad7(&[0; 7]).unwrap().severity, "Minimal Anxiety");
        assert_eq!(score_gad7(&[1, 1, 1, 1, 1, 0, 0]).unwrap().severity, "Mild Anxiety");
        assert_eq!(score_gad7(&[2, 2, 2, 2, 2, 0, 0]).unwrap().severity, "Moderate Anxiety");
        let severe = score_gad7(&[3; 7]).unwrap();
        assert_eq!(severe.severity, "Severe Anxiety");
        assert_eq!(severe.score, 21);
        assert_eq!(severe.max_score, 21);
    }

    #[test]
    fn test_gad7_follow_up_at_ten() {
        let nine = score_gad7(&[3, 3, 3, 0, 0, 0, 0]).unwrap();
        assert_eq!(nine.alert, None);
        assert!(nine.resources.is_empty());

        let ten = score_gad7(&[3, 3, 3, 1, 0, 0, 0]).unwrap();
        assert_eq!(ten.alert, Some(SafetyAlert::Recommendation));
        assert_eq!(ten.resources.len(), 2);
        assert!(!ten.urgent);
    }

    #[test]
    fn test_phq9_bands() {
        let cases: [(u32, &str); 5] = [
            (4, "Minimal Depression"),
            (9, "Mild Depression"),
            (14, "Moderate Depression"),
            (19, "Moderately Severe Depression"),
            (24, "Severe Depression"),
        ];
        for (total, label) in cases {
            // spread the total over items 1-8, leave item 9 at 0
            let mut answers = [0u8; 9];
            let mut left = total;
            for a in answers.iter_mut().take(8) {
                let v = left.min(3);
                *a = v as u8;
                left -= v;
            }
            let result = score_phq9(&answers).unwrap();
            assert_eq!(result.score, total);
            assert_eq!(result.severity, label);
        }
    }

    #[test]
    fn test_phq9_item_nine_is_critical_at_any_total() {
        let mut answers = [0u8; 9];
        answers[8] = 1;
        let result = score_phq9(&answers).unwrap();
        assert_eq!(result.score, 1);
        assert_eq!(result.severity, "Minimal Depression");
        assert_eq!(result.alert, Some(SafetyAlert::Critical));
        assert!(result
            .resources
            .iter()
            .any(|r| r.contains("suicidal-thoughts")));
    }

    #[test]
    fn test_phq9_recommendation_without_item_nine() {
        let result = score_phq9(&[2, 2, 2, 2, 2, 0, 0, 0, 0]).unwrap();
        assert_eq!(result.alert, Some(SafetyAlert::Recommendation));
        assert!(!result.resources.iter().any(|r| r.contains("suicidal-thoughts")));
        assert!(!result.urgent);
    }

    #[test]
    fn test_phq9_urgent() {
        let result = score_phq9(&[3, 3, 3, 3, 3, 3, 2, 0, 0]).unwrap();
        assert_eq!(result.score, 20);
        assert!(result.urgent);
        assert_eq!(result.alert, Some(SafetyAlert::Recommendation));
        assert!(result.needs_follow_up());
    }

    #[test]
    fn test_phq9_minimal_has_no_alert() {
        let result = score_phq9(&[1, 1, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(result.alert, None);
        assert!(result.resources.is_empty());
    }

    #[test]
    fn test_wrong_answer_count() {
        assert_eq!(
            score_gad7(&[0; 6]),
            Err(ScreeningError::WrongAnswerCount { expected: 7, got: 6 })
        );
        assert_eq!(
            score_phq9(&[0; 10]),
            Err(ScreeningError::WrongAnswerCount { expected: 9, got: 10 })
        );
    }

    #[test]
    fn test_answer_out_of_range() {
        assert_eq!(
            score_gad7(&[0, 0, 4, 0, 0, 0, 0]),
            Err(ScreeningError::AnswerOutOfRange { item: 3, value: 4 })
        );
    }

    #[test]
    fn test_items_match_instruments() {
        for instrument in [Instrument::Gad7, Instrument::Phq9] {
            assert_eq!(items(instrument).len(), instrument.item_count());
        }
        // the safety item is last, so answers[8] lines up with it
        assert!(items(Instrument::Phq9)[8].contains("better off dead"));
        assert_eq!(
            score(Instrument::Gad7, &[0; 7]).unwrap().instrument,
            Instrument::Gad7
        );
    }
}
