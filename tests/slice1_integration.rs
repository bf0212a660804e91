//! Integration tests for Slice 1
//!
//! Tests the full path: text → intent + intensity + polarity → atmosphere

use innerverse::core::{
    map_atmosphere, AffectEngine, IntensityModulator, IntentClassifier, Lexicon, LexiconPolarity,
    MemoryHistoryStore, MemoryThermalStore, PolaritySource,
};
use innerverse::error::PolarityError;
use innerverse::types::{AtmosphereRule, AtmosphereState, IntentLabel, ProcessOutcome, TurnReport};

struct FixedPolarity(f64);

impl PolaritySource for FixedPolarity {
    fn polarity(&self, _text: &str) -> Result<f64, PolarityError> {
        Ok(self.0)
    }
}

fn engine(polarity: f64) -> AffectEngine {
    AffectEngine::new(
        Lexicon::default(),
        Box::new(FixedPolarity(polarity)),
        Box::new(MemoryThermalStore::new()),
        Box::new(MemoryHistoryStore::new()),
    )
}

fn report(outcome: ProcessOutcome) -> TurnReport {
    match outcome {
        ProcessOutcome::Analyzed(r) => r,
        other => panic!("expected analyzed turn, got {:?}", other),
    }
}

/// Test the full slice 1 path
#[test]
fn test_full_slice_path() {
    let engine = AffectEngine::in_memory();
    let r = report(engine.process("Today was a wonderful day at the beach."));

    assert_eq!(r.intent, Some(IntentLabel::Joy));
    assert_eq!(r.atmosphere, AtmosphereState::RadiantSun);
    assert!(r.score > 0.0);
    assert!((-1.0..=1.0).contains(&r.score));
    assert!(r.companion.is_some());
}

/// Classifier and modulator agree with the engine's own decision
#[test]
fn test_components_compose() {
    let classifier = IntentClassifier::default();
    let modulator = IntensityModulator::default();
    let text = "I'm totally overwhelmed with work";

    let intent = classifier.classify(text);
    let intensity = modulator.intensity(text);
    assert_eq!(intent, Some(IntentLabel::Overwhelmed));
    assert_eq!(intensity, 2.0);

    let (state, rule) = map_atmosphere(0.0, intent, intensity);
    assert_eq!(state, AtmosphereState::Thunderstorm);
    assert_eq!(rule, AtmosphereRule::R103_INTENSE_ANGER_OVERWHELM);

    let r = report(engine(0.0).process(text));
    assert_eq!(r.atmosphere, state);
}

#[test]
fn test_positive_intent_beats_negative_polarity() {
    let r = report(engine(-0.9).process("thanks for being here"));
    assert_eq!(r.intent, Some(IntentLabel::Gratitude));
    assert_eq!(r.atmosphere, AtmosphereState::RadiantSun);
}

#[test]
fn test_anxiety_is_always_foggy() {
    let r = report(engine(0.9).process("I'm worried about the exam"));
    assert_eq!(r.intent, Some(IntentLabel::Anxiety));
    assert_eq!(r.atmosphere, AtmosphereState::FoggyMist);
}

#[test]
fn test_sadness_is_rain() {
    let r = report(engine(0.0).process("I feel lonely tonight"));
    assert_eq!(r.intent, Some(IntentLabel::Sadness));
    assert_eq!(r.atmosphere, AtmosphereState::SteadyRain);
}

#[test]
fn test_no_intent_uses_polarity_buckets() {
    let cases = [
        (0.8, AtmosphereState::RadiantSun),
        (0.3, AtmosphereState::ClearSkies),
        (0.0, AtmosphereState::FoggyMist),
        (-0.3, AtmosphereState::SteadyRain),
        (-0.8, AtmosphereState::Thunderstorm),
    ];
    for (polarity, expected) in cases {
        let r = report(engine(polarity).process("the train left at nine"));
        assert_eq!(r.intent, None);
        assert_eq!(r.atmosphere, expected, "polarity {}", polarity);
    }
}

#[test]
fn test_low_intensity_softens() {
    // 0.15 alone is clear skies; "kinda" halves it into the neutral band
    let r = report(engine(0.15).process("decent afternoon"));
    assert_eq!(r.atmosphere, AtmosphereState::ClearSkies);

    let r = report(engine(0.15).process("kinda decent afternoon"));
    assert_eq!(r.atmosphere, AtmosphereState::FoggyMist);
    assert_eq!(r.trace.unwrap().intensity, 0.5);
}

#[test]
fn test_exclamations_amplify() {
    let r = report(engine(-0.4).process("the printer jammed again!!!"));
    assert_eq!(r.score, -0.6);
    assert_eq!(r.atmosphere, AtmosphereState::Thunderstorm);
}

#[test]
fn test_lexicon_polarity_end_to_end() {
    let source = LexiconPolarity::new();
    let good = source.polarity("what a great and happy morning").unwrap();
    let bad = source.polarity("a terrible awful morning").unwrap();
    assert!(good > 0.5);
    assert!(bad < -0.5);
}

#[test]
fn test_same_text_same_result() {
    let a = report(engine(0.2).process("a slow Sunday"));
    let b = report(engine(0.2).process("a slow Sunday"));
    assert_eq!(a.atmosphere, b.atmosphere);
    assert_eq!(a.companion, b.companion);
}

#[test]
fn test_qualifier_inside_a_word_still_intensifies() {
    // "so" sits inside "something"
    let r = report(engine(0.0).process("I'm upset about something"));
    assert_eq!(r.intent, Some(IntentLabel::Anger));
    assert_eq!(r.atmosphere, AtmosphereState::Thunderstorm);
    let trace = r.trace.unwrap();
    assert_eq!(trace.intensity, 1.5);
    assert_eq!(trace.rule, AtmosphereRule::R103_INTENSE_ANGER_OVERWHELM);
}
