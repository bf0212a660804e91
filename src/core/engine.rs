//! Affect engine: one turn from raw text to response
//!
//! Order per turn:
//! 1. Crisis scorer (always, short-circuits when triggered)
//! 2. Empty input → neutral response, nothing mutated
//! 3. Polarity (amplified, 0.0 on failure), intent, intensity
//! 4. Atmosphere mapping
//! 5. Heat transition, history append, pattern trigger

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::core::atmosphere::map_atmosphere;
use crate::core::companion::{companion_response, suggest_skill, variant_for};
use crate::core::crisis::CrisisScorer;
use crate::core::intent::{IntensityModulator, IntentClassifier};
use crate::core::lexicon::Lexicon;
use crate::core::pattern::{heavy_streak, should_suggest_screening, summarize};
use crate::core::polarity::{self, LexiconPolarity, PolaritySource};
use crate::core::storage::{
    HistoryStore, JsonHistoryStore, JsonThermalStore, MemoryHistoryStore, MemoryThermalStore,
    ThermalStore,
};
use crate::core::thermal::ThermalMachine;
use crate::error::StoreError;
use crate::types::{
    AtmosphereRule, CrisisReport, HistoryRecord, HistorySummary, ProcessOutcome, TurnReport,
    TurnTrace,
};
use crate::{SCREENING_WINDOW, SNIPPET_CHARS};

/// Classifies turns and owns the mutable heat level
pub struct AffectEngine {
    lexicon_version: String,
    crisis: CrisisScorer,
    intents: IntentClassifier,
    intensity: IntensityModulator,
    polarity: Box<dyn PolaritySource>,
    thermal: ThermalMachine,
    history: Box<dyn HistoryStore>,
    store_snippets: bool,
    screening_window: usize,
}

impl AffectEngine {
    pub fn new(
        lexicon: Lexicon,
        polarity: Box<dyn PolaritySource>,
        thermal_store: Box<dyn ThermalStore>,
        history: Box<dyn HistoryStore>,
    ) -> Self {
        Self {
            lexicon_version: lexicon.version_tag(),
            crisis: CrisisScorer::new(&lexicon),
            intents: IntentClassifier::new(&lexicon),
            intensity: IntensityModulator::new(&lexicon),
            polarity,
            thermal: ThermalMachine::load(thermal_store),
            history,
            store_snippets: false,
            screening_window: SCREENING_WINDOW,
        }
    }

    /// JSON-file stores at the configured paths
    pub fn from_config(config: &EngineConfig) -> Self {
        info!(
            state_file = %config.state_file.display(),
            history_file = %config.history_file.display(),
            "engine starting"
        );
        Self::new(
            Lexicon::default(),
            Box::new(LexiconPolarity::new()),
            Box::new(JsonThermalStore::new(&config.state_file)),
            Box::new(JsonHistoryStore::new(&config.history_file)),
        )
        .with_snippets(config.store_snippets)
        .with_screening_window(config.screening_window)
    }

    /// Nothing touches disk
    pub fn in_memory() -> Self {
        Self::new(
            Lexicon::default(),
            Box::new(LexiconPolarity::new()),
            Box::new(MemoryThermalStore::new()),
            Box::new(MemoryHistoryStore::new()),
        )
    }

    pub fn with_snippets(mut self, enabled: bool) -> Self {
        self.store_snippets = enabled;
        self
    }

    pub fn with_screening_window(mut self, window: usize) -> Self {
        self.screening_window = window;
        self
    }

    pub fn lexicon_version(&self) -> &str {
        &self.lexicon_version
    }

    pub fn heat(&self) -> f64 {
        self.thermal.heat()
    }

    /// Process one turn
    pub fn process(&self, text: &str) -> ProcessOutcome {
        let verdict = self.crisis.score(text);
        if verdict.triggered {
            info!(
                score = verdict.score,
                rule = AtmosphereRule::R100_CRISIS_OVERRIDE.code(),
                "crisis path taken"
            );
            return ProcessOutcome::Crisis(CrisisReport::new(verdict));
        }

        if text.trim().is_empty() {
            debug!("empty input, neutral response");
            return ProcessOutcome::Empty(TurnReport::neutral(self.thermal.heat(), verdict.score));
        }

        let mut warnings = Vec::new();

        let raw = match self.polarity.polarity(text).and_then(polarity::validate) {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "polarity unavailable, using 0.0");
                0.0
            }
        };
        let score = polarity::amplify(raw, text);
        let intent = self.intents.classify(text);
        let intensity = self.intensity.intensity(text);

        let (atmosphere, rule) = map_atmosphere(score, intent, intensity);

        let update = self.thermal.apply(intent, score);
        warnings.extend(update.warning);

        let snippet = self.store_snippets.then(|| snippet(text));
        if let Err(e) = self.history.append(HistoryRecord::now(atmosphere, score, snippet)) {
            warn!(error = %e, "failed to append history");
            warnings.push(format!("history not saved: {}", e));
        }

        let suggest_screening = match self.history.recent(self.screening_window) {
            Ok(recent) if self.screening_window == SCREENING_WINDOW => {
                should_suggest_screening(&recent)
            }
            Ok(recent) => heavy_streak(&recent, self.screening_window),
            Err(e) => {
                warn!(error = %e, "history unreadable, skipping pattern check");
                false
            }
        };

        info!(
            score = crate::round2(score),
            intent = ?intent,
            atmosphere = %atmosphere,
            heat = update.heat,
            "turn processed"
        );

        ProcessOutcome::Analyzed(TurnReport {
            score: crate::round2(score),
            intent,
            atmosphere,
            heat_level: crate::round2(update.heat),
            suggest_screening,
            coping_skill: suggest_skill(intent, atmosphere),
            companion: Some(companion_response(atmosphere, intent, variant_for(text)).to_string()),
            warnings,
            trace: Some(TurnTrace {
                intensity,
                polarity: score,
                rule,
                thermal_rule: Some(update.rule),
                crisis_score: verdict.score,
            }),
        })
    }

    /// Heat back to 0.0; returns a warning if it could not be saved
    pub fn reset(&self) -> Option<String> {
        self.thermal.reset()
    }

    /// Last `count` records, oldest first
    pub fn history(&self, count: usize) -> Result<Vec<HistoryRecord>, StoreError> {
        self.history.recent(count)
    }

    pub fn history_summary(&self) -> Result<HistorySummary, StoreError> {
        Ok(summarize(&self.history.all()?))
    }

    /// Empty the history; returns the backup location if one was written
    pub fn clear_history(&self) -> Result<Option<PathBuf>, StoreError> {
        let backup = self.history.clear()?;
        info!(backup = ?backup, "history cleared");
        Ok(backup)
    }
}

impl std::fmt::Debug for AffectEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AffectEngine")
            .field("lexicon_version", &self.lexicon_version)
            .field("thermal", &self.thermal)
            .field("store_snippets", &self.store_snippets)
            .field("screening_window", &self.screening_window)
            .finish_non_exhaustive()
    }
}

/// First 100 chars, with `...` when cut
fn snippet(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() > SNIPPET_CHARS {
        let head: String = trimmed.chars().take(SNIPPET_CHARS).collect();
        format!("{}...", head)
    } else {
        trimmed.to_string()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::UnavailableStore;
    use crate::error::PolarityError;
    use crate::types::{AtmosphereState, CopingSkill, IntentLabel, ThermalRule};
    use pretty_assertions::assert_eq;

    struct FixedPolarity(f64);

    impl PolaritySource for FixedPolarity {
        fn polarity(&self, _text: &str) -> Result<f64, PolarityError> {
            Ok(self.0)
        }
    }

    struct BrokenPolarity;

    impl PolaritySource for BrokenPolarity {
        fn polarity(&self, _text: &str) -> Result<f64, PolarityError> {
            Err(PolarityError::Unavailable("offline".to_string()))
        }
    }

    fn engine_with(polarity: Box<dyn PolaritySource>) -> AffectEngine {
        AffectEngine::new(
            Lexicon::default(),
            polarity,
            Box::new(MemoryThermalStore::new()),
            Box::new(MemoryHistoryStore::new()),
        )
    }

    fn analyzed(outcome: ProcessOutcome) -> TurnReport {
        match outcome {
            ProcessOutcome::Analyzed(r) => r,
            other => panic!("expected analyzed turn, got {:?}", other),
        }
    }

    #[test]
    fn test_crisis_short_circuits() {
        let engine = AffectEngine::in_memory();
        let outcome = engine.process("I want to kill myself");
        assert!(outcome.is_crisis());
        assert_eq!(outcome.atmosphere(), AtmosphereState::Crisis);
        assert_eq!(engine.heat(), 0.0);
        assert!(engine.history(10).unwrap().is_empty());
    }

    #[test]
    fn test_crisis_runs_even_when_everything_else_is_broken() {
        let engine = AffectEngine::new(
            Lexicon::default(),
            Box::new(BrokenPolarity),
            Box::new(UnavailableStore),
            Box::new(UnavailableStore),
        );
        assert!(engine.process("suicide").is_crisis());
    }

    #[test]
    fn test_empty_input_is_neutral_and_mutates_nothing() {
        let engine = AffectEngine::new(
            Lexicon::default(),
            Box::new(LexiconPolarity::new()),
            Box::new(MemoryThermalStore::with_heat(0.42)),
            Box::new(MemoryHistoryStore::new()),
        );
        let outcome = engine.process("   ");
        match outcome {
            ProcessOutcome::Empty(report) => {
                assert_eq!(report.score, 0.0);
                assert_eq!(report.intent, None);
                assert_eq!(report.atmosphere, AtmosphereState::FoggyMist);
                assert_eq!(report.heat_level, 0.42);
            }
            other => panic!("expected neutral response, got {:?}", other),
        }
        assert_eq!(engine.heat(), 0.42);
        assert!(engine.history(10).unwrap().is_empty());
    }

    #[test]
    fn test_anger_then_joy_heat() {
        let engine = AffectEngine::in_memory();
        let first = analyzed(engine.process("I'm so angry at everything"));
        assert_eq!(first.intent, Some(IntentLabel::Anger));
        assert_eq!(first.heat_level, 0.95);

        let second = analyzed(engine.process("this is amazing"));
        assert_eq!(second.intent, Some(IntentLabel::Joy));
        assert_eq!(second.heat_level, 0.5);
    }

    #[test]
    fn test_intense_anger_is_thunderstorm() {
        let engine = engine_with(Box::new(FixedPolarity(0.0)));
        let report = analyzed(engine.process("I'm extremely angry"));
        assert_eq!(report.atmosphere, AtmosphereState::Thunderstorm);
        assert_eq!(report.coping_skill, Some(CopingSkill::BoxBreathing));
        let trace = report.trace.unwrap();
        assert_eq!(trace.intensity, 2.0);
        assert_eq!(trace.rule, AtmosphereRule::R103_INTENSE_ANGER_OVERWHELM);
        assert_eq!(trace.thermal_rule, Some(ThermalRule::R201_INSTANT_LAVA));
    }

    #[test]
    fn test_shouting_amplifies_score() {
        let engine = engine_with(Box::new(FixedPolarity(0.4)));
        let report = analyzed(engine.process("TODAY WAS A GOOD DAY"));
        assert_eq!(report.score, 0.6);
        assert_eq!(report.atmosphere, AtmosphereState::RadiantSun);
    }

    #[test]
    fn test_polarity_failure_falls_back_to_zero() {
        let engine = engine_with(Box::new(BrokenPolarity));
        let report = analyzed(engine.process("the bus was late"));
        assert_eq!(report.score, 0.0);
        assert_eq!(report.atmosphere, AtmosphereState::FoggyMist);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_out_of_range_polarity_falls_back_to_zero() {
        let engine = engine_with(Box::new(FixedPolarity(3.0)));
        let report = analyzed(engine.process("the bus was late"));
        assert_eq!(report.score, 0.0);
    }

    #[test]
    fn test_store_failure_is_a_warning() {
        let engine = AffectEngine::new(
            Lexicon::default(),
            Box::new(FixedPolarity(-0.3)),
            Box::new(UnavailableStore),
            Box::new(UnavailableStore),
        );
        let report = analyzed(engine.process("a long grey afternoon"));
        assert_eq!(report.atmosphere, AtmosphereState::SteadyRain);
        assert_eq!(report.warnings.len(), 2);
        assert!(!report.suggest_screening);
    }

    #[test]
    fn test_three_heavy_turns_suggest_screening() {
        let engine = engine_with(Box::new(FixedPolarity(-0.4)));
        assert!(!analyzed(engine.process("grey morning")).suggest_screening);
        assert!(!analyzed(engine.process("grey noon")).suggest_screening);
        assert!(analyzed(engine.process("grey evening")).suggest_screening);
    }

    #[test]
    fn test_custom_window_changes_the_streak() {
        let engine = engine_with(Box::new(FixedPolarity(-0.4))).with_screening_window(2);
        assert!(!analyzed(engine.process("grey morning")).suggest_screening);
        assert!(analyzed(engine.process("grey noon")).suggest_screening);
    }

    #[test]
    fn test_every_path_names_its_rule() {
        let engine = engine_with(Box::new(FixedPolarity(0.0)));
        assert_eq!(
            engine.process("I want to die").rule(),
            Some(AtmosphereRule::R100_CRISIS_OVERRIDE)
        );

        let empty = engine.process("  ");
        assert_eq!(empty.rule(), Some(AtmosphereRule::R100_EMPTY_INPUT));
        let trace = empty.report().and_then(|r| r.trace.clone()).unwrap();
        assert_eq!(trace.thermal_rule, None);

        assert_eq!(
            engine.process("the bus was late").rule(),
            Some(AtmosphereRule::R105_POLARITY_BUCKET)
        );
    }

    #[test]
    fn test_snippets_only_when_enabled() {
        let engine = AffectEngine::in_memory();
        engine.process("a quiet walk");
        assert_eq!(engine.history(1).unwrap()[0].snippet, None);

        let engine = AffectEngine::in_memory().with_snippets(true);
        engine.process("a quiet walk");
        assert_eq!(engine.history(1).unwrap()[0].snippet.as_deref(), Some("a quiet walk"));
    }

    #[test]
    fn test_snippet_truncation() {
        let long = "a".repeat(150);
        let cut = snippet(&long);
        assert_eq!(cut.len(), 103);
        assert!(cut.ends_with("..."));
        assert_eq!(snippet("short"), "short");
    }

    #[test]
    fn test_reset() {
        let engine = AffectEngine::in_memory();
        engine.process("I'm furious");
        assert!(engine.heat() > 0.0);
        assert_eq!(engine.reset(), None);
        assert_eq!(engine.heat(), 0.0);
    }

    #[test]
    fn test_history_summary_and_clear() {
        let engine = engine_with(Box::new(FixedPolarity(0.4)));
        engine.process("nice walk");
        engine.process("nice lunch");
        let summary = engine.history_summary().unwrap();
        assert_eq!(summary.total_entries, 2);
        assert_eq!(summary.average_score, Some(0.4));

        engine.clear_history().unwrap();
        assert_eq!(engine.history_summary().unwrap().total_entries, 0);
    }
}
