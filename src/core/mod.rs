//! Core modules for Innerverse

pub mod lexicon;
pub mod intent;
pub mod crisis;
pub mod polarity;
pub mod atmosphere;
pub mod thermal;
pub mod storage;
pub mod pattern;
pub mod screening;
pub mod companion;
pub mod engine;
pub mod api;

pub use lexicon::Lexicon;
pub use intent::{IntentClassifier, IntensityModulator};
pub use crisis::CrisisScorer;
pub use polarity::{amplify, LexiconPolarity, PolaritySource};
pub use atmosphere::map_atmosphere;
pub use thermal::{next_heat, HeatUpdate, ThermalMachine};
pub use storage::{
    HistoryStore, JsonHistoryStore, JsonThermalStore, MemoryHistoryStore, MemoryThermalStore,
    ThermalStore, UnavailableStore,
};
pub use pattern::{should_suggest_screening, summarize};
pub use screening::{score_gad7, score_phq9};
pub use companion::{companion_response, suggest_skill};
pub use engine::AffectEngine;
pub use api::{create_router, run_server};
