//! Core types for Innerverse

mod atmosphere;
mod crisis;
mod history;
mod intent;
mod output;
mod reason;
mod screening;
mod skill;

pub use atmosphere::AtmosphereState;
pub use crisis::{CrisisResource, CrisisSignal, CrisisVerdict, WeightedSignal};
pub use history::{AtmosphereCount, HistoryRecord, HistorySummary, Trend};
pub use intent::IntentLabel;
pub use output::{CrisisReport, ProcessOutcome, TurnReport, TurnTrace, CRISIS_MESSAGE};
pub use reason::{AtmosphereRule, ThermalRule};
pub use screening::{Instrument, SafetyAlert, ScreeningResult};
pub use skill::{CopingSkill, SkillStep};
