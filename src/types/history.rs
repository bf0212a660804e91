//! Mood history records
//!
//! Records are append-only. Files written by earlier tooling used the key
//! `weather` and space-separated state names, both still accepted.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::types::AtmosphereState;

/// One persisted turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Local wall-clock time of the turn
    pub timestamp: NaiveDateTime,
    #[serde(alias = "weather")]
    pub atmosphere: AtmosphereState,
    /// Mood score, rounded to 2 decimals
    #[serde(default)]
    pub score: f64,
    /// Leading slice of the text, only when snippets are enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl HistoryRecord {
    /// Record stamped with the current local time
    pub fn now(atmosphere: AtmosphereState, score: f64, snippet: Option<String>) -> Self {
        Self {
            timestamp: chrono::Local::now().naive_local(),
            atmosphere,
            score: crate::round2(score),
            snippet,
        }
    }
}

/// Direction of the recent average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    GenerallyPositive,
    Balanced,
    ConsiderReachingOut,
}

impl Trend {
    pub fn description(&self) -> &'static str {
        match self {
            Self::GenerallyPositive => "Generally positive",
            Self::Balanced => "Balanced",
            Self::ConsiderReachingOut => "Consider reaching out for support",
        }
    }
}

/// Frequency of one atmosphere in a window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtmosphereCount {
    pub atmosphere: AtmosphereState,
    pub count: usize,
}

/// Summary over the trailing window of history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub total_entries: usize,
    /// Most frequent first
    pub pattern: Vec<AtmosphereCount>,
    pub average_score: Option<f64>,
    pub trend: Option<Trend>,
}
