//! Pattern trigger and history analytics
//!
//! Pure functions over already-loaded history records.

use std::collections::HashMap;

use crate::types::{AtmosphereCount, AtmosphereState, HistoryRecord, HistorySummary, Trend};
use crate::SCREENING_WINDOW;

/// Records considered by the summary
pub const SUMMARY_WINDOW: usize = 7;

/// Average above this trends positive
pub const TREND_POSITIVE: f64 = 0.3;
/// Average below this suggests reaching out
pub const TREND_NEGATIVE: f64 = -0.3;

/// Last three records all heavy (STEADY_RAIN or THUNDERSTORM)
///
/// Fixed-window form of [`heavy_streak`]; engines configured with another
/// window call `heavy_streak` directly.
pub fn should_suggest_screening(history: &[HistoryRecord]) -> bool {
    heavy_streak(history, SCREENING_WINDOW)
}

/// Last `window` records all heavy; false when there are fewer
pub fn heavy_streak(history: &[HistoryRecord], window: usize) -> bool {
    if window == 0 || history.len() < window {
        return false;
    }
    history[history.len() - window..]
        .iter()
        .all(|r| r.atmosphere.is_heavy())
}

/// Frequency, average and trend over the last seven records
pub fn summarize(history: &[HistoryRecord]) -> HistorySummary {
    let window = &history[history.len().saturating_sub(SUMMARY_WINDOW)..];

    let mut counts: HashMap<AtmosphereState, usize> = HashMap::new();
    for record in window {
        *counts.entry(record.atmosphere).or_insert(0) += 1;
    }
    let mut pattern: Vec<AtmosphereCount> = counts
        .into_iter()
        .map(|(atmosphere, count)| AtmosphereCount { atmosphere, count })
        .collect();
    // most frequent first, lighter state first on ties
    pattern.sort_by(|a, b| b.count.cmp(&a.count).then(a.atmosphere.cmp(&b.atmosphere)));

    let average_score = if window.is_empty() {
        None
    } else {
        let sum: f64 = window.iter().map(|r| r.score).sum();
        Some(crate::round2(sum / window.len() as f64))
    };

    HistorySummary {
        total_entries: history.len(),
        pattern,
        average_score,
        trend: average_score.map(trend),
    }
}

pub fn trend(average: f64) -> Trend {
    if average > TREND_POSITIVE {
        Trend::GenerallyPositive
    } else if average < TREND_NEGATIVE {
        Trend::ConsiderReachingOut
    } else {
        Trend::Balanced
    }
}
