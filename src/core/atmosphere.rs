//! Atmosphere Mapper
//!
//! Ordered rule list, first match wins. The crisis override is applied by the
//! caller before this runs; the mapper itself never returns CRISIS.

use tracing::debug;

use crate::types::{AtmosphereRule, AtmosphereState, IntentLabel};

/// Map polarity, intent and intensity to an atmosphere and the rule that fired
pub fn map_atmosphere(
    polarity: f64,
    intent: Option<IntentLabel>,
    intensity: f64,
) -> (AtmosphereState, AtmosphereRule) {
    let decision = match intent {
        Some(i) if i.is_positive() => (AtmosphereState::RadiantSun, AtmosphereRule::R101_POSITIVE_INTENT),
        Some(IntentLabel::Anxiety) => (AtmosphereState::FoggyMist, AtmosphereRule::R102_ANXIETY_INTENT),
        Some(IntentLabel::Anger | IntentLabel::Overwhelmed) if intensity >= 1.5 => (
            AtmosphereState::Thunderstorm,
            AtmosphereRule::R103_INTENSE_ANGER_OVERWHELM,
        ),
        Some(IntentLabel::Sadness) => (AtmosphereState::SteadyRain, AtmosphereRule::R104_SADNESS_INTENT),
        _ => (bucket(polarity * intensity), AtmosphereRule::R105_POLARITY_BUCKET),
    };

    debug!(atmosphere = %decision.0, rule = decision.1.code(), "atmosphere mapped");
    decision
}

/// Strict thresholds on the adjusted score
fn bucket(adjusted: f64) -> AtmosphereState {
    if adjusted > 0.5 {
        AtmosphereState::RadiantSun
    } else if adjusted > 0.1 {
        AtmosphereState::ClearSkies
    } else if adjusted > -0.1 {
        AtmosphereState::FoggyMist
    } else if adjusted > -0.5 {
        AtmosphereState::SteadyRain
    } else {
        AtmosphereState::Thunderstorm
    }
}

// =============================================================================
// TESTS
// =============================================================================
