//! Thermal State Machine
//!
//! Heat is a scalar in [0.0, 1.0] carried across turns. Each routine turn
//! applies the first matching transition, then a small decay:
//!
//! | Rule | Condition                     | Effect          |
//! |------|-------------------------------|-----------------|
//! | R201 | ANGER                         | h = 1.0         |
//! | R202 | OVERWHELMED                   | h + 0.5         |
//! | R203 | JOY / GRATITUDE / EXCITEMENT  | h - 0.4         |
//! | R204 | polarity > 0.3                | h - 0.3         |
//! | R205 | polarity > -0.2               | h - 0.1         |
//! | R206 | polarity < -0.5               | h + 0.3         |
//! | R207 | otherwise                     | unchanged       |
//!
//! Decay: h - 0.05. Everything clamps to [0, 1].

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::core::storage::ThermalStore;
use crate::types::{IntentLabel, ThermalRule};
use crate::{
    HEAT_DECAY, HEAT_NEGATIVE_POLARITY, HEAT_NEGATIVE_RISE, HEAT_NEUTRAL_COOL,
    HEAT_NEUTRAL_POLARITY, HEAT_OVERWHELMED_RISE, HEAT_POSITIVE_INTENT_COOL,
    HEAT_POSITIVE_POLARITY, HEAT_POSITIVE_POLARITY_COOL,
};

/// Pure transition: current heat → next heat and the rule that fired
pub fn next_heat(current: f64, intent: Option<IntentLabel>, polarity: f64) -> (f64, ThermalRule) {
    let h = current.clamp(0.0, 1.0);

    let (h, rule) = match intent {
        Some(IntentLabel::Anger) => (1.0, ThermalRule::R201_INSTANT_LAVA),
        Some(IntentLabel::Overwhelmed) => (
            (h + HEAT_OVERWHELMED_RISE).min(1.0),
            ThermalRule::R202_RAPID_HEATING,
        ),
        Some(i) if i.is_positive() => (
            (h - HEAT_POSITIVE_INTENT_COOL).max(0.0),
            ThermalRule::R203_FAST_COOLING,
        ),
        _ if polarity > HEAT_POSITIVE_POLARITY => (
            (h - HEAT_POSITIVE_POLARITY_COOL).max(0.0),
            ThermalRule::R204_MODERATE_COOLING,
        ),
        _ if polarity > HEAT_NEUTRAL_POLARITY => (
            (h - HEAT_NEUTRAL_COOL).max(0.0),
            ThermalRule::R205_GENTLE_COOLING,
        ),
        _ if polarity < HEAT_NEGATIVE_POLARITY => (
            (h + HEAT_NEGATIVE_RISE).min(1.0),
            ThermalRule::R206_HEATING,
        ),
        _ => (h, ThermalRule::R207_DECAY_ONLY),
    };

    ((h - HEAT_DECAY).max(0.0), rule)
}

/// Result of one transition
#[derive(Debug, Clone, PartialEq)]
pub struct HeatUpdate {
    pub heat: f64,
    pub rule: ThermalRule,
    /// Persistence failed; the in-memory value still changed
    pub warning: Option<String>,
}

/// Owns the heat level and serializes every read-modify-write
pub struct ThermalMachine {
    heat: Mutex<f64>,
    store: Box<dyn ThermalStore>,
}

impl ThermalMachine {
    /// Start from whatever the store holds; missing or unreadable means 0.0
    pub fn load(store: Box<dyn ThermalStore>) -> Self {
        let heat = match store.load() {
            Ok(Some(h)) => h,
            Ok(None) => 0.0,
            Err(e) => {
                warn!(error = %e, "heat unreadable, starting at 0.0");
                0.0
            }
        };
        Self {
            heat: Mutex::new(heat),
            store,
        }
    }

    /// Current heat
    pub fn heat(&self) -> f64 {
        *self.heat.lock()
    }

    /// Apply one transition and persist it inside the same critical section
    pub fn apply(&self, intent: Option<IntentLabel>, polarity: f64) -> HeatUpdate {
        let mut heat = self.heat.lock();
        let before = *heat;
        let (after, rule) = next_heat(before, intent, polarity);
        *heat = after;

        let warning = self.persist(after);
        info!(before, after, rule = rule.code(), "heat transition");

        HeatUpdate {
            heat: after,
            rule,
            warning,
        }
    }

    /// Back to 0.0; calling twice is the same as calling once
    pub fn reset(&self) -> Option<String> {
        let mut heat = self.heat.lock();
        *heat = 0.0;
        info!("heat reset");
        self.persist(0.0)
    }

    fn persist(&self, heat: f64) -> Option<String> {
        match self.store.save(heat) {
            Ok(()) => None,
            Err(e) => {
                warn!(error = %e, "failed to persist heat");
                Some(format!("heat level not saved: {}", e))
            }
        }
    }
}

impl std::fmt::Debug for ThermalMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThermalMachine")
            .field("heat", &self.heat())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::{MemoryThermalStore, UnavailableStore};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_anger_is_instant_lava() {
        let (h, rule) = next_heat(0.0, Some(IntentLabel::Anger), 0.9);
        assert!(approx(h, 0.95));
        assert_eq!(rule, ThermalRule::R201_INSTANT_LAVA);
    }

    #[test]
    fn test_anger_then_joy() {
        let (h, _) = next_heat(0.0, Some(IntentLabel::Anger), 0.0);
        let (h, rule) = next_heat(h, Some(IntentLabel::Joy), 0.0);
        assert!(approx(h, 0.50), "got {}", h);
        assert_eq!(rule, ThermalRule::R203_FAST_COOLING);
    }

    #[test]
    fn test_overwhelmed_caps_at_one() {
        let (h, rule) = next_heat(0.8, Some(IntentLabel::Overwhelmed), 0.0);
        assert!(approx(h, 0.95));
        assert_eq!(rule, ThermalRule::R202_RAPID_HEATING);
    }

    #[test]
    fn test_polarity_rules() {
        let (h, rule) = next_heat(0.5, None, 0.4);
        assert!(approx(h, 0.15));
        assert_eq!(rule, ThermalRule::R204_MODERATE_COOLING);

        let (h, rule) = next_heat(0.5, None, 0.0);
        assert!(approx(h, 0.35));
        assert_eq!(rule, ThermalRule::R205_GENTLE_COOLING);

        let (h, rule) = next_heat(0.5, None, -0.6);
        assert!(approx(h, 0.75));
        assert_eq!(rule, ThermalRule::R206_HEATING);

        // between -0.5 and -0.2 only decay applies
        let (h, rule) = next_heat(0.5, None, -0.3);
        assert!(approx(h, 0.45));
        assert_eq!(rule, ThermalRule::R207_DECAY_ONLY);
    }

    #[test]
    fn test_non_heat_intents_use_polarity() {
        let (_, rule) = next_heat(0.5, Some(IntentLabel::Sadness), -0.9);
        assert_eq!(rule, ThermalRule::R206_HEATING);
        let (_, rule) = next_heat(0.5, Some(IntentLabel::Anxiety), 0.0);
        assert_eq!(rule, ThermalRule::R205_GENTLE_COOLING);
    }

    #[test]
    fn test_heat_stays_in_range() {
        let intents: Vec<Option<IntentLabel>> = std::iter::once(None)
            .chain(IntentLabel::ALL.iter().copied().map(Some))
            .collect();
        for start in [0.0, 0.03, 0.5, 0.97, 1.0] {
            for intent in &intents {
                for polarity in [-1.0, -0.5, -0.2, 0.0, 0.3, 1.0] {
                    let (h, _) = next_heat(start, *intent, polarity);
                    assert!((0.0..=1.0).contains(&h), "{} {:?} {} → {}", start, intent, polarity, h);
                }
            }
        }
    }

    #[test]
    fn test_machine_persists_each_transition() {
        let machine = ThermalMachine::load(Box::new(MemoryThermalStore::with_heat(0.2)));
        assert!(approx(machine.heat(), 0.2));

        let update = machine.apply(Some(IntentLabel::Anger), 0.0);
        assert!(approx(update.heat, 0.95));
        assert_eq!(update.warning, None);
        assert!(approx(machine.heat(), 0.95));
    }

    #[test]
    fn test_machine_reset_is_idempotent() {
        let machine = ThermalMachine::load(Box::new(MemoryThermalStore::with_heat(0.7)));
        machine.reset();
        machine.reset();
        assert_eq!(machine.heat(), 0.0);
    }

    #[test]
    fn test_unavailable_store_defaults_and_warns() {
        let machine = ThermalMachine::load(Box::new(UnavailableStore));
        assert_eq!(machine.heat(), 0.0);

        let update = machine.apply(Some(IntentLabel::Overwhelmed), 0.0);
        assert!(approx(update.heat, 0.45));
        assert!(update.warning.is_some());
        // in-memory value still advanced
        assert!(approx(machine.heat(), 0.45));
    }
}
