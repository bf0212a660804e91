//! Companion voice and coping-skill suggestion
//!
//! Lookup order: intent lines, then atmosphere lines, then defaults.

use crate::types::{AtmosphereState, CopingSkill, IntentLabel};

fn intent_lines(intent: IntentLabel) -> &'static [&'static str] {
    match intent {
        IntentLabel::Anger => &[
            "I can hear the heat in that. Pause with me for five seconds. Being frustrated is allowed.",
            "Anger usually means something matters to you. We can sit with it for a moment.",
        ],
        IntentLabel::Overwhelmed => &[
            "Everything feels heavy right now. Just this screen and one slow breath. One step at a time.",
            "You're holding a lot. Let's set some of it down together, only for now.",
        ],
        IntentLabel::Sadness => &[
            "I'm standing in the rain with you. It's okay not to be okay.",
            "Your sadness is heard. You don't have to carry it by yourself.",
        ],
        IntentLabel::Anxiety => &[
            "The fog is thick, but you only need to see the next few steps.",
            "I can feel the worry in what you wrote. Let's ground ourselves together.",
        ],
        IntentLabel::Gratitude => &[
            "That warmth is making this whole place bloom. Thank you for sharing it.",
            "What a good thing to notice. I'm glad you brought it here.",
        ],
        IntentLabel::Confusion => &[
            "Feeling in-between is okay. Clarity arrives in its own time.",
            "Not knowing yet is part of it. You're where you need to be.",
        ],
        IntentLabel::Joy => &[
            "Your joy is contagious. The whole house feels brighter.",
            "I love seeing you like this. Hold on to this feeling.",
        ],
        IntentLabel::Excitement => &[
            "I can feel the energy! Tell me more about what sparked it.",
            "That enthusiasm is lighting up the room.",
        ],
    }
}

fn atmosphere_lines(atmosphere: AtmosphereState) -> Option<&'static [&'static str]> {
    let lines: &'static [&'static str] = match atmosphere {
        AtmosphereState::Thunderstorm => &[
            "The storm is loud, but you are steady. I'm here until it passes.",
            "Thunder never lasts forever. I'll stay right here.",
        ],
        AtmosphereState::RadiantSun => &[
            "It's a beautiful day in here. Let's stay in the light a while.",
            "The light you bring reaches everything. Stay in this warmth.",
        ],
        AtmosphereState::SteadyRain => &[
            "Rain washes things clean. This will pass, and I'm here with you.",
            "Let the rain fall. Sometimes we need to release what we've been holding.",
        ],
        AtmosphereState::FoggyMist => &[
            "The fog will lift when it's ready. Until then, I'll be your guide.",
            "It's okay not to see clearly yet. Just stay with this moment.",
        ],
        AtmosphereState::ClearSkies => &[
            "Such a peaceful atmosphere. Breathe it in.",
            "Balance feels good, doesn't it? You've found a calm spot.",
        ],
        AtmosphereState::PartlyCloudy | AtmosphereState::Crisis => return None,
    };
    Some(lines)
}

const DEFAULT_LINES: [&str; 3] = [
    "I'm here, and I'm listening.",
    "You're not alone in this space. I'm with you.",
    "Whatever you're feeling right now is valid. I see you.",
];

/// Companion line for a turn; `variant` picks among the candidates (wraps)
pub fn companion_response(
    atmosphere: AtmosphereState,
    intent: Option<IntentLabel>,
    variant: usize,
) -> &'static str {
    let lines = match (intent, atmosphere_lines(atmosphere)) {
        (Some(i), _) => intent_lines(i),
        (None, Some(lines)) => lines,
        (None, None) => &DEFAULT_LINES[..],
    };
    lines[variant % lines.len()]
}

/// Stable variant index for a piece of text
pub fn variant_for(text: &str) -> usize {
    text.bytes()
        .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize))
}

/// Exercise to offer, if any
pub fn suggest_skill(intent: Option<IntentLabel>, atmosphere: AtmosphereState) -> Option<CopingSkill> {
    match (intent, atmosphere) {
        (Some(IntentLabel::Overwhelmed), _) => Some(CopingSkill::BoxBreathing),
        (Some(IntentLabel::Anxiety), _) | (_, AtmosphereState::FoggyMist) => Some(CopingSkill::Grounding),
        (_, AtmosphereState::Thunderstorm) => Some(CopingSkill::BoxBreathing),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_takes_priority() {
        let line = companion_response(AtmosphereState::Thunderstorm, Some(IntentLabel::Sadness), 0);
        assert!(line.contains("rain"));
    }

    #[test]
    fn test_atmosphere_fallback() {
        let line = companion_response(AtmosphereState::Thunderstorm, None, 0);
        assert!(line.contains("storm"));
    }

    #[test]
    fn test_default_lines() {
        assert_eq!(companion_response(AtmosphereState::PartlyCloudy, None, 0), DEFAULT_LINES[0]);
        assert_eq!(companion_response(AtmosphereState::PartlyCloudy, None, 4), DEFAULT_LINES[1]);
    }

    #[test]
    fn test_variant_is_deterministic() {
        assert_eq!(variant_for("hello"), variant_for("hello"));
        let a = companion_response(AtmosphereState::ClearSkies, None, variant_for("hello"));
        let b = companion_response(AtmosphereState::ClearSkies, None, variant_for("hello"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_every_intent_has_lines() {
        for intent in IntentLabel::ALL {
            assert!(!intent_lines(intent).is_empty());
        }
    }

    #[test]
    fn test_skill_suggestions() {
        assert_eq!(
            suggest_skill(Some(IntentLabel::Overwhelmed), AtmosphereState::Thunderstorm),
            Some(CopingSkill::BoxBreathing)
        );
        assert_eq!(
            suggest_skill(Some(IntentLabel::Anxiety), AtmosphereState::FoggyMist),
            Some(CopingSkill::Grounding)
        );
        assert_eq!(
            suggest_skill(None, AtmosphereState::FoggyMist),
            Some(CopingSkill::Grounding)
        );
        assert_eq!(
            suggest_skill(Some(IntentLabel::Anger), AtmosphereState::Thunderstorm),
            Some(CopingSkill::BoxBreathing)
        );
        assert_eq!(suggest_skill(Some(IntentLabel::Joy), AtmosphereState::RadiantSun), None);
        assert_eq!(suggest_skill(None, AtmosphereState::SteadyRain), None);
    }
}
