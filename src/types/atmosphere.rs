//! Atmosphere state definitions

use serde::{Deserialize, Serialize};

/// Symbolic weather for one turn, ordered from lightest to heaviest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AtmosphereState {
    /// Strong positive intent or polarity
    #[serde(alias = "RADIANT SUN")]
    RadiantSun,
    /// Mildly positive
    #[serde(alias = "CLEAR SKIES")]
    ClearSkies,
    /// Mixed light and shadow (never produced by the mapper)
    #[serde(alias = "PARTLY CLOUDY")]
    PartlyCloudy,
    /// Neutral, unclear or anxious
    #[serde(alias = "FOGGY MIST")]
    FoggyMist,
    /// Sad or moderately negative
    #[serde(alias = "STEADY RAIN")]
    SteadyRain,
    /// Intense anger, overwhelm or strongly negative
    Thunderstorm,
    /// Safety override, only reachable through the crisis path
    Crisis,
}

impl AtmosphereState {
    /// All states, lightest first
    pub const ALL: [AtmosphereState; 7] = [
        AtmosphereState::RadiantSun,
        AtmosphereState::ClearSkies,
        AtmosphereState::PartlyCloudy,
        AtmosphereState::FoggyMist,
        AtmosphereState::SteadyRain,
        AtmosphereState::Thunderstorm,
        AtmosphereState::Crisis,
    ];

    /// STEADY_RAIN or THUNDERSTORM
    pub fn is_heavy(&self) -> bool {
        matches!(self, Self::SteadyRain | Self::Thunderstorm)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RadiantSun => "RADIANT_SUN",
            Self::ClearSkies => "CLEAR_SKIES",
            Self::PartlyCloudy => "PARTLY_CLOUDY",
            Self::FoggyMist => "FOGGY_MIST",
            Self::SteadyRain => "STEADY_RAIN",
            Self::Thunderstorm => "THUNDERSTORM",
            Self::Crisis => "CRISIS",
        }
    }

    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            Self::RadiantSun => "\x1b[1;33m",  // Bold yellow
            Self::ClearSkies => "\x1b[94m",    // Bright blue
            Self::PartlyCloudy => "\x1b[36m",  // Cyan
            Self::FoggyMist => "\x1b[90m",     // Gray
            Self::SteadyRain => "\x1b[34m",    // Blue
            Self::Thunderstorm => "\x1b[1;31m", // Bold red
            Self::Crisis => "\x1b[1;35m",      // Bold magenta
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::RadiantSun => "☀️",
            Self::ClearSkies => "🌤️",
            Self::PartlyCloudy => "⛅",
            Self::FoggyMist => "🌫️",
            Self::SteadyRain => "🌧️",
            Self::Thunderstorm => "⛈️",
            Self::Crisis => "🕯️",
        }
    }

    /// One-line scene for the report panel
    pub fn scene(&self) -> &'static str {
        match self {
            Self::RadiantSun => "THE SKY IS GLOWING! Your energy is radiant and the world is wide open.",
            Self::ClearSkies => "It's a calm, bright day. Everything feels steady and manageable.",
            Self::PartlyCloudy => "There's a mix of light and shadow. You're finding your balance.",
            Self::FoggyMist => "Visibility is low. It's okay not to have all the answers right now.",
            Self::SteadyRain => "The clouds are releasing weight. Take this time to rest and reflect.",
            Self::Thunderstorm => "The atmosphere is heavy. Be kind to yourself while the storm passes.",
            Self::Crisis => "You don't have to navigate this alone. Help is available right now.",
        }
    }
}

impl std::fmt::Display for AtmosphereState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heaviness_order() {
        assert!(AtmosphereState::RadiantSun < AtmosphereState::ClearSkies);
        assert!(AtmosphereState::SteadyRain < AtmosphereState::Thunderstorm);
        assert!(AtmosphereState::Thunderstorm < AtmosphereState::Crisis);
    }

    #[test]
    fn test_legacy_names_deserialize() {
        let state: AtmosphereState = serde_json::from_str("\"STEADY RAIN\"").unwrap();
        assert_eq!(state, AtmosphereState::SteadyRain);
        let state: AtmosphereState = serde_json::from_str("\"STEADY_RAIN\"").unwrap();
        assert_eq!(state, AtmosphereState::SteadyRain);
    }

    #[test]
    fn test_serializes_screaming_snake() {
        let json = serde_json::to_string(&AtmosphereState::FoggyMist).unwrap();
        assert_eq!(json, "\"FOGGY_MIST\"");
    }
}
