//! Coping skills offered after a turn

use serde::{Deserialize, Serialize};

/// Guided exercises the companion can offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopingSkill {
    /// 4-4-4-4 box breathing
    BoxBreathing,
    /// 5-4-3-2-1 sensory grounding
    Grounding,
}

/// One scripted step of an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkillStep {
    pub prompt: &'static str,
    /// Seconds to hold for timed steps, items to name for grounding
    pub count: u32,
}

const BOX_BREATHING: [SkillStep; 4] = [
    SkillStep { prompt: "Breathe IN slowly...", count: 4 },
    SkillStep { prompt: "HOLD your breath...", count: 4 },
    SkillStep { prompt: "Breathe OUT slowly...", count: 4 },
    SkillStep { prompt: "REST and relax...", count: 4 },
];

const GROUNDING: [SkillStep; 5] = [
    SkillStep { prompt: "Name 5 things you can see around you", count: 5 },
    SkillStep { prompt: "Name 4 things you can physically touch", count: 4 },
    SkillStep { prompt: "Name 3 things you can hear right now", count: 3 },
    SkillStep { prompt: "Name 2 things you can smell (or like to smell)", count: 2 },
    SkillStep { prompt: "Name 1 thing you can taste (or recently tasted)", count: 1 },
];

impl CopingSkill {
    pub fn title(&self) -> &'static str {
        match self {
            Self::BoxBreathing => "Guided Breathing (4-4-4-4)",
            Self::Grounding => "Grounding Exercise (5-4-3-2-1)",
        }
    }

    pub fn steps(&self) -> &'static [SkillStep] {
        match self {
            Self::BoxBreathing => &BOX_BREATHING,
            Self::Grounding => &GROUNDING,
        }
    }

    pub fn closing(&self) -> &'static str {
        match self {
            Self::BoxBreathing => "You're doing great. One step at a time.",
            Self::Grounding => "You are right here, in this moment. You're safe.",
        }
    }
}
