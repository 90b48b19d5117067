//! Skill dispatch table and the fusion power gate.
//!
//! Skills are pure data: a name, a mega-energy cost and an effect. Usage is
//! all-or-nothing; a failed precondition leaves the ranger untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::character::types::{LimbInjuries, Ranger, StatusKind};
use crate::core::constants::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkillEffect {
    /// Deals attack x multiplier to the current target.
    Damage(f64),
    /// Restores a fraction of max health.
    HealFraction(f64),
    /// Applies a status to the user for the given number of turns.
    SelfStatus(StatusKind, u32),
    /// Heavy heal that also clears all limb injuries.
    FieldTriage(f64),
}

pub struct SkillSpec {
    pub name: &'static str,
    pub cost: u32,
    pub effect: SkillEffect,
}

pub const SKILLS: [SkillSpec; 5] = [
    SkillSpec {
        name: "Power Strike",
        cost: 1,
        effect: SkillEffect::Damage(1.5),
    },
    SkillSpec {
        name: "Mega Blast",
        cost: 2,
        effect: SkillEffect::Damage(2.0),
    },
    SkillSpec {
        name: "Healing Light",
        cost: 1,
        effect: SkillEffect::HealFraction(0.3),
    },
    SkillSpec {
        name: "Speed Boost",
        cost: 1,
        effect: SkillEffect::SelfStatus(StatusKind::SpeedBoost, 3),
    },
    SkillSpec {
        name: "Medic Protocol",
        cost: 2,
        effect: SkillEffect::FieldTriage(0.5),
    },
];

pub fn skill_spec(name: &str) -> Option<&'static SkillSpec> {
    SKILLS.iter().find(|s| s.name == name)
}

/// The full skill map with nothing learned yet.
pub fn starting_skills() -> BTreeMap<String, bool> {
    SKILLS
        .iter()
        .map(|s| (s.name.to_string(), false))
        .collect()
}

/// Skill granted automatically at the given level, if any.
pub fn auto_unlock_at(level: u32) -> Option<&'static str> {
    match level {
        3 => Some("Power Strike"),
        5 => Some("Mega Blast"),
        7 => Some("Healing Light"),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillError {
    UnknownSkill(String),
    NotLearned(String),
    AlreadyLearned(String),
    NoSkillPoints,
    InsufficientEnergy { needed: u32, have: u32 },
    FusionLocked,
}

impl fmt::Display for SkillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkillError::UnknownSkill(name) => write!(f, "Unknown skill: {}", name),
            SkillError::NotLearned(name) => write!(f, "{} has not been learned yet", name),
            SkillError::AlreadyLearned(name) => write!(f, "{} is already learned", name),
            SkillError::NoSkillPoints => write!(f, "Not enough skill points"),
            SkillError::InsufficientEnergy { needed, have } => {
                write!(f, "Not enough Mega Energy (need {}, have {})", needed, have)
            }
            SkillError::FusionLocked => write!(
                f,
                "Fusion Power needs level {}+, {} Mega Energy and {}+ Ranger Keys",
                FUSION_MIN_LEVEL, FUSION_ENERGY_COST, FUSION_MIN_KEYS
            ),
        }
    }
}

/// What a successfully used skill did. Damage is reported here and applied
/// to the target by the battle engine, not by the skill itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillOutcome {
    pub skill: String,
    pub damage: Option<u32>,
    pub message: String,
}

impl Ranger {
    /// Spends a skill point to learn a skill.
    pub fn learn_skill(&mut self, name: &str) -> Result<(), SkillError> {
        match self.skills.get(name) {
            None => return Err(SkillError::UnknownSkill(name.to_string())),
            Some(true) => return Err(SkillError::AlreadyLearned(name.to_string())),
            Some(false) => {}
        }
        if self.skill_points == 0 {
            return Err(SkillError::NoSkillPoints);
        }
        self.skills.insert(name.to_string(), true);
        self.skill_points -= 1;
        Ok(())
    }

    pub fn learned_skills(&self) -> Vec<&str> {
        SKILLS
            .iter()
            .filter(|s| self.skills.get(s.name).copied().unwrap_or(false))
            .map(|s| s.name)
            .collect()
    }

    /// Uses a learned skill, paying its energy cost. Fails without mutating
    /// anything when the skill is unknown, unlearned or unaffordable.
    pub fn use_skill(&mut self, name: &str) -> Result<SkillOutcome, SkillError> {
        let spec = skill_spec(name).ok_or_else(|| SkillError::UnknownSkill(name.to_string()))?;
        if !self.skills.get(name).copied().unwrap_or(false) {
            return Err(SkillError::NotLearned(name.to_string()));
        }
        if self.mega_energy < spec.cost {
            return Err(SkillError::InsufficientEnergy {
                needed: spec.cost,
                have: self.mega_energy,
            });
        }

        self.mega_energy -= spec.cost;
        let outcome = match spec.effect {
            SkillEffect::Damage(mult) => {
                let damage = ((self.attack as f64 * mult) as u32).max(1);
                SkillOutcome {
                    skill: spec.name.to_string(),
                    damage: Some(damage),
                    message: format!("{} unleashed for {} damage!", spec.name, damage),
                }
            }
            SkillEffect::HealFraction(fraction) => {
                let healed = self.heal((self.max_health as f64 * fraction) as u32);
                SkillOutcome {
                    skill: spec.name.to_string(),
                    damage: None,
                    message: format!("{} restores {} health!", spec.name, healed),
                }
            }
            SkillEffect::SelfStatus(kind, turns) => {
                self.add_status(kind, turns);
                SkillOutcome {
                    skill: spec.name.to_string(),
                    damage: None,
                    message: format!("{} active for {} turns!", kind.label(), turns),
                }
            }
            SkillEffect::FieldTriage(fraction) => {
                let healed = self.heal((self.max_health as f64 * fraction) as u32);
                self.limb_injuries = LimbInjuries::default();
                SkillOutcome {
                    skill: spec.name.to_string(),
                    damage: None,
                    message: format!(
                        "{} restores {} health and clears all injuries!",
                        spec.name, healed
                    ),
                }
            }
        };
        Ok(outcome)
    }

    /// Fusion is gated on level, energy and key collection simultaneously.
    pub fn can_use_fusion_power(&self) -> bool {
        self.level >= FUSION_MIN_LEVEL
            && self.mega_energy >= FUSION_ENERGY_COST
            && self.ranger_keys.len() >= FUSION_MIN_KEYS
    }

    /// Pays the full fusion cost and returns the damage dealt. Atomic: if
    /// the gate fails nothing is spent.
    pub fn use_fusion_power(&mut self) -> Result<u32, SkillError> {
        if !self.can_use_fusion_power() {
            return Err(SkillError::FusionLocked);
        }
        self.mega_energy -= FUSION_ENERGY_COST;
        Ok(((self.attack as f64 * FUSION_DAMAGE_MULTIPLIER) as u32).max(1))
    }
}
