//! Mission data: the five mission kinds, their objectives and the reward
//! table.

use rand::Rng;
use std::fmt;

use crate::battle::types::Environment;
use crate::core::constants::*;
use crate::enemy::factory::{Archetype, Difficulty};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionKind {
    CityDefense,
    ForestBattle,
    SpaceBase,
    Underwater,
    MountainPeak,
}

impl MissionKind {
    pub const ALL: [MissionKind; 5] = [
        MissionKind::CityDefense,
        MissionKind::ForestBattle,
        MissionKind::SpaceBase,
        MissionKind::Underwater,
        MissionKind::MountainPeak,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MissionKind::CityDefense => "City Defense",
            MissionKind::ForestBattle => "Forest Battle",
            MissionKind::SpaceBase => "Space Base",
            MissionKind::Underwater => "Underwater",
            MissionKind::MountainPeak => "Mountain Peak",
        }
    }

    pub fn environment(&self) -> Environment {
        match self {
            MissionKind::CityDefense => Environment::City,
            MissionKind::ForestBattle => Environment::Forest,
            MissionKind::SpaceBase => Environment::SpaceBase,
            MissionKind::Underwater => Environment::Underwater,
            MissionKind::MountainPeak => Environment::Mountain,
        }
    }

    pub fn reward_multiplier(&self) -> f64 {
        match self {
            MissionKind::CityDefense => 1.2,
            MissionKind::ForestBattle => 1.0,
            MissionKind::SpaceBase => 1.5,
            MissionKind::Underwater => 1.3,
            MissionKind::MountainPeak => 1.4,
        }
    }
}

impl fmt::Display for MissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// What must be done to clear the mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    /// Survive consecutive waves of enemies.
    Survival { waves: u32, enemies_per_wave: u32 },
    /// Defeat a fixed number of enemies; fleeing enemies do not count.
    Elimination { targets: u32 },
    /// A single boss battle with a pre-battle energy boost.
    Boss { archetype: Archetype },
    /// Keep the escort alive through assault waves.
    Escort { escort_health: i32, waves: u32 },
    /// Survive a fixed number of turns, fighting or evading.
    TimedSurvival { turns: u32 },
}

impl Objective {
    pub fn description(&self) -> String {
        match self {
            Objective::Survival { waves, enemies_per_wave } => {
                format!("Defend against {} waves of {} enemies", waves, enemies_per_wave)
            }
            Objective::Elimination { targets } => {
                format!("Eliminate {} enemies", targets)
            }
            Objective::Boss { archetype } => {
                format!("Defeat {} in their stronghold", archetype)
            }
            Objective::Escort { escort_health, waves } => {
                format!("Escort civilians ({} HP) through {} waves", escort_health, waves)
            }
            Objective::TimedSurvival { turns } => {
                format!("Survive the assault for {} turns", turns)
            }
        }
    }
}

fn base_rewards(difficulty: Difficulty) -> (u32, u32) {
    match difficulty {
        Difficulty::Easy => (50, 30),
        Difficulty::Medium => (100, 60),
        Difficulty::Hard => (200, 120),
        Difficulty::Extreme => (400, 250),
    }
}

#[derive(Debug, Clone)]
pub struct Mission {
    pub kind: MissionKind,
    pub difficulty: Difficulty,
    pub environment: Environment,
    pub objective: Objective,
    pub gold_reward: u32,
    pub xp_reward: u32,
    pub key_chance: f64,
}

impl Mission {
    pub fn new(kind: MissionKind, difficulty: Difficulty, rng: &mut impl Rng) -> Self {
        let objective = match kind {
            MissionKind::CityDefense => Objective::Survival { waves: 3, enemies_per_wave: 2 },
            MissionKind::ForestBattle => Objective::Elimination { targets: 4 },
            MissionKind::SpaceBase => Objective::Boss {
                archetype: Archetype::BOSSES[rng.gen_range(0..Archetype::BOSSES.len())],
            },
            MissionKind::Underwater => Objective::Escort { escort_health: 100, waves: 2 },
            MissionKind::MountainPeak => Objective::TimedSurvival { turns: 5 },
        };

        let (base_gold, base_xp) = base_rewards(difficulty);
        let multiplier = kind.reward_multiplier();
        let key_chance = match difficulty {
            Difficulty::Hard | Difficulty::Extreme => MISSION_KEY_CHANCE_HARD,
            _ => MISSION_KEY_CHANCE_NORMAL,
        };

        Mission {
            kind,
            difficulty,
            environment: kind.environment(),
            objective,
            gold_reward: (base_gold as f64 * multiplier) as u32,
            xp_reward: (base_xp as f64 * multiplier) as u32,
            key_chance,
        }
    }
}

/// Rolls a fresh batch of 3 to 5 mission offers. Until the player has three
/// completed missions behind them, only Easy and Medium show up.
pub fn generate_missions(completed: usize, rng: &mut impl Rng) -> Vec<Mission> {
    let count = rng.gen_range(MISSION_OFFER_MIN..=MISSION_OFFER_MAX);
    (0..count)
        .map(|_| {
            let kind = MissionKind::ALL[rng.gen_range(0..MissionKind::ALL.len())];
            let difficulty = if completed < MISSION_EASY_BIAS_THRESHOLD {
                [Difficulty::Easy, Difficulty::Medium][rng.gen_range(0..2)]
            } else {
                Difficulty::ALL[rng.gen_range(0..Difficulty::ALL.len())]
            };
            Mission::new(kind, difficulty, rng)
        })
        .collect()
}
