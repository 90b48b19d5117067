//! Spawning: archetype stat tables, difficulty scaling and limb sizing.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::constants::*;
use crate::enemy::types::{AiState, BehaviorPattern, Enemy, LimbSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Archetype {
    Loogies,
    Zombats,
    Bruisers,
    XBorgs,
    MetalAlice,
    BlackKnight,
    EmperorMavro,
}

impl Archetype {
    pub const GRUNTS: [Archetype; 4] = [
        Archetype::Loogies,
        Archetype::Zombats,
        Archetype::Bruisers,
        Archetype::XBorgs,
    ];

    pub const BOSSES: [Archetype; 3] = [
        Archetype::MetalAlice,
        Archetype::BlackKnight,
        Archetype::EmperorMavro,
    ];

    pub fn is_boss(&self) -> bool {
        Archetype::BOSSES.contains(self)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Archetype::Loogies => "Loogies",
            Archetype::Zombats => "Zombats",
            Archetype::Bruisers => "Bruisers",
            Archetype::XBorgs => "X-Borgs",
            Archetype::MetalAlice => "Metal Alice",
            Archetype::BlackKnight => "Black Knight",
            Archetype::EmperorMavro => "Emperor Mavro",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

struct ArchetypeStats {
    health: u32,
    attack: u32,
    defense: u32,
    speed: i32,
    behavior: BehaviorPattern,
    abilities: &'static [&'static str],
    battle_cry: &'static str,
    phases: u32,
}

fn archetype_stats(archetype: Archetype) -> ArchetypeStats {
    match archetype {
        Archetype::Loogies => ArchetypeStats {
            health: 30,
            attack: 8,
            defense: 5,
            speed: 10,
            behavior: BehaviorPattern::Aggressive,
            abilities: &["Swarm Strike"],
            battle_cry: "Screech! The Loogies swarm toward you!",
            phases: 1,
        },
        Archetype::Zombats => ArchetypeStats {
            health: 25,
            attack: 10,
            defense: 5,
            speed: 15,
            behavior: BehaviorPattern::Swarm,
            abilities: &["Sonic Screech"],
            battle_cry: "The Zombats circle overhead!",
            phases: 1,
        },
        Archetype::Bruisers => ArchetypeStats {
            health: 60,
            attack: 15,
            defense: 8,
            speed: 10,
            behavior: BehaviorPattern::Tank,
            abilities: &["Ground Pound"],
            battle_cry: "A Bruiser stomps forward, cracking the pavement!",
            phases: 1,
        },
        Archetype::XBorgs => ArchetypeStats {
            health: 45,
            attack: 14,
            defense: 5,
            speed: 10,
            behavior: BehaviorPattern::Tactical,
            abilities: &["Laser Barrage"],
            battle_cry: "X-Borgs lock their targeting systems on you!",
            phases: 1,
        },
        Archetype::MetalAlice => ArchetypeStats {
            health: 200,
            attack: 25,
            defense: 5,
            speed: 10,
            behavior: BehaviorPattern::Boss,
            abilities: &["Cyber Blast", "System Repair", "Data Corruption"],
            battle_cry: "Metal Alice: \"Analyzing ranger combat data. You cannot win.\"",
            phases: 2,
        },
        Archetype::BlackKnight => ArchetypeStats {
            health: 250,
            attack: 30,
            defense: 5,
            speed: 10,
            behavior: BehaviorPattern::Boss,
            abilities: &["Dark Strike", "Shadow Shield", "Nightmare Wave"],
            battle_cry: "The Black Knight raises his blade: \"Your light ends here!\"",
            phases: 3,
        },
        Archetype::EmperorMavro => ArchetypeStats {
            health: 300,
            attack: 35,
            defense: 5,
            speed: 10,
            behavior: BehaviorPattern::Boss,
            abilities: &["Imperial Blast", "Royal Guard", "Conquest Beam"],
            battle_cry: "Emperor Mavro: \"The Armada's final victory begins with you.\"",
            phases: 3,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Extreme,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Extreme,
    ];

    pub fn multiplier(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.8,
            Difficulty::Medium => 1.0,
            Difficulty::Hard => 1.3,
            Difficulty::Extreme => 1.6,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Extreme => "Extreme",
        }
    }

    pub fn parse(input: &str) -> Option<Difficulty> {
        Difficulty::ALL
            .iter()
            .copied()
            .find(|d| d.label().eq_ignore_ascii_case(input.trim()))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

fn scale(value: u32, multiplier: f64) -> u32 {
    (value as f64 * multiplier).round() as u32
}

/// Builds a battle-ready enemy. `None` picks a random grunt archetype; bosses
/// must be requested explicitly. Difficulty scales health, attack, defense
/// and rewards; limb health scales with body size before difficulty.
pub fn create_enemy(
    archetype: Option<Archetype>,
    difficulty: Difficulty,
    rng: &mut impl Rng,
) -> Enemy {
    let archetype = archetype
        .unwrap_or_else(|| Archetype::GRUNTS[rng.gen_range(0..Archetype::GRUNTS.len())]);
    let stats = archetype_stats(archetype);
    let mult = difficulty.multiplier();

    let (gold_reward, xp_reward) = if archetype.is_boss() {
        (BOSS_GOLD_REWARD, BOSS_XP_REWARD)
    } else {
        (ENEMY_GOLD_REWARD, ENEMY_XP_REWARD)
    };

    let mut limb_scale = stats.health as f64 / LIMB_SIZE_DIVISOR;
    if archetype.is_boss() {
        limb_scale *= BOSS_LIMB_MULTIPLIER;
    }
    let arm_health = ((ARM_BASE_HEALTH as f64 * limb_scale) as u32).max(1);
    let leg_health = ((LEG_BASE_HEALTH as f64 * limb_scale) as u32).max(1);

    let max_health = scale(stats.health, mult);
    Enemy {
        name: archetype.display_name().to_string(),
        archetype,
        max_health,
        current_health: max_health,
        attack: scale(stats.attack, mult),
        defense: scale(stats.defense, mult),
        speed: stats.speed,
        gold_reward: scale(gold_reward, mult),
        xp_reward: scale(xp_reward, mult),
        state: AiState::Aggressive,
        behavior: stats.behavior,
        turn_counter: 0,
        limbs: LimbSet::new(arm_health, leg_health),
        status_effects: Vec::new(),
        special_abilities: stats.abilities.to_vec(),
        guard: 0,
        phase: 1,
        phases: stats.phases,
    }
}

/// The opening line shouted when the enemy appears.
pub fn battle_cry(archetype: Archetype) -> &'static str {
    archetype_stats(archetype).battle_cry
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_loogies_hard_scaling() {
        let mut rng = StdRng::seed_from_u64(0);
        let enemy = create_enemy(Some(Archetype::Loogies), Difficulty::Hard, &mut rng);
        assert_eq!(enemy.max_health, 39); // round(30 * 1.3)
        assert_eq!(enemy.current_health, 39);
        assert_eq!(enemy.attack, 10); // round(8 * 1.3)
        assert_eq!(enemy.gold_reward, 33); // round(25 * 1.3)
        assert_eq!(enemy.xp_reward, 26); // round(20 * 1.3)
    }

    #[test]
    fn test_easy_rounds_down_fairly() {
        let mut rng = StdRng::seed_from_u64(0);
        let enemy = create_enemy(Some(Archetype::Zombats), Difficulty::Easy, &mut rng);
        assert_eq!(enemy.max_health, 20); // round(25 * 0.8)
        assert_eq!(enemy.attack, 8);
    }

    #[test]
    fn test_random_spawn_is_a_grunt() {
        for seed in 0..40 {
            let mut rng = StdRng::seed_from_u64(seed);
            let enemy = create_enemy(None, Difficulty::Medium, &mut rng);
            assert!(Archetype::GRUNTS.contains(&enemy.archetype));
            assert!(!enemy.archetype.is_boss());
        }
    }

    #[test]
    fn test_boss_rewards_and_phases() {
        let mut rng = StdRng::seed_from_u64(1);
        let boss = create_enemy(Some(Archetype::EmperorMavro), Difficulty::Medium, &mut rng);
        assert_eq!(boss.gold_reward, BOSS_GOLD_REWARD);
        assert_eq!(boss.xp_reward, BOSS_XP_REWARD);
        assert_eq!(boss.phases, 3);
        assert_eq!(boss.phase, 1);
        assert_eq!(boss.special_abilities.len(), 3);
    }

    #[test]
    fn test_limb_health_scales_with_size() {
        let mut rng = StdRng::seed_from_u64(2);
        let small = create_enemy(Some(Archetype::Zombats), Difficulty::Medium, &mut rng);
        let big = create_enemy(Some(Archetype::Bruisers), Difficulty::Medium, &mut rng);
        let boss = create_enemy(Some(Archetype::MetalAlice), Difficulty::Medium, &mut rng);
        assert!(small.limbs.left_arm.max_health < big.limbs.left_arm.max_health);
        assert!(big.limbs.left_arm.max_health < boss.limbs.left_arm.max_health);
        // Zombats: 20 * (25 / 50) = 10.
        assert_eq!(small.limbs.left_arm.max_health, 10);
        // Metal Alice: 20 * (200 / 50) * 2 = 160.
        assert_eq!(boss.limbs.left_arm.max_health, 160);
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!(Difficulty::parse("hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse("  Extreme "), Some(Difficulty::Extreme));
        assert_eq!(Difficulty::parse("nightmare"), None);
    }
}
