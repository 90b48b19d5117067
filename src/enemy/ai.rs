//! The per-turn enemy brain: state transitions, action selection and
//! execution, plus the special-ability table.

use rand::Rng;

use crate::character::types::{tick_status_effects, Ranger, StatusKind};
use crate::core::constants::*;
use crate::enemy::types::{AiState, BehaviorPattern, Enemy};

/// What a special ability does when it fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AbilityKind {
    /// Attack x multiplier damage.
    Damage(f64),
    /// Restores a fraction of max health, no damage.
    SelfHeal(f64),
    /// Damage plus a status inflicted on the player.
    Afflict(f64, StatusKind, u32),
    /// Permanent (for this battle) defense increase, no damage.
    Shield(u32),
}

pub struct AbilitySpec {
    pub name: &'static str,
    pub kind: AbilityKind,
    pub flavor: &'static str,
}

pub const ABILITIES: [AbilitySpec; 13] = [
    AbilitySpec { name: "Swarm Strike", kind: AbilityKind::Damage(1.3), flavor: "The swarm closes in!" },
    AbilitySpec { name: "Sonic Screech", kind: AbilityKind::Damage(1.4), flavor: "A piercing screech rings out!" },
    AbilitySpec { name: "Ground Pound", kind: AbilityKind::Damage(1.6), flavor: "The ground shakes!" },
    AbilitySpec { name: "Laser Barrage", kind: AbilityKind::Damage(1.5), flavor: "Precision lasers rain down!" },
    AbilitySpec { name: "Cyber Blast", kind: AbilityKind::Damage(1.8), flavor: "Cyber energy surges!" },
    AbilitySpec { name: "System Repair", kind: AbilityKind::SelfHeal(0.25), flavor: "Systems repairing!" },
    AbilitySpec { name: "Data Corruption", kind: AbilityKind::Afflict(1.2, StatusKind::Corrupted, 2), flavor: "Your systems are corrupted!" },
    AbilitySpec { name: "Dark Strike", kind: AbilityKind::Damage(2.0), flavor: "Darkness engulfs you!" },
    AbilitySpec { name: "Shadow Shield", kind: AbilityKind::Shield(10), flavor: "Shadow armor activated!" },
    AbilitySpec { name: "Nightmare Wave", kind: AbilityKind::Damage(1.5), flavor: "Nightmares cloud your mind!" },
    AbilitySpec { name: "Imperial Blast", kind: AbilityKind::Damage(2.5), flavor: "Imperial power unleashed!" },
    AbilitySpec { name: "Royal Guard", kind: AbilityKind::Shield(15), flavor: "Royal defenses raised!" },
    AbilitySpec { name: "Conquest Beam", kind: AbilityKind::Damage(2.2), flavor: "Conquest beam fired!" },
];

pub fn ability_spec(name: &str) -> Option<&'static AbilitySpec> {
    ABILITIES.iter().find(|a| a.name == name)
}

/// The action an enemy resolved to take this turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnemyAction {
    Stunned,
    Flee,
    DesperateAttack,
    EnragedAttack,
    Defend,
    Heal,
    BasicAttack,
    PowerAttack,
    SpecialAttack,
}

impl Enemy {
    /// Re-derives the behavior state from health fraction and pattern.
    ///
    /// Not incremental: the previous state is irrelevant except through the
    /// health it led to. Two or more broken limbs force Defensive no matter
    /// what the health branch chose.
    pub fn update_ai_state(&mut self, rng: &mut impl Rng) {
        let fraction = self.health_fraction();

        self.state = if fraction <= AI_LAST_STAND_FRACTION {
            if rng.gen_bool(AI_FLEE_CHANCE) {
                AiState::Fleeing
            } else {
                AiState::Enraged
            }
        } else if fraction <= AI_WOUNDED_FRACTION {
            if self.behavior == BehaviorPattern::Defensive {
                AiState::Defensive
            } else {
                AiState::Aggressive
            }
        } else {
            match self.behavior {
                BehaviorPattern::Aggressive => AiState::Aggressive,
                BehaviorPattern::Defensive => AiState::Defensive,
                _ => {
                    if rng.gen_bool(0.5) {
                        AiState::Aggressive
                    } else {
                        AiState::Defensive
                    }
                }
            }
        };

        if self.limbs.broken_count() >= AI_FORCED_DEFENSIVE_BROKEN_LIMBS {
            self.state = AiState::Defensive;
        }
    }

    /// Runs one enemy decision point: advances the turn counter, updates the
    /// behavior state, ticks this enemy's own status effects (the player's
    /// tick happens elsewhere in the turn, deliberately), and picks an
    /// action. Returns the action plus an announcement line.
    pub fn choose_action(&mut self, rng: &mut impl Rng) -> (EnemyAction, String) {
        self.turn_counter += 1;
        self.update_ai_state(rng);
        tick_status_effects(&mut self.status_effects);

        if self.has_status(StatusKind::Stunned) {
            return (
                EnemyAction::Stunned,
                format!("{} is stunned and cannot act!", self.name),
            );
        }

        match self.state {
            AiState::Fleeing => {
                if rng.gen_bool(AI_FLEE_SUCCESS_CHANCE) {
                    (EnemyAction::Flee, format!("{} attempts to flee!", self.name))
                } else {
                    (
                        EnemyAction::DesperateAttack,
                        format!("{} makes a desperate attack!", self.name),
                    )
                }
            }
            AiState::Enraged => (
                EnemyAction::EnragedAttack,
                format!("{} is enraged and attacks with fury!", self.name),
            ),
            AiState::Defensive => {
                if rng.gen_bool(AI_DEFEND_CHANCE) {
                    (
                        EnemyAction::Defend,
                        format!("{} takes a defensive stance!", self.name),
                    )
                } else {
                    (EnemyAction::Heal, format!("{} tries to recover!", self.name))
                }
            }
            _ => {
                let mut candidates = vec![EnemyAction::BasicAttack];
                if !self.special_abilities.is_empty() && rng.gen_bool(AI_SPECIAL_CHANCE) {
                    candidates.push(EnemyAction::SpecialAttack);
                }
                if self.turn_counter % AI_POWER_ATTACK_INTERVAL == 0 {
                    candidates.push(EnemyAction::PowerAttack);
                }
                let action = candidates[rng.gen_range(0..candidates.len())].clone();
                (action, format!("{} prepares to attack!", self.name))
            }
        }
    }

    /// Carries out the chosen action against the player. Returns the damage
    /// that landed (post-mitigation) and a result line.
    pub fn execute_action(
        &mut self,
        action: &EnemyAction,
        player: &mut Ranger,
        rng: &mut impl Rng,
    ) -> (u32, String) {
        match action {
            EnemyAction::BasicAttack => {
                let dealt = player.take_damage(self.calculate_attack_damage(rng));
                (dealt, format!("{} attacks for {} damage!", self.name, dealt))
            }
            EnemyAction::PowerAttack => {
                let raw =
                    (self.calculate_attack_damage(rng) as f64 * POWER_ATTACK_MULTIPLIER) as u32;
                let dealt = player.take_damage(raw);
                (
                    dealt,
                    format!("{} uses a powerful attack for {} damage!", self.name, dealt),
                )
            }
            EnemyAction::EnragedAttack => {
                let raw =
                    (self.calculate_attack_damage(rng) as f64 * ENRAGED_ATTACK_MULTIPLIER) as u32;
                let dealt = player.take_damage(raw);
                (
                    dealt,
                    format!("{}'s enraged attack deals {} massive damage!", self.name, dealt),
                )
            }
            EnemyAction::DesperateAttack => {
                let raw =
                    (self.calculate_attack_damage(rng) as f64 * DESPERATE_ATTACK_MULTIPLIER) as u32;
                let dealt = player.take_damage(raw);
                (
                    dealt,
                    format!("{}'s desperate attack deals {} damage!", self.name, dealt),
                )
            }
            EnemyAction::SpecialAttack => {
                if self.special_abilities.is_empty() {
                    let dealt = player.take_damage(self.calculate_attack_damage(rng));
                    return (dealt, format!("{} attacks for {} damage!", self.name, dealt));
                }
                let ability = self.special_abilities[rng.gen_range(0..self.special_abilities.len())];
                self.use_special_ability(ability, player)
            }
            EnemyAction::Defend => {
                self.guard += ENEMY_DEFEND_GUARD;
                let healed = self.heal_fraction(ENEMY_DEFEND_HEAL_FRACTION);
                (
                    0,
                    format!("{} defends and recovers {} health!", self.name, healed),
                )
            }
            EnemyAction::Heal => {
                let healed = self.heal_fraction(ENEMY_HEAL_FRACTION);
                (0, format!("{} heals for {} health!", self.name, healed))
            }
            EnemyAction::Flee => (0, format!("{} is trying to escape!", self.name)),
            EnemyAction::Stunned => (0, format!("{} is stunned and cannot act!", self.name)),
        }
    }

    fn use_special_ability(&mut self, name: &str, player: &mut Ranger) -> (u32, String) {
        let Some(spec) = ability_spec(name) else {
            // Unknown name in the ability list; fall back to a plain hit.
            let dealt = player.take_damage(self.attack);
            return (dealt, format!("{} attacks for {} damage!", self.name, dealt));
        };

        match spec.kind {
            AbilityKind::Damage(mult) => {
                let dealt = player.take_damage((self.attack as f64 * mult) as u32);
                (
                    dealt,
                    format!("{} uses {}! {} Deals {} damage!", self.name, spec.name, spec.flavor, dealt),
                )
            }
            AbilityKind::SelfHeal(fraction) => {
                let healed = self.heal_fraction(fraction);
                (
                    0,
                    format!("{} uses {}! {} Recovered {} health.", self.name, spec.name, spec.flavor, healed),
                )
            }
            AbilityKind::Afflict(mult, status, turns) => {
                player.add_status(status, turns);
                let dealt = player.take_damage((self.attack as f64 * mult) as u32);
                (
                    dealt,
                    format!("{} uses {}! {} Deals {} damage!", self.name, spec.name, spec.flavor, dealt),
                )
            }
            AbilityKind::Shield(amount) => {
                self.defense += amount;
                (
                    0,
                    format!("{} uses {}! {}", self.name, spec.name, spec.flavor),
                )
            }
        }
    }

    /// Raw outgoing damage: the attack stat with broken-limb penalties and a
    /// uniform 0.8–1.2 roll, floored, never below 1. A broken arm costs 30%;
    /// losing both legs costs a further 20% on top of that.
    pub fn calculate_attack_damage(&self, rng: &mut impl Rng) -> u32 {
        let mut base = self.attack as f64;
        if self.limbs.any_arm_broken() {
            base *= BROKEN_ARM_DAMAGE_PENALTY;
        }
        if self.limbs.both_legs_broken() {
            base *= BROKEN_LEGS_DAMAGE_PENALTY;
        }
        let jitter = rng.gen_range(ATTACK_JITTER_MIN..ATTACK_JITTER_MAX);
        ((base * jitter) as u32).max(1)
    }

    /// Boss phase shift at half health: one-time attack and defense surge.
    pub fn check_phase_transition(&mut self) -> Option<String> {
        if self.phases > 1 && self.phase == 1 && self.health_fraction() <= 0.5 {
            self.phase = 2;
            self.attack = (self.attack as f64 * 1.2) as u32;
            self.defense = (self.defense as f64 * 1.1) as u32;
            return Some(format!(
                "{} enters phase 2! Systems upgraded!",
                self.name
            ));
        }
        None
    }

    fn heal_fraction(&mut self, fraction: f64) -> u32 {
        let amount = (self.max_health as f64 * fraction) as u32;
        let before = self.current_health;
        self.current_health = (self.current_health + amount).min(self.max_health);
        self.current_health - before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemy::factory::{create_enemy, Archetype, Difficulty};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn spawn(archetype: Archetype) -> Enemy {
        let mut rng = StdRng::seed_from_u64(11);
        create_enemy(Some(archetype), Difficulty::Medium, &mut rng)
    }

    #[test]
    fn test_last_stand_is_flee_or_enrage_only() {
        let mut enemy = spawn(Archetype::Loogies);
        enemy.current_health = enemy.max_health / 5; // exactly 20%
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            enemy.update_ai_state(&mut rng);
            assert!(
                matches!(enemy.state, AiState::Fleeing | AiState::Enraged),
                "unexpected state {:?} at 20% health",
                enemy.state
            );
        }
    }

    #[test]
    fn test_aggressive_pattern_above_forty_percent() {
        let mut enemy = spawn(Archetype::Loogies);
        let mut rng = StdRng::seed_from_u64(0);
        enemy.update_ai_state(&mut rng);
        assert_eq!(enemy.state, AiState::Aggressive);
    }

    #[test]
    fn test_two_broken_limbs_force_defensive() {
        let mut enemy = spawn(Archetype::Loogies);
        let arm = enemy.limbs.left_arm.max_health;
        let leg = enemy.limbs.left_leg.max_health;
        enemy.take_limb_damage(crate::enemy::types::LimbId::LeftArm, arm).expect("intact");
        enemy.take_limb_damage(crate::enemy::types::LimbId::LeftLeg, leg).expect("intact");
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            enemy.update_ai_state(&mut rng);
            assert_eq!(enemy.state, AiState::Defensive);
        }
    }

    #[test]
    fn test_stunned_enemy_skips_turn() {
        let mut enemy = spawn(Archetype::Bruisers);
        enemy.add_status(StatusKind::Stunned, 1);
        let mut rng = StdRng::seed_from_u64(2);
        let (action, _) = enemy.choose_action(&mut rng);
        assert_eq!(action, EnemyAction::Stunned);
        // The stun has been consumed; the next decision acts normally.
        let (action, _) = enemy.choose_action(&mut rng);
        assert_ne!(action, EnemyAction::Stunned);
    }

    #[test]
    fn test_attack_damage_with_broken_limbs() {
        let mut enemy = spawn(Archetype::Bruisers);
        let mut rng = StdRng::seed_from_u64(9);

        // Break an arm, then both legs: both penalties stack.
        let arm = enemy.limbs.left_arm.max_health;
        enemy.take_limb_damage(crate::enemy::types::LimbId::LeftArm, arm).expect("intact");
        let leg = enemy.limbs.left_leg.max_health;
        enemy.take_limb_damage(crate::enemy::types::LimbId::LeftLeg, leg).expect("intact");
        let leg = enemy.limbs.right_leg.max_health;
        enemy.take_limb_damage(crate::enemy::types::LimbId::RightLeg, leg).expect("intact");

        let expected_max = enemy.attack as f64
            * BROKEN_ARM_DAMAGE_PENALTY
            * BROKEN_LEGS_DAMAGE_PENALTY
            * ATTACK_JITTER_MAX;
        for _ in 0..100 {
            let damage = enemy.calculate_attack_damage(&mut rng);
            assert!(damage >= 1);
            assert!((damage as f64) <= expected_max);
        }
    }

    #[test]
    fn test_enemy_defend_guards_and_heals() {
        let mut enemy = spawn(Archetype::Bruisers);
        enemy.current_health = enemy.max_health / 2;
        let mut player = Ranger::new("Test");
        let mut rng = StdRng::seed_from_u64(4);
        let before = enemy.current_health;
        let (damage, _) = enemy.execute_action(&EnemyAction::Defend, &mut player, &mut rng);
        assert_eq!(damage, 0);
        assert_eq!(enemy.guard, ENEMY_DEFEND_GUARD);
        assert_eq!(
            enemy.current_health,
            before + (enemy.max_health as f64 * ENEMY_DEFEND_HEAL_FRACTION) as u32
        );
    }

    #[test]
    fn test_data_corruption_applies_status() {
        let mut enemy = spawn(Archetype::MetalAlice);
        let mut player = Ranger::new("Test");
        let mut rng = StdRng::seed_from_u64(6);
        enemy.special_abilities = vec!["Data Corruption"];
        let (damage, _) = enemy.execute_action(&EnemyAction::SpecialAttack, &mut player, &mut rng);
        assert!(damage >= 1);
        assert!(player.has_status(StatusKind::Corrupted));
    }

    #[test]
    fn test_boss_phase_transition_fires_once() {
        let mut boss = spawn(Archetype::MetalAlice);
        let attack_before = boss.attack;
        boss.current_health = boss.max_health / 2;
        assert!(boss.check_phase_transition().is_some());
        assert_eq!(boss.phase, 2);
        assert_eq!(boss.attack, (attack_before as f64 * 1.2) as u32);
        // Already in phase 2: no further transition.
        assert!(boss.check_phase_transition().is_none());
    }
}
