use rand::Rng;
use std::fmt;

use crate::character::types::{StatusEffect, StatusKind};
use crate::core::constants::*;

/// Behavior state driving enemy action selection. Re-derived from health and
/// behavior pattern at every decision point rather than updated
/// incrementally; Stunned is a transient override from status effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiState {
    Aggressive,
    Defensive,
    Fleeing,
    Stunned,
    Enraged,
}

impl fmt::Display for AiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AiState::Aggressive => "aggressive",
            AiState::Defensive => "defensive",
            AiState::Fleeing => "fleeing",
            AiState::Stunned => "stunned",
            AiState::Enraged => "enraged",
        };
        write!(f, "{}", label)
    }
}

/// Fixed disposition of an archetype, as opposed to the per-turn [`AiState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BehaviorPattern {
    Aggressive,
    Defensive,
    Swarm,
    Tank,
    Tactical,
    Boss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimbId {
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl LimbId {
    pub const ALL: [LimbId; 4] = [
        LimbId::LeftArm,
        LimbId::RightArm,
        LimbId::LeftLeg,
        LimbId::RightLeg,
    ];

    pub fn is_arm(&self) -> bool {
        matches!(self, LimbId::LeftArm | LimbId::RightArm)
    }

    pub fn label(&self) -> &'static str {
        match self {
            LimbId::LeftArm => "left arm",
            LimbId::RightArm => "right arm",
            LimbId::LeftLeg => "left leg",
            LimbId::RightLeg => "right leg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limb {
    pub health: u32,
    pub max_health: u32,
    pub broken: bool,
}

impl Limb {
    pub fn new(max_health: u32) -> Self {
        Self {
            health: max_health,
            max_health,
            broken: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimbSet {
    pub left_arm: Limb,
    pub right_arm: Limb,
    pub left_leg: Limb,
    pub right_leg: Limb,
}

impl LimbSet {
    pub fn new(arm_health: u32, leg_health: u32) -> Self {
        Self {
            left_arm: Limb::new(arm_health),
            right_arm: Limb::new(arm_health),
            left_leg: Limb::new(leg_health),
            right_leg: Limb::new(leg_health),
        }
    }

    pub fn get(&self, id: LimbId) -> &Limb {
        match id {
            LimbId::LeftArm => &self.left_arm,
            LimbId::RightArm => &self.right_arm,
            LimbId::LeftLeg => &self.left_leg,
            LimbId::RightLeg => &self.right_leg,
        }
    }

    pub fn get_mut(&mut self, id: LimbId) -> &mut Limb {
        match id {
            LimbId::LeftArm => &mut self.left_arm,
            LimbId::RightArm => &mut self.right_arm,
            LimbId::LeftLeg => &mut self.left_leg,
            LimbId::RightLeg => &mut self.right_leg,
        }
    }

    pub fn broken_count(&self) -> usize {
        LimbId::ALL.iter().filter(|id| self.get(**id).broken).count()
    }

    pub fn any_arm_broken(&self) -> bool {
        self.left_arm.broken || self.right_arm.broken
    }

    pub fn both_legs_broken(&self) -> bool {
        self.left_leg.broken && self.right_leg.broken
    }

    /// Limbs still worth targeting.
    pub fn intact(&self) -> Vec<LimbId> {
        LimbId::ALL
            .iter()
            .copied()
            .filter(|id| !self.get(*id).broken)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LimbError {
    AlreadyBroken(LimbId),
}

impl fmt::Display for LimbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimbError::AlreadyBroken(id) => write!(f, "The {} is already broken", id.label()),
        }
    }
}

/// What happened when a limb was struck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimbHit {
    pub limb: LimbId,
    pub damage: u32,
    pub newly_broken: bool,
}

/// Result of body damage applied to an enemy: the damage that landed after
/// mitigation, plus any collateral limb hit from a heavy blow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitReport {
    pub taken: u32,
    pub limb_hit: Option<LimbHit>,
}

/// An AI-controlled combatant. Built fresh per battle by the factory and
/// discarded afterwards; nothing here persists.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub name: String,
    pub archetype: crate::enemy::factory::Archetype,
    pub max_health: u32,
    pub current_health: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: i32,
    pub gold_reward: u32,
    pub xp_reward: u32,
    pub state: AiState,
    pub behavior: BehaviorPattern,
    pub turn_counter: u32,
    pub limbs: LimbSet,
    pub status_effects: Vec<StatusEffect>,
    pub special_abilities: Vec<&'static str>,
    /// Temporary defense from a defensive stance, absorbed by the next hit.
    pub guard: u32,
    pub phase: u32,
    pub phases: u32,
}

impl Enemy {
    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    pub fn health_fraction(&self) -> f64 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.current_health as f64 / self.max_health as f64
    }

    pub fn has_status(&self, kind: StatusKind) -> bool {
        self.status_effects.iter().any(|e| e.kind == kind)
    }

    pub fn add_status(&mut self, kind: StatusKind, turns: u32) {
        self.status_effects.push(StatusEffect {
            kind,
            remaining_turns: turns,
        });
    }

    /// Applies body damage. Defense plus any guard mitigates with a floor of
    /// 1; the guard is spent by the hit. A single blow heavier than 1.5x the
    /// enemy's own attack also crunches a random limb for a third of the raw
    /// damage — rolling an already-broken limb wastes the bonus.
    pub fn take_damage(&mut self, raw: u32, rng: &mut impl Rng) -> HitReport {
        let mitigation = self.defense + self.guard;
        self.guard = 0;
        let taken = raw.saturating_sub(mitigation).max(1);
        self.current_health = self.current_health.saturating_sub(taken);

        let mut limb_hit = None;
        if raw as f64 > self.attack as f64 * CRIT_LIMB_THRESHOLD {
            let target = LimbId::ALL[rng.gen_range(0..LimbId::ALL.len())];
            limb_hit = self.take_limb_damage(target, raw / CRIT_LIMB_DAMAGE_DIVISOR).ok();
        }

        HitReport { taken, limb_hit }
    }

    /// Damages a specific limb. A broken limb cannot be hit again. Breaking
    /// an arm permanently cuts attack by 20%; breaking a leg cuts speed the
    /// same way. The penalty lands exactly once, at break time.
    pub fn take_limb_damage(&mut self, id: LimbId, amount: u32) -> Result<LimbHit, LimbError> {
        let limb = self.limbs.get_mut(id);
        if limb.broken {
            return Err(LimbError::AlreadyBroken(id));
        }

        let newly_broken = amount >= limb.health;
        limb.health = limb.health.saturating_sub(amount);
        if newly_broken {
            limb.broken = true;
            if id.is_arm() {
                self.attack = ((self.attack as f64 * LIMB_BREAK_STAT_PENALTY) as u32).max(1);
            } else {
                self.speed = (self.speed as f64 * LIMB_BREAK_STAT_PENALTY) as i32;
            }
        }

        Ok(LimbHit {
            limb: id,
            damage: amount,
            newly_broken,
        })
    }

    /// A short narrative readout of the enemy's condition.
    pub fn status_description(&self) -> String {
        let mut notes: Vec<String> = Vec::new();

        let fraction = self.health_fraction();
        if fraction <= 0.2 {
            notes.push("critically wounded".to_string());
        } else if fraction <= 0.5 {
            notes.push("badly injured".to_string());
        } else if fraction <= 0.8 {
            notes.push("wounded".to_string());
        }

        let broken: Vec<&str> = LimbId::ALL
            .iter()
            .filter(|id| self.limbs.get(**id).broken)
            .map(|id| id.label())
            .collect();
        if !broken.is_empty() {
            notes.push(format!("broken {}", broken.join(", ")));
        }

        match self.state {
            AiState::Enraged => notes.push("enraged".to_string()),
            AiState::Fleeing => notes.push("trying to flee".to_string()),
            AiState::Defensive => notes.push("defensive".to_string()),
            _ => {}
        }

        for effect in &self.status_effects {
            notes.push(effect.kind.label().to_string());
        }

        if notes.is_empty() {
            format!("{} appears ready for battle", self.name)
        } else {
            format!("{} is {}", self.name, notes.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemy::factory::{create_enemy, Archetype, Difficulty};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_enemy() -> Enemy {
        let mut rng = StdRng::seed_from_u64(7);
        create_enemy(Some(Archetype::Bruisers), Difficulty::Medium, &mut rng)
    }

    #[test]
    fn test_take_damage_min_one() {
        let mut enemy = test_enemy();
        let mut rng = StdRng::seed_from_u64(1);
        enemy.defense = 9_999;
        let report = enemy.take_damage(3, &mut rng);
        assert_eq!(report.taken, 1);
    }

    #[test]
    fn test_limb_breaks_once() {
        let mut enemy = test_enemy();
        let arm_health = enemy.limbs.left_arm.max_health;
        let attack_before = enemy.attack;

        let hit = enemy
            .take_limb_damage(LimbId::LeftArm, arm_health)
            .expect("intact limb");
        assert!(hit.newly_broken);
        assert_eq!(enemy.limbs.left_arm.health, 0);
        assert_eq!(
            enemy.attack,
            (attack_before as f64 * LIMB_BREAK_STAT_PENALTY) as u32
        );

        // A second strike on the same limb fails and changes nothing.
        let attack_after = enemy.attack;
        let err = enemy.take_limb_damage(LimbId::LeftArm, 5).unwrap_err();
        assert_eq!(err, LimbError::AlreadyBroken(LimbId::LeftArm));
        assert_eq!(enemy.attack, attack_after);
        assert!(enemy.limbs.left_arm.broken);
    }

    #[test]
    fn test_leg_break_cuts_speed() {
        let mut enemy = test_enemy();
        let speed_before = enemy.speed;
        let leg_health = enemy.limbs.right_leg.max_health;
        enemy
            .take_limb_damage(LimbId::RightLeg, leg_health)
            .expect("intact limb");
        assert_eq!(
            enemy.speed,
            (speed_before as f64 * LIMB_BREAK_STAT_PENALTY) as i32
        );
    }

    #[test]
    fn test_heavy_hit_crunches_a_limb() {
        let mut enemy = test_enemy();
        enemy.defense = 0;
        let mut rng = StdRng::seed_from_u64(3);
        let raw = (enemy.attack as f64 * CRIT_LIMB_THRESHOLD) as u32 + 10;
        let report = enemy.take_damage(raw, &mut rng);
        let hit = report.limb_hit.expect("crit threshold exceeded");
        assert_eq!(hit.damage, raw / CRIT_LIMB_DAMAGE_DIVISOR);
    }

    #[test]
    fn test_guard_spent_by_next_hit() {
        let mut enemy = test_enemy();
        enemy.defense = 0;
        enemy.guard = ENEMY_DEFEND_GUARD;
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(enemy.take_damage(10, &mut rng).taken, 10 - ENEMY_DEFEND_GUARD);
        assert_eq!(enemy.take_damage(10, &mut rng).taken, 10);
    }

    #[test]
    fn test_broken_count_and_intact() {
        let mut enemy = test_enemy();
        let arm = enemy.limbs.left_arm.max_health;
        let leg = enemy.limbs.left_leg.max_health;
        enemy.take_limb_damage(LimbId::LeftArm, arm).expect("intact");
        enemy.take_limb_damage(LimbId::LeftLeg, leg).expect("intact");
        assert_eq!(enemy.limbs.broken_count(), 2);
        assert_eq!(enemy.limbs.intact(), vec![LimbId::RightArm, LimbId::RightLeg]);
        assert!(enemy.limbs.any_arm_broken());
        assert!(!enemy.limbs.both_legs_broken());
    }
}
