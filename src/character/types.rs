use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::constants::*;

/// A timed condition on a combatant. Durations count whole turns; an effect
/// applied with duration 1 is visible for exactly one decision point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub remaining_turns: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Stunned,
    Corrupted,
    SpeedBoost,
}

impl StatusKind {
    pub fn label(&self) -> &'static str {
        match self {
            StatusKind::Stunned => "stunned",
            StatusKind::Corrupted => "corrupted",
            StatusKind::SpeedBoost => "speed boost",
        }
    }
}

/// Prunes expired effects, then decrements the survivors.
///
/// The prune-before-decrement order means a freshly applied 1-turn effect
/// survives exactly one call with its flag still observable.
pub fn tick_status_effects(effects: &mut Vec<StatusEffect>) {
    effects.retain(|e| e.remaining_turns > 0);
    for effect in effects.iter_mut() {
        effect.remaining_turns -= 1;
    }
}

/// Injury severity counters for the player's limbs. Unlike enemy limbs these
/// never "break"; any arm severity above zero raises damage taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimbInjuries {
    pub arms: u32,
    pub legs: u32,
}

impl LimbInjuries {
    pub fn any(&self) -> bool {
        self.arms > 0 || self.legs > 0
    }
}

/// One line of a ranger's persistent battle history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleRecord {
    pub enemy: String,
    pub result: String,
    pub turns: u32,
    #[serde(default)]
    pub gold_earned: u32,
    #[serde(default)]
    pub gold_lost: u32,
    #[serde(default)]
    pub xp_earned: u32,
    pub timestamp: i64,
}

/// A commodity position held by the player, tracked at average cost.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Holding {
    pub amount: f64,
    pub avg_price: f64,
}

/// The player-controlled combatant.
///
/// IMPORTANT: new fields need `#[serde(default)]` so old save files keep
/// loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ranger {
    pub name: String,
    pub color: String,
    pub power_type: String,
    pub weapon: String,
    pub level: u32,
    pub xp: u32,
    pub max_health: u32,
    pub current_health: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: i32,
    pub gold: u32,
    pub mega_energy: u32,
    pub skill_points: u32,
    pub ranger_keys: Vec<String>,
    #[serde(default)]
    pub battle_history: Vec<BattleRecord>,
    #[serde(default)]
    pub investments: BTreeMap<String, Holding>,
    pub skills: BTreeMap<String, bool>,
    pub limb_injuries: LimbInjuries,
    pub status_effects: Vec<StatusEffect>,
    /// Temporary defense from a defensive stance, absorbed by the next hit.
    #[serde(skip)]
    pub guard: u32,
}

impl Ranger {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            color: String::new(),
            power_type: String::new(),
            weapon: String::new(),
            level: 1,
            xp: 0,
            max_health: BASE_HEALTH,
            current_health: BASE_HEALTH,
            attack: BASE_ATTACK,
            defense: BASE_DEFENSE,
            speed: BASE_SPEED,
            gold: STARTING_GOLD,
            mega_energy: STARTING_MEGA_ENERGY,
            skill_points: 0,
            ranger_keys: Vec::new(),
            battle_history: Vec::new(),
            investments: BTreeMap::new(),
            skills: crate::character::skills::starting_skills(),
            limb_injuries: LimbInjuries::default(),
            status_effects: Vec::new(),
            guard: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    /// Applies incoming damage. Defense (plus any guard) is subtracted with a
    /// floor of 1 so damage can never be nullified outright; injured arms
    /// raise the result by 20%. Returns the damage actually taken.
    pub fn take_damage(&mut self, raw: u32) -> u32 {
        let mitigation = self.defense + self.guard;
        self.guard = 0;
        let mut actual = raw.saturating_sub(mitigation).max(1);
        if self.limb_injuries.arms > 0 {
            actual = (actual as f64 * INJURED_ARMS_DAMAGE_TAKEN) as u32;
        }
        self.current_health = self.current_health.saturating_sub(actual);
        actual
    }

    /// Heals up to `amount`, clamped at max health. Returns the delta applied.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.current_health;
        self.current_health = (self.current_health + amount).min(self.max_health);
        self.current_health - before
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

    pub fn tick_status_effects(&mut self) {
        tick_status_effects(&mut self.status_effects);
    }

    /// Grants XP and resolves any level-ups. Each level adds flat stat
    /// bonuses and a skill point; certain levels auto-unlock skills.
    /// Returns true if at least one level was gained.
    pub fn gain_xp(&mut self, amount: u32) -> bool {
        self.xp += amount;
        let old_level = self.level;

        while self.xp >= XP_PER_LEVEL * self.level && self.level < MAX_LEVEL {
            self.level += 1;
            self.skill_points += 1;
            self.max_health += LEVEL_HEALTH_BONUS;
            self.current_health += LEVEL_HEALTH_BONUS;
            self.attack += LEVEL_ATTACK_BONUS;
            self.defense += LEVEL_DEFENSE_BONUS;
            self.speed += LEVEL_SPEED_BONUS;

            if let Some(skill) = crate::character::skills::auto_unlock_at(self.level) {
                self.skills.insert(skill.to_string(), true);
            }
        }

        self.level > old_level
    }

    /// Adds a ranger key to the collection if not already owned. Every fifth
    /// key grants a bonus point of mega energy.
    pub fn add_ranger_key(&mut self, key: &str) -> bool {
        if self.ranger_keys.iter().any(|k| k == key) {
            return false;
        }
        self.ranger_keys.push(key.to_string());
        if self.ranger_keys.len() % KEYS_PER_ENERGY_BONUS == 0 {
            self.mega_energy = (self.mega_energy + 1).min(MAX_MEGA_ENERGY);
        }
        true
    }

    pub fn gain_mega_energy(&mut self, amount: u32) {
        self.mega_energy = (self.mega_energy + amount).min(MAX_MEGA_ENERGY);
    }

    pub fn health_fraction(&self) -> f64 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.current_health as f64 / self.max_health as f64
    }
}
