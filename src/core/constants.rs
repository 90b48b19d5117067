// Base ranger stats
pub const BASE_HEALTH: u32 = 100;
pub const BASE_ATTACK: u32 = 20;
pub const BASE_DEFENSE: u32 = 10;
pub const BASE_SPEED: i32 = 15;
pub const STARTING_GOLD: u32 = 100;
pub const STARTING_MEGA_ENERGY: u32 = 3;

// XP and leveling
pub const XP_PER_LEVEL: u32 = 100;
pub const LEVEL_HEALTH_BONUS: u32 = 5;
pub const LEVEL_ATTACK_BONUS: u32 = 2;
pub const LEVEL_DEFENSE_BONUS: u32 = 1;
pub const LEVEL_SPEED_BONUS: i32 = 1;
pub const MAX_LEVEL: u32 = 50;

// Mega energy
pub const MAX_MEGA_ENERGY: u32 = 5;
pub const ENERGY_REGEN_TURN_INTERVAL: u32 = 3;
pub const KEYS_PER_ENERGY_BONUS: usize = 5;

// Fusion power gate
pub const FUSION_MIN_LEVEL: u32 = 3;
pub const FUSION_ENERGY_COST: u32 = 3;
pub const FUSION_MIN_KEYS: usize = 2;
pub const FUSION_DAMAGE_MULTIPLIER: f64 = 3.0;

// Combo minigame
pub const COMBO_KEYS: [char; 6] = ['W', 'A', 'S', 'D', 'Q', 'E'];
pub const COMBO_MIN_LENGTH: usize = 3;
pub const COMBO_MAX_LENGTH: usize = 8;
pub const COMBO_TIME_LIMIT_SECONDS: f64 = 3.0;
pub const COMBO_PERFECT_MULTIPLIER: f64 = 2.0;
pub const COMBO_GOOD_ACCURACY: f64 = 0.6;
pub const COMBO_WEAK_MULTIPLIER: f64 = 0.5;
pub const COMBO_FUMBLE_MULTIPLIER: f64 = 0.3;
pub const COMBO_STUN_CHANCE: f64 = 0.3;
pub const COMBO_FAST_FRACTION: f64 = 0.5;

// Victory / defeat settlement
pub const PERFECT_HEALTH_BONUS: f64 = 1.5;
pub const GOOD_HEALTH_BONUS: f64 = 1.2;
pub const GOOD_HEALTH_FRACTION: f64 = 0.8;
pub const COMBO_REWARD_BONUS_PER_USE: f64 = 0.1;
pub const RANGER_KEY_DROP_CHANCE: f64 = 0.3;
pub const DEFEAT_GOLD_LOSS_FRACTION: f64 = 0.1;
pub const DEFEAT_GOLD_LOSS_CAP: u32 = 50;
pub const DEFEAT_REVIVE_FRACTION: f64 = 0.3;

// Ranger key pool (deduplicated collection; battle drops pick uniformly)
pub const RANGER_KEYS: [&str; 9] = [
    "Red Ranger Key",
    "Blue Ranger Key",
    "Yellow Ranger Key",
    "Pink Ranger Key",
    "Black Ranger Key",
    "Green Ranger Key",
    "White Ranger Key",
    "Gold Ranger Key",
    "Silver Ranger Key",
];

// Mission-reward key pool
pub const MISSION_KEYS: [&str; 9] = [
    "Legendary Red Key",
    "Legendary Blue Key",
    "Legendary Yellow Key",
    "Legendary Pink Key",
    "Legendary Black Key",
    "Legendary Green Key",
    "Ancient Ranger Key",
    "Mystic Ranger Key",
    "Quantum Ranger Key",
];

// Enemy AI thresholds
pub const AI_LAST_STAND_FRACTION: f64 = 0.2;
pub const AI_WOUNDED_FRACTION: f64 = 0.4;
pub const AI_FLEE_CHANCE: f64 = 0.6;
pub const AI_FLEE_SUCCESS_CHANCE: f64 = 0.3;
pub const AI_DEFEND_CHANCE: f64 = 0.4;
pub const AI_SPECIAL_CHANCE: f64 = 0.3;
pub const AI_POWER_ATTACK_INTERVAL: u32 = 3;
pub const AI_FORCED_DEFENSIVE_BROKEN_LIMBS: usize = 2;

// Enemy attack multipliers
pub const POWER_ATTACK_MULTIPLIER: f64 = 1.5;
pub const ENRAGED_ATTACK_MULTIPLIER: f64 = 2.0;
pub const DESPERATE_ATTACK_MULTIPLIER: f64 = 1.2;
pub const ATTACK_JITTER_MIN: f64 = 0.8;
pub const ATTACK_JITTER_MAX: f64 = 1.2;
pub const BROKEN_ARM_DAMAGE_PENALTY: f64 = 0.7;
pub const BROKEN_LEGS_DAMAGE_PENALTY: f64 = 0.8;
pub const LIMB_BREAK_STAT_PENALTY: f64 = 0.8;
pub const ENEMY_DEFEND_GUARD: u32 = 5;
pub const ENEMY_DEFEND_HEAL_FRACTION: f64 = 0.1;
pub const ENEMY_HEAL_FRACTION: f64 = 0.15;

// Critical-hit limb targeting: a single hit above attack * this threshold
// also deals damage / 3 to a random limb.
pub const CRIT_LIMB_THRESHOLD: f64 = 1.5;
pub const CRIT_LIMB_DAMAGE_DIVISOR: u32 = 3;

// Limb base health (scaled per enemy size in the factory)
pub const ARM_BASE_HEALTH: u32 = 20;
pub const LEG_BASE_HEALTH: u32 = 15;
pub const LIMB_SIZE_DIVISOR: f64 = 50.0;
pub const BOSS_LIMB_MULTIPLIER: f64 = 2.0;

// Player combat
pub const PLAYER_GUARD_BONUS: u32 = 3;
pub const DEFEND_HEAL_FRACTION: f64 = 0.1;
pub const INJURED_ARMS_DAMAGE_TAKEN: f64 = 1.2;
pub const LIMB_ATTACK_BODY_DIVISOR: u32 = 2;

// Enemy base rewards (non-boss)
pub const ENEMY_GOLD_REWARD: u32 = 25;
pub const ENEMY_XP_REWARD: u32 = 20;
pub const BOSS_GOLD_REWARD: u32 = 100;
pub const BOSS_XP_REWARD: u32 = 75;

// Mission generation
pub const MISSION_OFFER_MIN: usize = 3;
pub const MISSION_OFFER_MAX: usize = 5;
pub const MISSION_EASY_BIAS_THRESHOLD: usize = 3;
pub const MISSION_KEY_CHANCE_HARD: f64 = 0.4;
pub const MISSION_KEY_CHANCE_NORMAL: f64 = 0.2;
pub const MISSION_BOSS_REWARD_BONUS: f64 = 1.5;
pub const MISSION_CONSOLATION_DIVISOR: u32 = 4;
pub const MISSION_WAVE_HEAL_FRACTION: f64 = 0.2;
pub const MISSION_FIGHT_HEAL_FRACTION: f64 = 0.1;
pub const ESCORT_INTERVENE_COUNTER_DIVISOR: u32 = 2;
pub const ESCORT_PLAYER_TARGET_CHANCE: f64 = 0.7;
pub const EVADE_SUCCESS_CHANCE: f64 = 0.7;
pub const BOSS_MISSION_ENERGY_BOOST: u32 = 2;

// Commodity market
pub const MARKET_PRICE_FLOOR: f64 = 10.0;
pub const MARKET_PRICE_CEILING: f64 = 1000.0;
pub const MARKET_TREND_WEIGHT: f64 = 0.1;
pub const MARKET_TREND_STEP: f64 = 0.1;
pub const MARKET_HISTORY_LEN: usize = 10;
pub const MARKET_EVENT_CHANCE: f64 = 0.05;
pub const MARKET_EVENT_LIMIT: usize = 5;
pub const MARKET_VICTORY_VALUABLE_NUDGE: f64 = 0.05;
pub const MARKET_VICTORY_GRID_NUDGE: f64 = 0.08;
pub const MARKET_DEFEAT_NUDGE: f64 = -0.03;

// Commodities: (name, base price, volatility)
pub const COMMODITIES: [(&str, f64, f64); 5] = [
    ("Gold", 100.0, 0.1),
    ("Silver", 50.0, 0.15),
    ("Crypto", 200.0, 0.25),
    ("Energy Crystals", 150.0, 0.2),
    ("Morphin Grid", 300.0, 0.3),
];
