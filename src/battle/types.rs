//! Battle vocabulary: player actions, terminal outcomes, the environment
//! table and the presentation-layer trait the engine talks through.

use std::fmt;

use crate::character::types::Ranger;
use crate::enemy::types::{Enemy, LimbId};

/// One player decision for a half-turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    Attack,
    Defend,
    UseSkill(String),
    TargetLimb(LimbId),
    Combo,
    Fusion,
    UseItem,
    Flee,
}

/// How a battle ended. `Interrupted` and `Error` come from the interface,
/// never from combat itself; neither awards nor costs anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory,
    Defeat,
    Fled,
    Interrupted,
    Error,
}

impl BattleOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            BattleOutcome::Victory => "Victory",
            BattleOutcome::Defeat => "Defeat",
            BattleOutcome::Fled => "Fled",
            BattleOutcome::Interrupted => "Interrupted",
            BattleOutcome::Error => "Error",
        }
    }
}

impl fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Everything the caller learns about a finished battle. The log is an
/// ordered transcript of every state change.
#[derive(Debug, Clone)]
pub struct BattleReport {
    pub outcome: BattleOutcome,
    pub turns: u32,
    pub gold_earned: u32,
    pub gold_lost: u32,
    pub xp_earned: u32,
    /// True when the victory XP pushed the player over a level threshold.
    pub leveled_up: bool,
    pub key_found: Option<String>,
    pub log: Vec<String>,
}

/// Battle locations. Each applies a small stat overlay for the duration of
/// the battle only; the engine reverts it on every terminal path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Forest,
    SpaceBase,
    Underwater,
    Mountain,
    City,
}

impl Environment {
    pub const ALL: [Environment; 5] = [
        Environment::Forest,
        Environment::SpaceBase,
        Environment::Underwater,
        Environment::Mountain,
        Environment::City,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Environment::Forest => "Forest",
            Environment::SpaceBase => "Space Base",
            Environment::Underwater => "Underwater",
            Environment::Mountain => "Mountain",
            Environment::City => "City",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Environment::Forest => "Dense cover favors quick footwork (+3 speed)",
            Environment::SpaceBase => "Home turf for the Armada (+5 enemy attack)",
            Environment::Underwater => "Water drags everyone down (+2 defense, -2 enemy speed)",
            Environment::Mountain => "Thin air, high ground (+3 attack)",
            Environment::City => "Civilians cheer you on (+1 Mega Energy)",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Why the interface could not serve a request. `Interrupted` is the user
/// bailing out (Ctrl+C); `Failure` is the terminal itself misbehaving.
#[derive(Debug)]
pub enum InterfaceError {
    Interrupted,
    Failure(String),
}

impl fmt::Display for InterfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterfaceError::Interrupted => write!(f, "battle interrupted"),
            InterfaceError::Failure(msg) => write!(f, "interface failure: {}", msg),
        }
    }
}

impl std::error::Error for InterfaceError {}

/// The engine's only channel to the outside world. Implemented by the
/// console frontend; tests drive the engine with scripted implementations.
pub trait BattleInterface {
    /// Shows one line of battle narration.
    fn line(&mut self, text: &str) -> Result<(), InterfaceError>;

    /// Asks the player for their next action.
    fn choose_action(&mut self, player: &Ranger, enemy: &Enemy)
        -> Result<PlayerAction, InterfaceError>;

    /// Runs the combo capture: shows the sequence, reads keys, and returns
    /// what was entered plus the elapsed seconds. Late input comes back
    /// late, it is never cut off.
    fn run_combo(&mut self, sequence: &[char]) -> Result<(Vec<char>, f64), InterfaceError>;

    /// A beat between half-turns for pacing. No-op in tests.
    fn pause(&mut self) -> Result<(), InterfaceError>;
}
