//! Drives a mission to completion: spawns the staged battles, tracks the
//! objective, and settles rewards or the consolation payout.

use rand::Rng;

use crate::battle::engine::run_battle;
use crate::battle::types::{BattleInterface, BattleOutcome, InterfaceError};
use crate::character::types::Ranger;
use crate::core::constants::*;
use crate::enemy::factory::{create_enemy, Difficulty};
use crate::mission::types::{Mission, Objective};

/// The player's call when an enemy shows up during timed survival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurvivalChoice {
    Fight,
    Evade,
}

/// Mission-specific prompts on top of the battle interface.
pub trait MissionInterface: BattleInterface {
    /// Asks whether the player jumps in when the escort is attacked.
    fn confirm_intervention(&mut self) -> Result<bool, InterfaceError>;

    /// Fight-or-evade prompt for timed survival turns.
    fn fight_or_evade(&mut self) -> Result<SurvivalChoice, InterfaceError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionVerdict {
    Success,
    Failure,
    /// The interface was interrupted or failed; nothing is settled.
    Aborted,
}

#[derive(Debug, Clone)]
pub struct MissionOutcome {
    pub verdict: MissionVerdict,
    pub message: String,
    pub gold_earned: u32,
    pub xp_earned: u32,
    pub key_found: Option<String>,
}

impl MissionOutcome {
    fn aborted() -> Self {
        MissionOutcome {
            verdict: MissionVerdict::Aborted,
            message: "Mission aborted".to_string(),
            gold_earned: 0,
            xp_earned: 0,
            key_found: None,
        }
    }
}

/// How a mission run fell short, when it did.
enum Stage {
    Failed(String),
    Aborted,
}

/// Runs one mission start to finish and settles the result on the player.
pub fn run_mission<I: MissionInterface>(
    player: &mut Ranger,
    mission: &Mission,
    interface: &mut I,
    rng: &mut impl Rng,
) -> MissionOutcome {
    let result = match mission.objective {
        Objective::Survival { waves, enemies_per_wave } => {
            run_survival(player, mission, waves, enemies_per_wave, interface, rng)
        }
        Objective::Elimination { targets } => {
            run_elimination(player, mission, targets, interface, rng)
        }
        Objective::Boss { archetype } => {
            player.gain_mega_energy(BOSS_MISSION_ENERGY_BOOST);
            let boss = create_enemy(Some(archetype), mission.difficulty, rng);
            let report = run_battle(player, boss, Some(mission.environment), interface, rng);
            match report.outcome {
                BattleOutcome::Victory => Ok(format!("{} defeated!", archetype)),
                BattleOutcome::Defeat => Err(Stage::Failed(format!("Defeated by {}", archetype))),
                BattleOutcome::Fled => Err(Stage::Failed("Boss battle abandoned".to_string())),
                BattleOutcome::Interrupted | BattleOutcome::Error => Err(Stage::Aborted),
            }
        }
        Objective::Escort { escort_health, waves } => {
            run_escort(player, mission, escort_health, waves, interface, rng)
        }
        Objective::TimedSurvival { turns } => {
            run_timed_survival(player, mission, turns, interface, rng)
        }
    };

    match result {
        Ok(message) => settle_success(player, mission, message, rng),
        Err(Stage::Failed(message)) => settle_failure(player, mission, message),
        Err(Stage::Aborted) => MissionOutcome::aborted(),
    }
}

fn run_survival<I: MissionInterface>(
    player: &mut Ranger,
    mission: &Mission,
    waves: u32,
    enemies_per_wave: u32,
    interface: &mut I,
    rng: &mut impl Rng,
) -> Result<String, Stage> {
    for wave in 1..=waves {
        let _ = interface.line(&format!("Wave {}/{} incoming!", wave, waves));
        for _ in 0..enemies_per_wave {
            let enemy = create_enemy(None, mission.difficulty, rng);
            let report = run_battle(player, enemy, Some(mission.environment), interface, rng);
            match report.outcome {
                BattleOutcome::Victory => {}
                BattleOutcome::Defeat => {
                    return Err(Stage::Failed(format!("Defeated in wave {}", wave)))
                }
                BattleOutcome::Fled => {
                    return Err(Stage::Failed("Mission abandoned".to_string()))
                }
                BattleOutcome::Interrupted | BattleOutcome::Error => return Err(Stage::Aborted),
            }
        }
        if wave < waves {
            let healed = player.heal((player.max_health as f64 * MISSION_WAVE_HEAL_FRACTION) as u32);
            let _ = interface.line(&format!(
                "Wave {} cleared. Recovered {} health before the next assault.",
                wave, healed
            ));
        }
    }
    Ok(format!("All {} waves survived!", waves))
}

fn run_elimination<I: MissionInterface>(
    player: &mut Ranger,
    mission: &Mission,
    targets: u32,
    interface: &mut I,
    rng: &mut impl Rng,
) -> Result<String, Stage> {
    let mut defeated = 0;
    while defeated < targets {
        let enemy = create_enemy(None, mission.difficulty, rng);
        let report = run_battle(player, enemy, Some(mission.environment), interface, rng);
        match report.outcome {
            BattleOutcome::Victory => {
                defeated += 1;
                let _ = interface.line(&format!("Progress: {}/{}", defeated, targets));
            }
            BattleOutcome::Defeat => {
                return Err(Stage::Failed(format!(
                    "Defeated after eliminating {} enemies",
                    defeated
                )))
            }
            // A fled battle leaves the target count where it was.
            BattleOutcome::Fled => {
                let _ = interface.line("The enemy escaped, but the sweep continues.");
            }
            BattleOutcome::Interrupted | BattleOutcome::Error => return Err(Stage::Aborted),
        }
        if defeated < targets {
            let healed =
                player.heal((player.max_health as f64 * MISSION_FIGHT_HEAL_FRACTION) as u32);
            let _ = interface.line(&format!("Recovered {} health.", healed));
        }
    }
    Ok(format!("All {} enemies eliminated!", targets))
}

fn run_escort<I: MissionInterface>(
    player: &mut Ranger,
    mission: &Mission,
    escort_health: i32,
    waves: u32,
    interface: &mut I,
    rng: &mut impl Rng,
) -> Result<String, Stage> {
    let mut escort_hp = escort_health;

    for wave in 1..=waves {
        let _ = interface.line(&format!("Assault wave {}/{}!", wave, waves));
        for _ in 0..rng.gen_range(1..=3) {
            let mut enemy = create_enemy(None, mission.difficulty, rng);
            let enemy_attack = enemy.attack;

            if rng.gen_bool(ESCORT_PLAYER_TARGET_CHANCE) {
                let report =
                    run_battle(player, enemy, Some(mission.environment), interface, rng);
                match report.outcome {
                    BattleOutcome::Victory => {}
                    BattleOutcome::Defeat => {
                        return Err(Stage::Failed("Defeated during the escort".to_string()))
                    }
                    // Running from the fight leaves the escort exposed.
                    BattleOutcome::Fled => {
                        escort_hp -= enemy_attack as i32;
                        let _ = interface.line(&format!(
                            "The escort takes {} damage while you retreat!",
                            enemy_attack
                        ));
                    }
                    BattleOutcome::Interrupted | BattleOutcome::Error => {
                        return Err(Stage::Aborted)
                    }
                }
            } else {
                let damage = (enemy_attack as i32 + rng.gen_range(-5i32..=5)).max(1);
                escort_hp -= damage;
                let _ = interface.line(&format!(
                    "{} attacks the escort for {} damage!",
                    enemy.name, damage
                ));

                match interface.confirm_intervention() {
                    Ok(true) => {
                        let raw = (player.attack as i32 + rng.gen_range(-3i32..=5)).max(1) as u32;
                        let report = enemy.take_damage(raw, rng);
                        let _ = interface.line(&format!(
                            "You intervene for {} damage!",
                            report.taken
                        ));
                        if enemy.is_alive() {
                            let counter =
                                player.take_damage(enemy.attack / ESCORT_INTERVENE_COUNTER_DIVISOR);
                            let _ =
                                interface.line(&format!("The counter hits you for {}!", counter));
                            if !player.is_alive() {
                                return Err(Stage::Failed(
                                    "Defeated during the escort".to_string(),
                                ));
                            }
                        }
                    }
                    Ok(false) => {}
                    Err(_) => return Err(Stage::Aborted),
                }
            }

            if escort_hp <= 0 {
                return Err(Stage::Failed("The escort was defeated!".to_string()));
            }
        }
        let _ = interface.line(&format!("Escort health: {}/{}", escort_hp, escort_health));
    }

    Ok(format!("Escort survived with {} HP!", escort_hp))
}

fn run_timed_survival<I: MissionInterface>(
    player: &mut Ranger,
    mission: &Mission,
    turns: u32,
    interface: &mut I,
    rng: &mut impl Rng,
) -> Result<String, Stage> {
    for turn in 1..=turns {
        let enemy = create_enemy(None, mission.difficulty, rng);
        let _ = interface.line(&format!(
            "Turn {}/{}: {} appears!",
            turn, turns, enemy.name
        ));

        match interface.fight_or_evade() {
            Ok(SurvivalChoice::Fight) => {
                let report =
                    run_battle(player, enemy, Some(mission.environment), interface, rng);
                match report.outcome {
                    BattleOutcome::Defeat => {
                        return Err(Stage::Failed(format!("Defeated on turn {}", turn)))
                    }
                    BattleOutcome::Interrupted | BattleOutcome::Error => {
                        return Err(Stage::Aborted)
                    }
                    _ => {}
                }
            }
            Ok(SurvivalChoice::Evade) => {
                if rng.gen_bool(EVADE_SUCCESS_CHANCE) {
                    let _ = interface.line("Evaded successfully!");
                } else {
                    let damage = player.take_damage(enemy.attack / 2);
                    let _ = interface.line(&format!("Caught while evading! {} damage!", damage));
                    if !player.is_alive() {
                        return Err(Stage::Failed(format!(
                            "Defeated while evading on turn {}",
                            turn
                        )));
                    }
                }
            }
            Err(_) => return Err(Stage::Aborted),
        }
    }
    Ok(format!("Survived all {} turns!", turns))
}

/// Success pay-out: mission rewards with the boss bonus, a shot at a
/// legendary key, and the Extreme energy bonus.
fn settle_success(
    player: &mut Ranger,
    mission: &Mission,
    message: String,
    rng: &mut impl Rng,
) -> MissionOutcome {
    let boss = matches!(mission.objective, Objective::Boss { .. });
    let bonus = if boss { MISSION_BOSS_REWARD_BONUS } else { 1.0 };
    let gold = (mission.gold_reward as f64 * bonus) as u32;
    let xp = (mission.xp_reward as f64 * bonus) as u32;

    player.gold += gold;
    player.gain_xp(xp);

    let mut key_found = None;
    if rng.gen_bool(mission.key_chance) {
        let key = MISSION_KEYS[rng.gen_range(0..MISSION_KEYS.len())];
        if player.add_ranger_key(key) {
            key_found = Some(key.to_string());
        }
    }

    if mission.difficulty == Difficulty::Extreme {
        player.gain_mega_energy(1);
    }

    MissionOutcome {
        verdict: MissionVerdict::Success,
        message,
        gold_earned: gold,
        xp_earned: xp,
        key_found,
    }
}

/// Failure pays a quarter of the gold as consolation.
fn settle_failure(player: &mut Ranger, mission: &Mission, message: String) -> MissionOutcome {
    let consolation = mission.gold_reward / MISSION_CONSOLATION_DIVISOR;
    player.gold += consolation;

    MissionOutcome {
        verdict: MissionVerdict::Failure,
        message,
        gold_earned: consolation,
        xp_earned: 0,
        key_found: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::types::PlayerAction;
    use crate::enemy::types::Enemy;
    use crate::mission::types::MissionKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Always attacks in battle, never intervenes, always fights.
    struct Script;

    impl BattleInterface for Script {
        fn line(&mut self, _text: &str) -> Result<(), InterfaceError> {
            Ok(())
        }

        fn choose_action(
            &mut self,
            _player: &Ranger,
            _enemy: &Enemy,
        ) -> Result<PlayerAction, InterfaceError> {
            Ok(PlayerAction::Attack)
        }

        fn run_combo(&mut self, sequence: &[char]) -> Result<(Vec<char>, f64), InterfaceError> {
            Ok((sequence.to_vec(), 10.0))
        }

        fn pause(&mut self) -> Result<(), InterfaceError> {
            Ok(())
        }
    }

    impl MissionInterface for Script {
        fn confirm_intervention(&mut self) -> Result<bool, InterfaceError> {
            Ok(false)
        }

        fn fight_or_evade(&mut self) -> Result<SurvivalChoice, InterfaceError> {
            Ok(SurvivalChoice::Fight)
        }
    }

    fn strong_player() -> Ranger {
        let mut player = Ranger::new("Test");
        player.attack = 100_000;
        player.max_health = 100_000;
        player.current_health = 100_000;
        player
    }

    #[test]
    fn test_boss_mission_success_pays_bonus() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut player = strong_player();
        let mission = Mission::new(MissionKind::SpaceBase, Difficulty::Easy, &mut rng);
        let base_gold = mission.gold_reward;

        let outcome = run_mission(&mut player, &mission, &mut Script, &mut rng);

        assert_eq!(outcome.verdict, MissionVerdict::Success);
        assert_eq!(
            outcome.gold_earned,
            (base_gold as f64 * MISSION_BOSS_REWARD_BONUS) as u32
        );
        // Mission gold on top of the battle's own reward.
        assert!(player.gold >= STARTING_GOLD + outcome.gold_earned);
    }

    #[test]
    fn test_survival_mission_clears_all_waves() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut player = strong_player();
        let mission = Mission::new(MissionKind::CityDefense, Difficulty::Easy, &mut rng);

        let outcome = run_mission(&mut player, &mission, &mut Script, &mut rng);

        assert_eq!(outcome.verdict, MissionVerdict::Success);
        assert_eq!(outcome.gold_earned, mission.gold_reward);
        // Six battles fought: 3 waves of 2.
        assert_eq!(player.battle_history.len(), 6);
    }

    #[test]
    fn test_failure_pays_quarter_consolation() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut player = Ranger::new("Test");
        player.attack = 1;
        player.current_health = 1;
        let mission = Mission::new(MissionKind::ForestBattle, Difficulty::Medium, &mut rng);

        let outcome = run_mission(&mut player, &mission, &mut Script, &mut rng);

        assert_eq!(outcome.verdict, MissionVerdict::Failure);
        assert_eq!(
            outcome.gold_earned,
            mission.gold_reward / MISSION_CONSOLATION_DIVISOR
        );
        assert_eq!(outcome.xp_earned, 0);
    }

    #[test]
    fn test_boss_mission_grants_energy_boost() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut player = strong_player();
        player.mega_energy = 0;
        let mission = Mission::new(MissionKind::SpaceBase, Difficulty::Easy, &mut rng);

        run_mission(&mut player, &mission, &mut Script, &mut rng);

        // The pre-battle boost landed before the (one-turn) battle.
        assert!(player.mega_energy >= BOSS_MISSION_ENERGY_BOOST);
    }

    #[test]
    fn test_interrupted_mission_settles_nothing() {
        struct Interrupting;

        impl BattleInterface for Interrupting {
            fn line(&mut self, _text: &str) -> Result<(), InterfaceError> {
                Ok(())
            }

            fn choose_action(
                &mut self,
                _player: &Ranger,
                _enemy: &Enemy,
            ) -> Result<PlayerAction, InterfaceError> {
                Err(InterfaceError::Interrupted)
            }

            fn run_combo(
                &mut self,
                _sequence: &[char],
            ) -> Result<(Vec<char>, f64), InterfaceError> {
                Err(InterfaceError::Interrupted)
            }

            fn pause(&mut self) -> Result<(), InterfaceError> {
                Ok(())
            }
        }

        impl MissionInterface for Interrupting {
            fn confirm_intervention(&mut self) -> Result<bool, InterfaceError> {
                Err(InterfaceError::Interrupted)
            }

            fn fight_or_evade(&mut self) -> Result<SurvivalChoice, InterfaceError> {
                Err(InterfaceError::Interrupted)
            }
        }

        let mut rng = StdRng::seed_from_u64(4);
        let mut player = Ranger::new("Test");
        let mission = Mission::new(MissionKind::ForestBattle, Difficulty::Easy, &mut rng);

        let outcome = run_mission(&mut player, &mission, &mut Interrupting, &mut rng);

        assert_eq!(outcome.verdict, MissionVerdict::Aborted);
        assert_eq!(player.gold, STARTING_GOLD);
        assert!(player.battle_history.is_empty());
    }
}
