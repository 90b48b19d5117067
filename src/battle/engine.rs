//! The battle loop: strict player-then-enemy alternation with victory and
//! defeat checks between half-turns, settlement of rewards and penalties,
//! and the environment overlay.

use chrono::Utc;
use rand::Rng;

use crate::battle::actions::{emit, resolve_player_action};
use crate::battle::types::{
    BattleInterface, BattleOutcome, BattleReport, Environment, InterfaceError,
};
use crate::character::types::{BattleRecord, Ranger};
use crate::core::constants::*;
use crate::enemy::ai::EnemyAction;
use crate::enemy::factory::battle_cry;
use crate::enemy::types::Enemy;

/// The stat deltas an environment lends for the duration of one battle.
/// Reverted on every terminal path, including interruption and interface
/// failure. The City energy grant is a resource, not a stat, and stays.
struct EnvironmentOverlay {
    environment: Environment,
}

impl EnvironmentOverlay {
    fn apply(environment: Environment, player: &mut Ranger, enemy: &mut Enemy) -> Self {
        match environment {
            Environment::Forest => player.speed += 3,
            Environment::SpaceBase => enemy.attack += 5,
            Environment::Underwater => {
                player.defense += 2;
                enemy.speed -= 2;
            }
            Environment::Mountain => player.attack += 3,
            Environment::City => player.gain_mega_energy(1),
        }
        EnvironmentOverlay { environment }
    }

    fn revert(self, player: &mut Ranger, enemy: &mut Enemy) {
        match self.environment {
            Environment::Forest => player.speed -= 3,
            Environment::SpaceBase => enemy.attack = enemy.attack.saturating_sub(5),
            Environment::Underwater => {
                player.defense -= 2;
                enemy.speed += 2;
            }
            Environment::Mountain => player.attack -= 3,
            Environment::City => {}
        }
    }
}

/// Runs a battle to a terminal state and settles the consequences on the
/// player. The enemy is consumed; nothing about it outlives the battle.
pub fn run_battle(
    player: &mut Ranger,
    mut enemy: Enemy,
    environment: Option<Environment>,
    interface: &mut dyn BattleInterface,
    rng: &mut impl Rng,
) -> BattleReport {
    let mut log = Vec::new();
    let mut turns = 0u32;
    let mut combos = 0u32;

    let overlay = environment.map(|env| {
        log.push(format!("Battlefield: {} - {}", env.label(), env.description()));
        EnvironmentOverlay::apply(env, player, &mut enemy)
    });
    log.push(battle_cry(enemy.archetype).to_string());

    let result = battle_loop(
        player, &mut enemy, interface, &mut log, rng, &mut turns, &mut combos,
    );
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(InterfaceError::Interrupted) => BattleOutcome::Interrupted,
        Err(InterfaceError::Failure(msg)) => {
            log.push(format!("Battle aborted: {}", msg));
            BattleOutcome::Error
        }
    };

    if let Some(overlay) = overlay {
        overlay.revert(player, &mut enemy);
    }
    // Guard is battle-scoped and does not follow the ranger out. Status
    // effects do: they expire only through their per-turn countdown.
    player.guard = 0;

    let mut report = BattleReport {
        outcome,
        turns,
        gold_earned: 0,
        gold_lost: 0,
        xp_earned: 0,
        leveled_up: false,
        key_found: None,
        log,
    };

    match outcome {
        BattleOutcome::Victory => settle_victory(player, &enemy, combos, &mut report, rng),
        BattleOutcome::Defeat => settle_defeat(player, &mut report),
        BattleOutcome::Fled => {}
        // Abnormal endings neither credit nor penalize, and leave no record.
        BattleOutcome::Interrupted | BattleOutcome::Error => return report,
    }

    player.battle_history.push(BattleRecord {
        enemy: enemy.name.clone(),
        result: outcome.label().to_string(),
        turns,
        gold_earned: report.gold_earned,
        gold_lost: report.gold_lost,
        xp_earned: report.xp_earned,
        timestamp: Utc::now().timestamp(),
    });

    report
}

fn battle_loop(
    player: &mut Ranger,
    enemy: &mut Enemy,
    interface: &mut dyn BattleInterface,
    log: &mut Vec<String>,
    rng: &mut impl Rng,
    turns: &mut u32,
    combos: &mut u32,
) -> Result<BattleOutcome, InterfaceError> {
    loop {
        *turns += 1;

        // Player half-turn; failed preconditions re-prompt without cost.
        loop {
            let action = interface.choose_action(player, enemy)?;
            let resolution =
                resolve_player_action(player, enemy, &action, interface, log, rng)?;
            if resolution.fled {
                return Ok(BattleOutcome::Fled);
            }
            if resolution.combo_landed {
                *combos += 1;
            }
            if resolution.consumed {
                break;
            }
        }

        if !enemy.is_alive() {
            emit(interface, log, format!("{} is destroyed!", enemy.name))?;
            return Ok(BattleOutcome::Victory);
        }
        if let Some(message) = enemy.check_phase_transition() {
            emit(interface, log, message)?;
        }
        interface.pause()?;

        // Enemy half-turn.
        let (action, announcement) = enemy.choose_action(rng);
        emit(interface, log, announcement)?;
        if action == EnemyAction::Flee {
            emit(
                interface,
                log,
                format!("{} escapes into the shadows!", enemy.name),
            )?;
            return Ok(BattleOutcome::Fled);
        }
        let (_, line) = enemy.execute_action(&action, player, rng);
        emit(interface, log, line)?;

        if !player.is_alive() {
            emit(interface, log, format!("{} falls!", player.name))?;
            return Ok(BattleOutcome::Defeat);
        }

        // End of the full turn: statuses expire, the grid trickles energy.
        player.tick_status_effects();
        if *turns % ENERGY_REGEN_TURN_INTERVAL == 0 && player.mega_energy < MAX_MEGA_ENERGY {
            player.gain_mega_energy(1);
            emit(
                interface,
                log,
                "+1 Mega Energy from the Morphin Grid.".to_string(),
            )?;
        }
        interface.pause()?;
    }
}

/// Victory pay-out: base rewards scaled by remaining health and by combo
/// usage, plus a chance at a ranger key from the fixed pool.
fn settle_victory(
    player: &mut Ranger,
    enemy: &Enemy,
    combos: u32,
    report: &mut BattleReport,
    rng: &mut impl Rng,
) {
    let health_bonus = if player.current_health == player.max_health {
        PERFECT_HEALTH_BONUS
    } else if player.health_fraction() >= GOOD_HEALTH_FRACTION {
        GOOD_HEALTH_BONUS
    } else {
        1.0
    };
    let combo_bonus = 1.0 + combos as f64 * COMBO_REWARD_BONUS_PER_USE;

    report.gold_earned = (enemy.gold_reward as f64 * health_bonus * combo_bonus) as u32;
    report.xp_earned = (enemy.xp_reward as f64 * health_bonus * combo_bonus) as u32;
    player.gold += report.gold_earned;
    report.leveled_up = player.gain_xp(report.xp_earned);
    report
        .log
        .push(format!("Earned {} gold and {} XP!", report.gold_earned, report.xp_earned));
    if report.leveled_up {
        report
            .log
            .push(format!("{} reached level {}!", player.name, player.level));
    }

    if rng.gen_bool(RANGER_KEY_DROP_CHANCE) {
        let key = RANGER_KEYS[rng.gen_range(0..RANGER_KEYS.len())];
        if player.add_ranger_key(key) {
            report.key_found = Some(key.to_string());
            report.log.push(format!("Found a {}!", key));
        }
    }
}

/// Defeat penalty: capped gold loss and a revive at a fraction of max
/// health, never dead-on-arrival.
fn settle_defeat(player: &mut Ranger, report: &mut BattleReport) {
    report.gold_lost =
        ((player.gold as f64 * DEFEAT_GOLD_LOSS_FRACTION) as u32).min(DEFEAT_GOLD_LOSS_CAP);
    player.gold -= report.gold_lost;
    player.current_health =
        ((player.max_health as f64 * DEFEAT_REVIVE_FRACTION) as u32).max(1);
    report
        .log
        .push(format!("Lost {} gold. Revived at base.", report.gold_lost));
}
