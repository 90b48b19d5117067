//! Resolution of the player's half-turn.

use rand::Rng;

use crate::battle::combo::{generate_sequence, score_combo, ComboGrade};
use crate::battle::types::{BattleInterface, InterfaceError, PlayerAction};
use crate::character::types::{Ranger, StatusKind};
use crate::core::constants::*;
use crate::enemy::types::{Enemy, LimbError};

/// What resolving a player action tells the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionResolution {
    /// False when the action failed a precondition (unlearned skill, locked
    /// fusion, empty item pouch) and the player should pick again.
    pub consumed: bool,
    pub fled: bool,
    /// A perfectly executed combo; feeds the victory reward bonus. Partial
    /// and fumbled combos deal their damage but earn no bonus.
    pub combo_landed: bool,
}

impl ActionResolution {
    fn consumed() -> Self {
        ActionResolution { consumed: true, fled: false, combo_landed: false }
    }

    fn retry() -> Self {
        ActionResolution { consumed: false, fled: false, combo_landed: false }
    }
}

pub(crate) fn emit(
    interface: &mut dyn BattleInterface,
    log: &mut Vec<String>,
    text: String,
) -> Result<(), InterfaceError> {
    interface.line(&text)?;
    log.push(text);
    Ok(())
}

/// Applies one player action. Damage to the enemy goes through its body
/// mitigation; limb strikes and their collateral land unmitigated.
pub fn resolve_player_action(
    player: &mut Ranger,
    enemy: &mut Enemy,
    action: &PlayerAction,
    interface: &mut dyn BattleInterface,
    log: &mut Vec<String>,
    rng: &mut impl Rng,
) -> Result<ActionResolution, InterfaceError> {
    match action {
        PlayerAction::Attack => {
            let jitter = rng.gen_range(-3i32..=5);
            let raw = (player.attack as i32 + jitter).max(1) as u32;
            let report = enemy.take_damage(raw, rng);
            emit(
                interface,
                log,
                format!("{} strikes {} for {} damage!", player.name, enemy.name, report.taken),
            )?;
            if let Some(hit) = report.limb_hit {
                emit(
                    interface,
                    log,
                    format!(
                        "The blow crunches the {} for {} damage{}",
                        hit.limb.label(),
                        hit.damage,
                        if hit.newly_broken { " - it breaks!" } else { "!" }
                    ),
                )?;
            }
            Ok(ActionResolution::consumed())
        }
        PlayerAction::Defend => {
            if player.skills.get("Medic Protocol").copied().unwrap_or(false) {
                let healed = player.heal((player.max_health as f64 * DEFEND_HEAL_FRACTION) as u32);
                emit(
                    interface,
                    log,
                    format!("{} holds position and patches up {} health.", player.name, healed),
                )?;
            } else {
                player.guard += PLAYER_GUARD_BONUS;
                emit(
                    interface,
                    log,
                    format!("{} braces behind their weapon.", player.name),
                )?;
            }
            Ok(ActionResolution::consumed())
        }
        PlayerAction::UseSkill(name) => match player.use_skill(name) {
            Ok(outcome) => {
                emit(interface, log, outcome.message.clone())?;
                if let Some(damage) = outcome.damage {
                    let report = enemy.take_damage(damage, rng);
                    emit(
                        interface,
                        log,
                        format!("{} takes {} damage!", enemy.name, report.taken),
                    )?;
                }
                Ok(ActionResolution::consumed())
            }
            Err(err) => {
                emit(interface, log, err.to_string())?;
                Ok(ActionResolution::retry())
            }
        },
        PlayerAction::TargetLimb(limb) => {
            let jitter = rng.gen_range(-2i32..=3);
            let raw = (player.attack as i32 + jitter).max(1) as u32;
            match enemy.take_limb_damage(*limb, raw) {
                Ok(hit) => {
                    let body = raw / LIMB_ATTACK_BODY_DIVISOR;
                    enemy.current_health = enemy.current_health.saturating_sub(body);
                    emit(
                        interface,
                        log,
                        format!(
                            "{} targets the {}: {} limb damage, {} body damage{}",
                            player.name,
                            limb.label(),
                            hit.damage,
                            body,
                            if hit.newly_broken { " - the limb breaks!" } else { "." }
                        ),
                    )?;
                    Ok(ActionResolution::consumed())
                }
                Err(LimbError::AlreadyBroken(id)) => {
                    emit(
                        interface,
                        log,
                        format!("The {} is already broken - pick another target.", id.label()),
                    )?;
                    Ok(ActionResolution::retry())
                }
            }
        }
        PlayerAction::Combo => {
            let sequence = generate_sequence(rng);
            let (submitted, elapsed) = interface.run_combo(&sequence)?;
            let score = score_combo(&sequence, &submitted, elapsed, COMBO_TIME_LIMIT_SECONDS);

            match score.grade {
                ComboGrade::TooSlow => {
                    emit(
                        interface,
                        log,
                        format!("Too slow! The combo fizzles ({:.1}s).", elapsed),
                    )?;
                    Ok(ActionResolution::consumed())
                }
                grade => {
                    let damage =
                        ((player.attack as f64 * score.multiplier) as u32).max(1);
                    let report = enemy.take_damage(damage, rng);
                    let blurb = match grade {
                        ComboGrade::Perfect { .. } => "PERFECT combo!",
                        ComboGrade::Partial { accuracy } if accuracy >= COMBO_GOOD_ACCURACY => {
                            "Good combo!"
                        }
                        ComboGrade::Partial { .. } => "Sloppy combo...",
                        _ => "Fumbled combo...",
                    };
                    emit(
                        interface,
                        log,
                        format!("{} {} takes {} damage!", blurb, enemy.name, report.taken),
                    )?;
                    if let ComboGrade::Perfect { fast: true } = grade {
                        if rng.gen_bool(COMBO_STUN_CHANCE) {
                            enemy.add_status(StatusKind::Stunned, 1);
                            emit(
                                interface,
                                log,
                                format!("{} is stunned by the flawless combo!", enemy.name),
                            )?;
                        }
                    }
                    Ok(ActionResolution {
                        consumed: true,
                        fled: false,
                        combo_landed: matches!(grade, ComboGrade::Perfect { .. }),
                    })
                }
            }
        }
        PlayerAction::Fusion => match player.use_fusion_power() {
            Ok(damage) => {
                let report = enemy.take_damage(damage, rng);
                emit(
                    interface,
                    log,
                    format!(
                        "FUSION POWER! {} channels the Ranger Keys for {} damage!",
                        player.name, report.taken
                    ),
                )?;
                Ok(ActionResolution::consumed())
            }
            Err(err) => {
                emit(interface, log, err.to_string())?;
                Ok(ActionResolution::retry())
            }
        },
        PlayerAction::UseItem => {
            emit(interface, log, "No items in the pouch.".to_string())?;
            Ok(ActionResolution::retry())
        }
        PlayerAction::Flee => {
            emit(
                interface,
                log,
                format!("{} retreats from the battle!", player.name),
            )?;
            Ok(ActionResolution {
                consumed: true,
                fled: true,
                combo_landed: false,
            })
        }
    }
}
