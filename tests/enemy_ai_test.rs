//! Integration test: enemy behavior states across the health sweep, limb
//! break penalties, and boss phase pressure under real damage.

use rand::rngs::StdRng;
use rand::SeedableRng;

use megaforce::character::types::Ranger;
use megaforce::core::constants::*;
use megaforce::enemy::ai::EnemyAction;
use megaforce::enemy::factory::{create_enemy, Archetype, Difficulty};
use megaforce::enemy::types::{AiState, LimbId};

#[test]
fn difficulty_scaling_rounds_to_nearest() {
    let mut rng = StdRng::seed_from_u64(0);
    let cases = [
        (Archetype::Loogies, Difficulty::Hard, 39),     // round(30 * 1.3)
        (Archetype::Zombats, Difficulty::Extreme, 40),  // round(25 * 1.6)
        (Archetype::Bruisers, Difficulty::Easy, 48),    // round(60 * 0.8)
        (Archetype::XBorgs, Difficulty::Medium, 45),
    ];
    for (archetype, difficulty, expected_health) in cases {
        let enemy = create_enemy(Some(archetype), difficulty, &mut rng);
        assert_eq!(enemy.max_health, expected_health, "{:?}", archetype);
    }
}

#[test]
fn health_sweep_produces_the_expected_states() {
    for seed in 0..30 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut enemy = create_enemy(Some(Archetype::Bruisers), Difficulty::Medium, &mut rng);

        // Last stand at one-fifth health.
        enemy.current_health = enemy.max_health / 5;
        enemy.update_ai_state(&mut rng);
        assert!(matches!(enemy.state, AiState::Fleeing | AiState::Enraged));

        // Wounded band: tanks are not defensive-pattern, so aggressive.
        enemy.current_health = enemy.max_health * 2 / 5;
        enemy.update_ai_state(&mut rng);
        assert_eq!(enemy.state, AiState::Aggressive);

        // Healthy band: pattern-derived or random, never fleeing.
        enemy.current_health = enemy.max_health;
        enemy.update_ai_state(&mut rng);
        assert!(matches!(
            enemy.state,
            AiState::Aggressive | AiState::Defensive
        ));
    }
}

#[test]
fn broken_limbs_cripple_output_permanently() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut enemy = create_enemy(Some(Archetype::Bruisers), Difficulty::Medium, &mut rng);
    let attack_at_spawn = enemy.attack;
    let speed_at_spawn = enemy.speed;

    let arm = enemy.limbs.left_arm.max_health;
    enemy.take_limb_damage(LimbId::LeftArm, arm).expect("intact");
    assert_eq!(
        enemy.attack,
        (attack_at_spawn as f64 * LIMB_BREAK_STAT_PENALTY) as u32
    );

    let leg = enemy.limbs.left_leg.max_health;
    enemy.take_limb_damage(LimbId::LeftLeg, leg).expect("intact");
    assert_eq!(
        enemy.speed,
        (speed_at_spawn as f64 * LIMB_BREAK_STAT_PENALTY) as i32
    );

    // Healing the body does not restore a broken limb or the stats.
    enemy.current_health = enemy.max_health;
    assert!(enemy.limbs.left_arm.broken);
    assert!(enemy.attack < attack_at_spawn);
}

#[test]
fn fleeing_enemy_either_escapes_or_attacks_desperately() {
    let mut saw_flee = false;
    let mut saw_desperate = false;

    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut enemy = create_enemy(Some(Archetype::Loogies), Difficulty::Medium, &mut rng);
        enemy.current_health = 1;

        let (action, _) = enemy.choose_action(&mut rng);
        match action {
            EnemyAction::Flee => saw_flee = true,
            EnemyAction::DesperateAttack | EnemyAction::EnragedAttack => saw_desperate = true,
            other => panic!("unexpected action at 1 hp: {:?}", other),
        }
        if saw_flee && saw_desperate {
            break;
        }
    }
    assert!(saw_flee && saw_desperate);
}

#[test]
fn boss_phase_two_arrives_under_real_damage() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut boss = create_enemy(Some(Archetype::MetalAlice), Difficulty::Medium, &mut rng);
    let attack_phase_one = boss.attack;

    // Chip the boss below half with body damage.
    while boss.current_health * 2 > boss.max_health {
        boss.take_damage(boss.defense + 15, &mut rng);
        if boss.check_phase_transition().is_some() {
            break;
        }
    }

    assert_eq!(boss.phase, 2);
    assert!(boss.attack >= attack_phase_one);
}

#[test]
fn defensive_actions_recover_health() {
    let mut rng = StdRng::seed_from_u64(12);
    let mut enemy = create_enemy(Some(Archetype::Bruisers), Difficulty::Medium, &mut rng);
    let mut player = Ranger::new("Test");

    enemy.current_health = enemy.max_health / 2;
    let before = enemy.current_health;
    enemy.execute_action(&EnemyAction::Heal, &mut player, &mut rng);
    assert_eq!(
        enemy.current_health,
        before + (enemy.max_health as f64 * ENEMY_HEAL_FRACTION) as u32
    );
    assert_eq!(player.current_health, player.max_health);
}
