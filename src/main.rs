use std::io::{self, Write};

use rand::Rng;

use megaforce::battle::engine::run_battle;
use megaforce::battle::types::{BattleOutcome, Environment};
use megaforce::character::creation::{create_ranger, COLOR_BONUSES, POWER_BONUSES, WEAPON_STATS};
use megaforce::character::skills::SKILLS;
use megaforce::character::types::Ranger;
use megaforce::core::constants::*;
use megaforce::enemy::factory::{create_enemy, Difficulty};
use megaforce::market::types::Market;
use megaforce::mission::runner::{run_mission, MissionVerdict};
use megaforce::mission::types::{generate_missions, Mission};
use megaforce::save_manager;
use megaforce::ui::console::ConsoleUi;

struct Session {
    ranger: Option<Ranger>,
    market: Market,
    completed_missions: usize,
    mission_offers: Vec<Mission>,
}

fn main() {
    let mut session = Session {
        ranger: None,
        market: Market::new(),
        completed_missions: 0,
        mission_offers: Vec::new(),
    };
    let mut rng = rand::thread_rng();

    println!("=== MEGAFORCE COMMAND CENTER ===");
    loop {
        println!();
        if let Some(ranger) = &session.ranger {
            println!(
                "{} ({} Ranger) - level {}, {} gold",
                ranger.name, ranger.color, ranger.level, ranger.gold
            );
        }
        println!("1. New ranger     2. Load game    3. Quick battle");
        println!("4. Missions       5. Market       6. Character sheet");
        println!("7. Learn skills   8. Save game    9. Quit");

        match read_line("> ").as_str() {
            "1" => session.ranger = Some(new_ranger_wizard()),
            "2" => load_menu(&mut session),
            "3" => quick_battle(&mut session, &mut rng),
            "4" => mission_menu(&mut session, &mut rng),
            "5" => market_menu(&mut session, &mut rng),
            "6" => character_sheet(&session),
            "7" => learn_skills(&mut session),
            "8" => save_menu(&session),
            "9" => {
                println!("May the power protect you.");
                return;
            }
            _ => println!("Invalid choice."),
        }
    }
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return String::new();
    }
    line.trim().to_string()
}

fn pick<T>(label: &str, options: &[T], name: impl Fn(&T) -> String) -> usize {
    loop {
        println!("{}", label);
        for (i, option) in options.iter().enumerate() {
            println!("  {}. {}", i + 1, name(option));
        }
        if let Ok(n) = read_line("> ").parse::<usize>() {
            if n >= 1 && n <= options.len() {
                return n - 1;
            }
        }
        println!("Invalid choice.");
    }
}

fn new_ranger_wizard() -> Ranger {
    let name = loop {
        let name = read_line("Ranger name: ");
        if !name.is_empty() {
            break name;
        }
    };
    let color = pick("Choose your color:", &COLOR_BONUSES, |b| b.name.to_string());
    let power = pick("Choose your power source:", &POWER_BONUSES, |b| {
        format!("{} ({})", b.name, b.special)
    });
    let weapon = pick("Choose your weapon:", &WEAPON_STATS, |w| {
        format!("{} (damage {})", w.name, w.damage)
    });

    let ranger = create_ranger(
        &name,
        COLOR_BONUSES[color].name,
        POWER_BONUSES[power].name,
        WEAPON_STATS[weapon].name,
    );
    println!(
        "{} the {} Ranger reports for duty! ({} HP, {} attack)",
        ranger.name, ranger.color, ranger.max_health, ranger.attack
    );
    ranger
}

fn load_menu(session: &mut Session) {
    let saves = save_manager::list_saves();
    if saves.is_empty() {
        println!("No save files found.");
        return;
    }
    for save in &saves {
        println!(
            "  Slot {}: {} (level {})",
            save.slot, save.ranger_name, save.level
        );
    }
    let slot = match read_line("Load slot: ").parse::<u32>() {
        Ok(n) => n,
        Err(_) => {
            println!("Invalid slot.");
            return;
        }
    };
    match save_manager::load_game(slot) {
        Ok(profile) => {
            println!("Welcome back, {}!", profile.ranger.name);
            session.ranger = Some(profile.ranger);
            session.market = profile.market;
        }
        Err(e) => println!("Could not load slot {}: {}", slot, e),
    }
}

fn save_menu(session: &Session) {
    let Some(ranger) = &session.ranger else {
        println!("Create or load a ranger first.");
        return;
    };
    let slot = match read_line("Save slot (1-5): ").parse::<u32>() {
        Ok(n) => n,
        Err(_) => {
            println!("Invalid slot.");
            return;
        }
    };
    match save_manager::save_game(slot, ranger, &session.market) {
        Ok(()) => println!("Saved to slot {}.", slot),
        Err(e) => println!("Save failed: {}", e),
    }
}

fn prompt_difficulty() -> Difficulty {
    let input = read_line("Difficulty (Easy/Medium/Hard/Extreme) [Medium]: ");
    if input.is_empty() {
        return Difficulty::Medium;
    }
    Difficulty::parse(&input).unwrap_or_else(|| {
        println!("Unknown difficulty, using Medium.");
        Difficulty::Medium
    })
}

fn quick_battle(session: &mut Session, rng: &mut impl Rng) {
    let Some(ranger) = session.ranger.as_mut() else {
        println!("Create or load a ranger first.");
        return;
    };

    let difficulty = prompt_difficulty();
    let enemy = create_enemy(None, difficulty, rng);
    let environment = Environment::ALL[rng.gen_range(0..Environment::ALL.len())];
    println!("A wild {} appears in the {}!", enemy.name, environment);

    let mut ui = ConsoleUi::new();
    let report = run_battle(ranger, enemy, Some(environment), &mut ui, rng);

    match report.outcome {
        BattleOutcome::Victory | BattleOutcome::Defeat => {
            session.market.update_prices(Some(report.outcome), rng);
        }
        _ => {}
    }
    println!(
        "Battle over: {} in {} turns (+{} gold, +{} XP)",
        report.outcome, report.turns, report.gold_earned, report.xp_earned
    );
    if report.leveled_up {
        if let Some(ranger) = &session.ranger {
            println!("LEVEL UP! {} is now level {}!", ranger.name, ranger.level);
        }
    }
    if let Some(key) = report.key_found {
        println!("New Ranger Key: {}", key);
    }
}

fn mission_menu(session: &mut Session, rng: &mut impl Rng) {
    let Some(ranger) = session.ranger.as_mut() else {
        println!("Create or load a ranger first.");
        return;
    };

    if session.mission_offers.is_empty() {
        session.mission_offers = generate_missions(session.completed_missions, rng);
    }

    println!("\nAVAILABLE MISSIONS");
    for (i, mission) in session.mission_offers.iter().enumerate() {
        println!(
            "  {}. {} ({}) - {} [{} gold, {} XP]",
            i + 1,
            mission.kind,
            mission.difficulty,
            mission.objective.description(),
            mission.gold_reward,
            mission.xp_reward,
        );
    }
    println!("  {}. Back", session.mission_offers.len() + 1);

    let choice = match read_line("> ").parse::<usize>() {
        Ok(n) if n >= 1 && n <= session.mission_offers.len() => n - 1,
        _ => return,
    };

    let mission = session.mission_offers.remove(choice);
    let mut ui = ConsoleUi::new();
    let outcome = run_mission(ranger, &mission, &mut ui, rng);

    println!("\n{}", outcome.message);
    match outcome.verdict {
        MissionVerdict::Success => {
            session.completed_missions += 1;
            println!(
                "Mission complete! +{} gold, +{} XP",
                outcome.gold_earned, outcome.xp_earned
            );
            if let Some(key) = outcome.key_found {
                println!("Mission bonus: {}!", key);
            }
        }
        MissionVerdict::Failure => {
            println!("Mission failed. Consolation: {} gold", outcome.gold_earned);
        }
        MissionVerdict::Aborted => {
            // Nothing settled; put the offer back.
            session.mission_offers.push(mission);
        }
    }
}

fn market_menu(session: &mut Session, rng: &mut impl Rng) {
    let Some(ranger) = session.ranger.as_mut() else {
        println!("Create or load a ranger first.");
        return;
    };
    session.market.update_prices(None, rng);

    loop {
        println!("\nCOMMODITY MARKET ({} gold on hand)", ranger.gold);
        for (name, commodity) in &session.market.commodities {
            let trend = if commodity.trend > 0.3 {
                "bullish"
            } else if commodity.trend < -0.3 {
                "bearish"
            } else {
                "stable"
            };
            println!("  {:<16} {:>8.2} gold  [{}]", name, commodity.price, trend);
        }
        for event in session.market.events.iter().rev().take(3) {
            println!("  NEWS: {}", event.message);
        }
        println!("1. Buy   2. Sell   3. Portfolio   4. Back");

        match read_line("> ").as_str() {
            choice @ ("1" | "2") => {
                let name = read_line("Commodity name: ");
                let amount = match read_line("Amount: ").parse::<u32>() {
                    Ok(n) if n > 0 => n,
                    _ => {
                        println!("Invalid amount.");
                        continue;
                    }
                };
                let result = if choice == "1" {
                    session.market.buy(ranger, &name, amount)
                } else {
                    session.market.sell(ranger, &name, amount)
                };
                match result {
                    Ok(message) => println!("{}", message),
                    Err(e) => println!("{}", e),
                }
            }
            "3" => {
                if ranger.investments.is_empty() {
                    println!("No investments yet.");
                } else {
                    for (name, holding) in &ranger.investments {
                        println!(
                            "  {:<16} x{:<6.0} avg {:.2}",
                            name, holding.amount, holding.avg_price
                        );
                    }
                    let (delta, percent) = session.market.profit_loss(ranger);
                    println!(
                        "  Portfolio value {:.2} gold, P/L {:+.2} ({:+.1}%)",
                        session.market.portfolio_value(ranger),
                        delta,
                        percent
                    );
                }
            }
            "4" => return,
            _ => println!("Invalid choice."),
        }
    }
}

fn character_sheet(session: &Session) {
    let Some(ranger) = &session.ranger else {
        println!("Create or load a ranger first.");
        return;
    };
    println!("\n{} - {} Ranger ({})", ranger.name, ranger.color, ranger.power_type);
    println!(
        "  Level {} ({} XP)  HP {}/{}  ATK {}  DEF {}  SPD {}",
        ranger.level,
        ranger.xp,
        ranger.current_health,
        ranger.max_health,
        ranger.attack,
        ranger.defense,
        ranger.speed,
    );
    println!(
        "  Gold {}  Mega Energy {}/{}  Skill points {}",
        ranger.gold, ranger.mega_energy, MAX_MEGA_ENERGY, ranger.skill_points
    );
    println!("  Weapon: {}", ranger.weapon);
    if ranger.ranger_keys.is_empty() {
        println!("  No Ranger Keys collected.");
    } else {
        println!("  Ranger Keys: {}", ranger.ranger_keys.join(", "));
    }
    for record in ranger.battle_history.iter().rev().take(5) {
        println!(
            "  {} vs {} ({} turns, +{} gold, -{} gold, +{} XP)",
            record.result,
            record.enemy,
            record.turns,
            record.gold_earned,
            record.gold_lost,
            record.xp_earned,
        );
    }
}

fn learn_skills(session: &mut Session) {
    let Some(ranger) = session.ranger.as_mut() else {
        println!("Create or load a ranger first.");
        return;
    };
    println!("\nSKILLS ({} points available)", ranger.skill_points);
    for (i, skill) in SKILLS.iter().enumerate() {
        let learned = ranger.skills.get(skill.name).copied().unwrap_or(false);
        println!(
            "  {}. {:<16} cost {}  {}",
            i + 1,
            skill.name,
            skill.cost,
            if learned { "[learned]" } else { "" }
        );
    }
    let choice = match read_line("Learn which skill (0 to cancel)? ").parse::<usize>() {
        Ok(0) | Err(_) => return,
        Ok(n) if n <= SKILLS.len() => n - 1,
        Ok(_) => {
            println!("Invalid choice.");
            return;
        }
    };
    match ranger.learn_skill(SKILLS[choice].name) {
        Ok(()) => println!("Learned {}!", SKILLS[choice].name),
        Err(e) => println!("{}", e),
    }
}
