//! Terminal implementation of the battle and mission interfaces: status
//! rendering, numbered menus with local re-prompt, and the raw-mode combo
//! capture.

use std::io::{self, Write};
use std::time::Instant;

use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use crate::battle::types::{BattleInterface, InterfaceError, PlayerAction};
use crate::character::types::Ranger;
use crate::enemy::types::Enemy;
use crate::mission::runner::{MissionInterface, SurvivalChoice};

const BAR_WIDTH: usize = 20;

pub struct ConsoleUi;

impl ConsoleUi {
    pub fn new() -> Self {
        ConsoleUi
    }

    fn read_line(&self, prompt: &str) -> Result<String, InterfaceError> {
        print!("{}", prompt);
        io::stdout()
            .flush()
            .map_err(|e| InterfaceError::Failure(e.to_string()))?;
        let mut line = String::new();
        io::stdin()
            .read_line(&mut line)
            .map_err(|e| InterfaceError::Failure(e.to_string()))?;
        Ok(line.trim().to_string())
    }

    fn render_status(&self, player: &Ranger, enemy: &Enemy) {
        println!();
        println!(
            "{:<16} {} {}/{}  energy {}/{}",
            player.name,
            health_bar(player.current_health, player.max_health),
            player.current_health,
            player.max_health,
            player.mega_energy,
            crate::core::constants::MAX_MEGA_ENERGY,
        );
        println!(
            "{:<16} {} {}/{}",
            enemy.name,
            health_bar(enemy.current_health, enemy.max_health),
            enemy.current_health,
            enemy.max_health,
        );
        println!("  {}", enemy.status_description());
    }

    fn choose_skill(&self, player: &Ranger) -> Result<Option<String>, InterfaceError> {
        let learned = player.learned_skills();
        if learned.is_empty() {
            println!("No skills learned yet.");
            return Ok(None);
        }
        for (i, skill) in learned.iter().enumerate() {
            println!("  {}. {}", i + 1, skill);
        }
        let choice = self.read_line("Skill (0 to cancel): ")?;
        match choice.parse::<usize>() {
            Ok(0) => Ok(None),
            Ok(n) if n <= learned.len() => Ok(Some(learned[n - 1].to_string())),
            _ => {
                println!("Invalid choice.");
                Ok(None)
            }
        }
    }

    fn choose_limb(&self, enemy: &Enemy) -> Result<Option<crate::enemy::types::LimbId>, InterfaceError> {
        let intact = enemy.limbs.intact();
        if intact.is_empty() {
            println!("Every limb is already broken.");
            return Ok(None);
        }
        for (i, limb) in intact.iter().enumerate() {
            let l = enemy.limbs.get(*limb);
            println!("  {}. {} ({}/{})", i + 1, limb.label(), l.health, l.max_health);
        }
        let choice = self.read_line("Target (0 to cancel): ")?;
        match choice.parse::<usize>() {
            Ok(0) => Ok(None),
            Ok(n) if n <= intact.len() => Ok(Some(intact[n - 1])),
            _ => {
                println!("Invalid choice.");
                Ok(None)
            }
        }
    }
}

impl Default for ConsoleUi {
    fn default() -> Self {
        ConsoleUi::new()
    }
}

fn health_bar(current: u32, max: u32) -> String {
    let filled = if max == 0 {
        0
    } else {
        (current as usize * BAR_WIDTH) / max as usize
    };
    let mut bar = String::with_capacity(BAR_WIDTH + 2);
    bar.push('[');
    for i in 0..BAR_WIDTH {
        bar.push(if i < filled { '#' } else { '-' });
    }
    bar.push(']');
    bar
}

impl BattleInterface for ConsoleUi {
    fn line(&mut self, text: &str) -> Result<(), InterfaceError> {
        println!("{}", text);
        Ok(())
    }

    fn choose_action(
        &mut self,
        player: &Ranger,
        enemy: &Enemy,
    ) -> Result<PlayerAction, InterfaceError> {
        loop {
            self.render_status(player, enemy);
            println!("1. Attack   2. Defend   3. Skill      4. Target limb");
            println!("5. Combo    6. Fusion   7. Use item   8. Flee");
            let choice = self.read_line("> ")?;
            match choice.as_str() {
                "1" => return Ok(PlayerAction::Attack),
                "2" => return Ok(PlayerAction::Defend),
                "3" => {
                    if let Some(skill) = self.choose_skill(player)? {
                        return Ok(PlayerAction::UseSkill(skill));
                    }
                }
                "4" => {
                    if let Some(limb) = self.choose_limb(enemy)? {
                        return Ok(PlayerAction::TargetLimb(limb));
                    }
                }
                "5" => return Ok(PlayerAction::Combo),
                "6" => return Ok(PlayerAction::Fusion),
                "7" => return Ok(PlayerAction::UseItem),
                "8" => return Ok(PlayerAction::Flee),
                _ => println!("Invalid choice."),
            }
        }
    }

    /// Shows the sequence, then reads raw keys until Enter. Timing runs from
    /// the moment the sequence is revealed; a late Enter is still accepted
    /// and scored as too slow by the caller.
    fn run_combo(&mut self, sequence: &[char]) -> Result<(Vec<char>, f64), InterfaceError> {
        let display: String = sequence.iter().map(|c| format!("{} ", c)).collect();
        println!("COMBO! Enter the sequence, then press Enter:");
        println!("  {}", display.trim_end());

        enable_raw_mode().map_err(|e| InterfaceError::Failure(e.to_string()))?;
        let started = Instant::now();
        let mut entered = Vec::new();

        let result = loop {
            match event::read() {
                Ok(Event::Key(key)) => match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        break Err(InterfaceError::Interrupted);
                    }
                    KeyCode::Char(c) => entered.push(c.to_ascii_uppercase()),
                    KeyCode::Backspace => {
                        entered.pop();
                    }
                    KeyCode::Enter => {
                        break Ok((entered.clone(), started.elapsed().as_secs_f64()));
                    }
                    _ => {}
                },
                Ok(_) => {}
                Err(e) => break Err(InterfaceError::Failure(e.to_string())),
            }
        };

        disable_raw_mode().map_err(|e| InterfaceError::Failure(e.to_string()))?;
        if let Ok((keys, elapsed)) = &result {
            let typed: String = keys.iter().collect();
            println!("You entered: {} ({:.2}s)", typed, elapsed);
        }
        result
    }

    fn pause(&mut self) -> Result<(), InterfaceError> {
        self.read_line("Press Enter to continue...")?;
        Ok(())
    }
}

impl MissionInterface for ConsoleUi {
    fn confirm_intervention(&mut self) -> Result<bool, InterfaceError> {
        let choice = self.read_line("Intervene? (y/n): ")?;
        Ok(choice.eq_ignore_ascii_case("y"))
    }

    fn fight_or_evade(&mut self) -> Result<SurvivalChoice, InterfaceError> {
        loop {
            let choice = self.read_line("Fight (f) or Evade (e)? ")?;
            if choice.eq_ignore_ascii_case("f") {
                return Ok(SurvivalChoice::Fight);
            }
            if choice.eq_ignore_ascii_case("e") {
                return Ok(SurvivalChoice::Evade);
            }
            println!("Invalid choice.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_bar_proportions() {
        assert_eq!(health_bar(0, 100), format!("[{}]", "-".repeat(20)));
        assert_eq!(health_bar(100, 100), format!("[{}]", "#".repeat(20)));
        let half = health_bar(50, 100);
        assert_eq!(half.matches('#').count(), 10);
    }

    #[test]
    fn test_health_bar_zero_max() {
        assert_eq!(health_bar(0, 0), format!("[{}]", "-".repeat(20)));
    }
}
