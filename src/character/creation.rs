//! Character creation: three independent bonus tables (color, power type,
//! weapon) applied once when the ranger is built.

use crate::character::types::Ranger;

pub struct ColorBonus {
    pub name: &'static str,
    pub health: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: i32,
}

pub const COLOR_BONUSES: [ColorBonus; 6] = [
    ColorBonus { name: "Red", health: 10, attack: 5, defense: 0, speed: 0 },
    ColorBonus { name: "Blue", health: 5, attack: 0, defense: 5, speed: 0 },
    ColorBonus { name: "Yellow", health: 8, attack: 0, defense: 0, speed: 5 },
    ColorBonus { name: "Pink", health: 6, attack: 3, defense: 0, speed: 0 },
    ColorBonus { name: "Black", health: 7, attack: 0, defense: 3, speed: 0 },
    ColorBonus { name: "Green", health: 9, attack: 4, defense: 0, speed: 0 },
];

pub struct PowerBonus {
    pub name: &'static str,
    pub health: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: i32,
    pub special: &'static str,
}

pub const POWER_BONUSES: [PowerBonus; 6] = [
    PowerBonus { name: "Megaforce", health: 0, attack: 5, defense: 0, speed: 0, special: "Mega Blast" },
    PowerBonus { name: "Super Megaforce", health: 0, attack: 8, defense: 0, speed: 0, special: "Super Mega Cannon" },
    PowerBonus { name: "Mystic Force", health: 0, attack: 6, defense: 0, speed: 0, special: "Mystic Spell" },
    PowerBonus { name: "Ninja Storm", health: 0, attack: 0, defense: 0, speed: 8, special: "Ninja Strike" },
    PowerBonus { name: "Dino Thunder", health: 10, attack: 0, defense: 0, speed: 0, special: "Dino Roar" },
    PowerBonus { name: "Time Force", health: 0, attack: 0, defense: 7, speed: 0, special: "Time Freeze" },
];

pub struct WeaponStats {
    pub name: &'static str,
    pub damage: u32,
    pub speed: i32,
    pub special: &'static str,
}

pub const WEAPON_STATS: [WeaponStats; 6] = [
    WeaponStats { name: "Power Sword", damage: 15, speed: 0, special: "Sword Slash" },
    WeaponStats { name: "Power Blaster", damage: 12, speed: 3, special: "Energy Blast" },
    WeaponStats { name: "Dragon Dagger", damage: 18, speed: -2, special: "Dragon Fire" },
    WeaponStats { name: "Shark Fin", damage: 20, speed: -5, special: "Shark Attack" },
    WeaponStats { name: "Phoenix Shot", damage: 14, speed: 2, special: "Phoenix Flame" },
    WeaponStats { name: "Snake Axe", damage: 22, speed: -3, special: "Venom Strike" },
];

/// Builds a ranger with the creation bonuses for the chosen color, power
/// type and weapon. Unknown names are tolerated and simply add nothing.
pub fn create_ranger(name: &str, color: &str, power_type: &str, weapon: &str) -> Ranger {
    let mut ranger = Ranger::new(name);
    ranger.color = color.to_string();
    ranger.power_type = power_type.to_string();
    ranger.weapon = weapon.to_string();

    if let Some(bonus) = COLOR_BONUSES.iter().find(|b| b.name == color) {
        ranger.max_health += bonus.health;
        ranger.attack += bonus.attack;
        ranger.defense += bonus.defense;
        ranger.speed += bonus.speed;
        ranger.current_health = ranger.max_health;
    }

    if let Some(bonus) = POWER_BONUSES.iter().find(|b| b.name == power_type) {
        ranger.max_health += bonus.health;
        ranger.attack += bonus.attack;
        ranger.defense += bonus.defense;
        ranger.speed += bonus.speed;
        ranger.current_health = ranger.max_health;
    }

    if let Some(stats) = WEAPON_STATS.iter().find(|w| w.name == weapon) {
        ranger.attack += stats.damage;
        ranger.speed += stats.speed;
    }

    ranger
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::*;

    #[test]
    fn test_red_ranger_bonuses() {
        let ranger = create_ranger("Troy", "Red", "Megaforce", "Power Sword");
        assert_eq!(ranger.max_health, BASE_HEALTH + 10);
        assert_eq!(ranger.current_health, ranger.max_health);
        // Color +5, power +5, weapon +15.
        assert_eq!(ranger.attack, BASE_ATTACK + 25);
        assert_eq!(ranger.defense, BASE_DEFENSE);
        assert_eq!(ranger.speed, BASE_SPEED);
    }

    #[test]
    fn test_negative_weapon_speed() {
        let ranger = create_ranger("Jake", "Black", "Ninja Storm", "Shark Fin");
        assert_eq!(ranger.speed, BASE_SPEED + 8 - 5);
        assert_eq!(ranger.attack, BASE_ATTACK + 20);
        assert_eq!(ranger.defense, BASE_DEFENSE + 3);
    }

    #[test]
    fn test_unknown_choices_add_nothing() {
        let ranger = create_ranger("Nobody", "Chartreuse", "Moon Power", "Stick");
        assert_eq!(ranger.max_health, BASE_HEALTH);
        assert_eq!(ranger.attack, BASE_ATTACK);
        assert_eq!(ranger.speed, BASE_SPEED);
    }
}
