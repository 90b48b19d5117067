//! Slot-based save files: a full game profile as pretty JSON under
//! ~/.megaforce/.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

use crate::character::types::Ranger;
use crate::market::types::Market;
use crate::utils::persistence;

pub const MAX_SAVE_SLOTS: u32 = 5;

/// Everything a save file holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub ranger: Ranger,
    pub market: Market,
    pub saved_at: i64,
}

impl Profile {
    pub fn new(ranger: Ranger, market: Market) -> Self {
        Profile {
            ranger,
            market,
            saved_at: Utc::now().timestamp(),
        }
    }
}

/// A line in the save-slot listing.
#[derive(Debug, Clone)]
pub struct SaveSummary {
    pub slot: u32,
    pub ranger_name: String,
    pub level: u32,
    pub saved_at: i64,
}

fn slot_filename(slot: u32) -> String {
    format!("save{}.json", slot)
}

/// Writes the profile to a slot, stamping the save time.
pub fn save_game(slot: u32, ranger: &Ranger, market: &Market) -> io::Result<()> {
    if slot == 0 || slot > MAX_SAVE_SLOTS {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Save slot must be 1-{}", MAX_SAVE_SLOTS),
        ));
    }
    let profile = Profile::new(ranger.clone(), market.clone());
    persistence::save_json(&slot_filename(slot), &profile)
}

/// Loads a slot. Backfills market listings added since the save was made.
pub fn load_game(slot: u32) -> io::Result<Profile> {
    let mut profile: Profile = persistence::load_json(&slot_filename(slot))?;
    if profile.ranger.name.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "Save file has no ranger",
        ));
    }
    profile.market.ensure_listings();
    Ok(profile)
}

pub fn delete_save(slot: u32) -> io::Result<()> {
    let path = persistence::save_path(&slot_filename(slot))?;
    fs::remove_file(path)
}

/// Lists the populated slots in order. Unreadable files are skipped.
pub fn list_saves() -> Vec<SaveSummary> {
    (1..=MAX_SAVE_SLOTS)
        .filter_map(|slot| {
            load_game(slot).ok().map(|profile| SaveSummary {
                slot,
                ranger_name: profile.ranger.name.clone(),
                level: profile.ranger.level,
                saved_at: profile.saved_at,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::creation::create_ranger;

    // Slot 5 is reserved for this test to avoid clobbering real saves.
    const TEST_SLOT: u32 = 5;

    #[test]
    fn test_save_load_round_trip() {
        let mut ranger = create_ranger("Gia", "Yellow", "Megaforce", "Power Blaster");
        ranger.gain_xp(150);
        let market = Market::new();

        save_game(TEST_SLOT, &ranger, &market).expect("save should succeed");
        let profile = load_game(TEST_SLOT).expect("load should succeed");

        assert_eq!(profile.ranger.name, "Gia");
        assert_eq!(profile.ranger.level, ranger.level);
        assert_eq!(profile.market.commodities.len(), market.commodities.len());
        assert!(profile.saved_at > 0);

        delete_save(TEST_SLOT).expect("cleanup");
    }

    #[test]
    fn test_invalid_slot_rejected() {
        let ranger = Ranger::new("Test");
        let market = Market::new();
        assert!(save_game(0, &ranger, &market).is_err());
        assert!(save_game(MAX_SAVE_SLOTS + 1, &ranger, &market).is_err());
    }

    #[test]
    fn test_load_missing_slot_errors() {
        // Slot 4 is never written by tests.
        let _ = delete_save(4);
        assert!(load_game(4).is_err());
    }
}
