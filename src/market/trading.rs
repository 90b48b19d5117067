//! Price simulation and the buy/sell ledger.

use rand::Rng;
use std::fmt;

use crate::battle::types::BattleOutcome;
use crate::character::types::Ranger;
use crate::core::constants::*;
use crate::market::types::{Market, MarketEvent};

#[derive(Debug, Clone, PartialEq)]
pub enum MarketError {
    UnknownCommodity(String),
    InsufficientGold { needed: u32, have: u32 },
    InsufficientHoldings { owned: f64 },
}

impl fmt::Display for MarketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketError::UnknownCommodity(name) => write!(f, "No such commodity: {}", name),
            MarketError::InsufficientGold { needed, have } => {
                write!(f, "Not enough gold (need {}, have {})", needed, have)
            }
            MarketError::InsufficientHoldings { owned } => {
                write!(f, "You only own {:.0} of that commodity", owned)
            }
        }
    }
}

impl std::error::Error for MarketError {}

enum EventEffect {
    Surge,
    Drop,
    Neutral,
}

const EVENT_TEMPLATES: [(&str, EventEffect); 5] = [
    ("demand surges due to Ranger activity!", EventEffect::Surge),
    ("supply increases, prices drop!", EventEffect::Drop),
    ("market shaken by energy fluctuations!", EventEffect::Neutral),
    ("new mining operations discovered!", EventEffect::Surge),
    ("monster attacks disrupt supply chains!", EventEffect::Drop),
];

/// Per-commodity price nudge for a battle outcome. Victories lift the
/// valuable commodities, the Morphin Grid most of all; defeats drag
/// everything down a little.
fn battle_nudge(name: &str, outcome: Option<BattleOutcome>) -> f64 {
    match outcome {
        Some(BattleOutcome::Victory) => match name {
            "Gold" | "Energy Crystals" => MARKET_VICTORY_VALUABLE_NUDGE,
            "Morphin Grid" => MARKET_VICTORY_GRID_NUDGE,
            _ => 0.0,
        },
        Some(BattleOutcome::Defeat) => MARKET_DEFEAT_NUDGE,
        _ => 0.0,
    }
}

fn clamp_price(price: f64) -> f64 {
    price.clamp(MARKET_PRICE_FLOOR, MARKET_PRICE_CEILING)
}

impl Market {
    /// Advances every commodity one tick: volatility noise, trend drift,
    /// the battle-outcome nudge, and the occasional market event.
    pub fn update_prices(&mut self, outcome: Option<BattleOutcome>, rng: &mut impl Rng) {
        let names: Vec<String> = self.commodities.keys().cloned().collect();

        for name in names {
            let commodity = match self.commodities.get_mut(&name) {
                Some(c) => c,
                None => continue,
            };

            let noise = rng.gen_range(-commodity.volatility..=commodity.volatility);
            let drift = commodity.trend * MARKET_TREND_WEIGHT;
            let nudge = battle_nudge(&name, outcome);
            let new_price = clamp_price(commodity.price * (1.0 + noise + drift + nudge));
            commodity.price = (new_price * 100.0).round() / 100.0;

            let history = self.price_history.entry(name.clone()).or_default();
            history.push(new_price);
            if history.len() > MARKET_HISTORY_LEN {
                history.remove(0);
            }

            // Trend follows the last three ticks.
            if history.len() >= 3 {
                let window = &history[history.len() - 3..];
                if window[2] > window[0] {
                    commodity.trend = (commodity.trend + MARKET_TREND_STEP).min(1.0);
                } else {
                    commodity.trend = (commodity.trend - MARKET_TREND_STEP).max(-1.0);
                }
            }

            if rng.gen_bool(MARKET_EVENT_CHANCE) {
                self.fire_event(&name, rng);
            }
        }
    }

    fn fire_event(&mut self, name: &str, rng: &mut impl Rng) {
        let (template, effect) = &EVENT_TEMPLATES[rng.gen_range(0..EVENT_TEMPLATES.len())];
        self.events.push(MarketEvent::now(
            format!("{} {}", name, template),
            name.to_string(),
        ));
        if self.events.len() > MARKET_EVENT_LIMIT {
            self.events.remove(0);
        }

        if let Some(commodity) = self.commodities.get_mut(name) {
            let shock = match effect {
                EventEffect::Surge => rng.gen_range(1.1..=1.3),
                EventEffect::Drop => rng.gen_range(0.7..=0.9),
                EventEffect::Neutral => 1.0,
            };
            commodity.price = clamp_price(commodity.price * shock);
        }
    }

    /// Buys whole units at the current price, tracking the average cost
    /// basis. Fails without touching gold or holdings.
    pub fn buy(
        &self,
        player: &mut Ranger,
        name: &str,
        amount: u32,
    ) -> Result<String, MarketError> {
        let commodity = self
            .commodities
            .get(name)
            .ok_or_else(|| MarketError::UnknownCommodity(name.to_string()))?;

        let cost = (commodity.price * amount as f64).round() as u32;
        if cost > player.gold {
            return Err(MarketError::InsufficientGold {
                needed: cost,
                have: player.gold,
            });
        }

        player.gold -= cost;
        let holding = player.investments.entry(name.to_string()).or_default();
        let new_amount = holding.amount + amount as f64;
        holding.avg_price =
            (holding.amount * holding.avg_price + amount as f64 * commodity.price) / new_amount;
        holding.amount = new_amount;

        Ok(format!("Bought {} {} for {} gold", amount, name, cost))
    }

    /// Sells whole units at the current price. Selling out removes the
    /// position entirely.
    pub fn sell(
        &self,
        player: &mut Ranger,
        name: &str,
        amount: u32,
    ) -> Result<String, MarketError> {
        let commodity = self
            .commodities
            .get(name)
            .ok_or_else(|| MarketError::UnknownCommodity(name.to_string()))?;

        let owned = player.investments.get(name).map(|h| h.amount).unwrap_or(0.0);
        if owned < amount as f64 {
            return Err(MarketError::InsufficientHoldings { owned });
        }

        let value = (commodity.price * amount as f64).round() as u32;
        player.gold += value;

        let remaining = owned - amount as f64;
        if remaining <= 0.0 {
            player.investments.remove(name);
        } else if let Some(holding) = player.investments.get_mut(name) {
            holding.amount = remaining;
        }

        Ok(format!("Sold {} {} for {} gold", amount, name, value))
    }

    /// Current market value of everything the player holds.
    pub fn portfolio_value(&self, player: &Ranger) -> f64 {
        player
            .investments
            .iter()
            .filter_map(|(name, holding)| {
                self.commodities
                    .get(name)
                    .map(|c| c.price * holding.amount)
            })
            .sum()
    }

    /// Absolute and percentage profit/loss over the average cost basis.
    pub fn profit_loss(&self, player: &Ranger) -> (f64, f64) {
        let mut invested = 0.0;
        let mut current = 0.0;
        for (name, holding) in &player.investments {
            if let Some(commodity) = self.commodities.get(name) {
                invested += holding.avg_price * holding.amount;
                current += commodity.price * holding.amount;
            }
        }
        let delta = current - invested;
        let percent = if invested > 0.0 { delta / invested * 100.0 } else { 0.0 };
        (delta, percent)
    }
}
