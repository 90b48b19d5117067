//! Market state. Serialized wholesale into the save file.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::constants::*;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Commodity {
    pub price: f64,
    pub volatility: f64,
    /// Drift in [-1, 1]; negative is bearish.
    #[serde(default)]
    pub trend: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketEvent {
    pub message: String,
    pub commodity: String,
    pub timestamp: i64,
}

impl MarketEvent {
    pub fn now(message: String, commodity: String) -> Self {
        MarketEvent {
            message,
            commodity,
            timestamp: Utc::now().timestamp(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Market {
    pub commodities: BTreeMap<String, Commodity>,
    #[serde(default)]
    pub price_history: BTreeMap<String, Vec<f64>>,
    #[serde(default)]
    pub events: Vec<MarketEvent>,
}

impl Default for Market {
    fn default() -> Self {
        Market::new()
    }
}

impl Market {
    pub fn new() -> Self {
        let mut commodities = BTreeMap::new();
        let mut price_history = BTreeMap::new();
        for (name, price, volatility) in COMMODITIES {
            commodities.insert(
                name.to_string(),
                Commodity { price, volatility, trend: 0.0 },
            );
            price_history.insert(name.to_string(), vec![price]);
        }
        Market {
            commodities,
            price_history,
            events: Vec::new(),
        }
    }

    /// Re-seeds any commodity missing from a loaded save, so old files keep
    /// working when the listing grows.
    pub fn ensure_listings(&mut self) {
        for (name, price, volatility) in COMMODITIES {
            self.commodities
                .entry(name.to_string())
                .or_insert(Commodity { price, volatility, trend: 0.0 });
            self.price_history
                .entry(name.to_string())
                .or_insert_with(|| vec![price]);
        }
    }
}
