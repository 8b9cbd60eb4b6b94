//! Static card and profession tables, embedded at compile time and parsed
//! once on first use. A parse failure here is a build-data defect, so the
//! panic message names the offending file.

use once_cell::sync::Lazy;

use super::types::{DealCard, DoodadCard, MarketCard, ProfessionCard};

pub static PROFESSIONS: Lazy<Vec<ProfessionCard>> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../data/professions.json"))
        .expect("data/professions.json is malformed")
});

pub static SMALL_DEALS: Lazy<Vec<DealCard>> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../data/small_deals.json"))
        .expect("data/small_deals.json is malformed")
});

pub static BIG_DEALS: Lazy<Vec<DealCard>> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../data/big_deals.json"))
        .expect("data/big_deals.json is malformed")
});

pub static MARKET_CARDS: Lazy<Vec<MarketCard>> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../data/market_cards.json"))
        .expect("data/market_cards.json is malformed")
});

pub static DOODADS: Lazy<Vec<DoodadCard>> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../data/doodads.json"))
        .expect("data/doodads.json is malformed")
});
