pub mod data;
pub mod types;

pub use types::{
    ActiveCard, Deal, DealCard, DoodadCard, DoodadCost, MarketCard, MarketEffect, ProfessionCard,
};
