//! Immutable card reference data. Cards are never mutated in play; decks
//! and the active-card slot hold clones of these definitions.

use serde::{Deserialize, Serialize};

use crate::finance::Liability;
use crate::Money;

/// Payload of a small- or big-deal card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Deal {
    Stock {
        symbol: String,
        price: Money,
        dividend_per_share: Money,
        min_shares: u64,
        max_shares: u64,
    },
    RealEstate {
        subtype: String,
        name: String,
        cost: Money,
        mortgage: Money,
        down_payment: Money,
        cash_flow: Money,
    },
    Business {
        name: String,
        cost: Money,
        mortgage: Money,
        down_payment: Money,
        cash_flow: Money,
    },
    StockSplit {
        symbol: String,
        ratio: f64,
    },
}

impl Deal {
    /// Cash the buyer must put down to take this deal: the stock price for
    /// the minimum lot, or the property's down payment.
    pub fn down_payment_cost(&self) -> Money {
        match self {
            Deal::Stock {
                price, min_shares, ..
            } => price * *min_shares as Money,
            Deal::RealEstate { down_payment, .. } | Deal::Business { down_payment, .. } => {
                *down_payment
            }
            Deal::StockSplit { .. } => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealCard {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub deal: Deal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum MarketEffect {
    /// The quoted price of a symbol changes; holders may sell at the new
    /// price. A price of 0 is a legitimate total loss.
    StockPrice { symbol: String, new_price: Money },
    /// A buyer offers to purchase properties of a subtype, either at a
    /// multiple of original cost or at a flat amount.
    RealEstateOffer {
        subtype: String,
        #[serde(default)]
        multiplier: Option<f64>,
        #[serde(default)]
        flat: Option<Money>,
    },
    /// Every player holding real estate pays immediately.
    PropertyDamage { amount: Money },
    /// Every player pays immediately.
    AllPlayersExpense { amount: Money },
}

impl MarketEffect {
    /// Effects that give players a sell decision rather than applying
    /// immediately.
    pub fn needs_decision(&self) -> bool {
        matches!(
            self,
            MarketEffect::StockPrice { .. } | MarketEffect::RealEstateOffer { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketCard {
    pub title: String,
    pub effect: MarketEffect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DoodadCost {
    Flat { amount: Money },
    PercentOfIncome { percent: u8 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoodadCard {
    pub title: String,
    pub cost: DoodadCost,
}

/// Starting balance sheet handed to a player at session creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionCard {
    pub name: String,
    pub salary: Money,
    pub taxes: Money,
    pub home_mortgage_payment: Money,
    pub school_loan_payment: Money,
    pub car_loan_payment: Money,
    pub credit_card_payment: Money,
    pub other_expenses: Money,
    pub per_child_expense: Money,
    pub savings: Money,
    pub liabilities: Vec<Liability>,
}

/// The currently drawn card, if any. The `type` tag is part of the wire
/// contract; the payload is carried under `card`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "card", rename_all = "camelCase")]
pub enum ActiveCard {
    #[default]
    None,
    SmallDeal(DealCard),
    BigDeal(DealCard),
    Market(MarketCard),
    Doodad(DoodadCard),
}

impl ActiveCard {
    pub fn deal(&self) -> Option<&DealCard> {
        match self {
            ActiveCard::SmallDeal(card) | ActiveCard::BigDeal(card) => Some(card),
            _ => None,
        }
    }

    pub fn market(&self) -> Option<&MarketCard> {
        match self {
            ActiveCard::Market(card) => Some(card),
            _ => None,
        }
    }

    pub fn doodad(&self) -> Option<&DoodadCard> {
        match self {
            ActiveCard::Doodad(card) => Some(card),
            _ => None,
        }
    }
}
