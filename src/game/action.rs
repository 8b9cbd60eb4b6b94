//! Action payloads submitted by clients. The tag names and field shapes
//! are the wire contract and must stay stable.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealType {
    Small,
    Big,
}

/// Loan targets for PAY_OFF_LOAN. The bank loan is the only one repayable
/// in increments; the fixed starting debts must be paid off in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoanType {
    Bank,
    HomeMortgage,
    SchoolLoan,
    CarLoan,
    CreditCard,
}

impl LoanType {
    /// Name of the liability this loan type targets. `None` for the bank
    /// loan, which is tracked on the player instead of the statement.
    pub fn liability_name(&self) -> Option<&'static str> {
        use crate::finance::{CAR_LOANS, CREDIT_CARD, HOME_MORTGAGE, SCHOOL_LOANS};
        match self {
            LoanType::Bank => None,
            LoanType::HomeMortgage => Some(HOME_MORTGAGE),
            LoanType::SchoolLoan => Some(SCHOOL_LOANS),
            LoanType::CarLoan => Some(CAR_LOANS),
            LoanType::CreditCard => Some(CREDIT_CARD),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum GameAction {
    RollDice {
        player_id: Uuid,
        dice_values: [u8; 2],
        #[serde(default)]
        use_both_dice: bool,
    },
    ChooseDealType {
        player_id: Uuid,
        deal_type: DealType,
    },
    BuyAsset {
        player_id: Uuid,
        #[serde(default)]
        shares: Option<u64>,
    },
    SellAsset {
        player_id: Uuid,
        asset_id: u64,
        #[serde(default)]
        shares: Option<u64>,
        /// Advisory only; the engine always prices from the active card.
        #[serde(default)]
        price: Option<Money>,
    },
    SkipDeal {
        player_id: Uuid,
    },
    PayExpense {
        player_id: Uuid,
    },
    AcceptCharity {
        player_id: Uuid,
    },
    DeclineCharity {
        player_id: Uuid,
    },
    TakeLoan {
        player_id: Uuid,
        amount: Money,
    },
    PayOffLoan {
        player_id: Uuid,
        loan_type: LoanType,
        amount: Money,
    },
    EndTurn {
        player_id: Uuid,
    },
    CollectPayDay {
        player_id: Uuid,
    },
    ChooseDream {
        player_id: Uuid,
        dream: String,
    },
    SellToMarket {
        player_id: Uuid,
        #[serde(default)]
        asset_id: Option<u64>,
    },
    DeclineMarket {
        player_id: Uuid,
        #[serde(default)]
        asset_id: Option<u64>,
    },
    DeclareBankruptcy {
        player_id: Uuid,
    },
    OfferDealToPlayer {
        player_id: Uuid,
        target_player_id: Uuid,
        asking_price: Money,
    },
    AcceptPlayerDeal {
        player_id: Uuid,
    },
    DeclinePlayerDeal {
        player_id: Uuid,
    },
}

impl GameAction {
    /// Id of the player the action claims to act for.
    pub fn player_id(&self) -> Uuid {
        match self {
            GameAction::RollDice { player_id, .. }
            | GameAction::ChooseDealType { player_id, .. }
            | GameAction::BuyAsset { player_id, .. }
            | GameAction::SellAsset { player_id, .. }
            | GameAction::SkipDeal { player_id }
            | GameAction::PayExpense { player_id }
            | GameAction::AcceptCharity { player_id }
            | GameAction::DeclineCharity { player_id }
            | GameAction::TakeLoan { player_id, .. }
            | GameAction::PayOffLoan { player_id, .. }
            | GameAction::EndTurn { player_id }
            | GameAction::CollectPayDay { player_id }
            | GameAction::ChooseDream { player_id, .. }
            | GameAction::SellToMarket { player_id, .. }
            | GameAction::DeclineMarket { player_id, .. }
            | GameAction::DeclareBankruptcy { player_id }
            | GameAction::OfferDealToPlayer { player_id, .. }
            | GameAction::AcceptPlayerDeal { player_id }
            | GameAction::DeclinePlayerDeal { player_id } => *player_id,
        }
    }

    /// Actions a non-current player may legally submit: reacting to a
    /// market event or answering a deal offered to them.
    pub fn allowed_out_of_turn(&self) -> bool {
        matches!(
            self,
            GameAction::SellAsset { .. }
                | GameAction::SellToMarket { .. }
                | GameAction::DeclineMarket { .. }
                | GameAction::AcceptPlayerDeal { .. }
                | GameAction::DeclinePlayerDeal { .. }
        )
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            GameAction::RollDice { .. } => ActionKind::RollDice,
            GameAction::ChooseDealType { .. } => ActionKind::ChooseDealType,
            GameAction::BuyAsset { .. } => ActionKind::BuyAsset,
            GameAction::SellAsset { .. } => ActionKind::SellAsset,
            GameAction::SkipDeal { .. } => ActionKind::SkipDeal,
            GameAction::PayExpense { .. } => ActionKind::PayExpense,
            GameAction::AcceptCharity { .. } => ActionKind::AcceptCharity,
            GameAction::DeclineCharity { .. } => ActionKind::DeclineCharity,
            GameAction::TakeLoan { .. } => ActionKind::TakeLoan,
            GameAction::PayOffLoan { .. } => ActionKind::PayOffLoan,
            GameAction::EndTurn { .. } => ActionKind::EndTurn,
            GameAction::CollectPayDay { .. } => ActionKind::CollectPayDay,
            GameAction::ChooseDream { .. } => ActionKind::ChooseDream,
            GameAction::SellToMarket { .. } => ActionKind::SellToMarket,
            GameAction::DeclineMarket { .. } => ActionKind::DeclineMarket,
            GameAction::DeclareBankruptcy { .. } => ActionKind::DeclareBankruptcy,
            GameAction::OfferDealToPlayer { .. } => ActionKind::OfferDealToPlayer,
            GameAction::AcceptPlayerDeal { .. } => ActionKind::AcceptPlayerDeal,
            GameAction::DeclinePlayerDeal { .. } => ActionKind::DeclinePlayerDeal,
        }
    }
}

/// Action discriminants, exposed to clients as the legal action set for
/// the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    RollDice,
    ChooseDealType,
    BuyAsset,
    SellAsset,
    SkipDeal,
    PayExpense,
    AcceptCharity,
    DeclineCharity,
    TakeLoan,
    PayOffLoan,
    EndTurn,
    CollectPayDay,
    ChooseDream,
    SellToMarket,
    DeclineMarket,
    DeclareBankruptcy,
    OfferDealToPlayer,
    AcceptPlayerDeal,
    DeclinePlayerDeal,
}
