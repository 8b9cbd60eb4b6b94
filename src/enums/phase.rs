use serde::{Deserialize, Serialize};

/// Phase of the current turn. Serialized names are the wire contract and
/// must stay stable.
#[derive(Clone, PartialEq, Eq, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TurnPhase {
    /// Waiting for the current player to roll (or pass while downsized).
    RollDice,
    /// One or more PayDay crossings are waiting to be collected.
    PayDayCollection,
    /// The landed space needs a player choice (deal type, charity).
    ResolveSpace,
    /// A drawn card is active and awaits a decision.
    MakeDecision,
    /// All effects resolved; waiting for END_TURN.
    EndOfTurn,
    /// The current player cannot cover their expenses and must react.
    BankruptcyDecision,
    /// A player-to-player deal offer is waiting for the target's answer.
    WaitingForDealResponse,
    /// Terminal. No action is accepted.
    GameOver,
}

impl TurnPhase {
    pub fn is_game_over(&self) -> bool {
        matches!(self, TurnPhase::GameOver)
    }

    /// Phases in which the current player may freely manage loans.
    pub fn allows_loan_management(&self) -> bool {
        matches!(
            self,
            TurnPhase::RollDice
                | TurnPhase::PayDayCollection
                | TurnPhase::ResolveSpace
                | TurnPhase::MakeDecision
                | TurnPhase::EndOfTurn
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TurnPhase::RollDice => "ROLL_DICE",
            TurnPhase::PayDayCollection => "PAY_DAY_COLLECTION",
            TurnPhase::ResolveSpace => "RESOLVE_SPACE",
            TurnPhase::MakeDecision => "MAKE_DECISION",
            TurnPhase::EndOfTurn => "END_OF_TURN",
            TurnPhase::BankruptcyDecision => "BANKRUPTCY_DECISION",
            TurnPhase::WaitingForDealResponse => "WAITING_FOR_DEAL_RESPONSE",
            TurnPhase::GameOver => "GAME_OVER",
        }
    }
}

impl std::fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
