//! The state clients are allowed to see. Deck contents and the RNG seed
//! chain stay on the server; only deck sizes are revealed, and discard
//! piles are elided entirely.

use serde::Serialize;
use uuid::Uuid;

use crate::card::ActiveCard;
use crate::enums::TurnPhase;
use crate::game::state::{GameState, PendingPlayerDeal};
use crate::game::Player;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckSizes {
    pub small_deals: usize,
    pub big_deals: usize,
    pub market: usize,
    pub doodads: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientState {
    pub players: Vec<Player>,
    pub current_player: usize,
    pub phase: TurnPhase,
    pub active_card: ActiveCard,
    pub last_dice: Option<[u8; 2]>,
    pub decks: DeckSizes,
    pub log: Vec<String>,
    pub turn_count: u32,
    pub winner: Option<Uuid>,
    pub pending_deal: Option<PendingPlayerDeal>,
    pub pay_days_remaining: u8,
}

impl ClientState {
    pub fn from_state(state: &GameState) -> Self {
        ClientState {
            players: state.players.clone(),
            current_player: state.current_player,
            phase: state.phase,
            active_card: state.active_card.clone(),
            last_dice: state.last_dice,
            decks: DeckSizes {
                small_deals: state.decks.small_deals.remaining(),
                big_deals: state.decks.big_deals.remaining(),
                market: state.decks.market.remaining(),
                doodads: state.decks.doodads.remaining(),
            },
            log: state.log.clone(),
            turn_count: state.turn_count,
            winner: state.winner,
            pending_deal: state.pending_deal.clone(),
            pay_days_remaining: state.pay_days_remaining,
        }
    }
}
