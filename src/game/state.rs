//! The root game snapshot. Every action produces a whole new `GameState`;
//! nothing outside the engine ever mutates one in place.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::card::{ActiveCard, ProfessionCard};
use crate::deck::DeckSet;
use crate::enums::TurnPhase;
use crate::game::player::Player;
use crate::Money;

/// Roster entry supplied by the session layer at game creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSpec {
    pub id: Uuid,
    pub name: String,
}

/// A deal offer in flight between two players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingPlayerDeal {
    pub seller_id: Uuid,
    pub buyer_id: Uuid,
    /// The offered card, held here while the offer is open so it can be
    /// restored as the active card on decline.
    pub card: ActiveCard,
    pub asking_price: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub players: Vec<Player>,
    pub current_player: usize,
    pub phase: TurnPhase,
    pub active_card: ActiveCard,
    pub last_dice: Option<[u8; 2]>,
    pub decks: DeckSet,
    pub log: Vec<String>,
    pub turn_count: u32,
    pub winner: Option<Uuid>,
    pub pending_deal: Option<PendingPlayerDeal>,
    /// Source of unique asset ids. Owned by the state, never global, so
    /// replays and parallel rooms stay independent.
    pub next_asset_id: u64,
    /// PayDay crossings from the current roll still waiting to be
    /// collected.
    pub pay_days_remaining: u8,
    /// Seed for the next shuffle. Consumed and replaced on every use so a
    /// whole game replays from the creation seed.
    pub rng_seed: u64,
}

impl GameState {
    /// Builds the initial snapshot for a roster. Professions are shuffled
    /// and dealt in order, cycling if the roster is larger than the table.
    pub fn new(roster: &[PlayerSpec], professions: &[ProfessionCard], seed: u64) -> Self {
        use rand::seq::SliceRandom;

        let mut rng = StdRng::seed_from_u64(seed);
        let mut pool: Vec<&ProfessionCard> = professions.iter().collect();
        pool.shuffle(&mut rng);

        let players: Vec<Player> = roster
            .iter()
            .enumerate()
            .map(|(i, spec)| Player::new(spec.id, spec.name.clone(), pool[i % pool.len()]))
            .collect();
        let decks = DeckSet::new(&mut rng);

        let mut log = Vec::new();
        for player in &players {
            log.push(format!(
                "{} starts the rat race as a {}",
                player.name, player.profession
            ));
        }

        GameState {
            players,
            current_player: 0,
            phase: TurnPhase::RollDice,
            active_card: ActiveCard::None,
            last_dice: None,
            decks,
            log,
            turn_count: 0,
            winner: None,
            pending_deal: None,
            next_asset_id: 1,
            pay_days_remaining: 0,
            rng_seed: rng.gen(),
        }
    }

    pub fn current(&self) -> &Player {
        &self.players[self.current_player]
    }

    pub fn current_mut(&mut self) -> &mut Player {
        &mut self.players[self.current_player]
    }

    pub fn player(&self, id: Uuid) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_index(&self, id: Uuid) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    pub fn log(&mut self, entry: impl Into<String>) {
        self.log.push(entry.into());
    }

    /// Mints the next unique asset id.
    pub fn mint_asset_id(&mut self) -> u64 {
        let id = self.next_asset_id;
        self.next_asset_id += 1;
        id
    }

    /// Consumes the stored seed, handing back a deterministic RNG and
    /// storing its successor for the next consumer.
    pub fn take_rng(&mut self) -> StdRng {
        let mut rng = StdRng::seed_from_u64(self.rng_seed);
        self.rng_seed = rng.gen();
        rng
    }
}
