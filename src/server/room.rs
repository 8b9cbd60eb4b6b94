//! One actor per room. The actor mailbox is the room's FIFO action queue:
//! actions for a room apply strictly in arrival order, rooms never share
//! state, and a `SubmitAction` runs to completion before the next one is
//! dequeued.

use std::collections::HashMap;

use actix::prelude::*;
use rand::Rng;
use tracing::{info, warn};
use uuid::Uuid;

use crate::exception::GameError;
use crate::game::state::GameState;
use crate::game::{engine, GameAction, PlayerSpec};
use crate::server::protocol::{ErrorCode, ServerMessage};
use crate::server::view::ClientState;

pub struct GameRoom {
    id: Uuid,
    state: GameState,
    sessions: HashMap<Uuid, Recipient<ServerMessage>>,
}

impl GameRoom {
    pub fn new(id: Uuid, state: GameState) -> Self {
        GameRoom {
            id,
            state,
            sessions: HashMap::new(),
        }
    }

    /// The authoritative dice. Whatever a client put in its ROLL_DICE
    /// payload is discarded in favour of these.
    fn roll_dice() -> [u8; 2] {
        let mut rng = rand::thread_rng();
        [rng.gen_range(1..=6), rng.gen_range(1..=6)]
    }

    fn broadcast_state(&self) {
        let message = ServerMessage::State {
            state: ClientState::from_state(&self.state),
            valid_actions: engine::valid_actions(&self.state),
        };
        for session in self.sessions.values() {
            session.do_send(message.clone());
        }
    }

    fn send_to(&self, player_id: Uuid, message: ServerMessage) {
        if let Some(session) = self.sessions.get(&player_id) {
            session.do_send(message);
        }
    }
}

impl Actor for GameRoom {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!("Room {} started with {} players", self.id, self.state.players.len());
    }
}

/// Binds a connection to a player of this room.
#[derive(Message)]
#[rtype(result = "Result<(), GameError>")]
pub struct Connect {
    pub player_id: Uuid,
    pub addr: Recipient<ServerMessage>,
}

impl Handler<Connect> for GameRoom {
    type Result = Result<(), GameError>;

    fn handle(&mut self, msg: Connect, _ctx: &mut Self::Context) -> Self::Result {
        if self.state.player(msg.player_id).is_none() {
            return Err(GameError::UnknownPlayer(msg.player_id));
        }
        info!("Player {} joined room {}", msg.player_id, self.id);
        msg.addr.do_send(ServerMessage::Joined {
            room_id: self.id,
            player_id: msg.player_id,
        });
        msg.addr.do_send(ServerMessage::State {
            state: ClientState::from_state(&self.state),
            valid_actions: engine::valid_actions(&self.state),
        });
        self.sessions.insert(msg.player_id, msg.addr);
        Ok(())
    }
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub player_id: Uuid,
}

impl Handler<Disconnect> for GameRoom {
    type Result = ();

    fn handle(&mut self, msg: Disconnect, ctx: &mut Self::Context) {
        // An already-applied action never rolls back on disconnect.
        if self.sessions.remove(&msg.player_id).is_some() {
            info!("Player {} left room {}", msg.player_id, self.id);
        }
        // A finished game with nobody watching has nothing left to do.
        if self.sessions.is_empty() && self.state.phase.is_game_over() {
            info!("Room {} finished and empty, shutting down", self.id);
            ctx.stop();
        }
    }
}

/// An action submitted by an authenticated connection. `player_id` is the
/// id the session bound at join time, not whatever the payload claims.
#[derive(Message)]
#[rtype(result = "()")]
pub struct SubmitAction {
    pub player_id: Uuid,
    pub action: GameAction,
}

impl Handler<SubmitAction> for GameRoom {
    type Result = ();

    fn handle(&mut self, msg: SubmitAction, _ctx: &mut Self::Context) {
        let mut action = msg.action;
        if let GameAction::RollDice { dice_values, .. } = &mut action {
            *dice_values = Self::roll_dice();
        }

        let log_before = self.state.log.len();
        let next = engine::process_action(self.state.clone(), &action);
        let rejected = engine::was_rejected(log_before, &next);
        self.state = next;

        if rejected {
            let message = self.state.log.last().cloned().unwrap_or_default();
            warn!("Room {}: rejected action from {}: {}", self.id, msg.player_id, message);
            self.send_to(
                msg.player_id,
                ServerMessage::Error {
                    code: ErrorCode::InvalidAction,
                    message,
                },
            );
        }
        self.broadcast_state();
    }
}

/// Snapshot for the room listing endpoint.
#[derive(Debug, Clone, MessageResponse, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomInfo {
    pub id: Uuid,
    pub players: Vec<PlayerSpec>,
    pub phase: String,
    pub connected: usize,
    pub turn_count: u32,
}

#[derive(Message)]
#[rtype(result = "RoomInfo")]
pub struct GetRoomInfo;

impl Handler<GetRoomInfo> for GameRoom {
    type Result = RoomInfo;

    fn handle(&mut self, _msg: GetRoomInfo, _ctx: &mut Self::Context) -> Self::Result {
        RoomInfo {
            id: self.id,
            players: self
                .state
                .players
                .iter()
                .map(|p| PlayerSpec {
                    id: p.id,
                    name: p.name.clone(),
                })
                .collect(),
            phase: self.state.phase.to_string(),
            connected: self.sessions.len(),
            turn_count: self.state.turn_count,
        }
    }
}

/// Full sanitized snapshot, used by tests and the session layer.
#[derive(Message)]
#[rtype(result = "ClientState")]
pub struct GetSanitizedState;

impl Handler<GetSanitizedState> for GameRoom {
    type Result = MessageResult<GetSanitizedState>;

    fn handle(&mut self, _msg: GetSanitizedState, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(ClientState::from_state(&self.state))
    }
}
