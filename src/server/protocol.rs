//! Messages crossing the websocket boundary.

use actix::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::{ActionKind, GameAction};
use crate::server::view::ClientState;

// --- Client to Server Messages ---

#[derive(Debug, Deserialize, Message)]
#[rtype(result = "()")]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Binds this connection to a player of the room.
    Join { player_id: Uuid },

    /// Submits a game action for the bound player.
    Action { action: GameAction },
}

// --- Server to Client Messages ---

#[derive(Debug, Clone, Serialize, Message)]
#[rtype(result = "()")]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// The connection is now bound to a player.
    Joined { room_id: Uuid, player_id: Uuid },

    /// Sanitized room state, broadcast after every processed action.
    State {
        state: ClientState,
        valid_actions: Vec<ActionKind>,
    },

    /// Something went wrong with this connection's last message.
    Error { code: ErrorCode, message: String },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Unauthorized,
    InvalidAction,
    InvalidMessageFormat,
    NotJoined,
    UnknownPlayer,
    InternalError,
}
