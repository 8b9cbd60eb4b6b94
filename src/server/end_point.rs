//! HTTP surface: room creation/listing and the websocket upgrade.

use std::time::Duration;

use actix::{Actor, Addr};
use actix_web::{get, post, web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::card::data::PROFESSIONS;
use crate::exception::GameError;
use crate::game::state::GameState;
use crate::game::PlayerSpec;
use crate::server::room::{GameRoom, GetRoomInfo};
use crate::server::session::PlayerSession;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub players: Vec<PlayerSpec>,
    /// Fixed seed for reproducible games; omitted in normal play.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[post("/rooms")]
pub async fn create_room(
    state: web::Data<AppState>,
    body: web::Json<CreateRoomRequest>,
) -> Result<HttpResponse, GameError> {
    let request = body.into_inner();
    let max_players = state.settings.game.max_players;
    if request.players.is_empty() || request.players.len() > max_players {
        return Err(GameError::InvalidPayload(format!(
            "a room takes 1 to {max_players} players, got {}",
            request.players.len()
        )));
    }

    let seed = request.seed.unwrap_or_else(rand::random);
    let game = GameState::new(&request.players, &PROFESSIONS, seed);
    let room_id = Uuid::new_v4();
    let addr = GameRoom::new(room_id, game).start();
    state.rooms.write().insert(room_id, addr);
    info!(
        "Created room {} for {} players",
        room_id,
        request.players.len()
    );

    Ok(HttpResponse::Created().json(serde_json::json!({ "roomId": room_id })))
}

#[get("/rooms")]
pub async fn list_rooms(state: web::Data<AppState>) -> Result<HttpResponse, GameError> {
    let rooms: Vec<Addr<GameRoom>> = {
        let mut rooms = state.rooms.write();
        rooms.retain(|_, addr| addr.connected());
        rooms.values().cloned().collect()
    };
    let mut infos = Vec::with_capacity(rooms.len());
    for room in rooms {
        // A room whose actor died is simply left out of the listing.
        if let Ok(info) = room.send(GetRoomInfo).await {
            infos.push(info);
        }
    }
    Ok(HttpResponse::Ok().json(infos))
}

#[get("/ws/{room_id}")]
pub async fn game_ws_route(
    req: HttpRequest,
    stream: web::Payload,
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let room_id = path.into_inner();
    let room = state
        .rooms
        .read()
        .get(&room_id)
        .filter(|addr| addr.connected())
        .cloned()
        .ok_or(GameError::RoomNotFound(room_id))?;

    let session = PlayerSession::new(
        room_id,
        room,
        Duration::from_secs(state.settings.game.heartbeat_interval_seconds),
        Duration::from_secs(state.settings.game.client_timeout_seconds),
    );
    ws::start(session, &req, stream)
}
