//! Websocket session actor: one per connected client, bound to a single
//! room. Authorizes action submissions against the joined player id before
//! anything reaches the room's queue.

use std::time::{Duration, Instant};

use actix::{
    fut, Actor, ActorContext, ActorFutureExt, Addr, AsyncContext, Handler, Running, StreamHandler,
};
use actix_web_actors::ws;
use tracing::{info, warn};
use uuid::Uuid;

use crate::server::protocol::{ClientMessage, ErrorCode, ServerMessage};
use crate::server::room::{Connect, Disconnect, GameRoom, SubmitAction};
use crate::LogExt;

type Ctx = ws::WebsocketContext<PlayerSession>;

fn send_err(ctx: &mut Ctx, code: ErrorCode, message: &str) {
    if let Ok(text) = serde_json::to_string(&ServerMessage::Error {
        code,
        message: message.to_string(),
    }) {
        ctx.text(text);
    }
}

pub struct PlayerSession {
    room_id: Uuid,
    room: Addr<GameRoom>,
    player_id: Option<Uuid>,
    hb: Instant,
    heartbeat_interval: Duration,
    client_timeout: Duration,
}

impl PlayerSession {
    pub fn new(
        room_id: Uuid,
        room: Addr<GameRoom>,
        heartbeat_interval: Duration,
        client_timeout: Duration,
    ) -> Self {
        Self {
            room_id,
            room,
            player_id: None,
            hb: Instant::now(),
            heartbeat_interval,
            client_timeout,
        }
    }

    fn hb(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(self.heartbeat_interval, |act, ctx| {
            if Instant::now().duration_since(act.hb) > act.client_timeout {
                info!("Websocket client heartbeat failed, disconnecting!");
                ctx.stop();
                return;
            }
            ctx.ping(b"");
        });
    }

    fn handle_join(&mut self, ctx: &mut Ctx, player_id: Uuid) {
        if self.player_id.is_some() {
            send_err(ctx, ErrorCode::Unauthorized, "Already joined");
            return;
        }
        let addr = ctx.address().recipient();
        let join = self.room.send(Connect { player_id, addr });
        let join = fut::wrap_future::<_, Self>(join).map(move |result, actor, ctx| {
            match result {
                Ok(Ok(())) => {
                    actor.player_id = Some(player_id);
                }
                Ok(Err(e)) => {
                    warn!("Join rejected for {}: {}", player_id, e);
                    send_err(ctx, ErrorCode::UnknownPlayer, &e.to_string());
                }
                Err(e) => {
                    warn!("Room unavailable during join: {}", e);
                    send_err(ctx, ErrorCode::InternalError, "Room unavailable");
                    ctx.stop();
                }
            }
        });
        ctx.wait(join);
    }

    fn handle_action(&mut self, ctx: &mut Ctx, action: crate::game::GameAction) {
        let Some(bound) = self.player_id else {
            send_err(ctx, ErrorCode::NotJoined, "Join the room first");
            return;
        };
        // A connection may only act for the player it joined as.
        if action.player_id() != bound {
            warn!(
                "Connection bound to {} tried to act as {}",
                bound,
                action.player_id()
            );
            send_err(
                ctx,
                ErrorCode::Unauthorized,
                "Unauthorized: action player does not match this connection",
            );
            return;
        }
        self.room.do_send(SubmitAction {
            player_id: bound,
            action,
        });
    }
}

impl Actor for PlayerSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!("Session started for room {}", self.room_id);
        self.hb(ctx);
    }

    fn stopping(&mut self, _ctx: &mut Self::Context) -> Running {
        if let Some(player_id) = self.player_id {
            self.room.do_send(Disconnect { player_id });
        }
        Running::Stop
    }
}

impl Handler<ServerMessage> for PlayerSession {
    type Result = ();

    fn handle(&mut self, msg: ServerMessage, ctx: &mut Self::Context) {
        match serde_json::to_string(&msg) {
            Ok(text) => ctx.text(text),
            Err(e) => warn!("Failed to serialize ServerMessage for client: {}", e),
        }
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for PlayerSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => {
                self.hb = Instant::now();
                ctx.pong(&msg);
            }
            Ok(ws::Message::Pong(_)) => {
                self.hb = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                let parsed = serde_json::from_str::<ClientMessage>(&text)
                    .log_err(|e| warn!("Failed to parse client message: {}", e));
                match parsed {
                    Ok(ClientMessage::Join { player_id }) => self.handle_join(ctx, player_id),
                    Ok(ClientMessage::Action { action }) => self.handle_action(ctx, action),
                    Err(_) => {
                        send_err(ctx, ErrorCode::InvalidMessageFormat, "Invalid message format");
                    }
                }
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            _ => ctx.stop(),
        }
    }
}
