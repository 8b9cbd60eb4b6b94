pub mod end_point;
pub mod protocol;
pub mod room;
pub mod session;
pub mod view;

use std::collections::HashMap;

use actix::Addr;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::env::Settings;
use room::GameRoom;

/// Shared by all HTTP workers. Rooms are fully independent actors; the map
/// only routes connections to them.
pub struct AppState {
    pub settings: Settings,
    pub rooms: RwLock<HashMap<Uuid, Addr<GameRoom>>>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        AppState {
            settings,
            rooms: RwLock::new(HashMap::new()),
        }
    }
}
