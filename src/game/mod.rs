pub mod action;
pub mod engine;
pub mod player;
mod resolve;
pub mod state;
pub mod validator;

pub use action::{ActionKind, DealType, GameAction, LoanType};
pub use engine::{process_action, valid_actions, was_rejected};
pub use player::Player;
pub use state::{GameState, PendingPlayerDeal, PlayerSpec};
