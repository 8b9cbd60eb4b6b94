use actix::MailboxError;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;
use uuid::Uuid;

/// Prefix of the log entry appended by the engine when it rejects an action.
/// Callers detect rejection by checking the last log entry against this.
pub const INVALID_ACTION_PREFIX: &str = "Invalid action: ";

/// Top-level error for everything outside the engine core. Rule violations
/// inside the engine never surface here; they degrade to a log entry on the
/// game state (see `game::engine`).
#[derive(Debug, Error)]
pub enum GameError {
    /// The submitting connection is not bound to the claimed player id.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The request referenced something that does not exist.
    #[error("Room {0} not found")]
    RoomNotFound(Uuid),

    #[error("Player {0} is not part of this room")]
    UnknownPlayer(Uuid),

    #[error("Received invalid payload from client: {0}")]
    InvalidPayload(String),

    #[error("Actor mailbox error: {0}")]
    Mailbox(#[from] MailboxError),

    #[error("JSON processing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ResponseError for GameError {
    fn status_code(&self) -> StatusCode {
        match self {
            GameError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            GameError::RoomNotFound(_) | GameError::UnknownPlayer(_) => StatusCode::NOT_FOUND,
            GameError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            GameError::Mailbox(_) | GameError::Json(_) | GameError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_message = self.to_string();

        let client_message = if status.is_server_error() {
            "An internal server error occurred.".to_string()
        } else {
            error_message.clone()
        };

        tracing::error!("Request failed: {}", error_message);

        HttpResponse::build(status).json(serde_json::json!({ "error": client_message }))
    }
}
