use std::sync::Once;

use once_cell::sync::OnceCell;
use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

pub mod board;
pub mod card;
pub mod deck;
pub mod enums;
pub mod env;
pub mod exception;
pub mod finance;
pub mod game;
pub mod server;

pub type Money = i64;

static INIT: Once = Once::new();
static GUARD: OnceCell<tracing_appender::non_blocking::WorkerGuard> = OnceCell::new();

pub fn setup_logger(log_dir: &str) {
    INIT.call_once(|| {
        let file_appender = RollingFileAppender::new(Rotation::HOURLY, log_dir, "cashflow.log");

        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
            .with_thread_ids(true)
            .with_ansi(false)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .with_target(false)
            .with_writer(non_blocking)
            .pretty()
            .init();

        let _ = GUARD.set(guard);
    });
}

pub trait LogExt<T, E> {
    fn log_err(self, f: impl FnOnce(&E)) -> Self;
}

impl<T, E> LogExt<T, E> for Result<T, E> {
    fn log_err(self, f: impl FnOnce(&E)) -> Self {
        if let Err(ref e) = self {
            f(e);
        }
        self
    }
}
