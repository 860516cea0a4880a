//! UI layer: WebSocket/HTTP transport and server bootstrap.

pub mod handler;
mod runner;
mod signal;
mod state;

pub use runner::run_server;
pub use state::AppState;
