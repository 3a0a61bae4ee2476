//! WebSocket relay and HTTP API server.

mod error;
mod handler;
mod runner;
mod signal;
pub mod state;

pub use runner::{build_app, run};
