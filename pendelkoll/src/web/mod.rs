//! Web layer for the commuter journey tracker.
//!
//! Serves the journey views and alert polling as JSON.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
