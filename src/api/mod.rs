//! HTTP API: envelope, error mapping, state, and routes.

pub mod envelope;
pub mod error;
pub mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
