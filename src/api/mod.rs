//! HTTP API over the view controller
//!
//! - `server` - router, shared state, graceful shutdown
//! - `handlers` - one handler per user intent or view
//! - `types` - request/response bodies not covered by the controller

pub mod handlers;
pub mod server;
pub mod types;

pub use server::{build_router, start_server, AppState};
