//! Web layer for the trip planner.
//!
//! Serves the search form, the destination list and the detail view as
//! server-rendered pages.

mod routes;
mod state;
pub mod templates;

pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
