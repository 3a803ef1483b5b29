// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Boundary between a host (CLI, HTTP, desktop shell) and the services
// - Wires collaborators together
// - Translates errors into user-safe responses

pub mod error_handling;
pub mod state;

pub use error_handling::{ErrorResponse, ErrorType};
pub use state::{AppState, CatalogSummary};
