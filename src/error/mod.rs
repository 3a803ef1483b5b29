// src/error/mod.rs
//
// Crate-wide error type. Domain errors are the only expected failures;
// every other variant is unexpected and must not reach users verbatim.

pub mod types;

pub use types::{AppError, AppResult};
