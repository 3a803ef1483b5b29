// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod enumeration;
pub mod station;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Closed-set identity values
pub use enumeration::{CodeIdentified, Enumeration};

// Station Domain
pub use station::{
    validate_radiko_station, validate_radiru_station, NhkRadiruStation, RadikoStation,
    RadiruAreaKind, RadiruStationEntry, RadiruStationKind,
};

// ============================================================================
// DOMAIN ERROR TYPE
// ============================================================================

use std::error::Error as StdError;
use std::fmt::Display;

use thiserror::Error;

/// An expected failure whose message is safe to show a user verbatim.
///
/// Anything that is not a `DomainError` is treated as unexpected and its
/// text must never reach an end user outside development.
#[derive(Debug, Error)]
#[error("{user_message}")]
pub struct DomainError {
    user_message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl DomainError {
    pub fn new(user_message: impl Into<String>) -> Self {
        Self {
            user_message: user_message.into(),
            source: None,
        }
    }

    /// Wraps a lower-level cause. Only `user_message` is ever displayed.
    pub fn with_source(
        user_message: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync + 'static>>,
    ) -> Self {
        Self {
            user_message: user_message.into(),
            source: Some(source.into()),
        }
    }

    /// The requested thing does not exist in the current catalog state.
    pub fn not_found(subject: impl Display) -> Self {
        Self::new(format!("{} was not found", subject))
    }

    /// Input rejected by a domain invariant.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(message)
    }

    pub fn user_message(&self) -> &str {
        &self.user_message
    }
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_user_message() {
        let err = DomainError::new("Station catalog is empty");
        assert_eq!(err.to_string(), "Station catalog is empty");
        assert_eq!(err.user_message(), "Station catalog is empty");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_source_is_kept_but_not_displayed() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let err = DomainError::with_source("Could not read the catalog", io);

        assert_eq!(err.to_string(), "Could not read the catalog");
        let source = err.source().expect("source should be attached");
        assert_eq!(source.to_string(), "disk on fire");
    }

    #[test]
    fn test_not_found_message() {
        let err = DomainError::not_found("NHK station for area 999");
        assert_eq!(err.user_message(), "NHK station for area 999 was not found");
    }
}
