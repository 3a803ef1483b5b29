// src/application/error_handling.rs
//
// Boundary error mapping
//
// ARCHITECTURE:
// - Maps internal errors → responses safe to show a user
// - Domain errors carry their own user message and pass through verbatim
// - Everything else is logged in full and replaced by a generic message
// - Error detail is attached only in Development

use serde::{Deserialize, Serialize};

use crate::config::Environment;
use crate::error::AppError;

pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// Standard error response for a host surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    /// HTTP-style status code
    pub status: u16,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Expected business failure (400)
    Domain,

    /// Database/persistence error (500)
    Database,

    /// File system error (500)
    FileSystem,

    /// Caller gave up (500)
    Cancelled,

    /// Other/unknown error (500)
    Internal,
}

impl ErrorType {
    pub fn status(self) -> u16 {
        match self {
            ErrorType::Domain => 400,
            _ => 500,
        }
    }

    fn of(error: &AppError) -> Self {
        match error {
            AppError::Domain(_) => ErrorType::Domain,
            AppError::Database(_) | AppError::Pool(_) => ErrorType::Database,
            AppError::Io(_) => ErrorType::FileSystem,
            AppError::Cancelled => ErrorType::Cancelled,
            AppError::Serialization(_) | AppError::Config(_) | AppError::Other(_) => {
                ErrorType::Internal
            }
        }
    }
}

impl ErrorResponse {
    /// Create error response from AppError
    pub fn from_app_error(error: &AppError, environment: Environment) -> Self {
        let error_type = ErrorType::of(error);

        if let AppError::Domain(domain_error) = error {
            log::warn!("Domain error: {}", domain_error);
            return Self {
                success: false,
                status: error_type.status(),
                error_type,
                message: domain_error.user_message().to_string(),
                details: None,
            };
        }

        log::error!("Unhandled error: {:?}", error);

        Self {
            success: false,
            status: error_type.status(),
            error_type,
            message: GENERIC_ERROR_MESSAGE.to_string(),
            details: environment.is_development().then(|| error.to_string()),
        }
    }
}
