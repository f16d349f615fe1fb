//! Error types for the salon booking client.

use thiserror::Error;

/// Errors that can occur while talking to the booking API or driving a
/// booking session.
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Booking API returned {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot {action} while {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: &'static str,
    },

    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    #[error("Service {0} is not offered by this resource")]
    UnknownService(u32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for booking operations.
pub type BookingResult<T> = Result<T, BookingError>;
