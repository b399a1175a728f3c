//! Error types for the Praxis API client.
//!
//! # Design
//! `ServiceUnavailable` gets a dedicated variant because the backend answers
//! 503 while its generation model is still loading, and callers want to tell
//! "try again later" apart from a real failure. All other non-2xx responses
//! land in `HttpError` with the raw status code and body for debugging.

use thiserror::Error;

/// Errors returned by `PraxisClient` parse methods and `Transport` hosts.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend could not be reached or the round-trip failed mid-flight.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server returned 503 — the generation backend is not ready.
    #[error("backend unavailable: {body}")]
    ServiceUnavailable { body: String },

    /// The server returned a non-2xx status other than 503.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// A local document could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
