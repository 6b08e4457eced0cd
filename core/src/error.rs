//! Error types for the Book Store client.
//!
//! # Design
//! The service answers most failures with a 4xx status and a
//! `{code, message}` body. The scenarios assert on those directly through the
//! raw responses, so `UnexpectedStatus` only fires when a `parse_*` method was
//! asked for one status and saw another. Transport failures are kept as text
//! so the core does not leak the HTTP library's error type.

use thiserror::Error;

/// Errors returned by `BookStoreClient` parse methods and `BookStoreApi`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a status other than the one the operation expects.
    #[error("expected HTTP {expected}, got {status}: {body}")]
    UnexpectedStatus { expected: u16, status: u16, body: String },

    /// The response parsed, but a required field was absent or null.
    #[error("response is missing field `{0}`")]
    MissingField(&'static str),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request never produced a response (DNS, connect, read).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The catalog returned no books to pick from.
    #[error("book catalog is empty")]
    EmptyCatalog,
}

/// Errors raised while loading `ClientConfig` from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}
