//! Synchronous API client core for the demo Book Store service.
//!
//! # Overview
//! `BookStoreClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network (host-does-IO pattern). `BookStoreApi`
//! pairs it with a `Transport` and a `RandomSource` to expose the blocking
//! operations the end-to-end scenarios in `tests/scenarios.rs` are written
//! against.
//!
//! # Design
//! - `ClientConfig` carries the base URL and every endpoint path; nothing is
//!   process-wide.
//! - Each operation is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - Randomness (usernames, catalog picks) goes through `RandomSource` so a
//!   run can be replayed from its seed.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod random;
pub mod transport;
pub mod types;

pub use api::BookStoreApi;
pub use client::BookStoreClient;
pub use config::{ClientConfig, Endpoints};
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use random::{seeded_rng, RandomSource};
pub use transport::{Transport, UreqTransport};
pub use types::{AddedBooks, Book, BookCatalog, CreatedUser, Credentials, ErrorBody, Isbn, TokenResult, User};
