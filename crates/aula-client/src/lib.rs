//! # aula-client
//!
//! REST client for the Aula backend.
//!
//! - [`ApiClient`] sends requests over reqwest with the session's bearer
//!   token and translates every failure into an [`ApiError`].
//! - [`services`] validate and normalize before each write and post-process
//!   records after each read.
//! - [`InterventionState`] holds one intervention being viewed or edited and
//!   mediates its mutations through the permission engine.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod services;
pub mod state;
pub mod transport;

pub use client::ApiClient;
pub use error::{ApiError, ErrorReport};
pub use services::{AuthService, InterventionService, StudentService, UserService};
pub use state::{Computed, InterventionState};
pub use transport::{ApiRequest, Transport};
