//! # aula-auth
//!
//! The explicit session context for Aula: a cloneable [`SessionHandle`]
//! injected into the API client, and the [`SessionStore`] that keeps the
//! bearer token and cached profile between runs.

pub mod error;
pub mod handle;
pub mod session;
pub mod store;

pub use error::AuthError;
pub use handle::SessionHandle;
pub use session::Session;
pub use store::SessionStore;
