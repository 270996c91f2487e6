//! MiST retrieval
//!
//! Two-phase, paginated retrieval of two-component signaling genes: first
//! the genome's components that carry the requested rank, then the genes of
//! each of those components.

pub mod client;
pub mod endpoints;
pub mod models;
pub mod retry;
pub mod transport;

pub use client::MistClient;
pub use models::{Component, Gene, RawHit};
pub use retry::RetryPolicy;
pub use transport::{HttpTransport, Transport, TransportError};
