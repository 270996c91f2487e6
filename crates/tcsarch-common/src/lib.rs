//! TCSArch Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, logging, and error handling for the TCSArch workspace.
//!
//! # Overview
//!
//! - **Error Handling**: [`TcsError`] and the [`Result`] alias
//! - **Logging**: tracing subscriber bootstrap shared by every binary
//! - **Types**: domain hits, annotated segments, and protein records
//!
//! # Example
//!
//! ```
//! use tcsarch_common::types::{DomainHit, Segment};
//!
//! let hit = DomainHit::new("PAS", 10, 60, 5, 70, Some(1e-8));
//! let segment = Segment::from(&hit);
//! assert_eq!(segment.to_string(), "PAS:5-70");
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{Result, TcsError};
