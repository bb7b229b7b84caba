//! Core type definitions for the Alliance of Magicians plugin.
//!
//! This crate defines the small, host-agnostic types shared by every other
//! crate in the workspace:
//! - Record identifiers and the host's integer coercion rule
//! - Publication status of a record
//!
//! Presentation types (records, content type registration) live in
//! `aom-model`; storage collaborators live in `aom-storage`.

mod ids;
mod status;

pub use ids::{RecordId, absint};
pub use status::PostStatus;

/// The content type managed by the plugin.
pub const MANAGED_TYPE: &str = "magician";

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid record id: {0}")]
    InvalidId(String),

    #[error("invalid post status: {0}")]
    InvalidStatus(String),
}
