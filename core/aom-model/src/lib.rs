//! Record model for the Alliance of Magicians plugin.
//!
//! Defines the types that the storage collaborators hand to the plugin core:
//! - [`Record`]: a host document (id, type, status, title, content, metadata)
//! - [`PostTypeDefinition`]: the registration of the managed content type
//! - [`Support`]: editor features a content type opts into
//! - [`url`]: the scheme allowlist applied to emitted URLs

mod post_type;
mod record;
pub mod url;

pub use post_type::{PostTypeDefinition, Support};
pub use record::{Record, sanitize_title};
