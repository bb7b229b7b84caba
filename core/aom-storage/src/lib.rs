//! Store collaborators for the Alliance of Magicians plugin.
//!
//! The plugin core never owns storage. It reads records and the featured
//! setting through two traits:
//!
//! - [`RecordStore`]: get-by-id, type/status queries, random sampling,
//!   permalinks and thumbnail markup
//! - [`SettingStore`]: a flat key/value option table
//!
//! Two implementations are provided. [`SqliteStore`] persists both tables in
//! a single SQLite file; [`MemoryStore`] keeps everything in process and can
//! be seeded for deterministic sampling in tests.

mod error;
mod memory;
mod permalink;
mod sqlite;
mod store;

pub use error::{StorageError, StorageResult};
pub use memory::MemoryStore;
pub use permalink::{ImageSize, Permalinks};
pub use sqlite::SqliteStore;
pub use store::{QueryOrder, RecordQuery, RecordStore, SettingStore};
