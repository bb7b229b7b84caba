use aom_model::Record;
use aom_types::{PostStatus, RecordId};

use crate::error::StorageResult;
use crate::permalink::{ImageSize, Permalinks};

/// Sort order for [`RecordQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryOrder {
    #[default]
    IdAsc,
    /// Title ascending, ties broken by id.
    TitleAsc,
}

/// Filter for listing records of one content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordQuery {
    pub post_type: String,
    /// `None` matches every status.
    pub status: Option<PostStatus>,
    pub order: QueryOrder,
    /// `None` returns every match.
    pub limit: Option<usize>,
}

impl RecordQuery {
    /// All records of a content type, any status, ordered by id.
    pub fn of_type(post_type: &str) -> Self {
        Self {
            post_type: post_type.to_string(),
            status: None,
            order: QueryOrder::IdAsc,
            limit: None,
        }
    }

    #[must_use]
    pub fn status(mut self, status: PostStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn order(mut self, order: QueryOrder) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns true if `record` passes the type and status filters.
    pub fn matches(&self, record: &Record) -> bool {
        record.post_type == self.post_type && self.status.is_none_or(|s| s == record.status)
    }
}

/// Read access to the host's document store.
pub trait RecordStore: Send + Sync {
    /// Fetches a record by id, whatever its type or status.
    fn get(&self, id: RecordId) -> StorageResult<Option<Record>>;

    /// Fetches a record of `post_type` by its slug, whatever its status.
    fn get_by_slug(&self, post_type: &str, slug: &str) -> StorageResult<Option<Record>>;

    /// Lists records matching `query`.
    fn query(&self, query: &RecordQuery) -> StorageResult<Vec<Record>>;

    /// Picks one record uniformly at random among those with the given type
    /// and status, without loading the full candidate set.
    fn random(&self, post_type: &str, status: PostStatus) -> StorageResult<Option<Record>>;

    /// URL layout used to build permalinks.
    fn permalinks(&self) -> &Permalinks;

    /// Public URL of a record.
    fn permalink(&self, record: &Record) -> String {
        self.permalinks().permalink(record)
    }

    /// `<img>` markup for the record's featured image, or an empty string.
    fn thumbnail_markup(&self, record: &Record, size: ImageSize) -> String {
        self.permalinks().thumbnail_markup(record, size)
    }
}

/// Access to the host's named options.
pub trait SettingStore: Send + Sync {
    /// Reads an option, `None` if it was never written.
    fn get_option(&self, key: &str) -> StorageResult<Option<String>>;

    /// Writes an option unconditionally, replacing any previous value.
    fn set_option(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Reads an option, falling back to `default` when absent.
    fn get_option_or(&self, key: &str, default: &str) -> StorageResult<String> {
        Ok(self
            .get_option(key)?
            .unwrap_or_else(|| default.to_string()))
    }
}
