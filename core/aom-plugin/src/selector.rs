//! Resolution of ids and selection modes to publicly presentable magicians.
//!
//! Every path funnels through [`Selector::resolve_by_id`] or the store's
//! sampler filtered on type and status, so a record that is missing, of
//! another type, or unpublished always comes back as `None`. Callers cannot
//! tell those cases apart.

use aom_model::Record;
use aom_storage::{RecordQuery, RecordStore, SettingStore, StorageResult};
use aom_types::{MANAGED_TYPE, PostStatus, RecordId, absint};
use tracing::debug;

/// Option key holding the featured magician id.
pub const FEATURED_OPTION: &str = "featured_magician";

/// Read-only view over the record and setting collaborators.
#[derive(Clone, Copy)]
pub struct Selector<'a> {
    records: &'a dyn RecordStore,
    settings: &'a dyn SettingStore,
}

impl<'a> Selector<'a> {
    pub fn new(records: &'a dyn RecordStore, settings: &'a dyn SettingStore) -> Self {
        Self { records, settings }
    }

    /// Returns the magician with `id` if it exists and is published.
    /// Zero means "no id" and resolves to `None` without touching the store.
    pub fn resolve_by_id(&self, id: u64) -> StorageResult<Option<Record>> {
        let Some(id) = RecordId::new(id) else {
            return Ok(None);
        };
        let record = self.records.get(id)?.filter(Record::is_eligible);
        if record.is_none() {
            debug!(id = id.get(), "No eligible magician for id");
        }
        Ok(record)
    }

    /// Currently stored featured id, 0 when unset or unparseable.
    pub fn featured_id(&self) -> StorageResult<u64> {
        let raw = self.settings.get_option_or(FEATURED_OPTION, "0")?;
        Ok(absint(&raw))
    }

    /// Resolves the featured setting. Validity is checked on every call, so a
    /// featured id that was later unpublished resolves to `None`.
    pub fn resolve_featured(&self) -> StorageResult<Option<Record>> {
        self.resolve_by_id(self.featured_id()?)
    }

    /// Picks a published magician uniformly at random.
    pub fn resolve_random(&self) -> StorageResult<Option<Record>> {
        let record = self.records.random(MANAGED_TYPE, PostStatus::Publish)?;
        // The store filters already; this keeps the invariant local.
        Ok(record.filter(Record::is_eligible))
    }

    /// An explicit non-zero id wins; otherwise the featured magician.
    pub fn resolve_for_shortcode(&self, requested: Option<u64>) -> StorageResult<Option<Record>> {
        match requested {
            Some(id) if id != 0 => self.resolve_by_id(id),
            _ => self.resolve_featured(),
        }
    }

    /// True when at least one published magician exists.
    pub fn has_magicians(&self) -> StorageResult<bool> {
        let query = RecordQuery::of_type(MANAGED_TYPE)
            .status(PostStatus::Publish)
            .limit(1);
        Ok(!self.records.query(&query)?.is_empty())
    }
}
