//! In-process store, used by tests and by the server when no database path
//! is configured.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use aom_model::Record;
use aom_types::{PostStatus, RecordId};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;

use crate::error::{StorageError, StorageResult};
use crate::permalink::Permalinks;
use crate::store::{QueryOrder, RecordQuery, RecordStore, SettingStore};

/// Records and options held in memory.
pub struct MemoryStore {
    records: Mutex<BTreeMap<RecordId, Record>>,
    options: Mutex<HashMap<String, String>>,
    rng: Mutex<StdRng>,
    permalinks: Permalinks,
}

impl MemoryStore {
    /// Creates an empty store with an entropy-seeded sampler.
    pub fn new(permalinks: Permalinks) -> Self {
        Self::with_rng(permalinks, StdRng::from_entropy())
    }

    /// Creates an empty store whose random sampling is reproducible.
    pub fn with_seed(permalinks: Permalinks, seed: u64) -> Self {
        Self::with_rng(permalinks, StdRng::seed_from_u64(seed))
    }

    fn with_rng(permalinks: Permalinks, rng: StdRng) -> Self {
        Self {
            records: Mutex::new(BTreeMap::new()),
            options: Mutex::new(HashMap::new()),
            rng: Mutex::new(rng),
            permalinks,
        }
    }

    /// Inserts or replaces a record.
    pub fn insert(&self, record: Record) -> StorageResult<()> {
        lock(&self.records, "records")?.insert(record.id, record);
        Ok(())
    }

    /// Removes a record, returning it if it existed.
    pub fn remove(&self, id: RecordId) -> StorageResult<Option<Record>> {
        Ok(lock(&self.records, "records")?.remove(&id))
    }

    /// Number of stored records of any type.
    pub fn len(&self) -> StorageResult<usize> {
        Ok(lock(&self.records, "records")?.len())
    }

    pub fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, id: RecordId) -> StorageResult<Option<Record>> {
        Ok(lock(&self.records, "records")?.get(&id).cloned())
    }

    fn get_by_slug(&self, post_type: &str, slug: &str) -> StorageResult<Option<Record>> {
        Ok(lock(&self.records, "records")?
            .values()
            .find(|r| r.post_type == post_type && r.slug == slug)
            .cloned())
    }

    fn query(&self, query: &RecordQuery) -> StorageResult<Vec<Record>> {
        let records = lock(&self.records, "records")?;
        let mut matched: Vec<Record> = records
            .values()
            .filter(|r| query.matches(r))
            .cloned()
            .collect();

        // BTreeMap iteration is already id-ascending.
        if query.order == QueryOrder::TitleAsc {
            matched.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        }
        if let Some(limit) = query.limit {
            matched.truncate(limit);
        }
        Ok(matched)
    }

    fn random(&self, post_type: &str, status: PostStatus) -> StorageResult<Option<Record>> {
        let records = lock(&self.records, "records")?;
        let mut rng = lock(&self.rng, "rng")?;
        Ok(records
            .values()
            .filter(|r| r.post_type == post_type && r.status == status)
            .choose(&mut *rng)
            .cloned())
    }

    fn permalinks(&self) -> &Permalinks {
        &self.permalinks
    }
}

impl SettingStore for MemoryStore {
    fn get_option(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(lock(&self.options, "options")?.get(key).cloned())
    }

    fn set_option(&self, key: &str, value: &str) -> StorageResult<()> {
        lock(&self.options, "options")?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn lock<'a, T>(mutex: &'a Mutex<T>, name: &'static str) -> StorageResult<MutexGuard<'a, T>> {
    mutex.lock().map_err(|_| StorageError::LockPoisoned(name))
}
