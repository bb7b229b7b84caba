//! Shared fixtures for plugin tests.

#![allow(dead_code)]

use std::sync::Arc;

use aom_model::Record;
use aom_plugin::{AllianceOfMagicians, FEATURED_NONCE_ACTION, NonceAge, NonceVerifier};
use aom_storage::{MemoryStore, Permalinks};
use aom_types::{PostStatus, RecordId};

pub const SITE: &str = "https://aom.test";
pub const ADMIN_ID: u64 = 1;
pub const VALID_TOKEN: &str = "valid-token";

pub fn id(n: u64) -> RecordId {
    RecordId::new(n).unwrap()
}

pub fn links() -> Permalinks {
    Permalinks::new(SITE, "alliance-approved-magician")
}

/// Three published magicians, one draft, one trashed, one page and one
/// published magician with a photo.
pub fn fixtures() -> Vec<Record> {
    vec![
        Record::magician(id(1), "Gob Bluth"),
        Record::magician(id(2), "Tony Wonder"),
        Record::magician(id(3), "Rollo").with_status(PostStatus::Draft),
        Record::magician(id(4), "Franklin").with_status(PostStatus::Trash),
        Record::magician(id(5), "Contact").with_type("page"),
        Record::magician(id(6), "Buster")
            .with_thumbnail("https://aom.test/uploads/buster.jpg")
            .with_content("Best trick ever."),
    ]
}

pub fn seeded_store(seed: u64) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::with_seed(links(), seed));
    for record in fixtures() {
        store.insert(record).unwrap();
    }
    store
}

pub fn empty_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::with_seed(links(), 1))
}

/// Accepts only [`VALID_TOKEN`], for [`ADMIN_ID`] and the featured action.
pub struct FixedNonces;

impl NonceVerifier for FixedNonces {
    fn create(&self, _action: &str, _user_id: u64) -> String {
        VALID_TOKEN.to_string()
    }

    fn verify(&self, token: &str, action: &str, user_id: u64) -> Option<NonceAge> {
        (token == VALID_TOKEN && action == FEATURED_NONCE_ACTION && user_id == ADMIN_ID)
            .then_some(NonceAge::Current)
    }
}

pub fn plugin_over(store: Arc<MemoryStore>) -> AllianceOfMagicians {
    AllianceOfMagicians::new(store.clone(), store, Arc::new(FixedNonces))
}
