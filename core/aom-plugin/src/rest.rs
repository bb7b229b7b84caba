//! Payload for the read-only random magician endpoint.

use aom_model::Record;
use aom_storage::{ImageSize, RecordStore};
use serde::{Deserialize, Serialize};

/// Route namespace registered with the host's REST server.
pub const REST_NAMESPACE: &str = "magicians/v1";

/// Route under [`REST_NAMESPACE`] returning a random magician.
pub const REST_RANDOM_ROUTE: &str = "/random";

/// JSON body describing one magician.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MagicianPayload {
    pub name: String,
    pub url: String,
    /// Medium-size featured image markup, empty when there is none.
    pub photo: String,
}

impl MagicianPayload {
    pub fn from_record(record: &Record, records: &dyn RecordStore) -> Self {
        Self {
            name: record.title.clone(),
            url: records.permalink(record),
            photo: records.thumbnail_markup(record, ImageSize::Medium),
        }
    }
}

/// The endpoint body: the magician's payload, or `{}` when none was found.
pub fn payload_for(record: Option<&Record>, records: &dyn RecordStore) -> serde_json::Value {
    match record {
        Some(record) => serde_json::to_value(MagicianPayload::from_record(record, records))
            .unwrap_or_else(|_| serde_json::json!({})),
        None => serde_json::json!({}),
    }
}
