use aom_types::{MANAGED_TYPE, PostStatus, RecordId};
use serde::{Deserialize, Serialize};

/// A document stored by the host.
///
/// The plugin only reads records. `meta` holds arbitrary JSON the host or
/// other plugins attach; the plugin core never interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub post_type: String,
    pub status: PostStatus,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub content: String,
    /// Featured image URL, if one is attached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub meta: serde_json::Value,
    pub created_at: i64,
    pub modified_at: i64,
}

impl Record {
    /// Creates a published record of the managed type with a slug derived
    /// from the title.
    pub fn magician(id: RecordId, title: &str) -> Self {
        Self {
            id,
            post_type: MANAGED_TYPE.to_string(),
            status: PostStatus::Publish,
            title: title.to_string(),
            slug: sanitize_title(title),
            content: String::new(),
            thumbnail: None,
            meta: serde_json::Value::Null,
            created_at: 0,
            modified_at: 0,
        }
    }

    /// Returns the record with a different content type.
    #[must_use]
    pub fn with_type(mut self, post_type: &str) -> Self {
        self.post_type = post_type.to_string();
        self
    }

    /// Returns the record with a different status.
    #[must_use]
    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_content(mut self, content: &str) -> Self {
        self.content = content.to_string();
        self
    }

    #[must_use]
    pub fn with_thumbnail(mut self, url: &str) -> Self {
        self.thumbnail = Some(url.to_string());
        self
    }

    /// True when the record is of the managed content type.
    pub fn is_managed(&self) -> bool {
        self.post_type == MANAGED_TYPE
    }

    /// True when the record may be shown to the public: managed type and
    /// published.
    pub fn is_eligible(&self) -> bool {
        self.is_managed() && self.status.is_public()
    }
}

/// Derives a URL slug from a title: lowercase ASCII alphanumerics separated
/// by single dashes.
pub fn sanitize_title(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
