use aom_model::Record;
use aom_model::url::esc_url;
use maud::html;
use serde::{Deserialize, Serialize};

/// Registered image sizes for featured images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    Thumbnail,
    Medium,
    Large,
    Full,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Thumbnail => "thumbnail",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Full => "full",
        }
    }

    /// Bounding box in pixels, `None` for the original upload.
    pub fn bounds(&self) -> Option<(u32, u32)> {
        match self {
            Self::Thumbnail => Some((150, 150)),
            Self::Medium => Some((300, 300)),
            Self::Large => Some((1024, 1024)),
            Self::Full => None,
        }
    }
}

/// Site URL layout: where the site lives and under which path segment
/// single magicians are served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permalinks {
    pub home_url: String,
    pub rewrite_slug: String,
}

impl Permalinks {
    pub fn new(home_url: &str, rewrite_slug: &str) -> Self {
        Self {
            home_url: home_url.trim_end_matches('/').to_string(),
            rewrite_slug: rewrite_slug.trim_matches('/').to_string(),
        }
    }

    /// Path of a record relative to the site root, e.g.
    /// `/alliance-approved-magician/gob-bluth/`.
    pub fn path(&self, record: &Record) -> String {
        format!("/{}/{}/", self.rewrite_slug, record.slug)
    }

    /// Absolute URL of a record.
    pub fn permalink(&self, record: &Record) -> String {
        format!("{}{}", self.home_url, self.path(record))
    }

    /// `<img>` tag for a record's featured image, empty when it has none.
    pub fn thumbnail_markup(&self, record: &Record, size: ImageSize) -> String {
        let Some(src) = record.thumbnail.as_deref() else {
            return String::new();
        };

        let (width, height) = size.bounds().unzip();
        let class = format!("attachment-{0} size-{0} wp-post-image", size.as_str());
        html! {
            img width=[width] height=[height] src=(esc_url(src)) class=(class) alt=(record.title);
        }
        .into_string()
    }
}

impl Default for Permalinks {
    fn default() -> Self {
        Self::new("http://localhost:8080", "alliance-approved-magician")
    }
}
