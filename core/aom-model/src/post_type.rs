use aom_types::MANAGED_TYPE;
use serde::{Deserialize, Serialize};

/// Describes a content type registration with the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostTypeDefinition {
    pub name: String,
    pub label: String,
    pub public: bool,
    pub menu_icon: String,
    pub supports: Vec<Support>,
    /// Path segment under which single records are served.
    pub rewrite_slug: String,
}

/// Editor feature a content type opts into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Support {
    Title,
    Editor,
    Thumbnail,
}

impl PostTypeDefinition {
    /// The magician content type.
    pub fn magician() -> Self {
        Self {
            name: MANAGED_TYPE.to_string(),
            label: "Magicians".to_string(),
            public: true,
            menu_icon: "dashicons-businessman".to_string(),
            supports: vec![Support::Title, Support::Editor, Support::Thumbnail],
            rewrite_slug: "alliance-approved-magician".to_string(),
        }
    }

    pub fn supports(&self, feature: Support) -> bool {
        self.supports.contains(&feature)
    }
}
