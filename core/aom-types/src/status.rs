use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Publication state of a record, as tracked by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PostStatus {
    /// Visible to everyone.
    Publish,
    #[default]
    Draft,
    /// Awaiting review.
    Pending,
    /// Visible only to editors.
    Private,
    /// Scheduled for later publication.
    Future,
    Trash,
    AutoDraft,
    /// Attachments and revisions follow their parent.
    Inherit,
}

impl PostStatus {
    /// Every status the host knows about.
    pub const ALL: [PostStatus; 8] = [
        Self::Publish,
        Self::Draft,
        Self::Pending,
        Self::Private,
        Self::Future,
        Self::Trash,
        Self::AutoDraft,
        Self::Inherit,
    ];

    /// Returns the host's storage name for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Publish => "publish",
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Private => "private",
            Self::Future => "future",
            Self::Trash => "trash",
            Self::AutoDraft => "auto-draft",
            Self::Inherit => "inherit",
        }
    }

    /// Only published records may be shown to the public.
    #[must_use]
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Publish)
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| Error::InvalidStatus(s.to_string()))
    }
}
