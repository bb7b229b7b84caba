//! Error types for the plugin core.

use aom_storage::StorageError;
use thiserror::Error;

/// Refusal shown when a featured-magician save cannot be verified.
pub const REJECTED_MESSAGE: &str = "Could not verify the request, please try again.";

/// Refusal shown when a caller without `manage_magicians` opens the settings
/// screen.
pub const FORBIDDEN_MESSAGE: &str = "Nice trick!";

/// Result type for plugin operations.
pub type PluginResult<T> = Result<T, PluginError>;

/// Why a save request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    MissingToken,
    MissingTarget,
    InvalidToken,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::MissingToken => "missing anti-forgery token",
            Self::MissingTarget => "missing magician id",
            Self::InvalidToken => "anti-forgery token did not verify",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Error)]
pub enum PluginError {
    /// Save request failed input or token checks. Nothing was written.
    #[error("request rejected: {0}")]
    Rejected(RejectReason),

    /// Caller lacks the capability an admin screen requires.
    #[error("forbidden: caller lacks '{capability}' capability")]
    Forbidden { capability: String },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl PluginError {
    /// Text to show the person whose request failed.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Rejected(_) => REJECTED_MESSAGE,
            Self::Forbidden { .. } => FORBIDDEN_MESSAGE,
            Self::Storage(_) | Self::Config(_) => "Something went wrong. Please try again later.",
        }
    }
}
