//! Save path for the featured-magician setting.
//!
//! The request must carry a non-empty token and target, and the token must
//! verify for the caller and [`FEATURED_NONCE_ACTION`]. Only then is the
//! target coerced and written. The write is blind: the id is not checked
//! against the record store, since the selector re-validates on every read.

use aom_storage::SettingStore;
use aom_types::absint;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{PluginError, PluginResult, RejectReason};
use crate::nonce::{FEATURED_NONCE_ACTION, NonceVerifier};
use crate::selector::FEATURED_OPTION;

/// Admin-post action name the settings form submits.
pub const SAVE_ACTION: &str = "aom_featured";

/// Where a successful save sends the caller, relative to the admin root.
pub const SAVED_REDIRECT: &str = "options-general.php?page=featured-magician&saved=1";

/// Form fields posted by the settings screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRequest {
    #[serde(default)]
    pub aom_nonce: Option<String>,
    #[serde(default)]
    pub magician: Option<String>,
}

/// Outcome of an accepted save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Saved {
    /// The value written to the featured setting.
    pub featured: u64,
    pub redirect: &'static str,
}

/// The host treats both `""` and `"0"` as empty form values.
fn is_empty_field(value: Option<&str>) -> bool {
    matches!(value, None | Some("") | Some("0"))
}

/// Validates and applies a featured-magician save.
pub fn save_featured(
    request: &SaveRequest,
    user_id: u64,
    nonces: &dyn NonceVerifier,
    settings: &dyn SettingStore,
) -> PluginResult<Saved> {
    let token = request.aom_nonce.as_deref();
    let target = request.magician.as_deref();

    let rejection = if is_empty_field(token) {
        Some(RejectReason::MissingToken)
    } else if is_empty_field(target) {
        Some(RejectReason::MissingTarget)
    } else if nonces
        .verify(token.unwrap_or_default(), FEATURED_NONCE_ACTION, user_id)
        .is_none()
    {
        Some(RejectReason::InvalidToken)
    } else {
        None
    };

    if let Some(reason) = rejection {
        warn!(user_id, %reason, "Rejected featured magician save");
        return Err(PluginError::Rejected(reason));
    }

    let featured = absint(target.unwrap_or_default());
    settings.set_option(FEATURED_OPTION, &featured.to_string())?;
    info!(user_id, featured, "Featured magician updated");

    Ok(Saved {
        featured,
        redirect: SAVED_REDIRECT,
    })
}
