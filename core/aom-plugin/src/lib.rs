//! Alliance of Magicians plugin core.
//!
//! Resolves which magician to show (by id, featured, or at random), gates the
//! featured-magician settings behind `manage_magicians`, and filters rendered
//! content. All host state is reached through the collaborators in
//! `aom-storage` and the [`NonceVerifier`] trait, so every operation can run
//! against in-memory fakes.
//!
//! Presentation adapters (shortcode, REST payload, single template, settings
//! screen) are thin wrappers over [`Selector`] output.

mod admin;
mod capabilities;
mod config;
mod error;
mod featured;
mod filter;
mod nonce;
mod plugin;
mod rest;
mod selector;
mod shortcode;
mod template;

pub use admin::{
    SETTINGS_PAGE_SLUG, SETTINGS_PAGE_TITLE, SettingsView, dropdown_magicians, render_settings_page,
};
pub use capabilities::{
    Capabilities, MANAGE_MAGICIANS, MANAGE_OPTIONS, apply_gate, current_user_can,
};
pub use config::{PluginConfig, UserConfig};
pub use error::{FORBIDDEN_MESSAGE, PluginError, PluginResult, REJECTED_MESSAGE, RejectReason};
pub use featured::{SAVE_ACTION, SAVED_REDIRECT, SaveRequest, Saved, save_featured};
pub use filter::illusions_dangit;
pub use nonce::{
    DEFAULT_NONCE_LIFETIME_SECS, FEATURED_NONCE_ACTION, FEATURED_NONCE_FIELD, HmacNonces,
    NonceAge, NonceVerifier,
};
pub use plugin::{AllianceOfMagicians, Hook};
pub use rest::{MagicianPayload, REST_NAMESPACE, REST_RANDOM_ROUTE, payload_for};
pub use selector::{FEATURED_OPTION, Selector};
pub use shortcode::{IdAttribute, SHORTCODE_FILTER, SHORTCODE_TAG, ShortcodeAtts, ShortcodeFilter};
pub use template::{
    AFTER_OUTPUT_ACTION, BEFORE_OUTPUT_ACTION, OutputAction, OutputActions, SINGLE_TEMPLATE,
    Template, render_single, select_template,
};
