//! The "Featured Magician" settings screen.

use aom_model::url::esc_url;
use aom_storage::{QueryOrder, RecordQuery, RecordStore};
use aom_types::{MANAGED_TYPE, PostStatus};
use maud::{Markup, html};

use crate::capabilities::{Capabilities, MANAGE_MAGICIANS, current_user_can};
use crate::error::{PluginError, PluginResult};
use crate::featured::SAVE_ACTION;
use crate::nonce::FEATURED_NONCE_FIELD;

/// Page slug under the settings menu.
pub const SETTINGS_PAGE_SLUG: &str = "featured-magician";

/// Menu and page title.
pub const SETTINGS_PAGE_TITLE: &str = "Featured Magician";

/// Everything the settings screen needs besides the store.
#[derive(Debug, Clone)]
pub struct SettingsView<'a> {
    pub caps: &'a Capabilities,
    /// Currently featured id, 0 when unset.
    pub selected: u64,
    /// Token for the save form, already scoped to the caller.
    pub nonce: &'a str,
    /// URL the form posts to.
    pub form_action: &'a str,
    /// Show the "Settings Updated" notice.
    pub saved: bool,
}

/// Renders the settings screen, refusing callers without
/// `manage_magicians`.
pub fn render_settings_page(view: &SettingsView<'_>, records: &dyn RecordStore) -> PluginResult<String> {
    if !current_user_can(view.caps, MANAGE_MAGICIANS) {
        return Err(PluginError::Forbidden {
            capability: MANAGE_MAGICIANS.to_string(),
        });
    }

    let dropdown = dropdown_magicians(records, view.selected)?;
    let page = html! {
        div.wrap {
            h1 { (SETTINGS_PAGE_TITLE) }
            @if view.saved {
                div #message .updated.notice.notice-success.is-dismissible { p { "Settings Updated" } }
            }
            form action=(esc_url(view.form_action)) method="POST" {
                input type="hidden" name="action" value=(SAVE_ACTION);
                p { label for="magician_id" { "Select a Magician to Feature" } }
                (dropdown)
                input type="hidden" id=(FEATURED_NONCE_FIELD) name=(FEATURED_NONCE_FIELD) value=(view.nonce);
                p.submit {
                    input #submit .button.button-primary type="submit" name="submit" value="Save Changes";
                }
            }
        }
    };
    Ok(page.into_string())
}

/// `<select>` of published magicians by title, or nothing when there are
/// none.
pub fn dropdown_magicians(records: &dyn RecordStore, selected: u64) -> PluginResult<Markup> {
    let query = RecordQuery::of_type(MANAGED_TYPE)
        .status(PostStatus::Publish)
        .order(QueryOrder::TitleAsc);
    let magicians = records.query(&query)?;
    if magicians.is_empty() {
        return Ok(html! {});
    }

    Ok(html! {
        select name="magician" id="magician_id" {
            option value="" {}
            @for magician in &magicians {
                option value=(magician.id.get()) selected[magician.id.get() == selected] {
                    (magician.title)
                }
            }
        }
    })
}
