use std::sync::Arc;

use aom_model::{PostTypeDefinition, Record};
use aom_storage::{RecordStore, SettingStore};
use aom_types::MANAGED_TYPE;
use tracing::debug;

use crate::admin::{SettingsView, render_settings_page};
use crate::capabilities::{Capabilities, apply_gate};
use crate::config::PluginConfig;
use crate::error::PluginResult;
use crate::featured::{SaveRequest, Saved, save_featured};
use crate::filter::illusions_dangit;
use crate::nonce::{FEATURED_NONCE_ACTION, HmacNonces, NonceVerifier};
use crate::rest::payload_for;
use crate::selector::Selector;
use crate::shortcode::{self, IdAttribute, ShortcodeAtts, ShortcodeFilter};
use crate::template::{self, OutputAction, OutputActions, Template};

/// Host events the plugin attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    /// Registers the magician content type.
    Init,
    /// `[magician]` shortcode.
    Shortcode,
    /// `magicians/v1/random` route.
    RestApiInit,
    SingleTemplate,
    /// Settings screen under the settings menu.
    AdminMenu,
    /// Handler for the settings form.
    AdminPost,
    UserHasCap,
    TheContent,
}

impl Hook {
    pub const ALL: [Hook; 8] = [
        Self::Init,
        Self::Shortcode,
        Self::RestApiInit,
        Self::SingleTemplate,
        Self::AdminMenu,
        Self::AdminPost,
        Self::UserHasCap,
        Self::TheContent,
    ];

    /// Host name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Shortcode => "magician",
            Self::RestApiInit => "rest_api_init",
            Self::SingleTemplate => "single_template",
            Self::AdminMenu => "admin_menu",
            Self::AdminPost => "admin_post_aom_featured",
            Self::UserHasCap => "user_has_cap",
            Self::TheContent => "the_content",
        }
    }
}

/// The plugin, wired to its host collaborators.
pub struct AllianceOfMagicians {
    records: Arc<dyn RecordStore>,
    settings: Arc<dyn SettingStore>,
    nonces: Arc<dyn NonceVerifier>,
    shortcode_filters: Vec<Box<dyn ShortcodeFilter>>,
    output_actions: OutputActions,
}

impl AllianceOfMagicians {
    pub fn new(
        records: Arc<dyn RecordStore>,
        settings: Arc<dyn SettingStore>,
        nonces: Arc<dyn NonceVerifier>,
    ) -> Self {
        Self {
            records,
            settings,
            nonces,
            shortcode_filters: Vec::new(),
            output_actions: OutputActions::default(),
        }
    }

    /// Wires the plugin to a store serving both records and options, with
    /// HMAC tokens keyed by the configured secret.
    pub fn from_config<S>(config: &PluginConfig, store: Arc<S>) -> Self
    where
        S: RecordStore + SettingStore + 'static,
    {
        let nonces = HmacNonces::new(config.nonce_secret.as_bytes(), config.nonce_lifetime_secs);
        Self::new(store.clone(), store, Arc::new(nonces))
    }

    pub fn hooks(&self) -> &'static [Hook] {
        &Hook::ALL
    }

    pub fn post_type(&self) -> PostTypeDefinition {
        PostTypeDefinition::magician()
    }

    pub fn records(&self) -> &dyn RecordStore {
        self.records.as_ref()
    }

    pub fn nonces(&self) -> &dyn NonceVerifier {
        self.nonces.as_ref()
    }

    pub fn selector(&self) -> Selector<'_> {
        Selector::new(self.records.as_ref(), self.settings.as_ref())
    }

    /// Adds a filter on the shortcode output. Filters run in the order added.
    pub fn add_shortcode_filter(&mut self, filter: impl ShortcodeFilter + 'static) {
        self.shortcode_filters.push(Box::new(filter));
    }

    /// Adds markup emitted before the single-magician article.
    pub fn add_before_output(&mut self, action: impl OutputAction + 'static) {
        self.output_actions.add_before(action);
    }

    /// Adds markup emitted after the single-magician article.
    pub fn add_after_output(&mut self, action: impl OutputAction + 'static) {
        self.output_actions.add_after(action);
    }

    /// Renders one shortcode. Empty when no eligible magician resolves,
    /// including when the `id` attribute is not an id at all.
    pub fn shortcode(&self, atts: &ShortcodeAtts) -> PluginResult<String> {
        let requested = match atts.id {
            IdAttribute::Absent => None,
            IdAttribute::Given(id) => Some(id),
            IdAttribute::Invalid => {
                debug!(id = ?atts.raw.get("id"), "Shortcode id is not a magician id");
                return Ok(String::new());
            }
        };
        let Some(record) = self.selector().resolve_for_shortcode(requested)? else {
            return Ok(String::new());
        };
        Ok(shortcode::render(
            &record,
            atts,
            self.records.as_ref(),
            &self.shortcode_filters,
        ))
    }

    /// Content filters in host priority order: the trick filter first, then
    /// shortcode expansion.
    pub fn the_content(&self, content: &str) -> PluginResult<String> {
        let filtered = illusions_dangit(content);
        shortcode::expand(&filtered, |atts| self.shortcode(atts))
    }

    /// Body for `GET magicians/v1/random`.
    pub fn rest_random(&self) -> PluginResult<serde_json::Value> {
        let record = self.selector().resolve_random()?;
        debug!(found = record.is_some(), "Random magician requested");
        Ok(payload_for(record.as_ref(), self.records.as_ref()))
    }

    pub fn template(&self, queried: Option<&Record>, host_template: &str) -> Template {
        template::select_template(queried, host_template)
    }

    /// Capability filter applied to every capability check.
    pub fn user_has_cap(&self, caps: Capabilities) -> Capabilities {
        apply_gate(caps)
    }

    /// Looks up a published magician by slug, `None` when there is no such
    /// public magician.
    pub fn single_magician(&self, slug: &str) -> PluginResult<Option<Record>> {
        let record = self
            .records
            .get_by_slug(MANAGED_TYPE, slug)?
            .filter(Record::is_eligible);
        debug!(slug, found = record.is_some(), "Single magician requested");
        Ok(record)
    }

    /// Renders the plugin's single-magician template for `record`, wrapped in
    /// the registered output actions.
    pub fn render_single(&self, record: &Record) -> PluginResult<String> {
        let content = self.the_content(&record.content)?;
        Ok(template::render_single(
            record,
            &content,
            self.records.as_ref(),
            &self.output_actions,
        ))
    }

    /// The settings screen for `user_id`, with a fresh form token.
    pub fn settings_page(
        &self,
        caps: &Capabilities,
        user_id: u64,
        form_action: &str,
        saved: bool,
    ) -> PluginResult<String> {
        let nonce = self.nonces.create(FEATURED_NONCE_ACTION, user_id);
        let view = SettingsView {
            caps,
            selected: self.selector().featured_id()?,
            nonce: &nonce,
            form_action,
            saved,
        };
        render_settings_page(&view, self.records.as_ref())
    }

    /// Handles a settings form submission.
    pub fn save_settings(&self, request: &SaveRequest, user_id: u64) -> PluginResult<Saved> {
        save_featured(request, user_id, self.nonces.as_ref(), self.settings.as_ref())
    }
}
