//! Site configuration. Reads `aom.toml` and falls back to defaults with a
//! warning when the file is missing or malformed.

use std::path::Path;

use aom_model::PostTypeDefinition;
use aom_storage::Permalinks;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::capabilities::Capabilities;
use crate::error::{PluginError, PluginResult};
use crate::nonce::DEFAULT_NONCE_LIFETIME_SECS;

const DEFAULT_NONCE_SECRET: &str = "put your unique phrase here";

/// A user the site can authenticate by bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    pub id: u64,
    pub login: String,
    pub token: String,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

impl UserConfig {
    /// The user's capabilities before the plugin gate runs.
    pub fn capabilities(&self) -> Capabilities {
        Capabilities::granting(self.capabilities.iter().cloned())
    }
}

/// Plugin and site configuration parsed from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginConfig {
    #[serde(default = "default_site_url")]
    pub site_url: String,
    #[serde(default = "default_nonce_secret")]
    pub nonce_secret: String,
    #[serde(default = "default_nonce_lifetime")]
    pub nonce_lifetime_secs: i64,
    /// Template the active theme offers for single posts. Anything more
    /// specific than `single.php` keeps the theme in charge of magician pages.
    #[serde(default = "default_single_template")]
    pub single_template: String,
    #[serde(default)]
    pub users: Vec<UserConfig>,
}

fn default_site_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_nonce_secret() -> String {
    DEFAULT_NONCE_SECRET.to_string()
}

fn default_nonce_lifetime() -> i64 {
    DEFAULT_NONCE_LIFETIME_SECS
}

fn default_single_template() -> String {
    "single.php".to_string()
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            site_url: default_site_url(),
            nonce_secret: default_nonce_secret(),
            nonce_lifetime_secs: default_nonce_lifetime(),
            single_template: default_single_template(),
            users: Vec::new(),
        }
    }
}

impl PluginConfig {
    /// Loads configuration from `path`, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No config file found at {:?}, using defaults", path);
            return Self::default();
        }

        let config = match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    info!("Loaded site config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!("Failed to parse config file {:?}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read config file {:?}: {}", path, e);
                Self::default()
            }
        };

        if config.nonce_secret == DEFAULT_NONCE_SECRET {
            warn!("nonce_secret is the default phrase; set a unique one in the config file");
        }
        config
    }

    pub fn from_toml_str(contents: &str) -> PluginResult<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|e| PluginError::Config(e.to_string()))?;
        if config.nonce_lifetime_secs <= 0 {
            return Err(PluginError::Config(format!(
                "nonce_lifetime_secs must be positive, got {}",
                config.nonce_lifetime_secs
            )));
        }
        Ok(config)
    }

    /// Finds the user a bearer token belongs to.
    pub fn user_for_token(&self, token: &str) -> Option<&UserConfig> {
        if token.is_empty() {
            return None;
        }
        self.users.iter().find(|u| u.token == token)
    }

    /// URL layout for the magician content type on this site.
    pub fn permalinks(&self) -> Permalinks {
        Permalinks::new(&self.site_url, &PostTypeDefinition::magician().rewrite_slug)
    }

    /// Absolute URL of an admin screen, e.g. `admin_url("admin-post.php")`.
    pub fn admin_url(&self, path: &str) -> String {
        format!(
            "{}/wp-admin/{}",
            self.site_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
