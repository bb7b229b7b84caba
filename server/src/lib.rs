//! HTTP surfaces for the Alliance of Magicians plugin.
//!
//! Serves the REST endpoint, single magician pages, the settings screen and
//! its form handler, and a shortcode preview. Handlers make short synchronous
//! calls into the plugin core.

use std::sync::Arc;

use aom_model::Record;
use aom_plugin::{
    AllianceOfMagicians, Capabilities, PluginConfig, PluginError, REST_NAMESPACE,
    REST_RANDOM_ROUTE, SAVE_ACTION, SETTINGS_PAGE_SLUG, SaveRequest, Template, UserConfig,
};
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Json, Redirect, Response},
    routing::{get, post},
};
use maud::{PreEscaped, html};
use serde::Deserialize;
use tracing::{debug, error, warn};

/// Everything the handlers share.
pub struct AppState {
    pub plugin: AllianceOfMagicians,
    pub config: PluginConfig,
}

impl AppState {
    pub fn new(plugin: AllianceOfMagicians, config: PluginConfig) -> Self {
        Self { plugin, config }
    }

    /// Resolves the `Authorization: Bearer` header to a configured user.
    fn current_user(&self, headers: &HeaderMap) -> Option<&UserConfig> {
        let token = headers
            .get(header::AUTHORIZATION)?
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")?;
        self.config.user_for_token(token.trim())
    }
}

/// Plugin failures rendered as HTTP responses.
struct ApiError(PluginError);

impl From<PluginError> for ApiError {
    fn from(err: PluginError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            PluginError::Rejected(_) | PluginError::Forbidden { .. } => StatusCode::FORBIDDEN,
            PluginError::Storage(_) | PluginError::Config(_) => {
                error!(error = %self.0, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, self.0.user_message()).into_response()
    }
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, "You must log in to access this page.").into_response()
}

async fn random_handler(State(state): State<Arc<AppState>>) -> Result<Json<serde_json::Value>, ApiError> {
    Ok(Json(state.plugin.rest_random()?))
}

/// The theme's own single-post template.
fn render_theme_single(template: &str, record: &Record, content: &str) -> String {
    html! {
        article id={ "post-" (record.id.get()) } class="post" data-template=(template) {
            h1.entry-title { (record.title) }
            div.entry-content { (PreEscaped(content)) }
        }
    }
    .into_string()
}

async fn single_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Response, ApiError> {
    let Some(record) = state.plugin.single_magician(&slug)? else {
        debug!(%slug, "No magician at this address");
        return Ok(StatusCode::NOT_FOUND.into_response());
    };

    let html = match state.plugin.template(Some(&record), &state.config.single_template) {
        Template::SingleMagician => state.plugin.render_single(&record)?,
        Template::Host(template) => {
            debug!(%template, "Theme template renders the magician");
            let content = state.plugin.the_content(&record.content)?;
            render_theme_single(&template, &record, &content)
        }
    };
    Ok(Html(html).into_response())
}

#[derive(Debug, Deserialize)]
pub struct SettingsQuery {
    #[serde(default)]
    pub page: String,
    #[serde(default)]
    pub saved: Option<String>,
}

async fn settings_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<SettingsQuery>,
) -> Result<Response, ApiError> {
    if query.page != SETTINGS_PAGE_SLUG {
        return Ok(StatusCode::NOT_FOUND.into_response());
    }
    let Some(user) = state.current_user(&headers) else {
        return Ok(unauthorized());
    };

    let caps: Capabilities = state.plugin.user_has_cap(user.capabilities());
    let saved = query.saved.is_some_and(|s| !s.is_empty() && s != "0");
    let form_action = state.config.admin_url("admin-post.php");
    let html = state.plugin.settings_page(&caps, user.id, &form_action, saved)?;
    Ok(Html(html).into_response())
}

/// Fields posted to `admin-post.php`.
#[derive(Debug, Default, Deserialize)]
pub struct AdminPostForm {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub aom_nonce: Option<String>,
    #[serde(default)]
    pub magician: Option<String>,
}

async fn admin_post_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<AdminPostForm>,
) -> Result<Response, ApiError> {
    let Some(user) = state.current_user(&headers) else {
        return Ok(unauthorized());
    };
    if form.action != SAVE_ACTION {
        warn!(action = %form.action, "Unknown admin-post action");
        return Ok(StatusCode::BAD_REQUEST.into_response());
    }

    let request = SaveRequest {
        aom_nonce: form.aom_nonce,
        magician: form.magician,
    };
    let saved = state.plugin.save_settings(&request, user.id)?;
    Ok(Redirect::to(&state.config.admin_url(saved.redirect)).into_response())
}

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    #[serde(default)]
    pub content: String,
}

async fn shortcode_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PreviewQuery>,
) -> Result<Html<String>, ApiError> {
    Ok(Html(state.plugin.the_content(&query.content)?))
}

/// Builds the site router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let single = format!("/{}/{{slug}}", state.plugin.post_type().rewrite_slug);
    let single_slash = format!("{single}/");

    Router::new()
        .route(
            &format!("/wp-json/{REST_NAMESPACE}{REST_RANDOM_ROUTE}"),
            get(random_handler),
        )
        .route(&single, get(single_handler))
        .route(&single_slash, get(single_handler))
        .route("/wp-admin/options-general.php", get(settings_handler))
        .route("/wp-admin/admin-post.php", post(admin_post_handler))
        .route("/shortcode", get(shortcode_handler))
        .with_state(state)
}
