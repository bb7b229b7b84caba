use std::sync::Arc;

use aom_model::Record;
use aom_plugin::{
    AllianceOfMagicians, FEATURED_NONCE_ACTION, FEATURED_OPTION, MagicianPayload, PluginConfig,
    REJECTED_MESSAGE,
};
use aom_server::{AppState, build_router};
use aom_storage::{MemoryStore, SettingStore};
use aom_types::{PostStatus, RecordId};
use pretty_assertions::assert_eq;

const CONFIG: &str = r#"
site_url = "https://aom.test"
nonce_secret = "test secret"

[[users]]
id = 1
login = "gob"
token = "admin-token"
capabilities = ["manage_options"]

[[users]]
id = 2
login = "buster"
token = "editor-token"
capabilities = ["edit_posts"]
"#;

struct TestSite {
    base: String,
    state: Arc<AppState>,
    store: Arc<MemoryStore>,
}

fn id(n: u64) -> RecordId {
    RecordId::new(n).unwrap()
}

fn magicians() -> Vec<Record> {
    vec![
        Record::magician(id(1), "Gob Bluth").with_content("My best trick: [magician id=\"2\"]"),
        Record::magician(id(2), "Tony Wonder"),
        Record::magician(id(3), "Rollo").with_status(PostStatus::Draft),
    ]
}

/// Spin up the site on an OS-assigned port.
async fn spawn_site(records: Vec<Record>) -> TestSite {
    spawn_site_with(CONFIG, records).await
}

async fn spawn_site_with(config: &str, records: Vec<Record>) -> TestSite {
    let config = PluginConfig::from_toml_str(config).unwrap();
    let store = Arc::new(MemoryStore::with_seed(config.permalinks(), 11));
    for record in records {
        store.insert(record).unwrap();
    }
    let plugin = AllianceOfMagicians::from_config(&config, store.clone());
    let state = Arc::new(AppState::new(plugin, config));

    let app = build_router(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestSite {
        base: format!("http://127.0.0.1:{}", port),
        state,
        store,
    }
}

fn no_redirects() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

#[tokio::test]
async fn random_endpoint_returns_payload() {
    let site = spawn_site(magicians()).await;
    let resp = reqwest::get(format!("{}/wp-json/magicians/v1/random", site.base))
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.contains("application/json"));

    let body: MagicianPayload = resp.json().await.unwrap();
    assert!(["Gob Bluth", "Tony Wonder"].contains(&body.name.as_str()));
    assert!(body.url.starts_with("https://aom.test/alliance-approved-magician/"));
    assert_eq!(body.photo, "");
}

#[tokio::test]
async fn random_endpoint_on_empty_site_is_empty_object() {
    let site = spawn_site(Vec::new()).await;
    let body: serde_json::Value = reqwest::get(format!("{}/wp-json/magicians/v1/random", site.base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body, serde_json::json!({}));
}

#[tokio::test]
async fn single_page_renders_filtered_content() {
    let site = spawn_site(magicians()).await;
    for path in ["gob-bluth", "gob-bluth/"] {
        let resp = reqwest::get(format!("{}/alliance-approved-magician/{}", site.base, path))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let html = resp.text().await.unwrap();
        assert!(html.starts_with("<article id=\"magician-1\""), "{html}");
        assert!(html.contains("<h1 class=\"entry-title\">Gob Bluth</h1>"));
        assert!(html.contains("My best illusion: <a href=\"https://aom.test/alliance-approved-magician/tony-wonder/\">Tony Wonder</a>"));
    }
}

#[tokio::test]
async fn single_page_keeps_specific_theme_template() {
    let config = format!("single_template = \"single-magician.php\"\n{CONFIG}");
    let site = spawn_site_with(&config, magicians()).await;
    let html = reqwest::get(format!("{}/alliance-approved-magician/gob-bluth/", site.base))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(html.starts_with("<article id=\"post-1\" class=\"post\" data-template=\"single-magician.php\">"), "{html}");
    assert!(!html.contains("magician-1"));
    assert!(html.contains("My best illusion: <a href=\"https://aom.test/alliance-approved-magician/tony-wonder/\">Tony Wonder</a>"));
}

#[tokio::test]
async fn single_page_for_draft_is_not_found() {
    let site = spawn_site(magicians()).await;
    let resp = reqwest::get(format!("{}/alliance-approved-magician/rollo", site.base))
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn settings_page_requires_login() {
    let site = spawn_site(magicians()).await;
    let resp = reqwest::get(format!(
        "{}/wp-admin/options-general.php?page=featured-magician",
        site.base
    ))
    .await
    .unwrap();

    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn settings_page_refuses_editor() {
    let site = spawn_site(magicians()).await;
    let resp = reqwest::Client::new()
        .get(format!("{}/wp-admin/options-general.php?page=featured-magician", site.base))
        .bearer_auth("editor-token")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 403);
    assert_eq!(resp.text().await.unwrap(), "Nice trick!");
}

#[tokio::test]
async fn settings_page_for_admin() {
    let site = spawn_site(magicians()).await;
    let resp = reqwest::Client::new()
        .get(format!(
            "{}/wp-admin/options-general.php?page=featured-magician&saved=1",
            site.base
        ))
        .bearer_auth("admin-token")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains("Settings Updated"));
    assert!(html.contains("action=\"https://aom.test/wp-admin/admin-post.php\""));
    assert!(html.contains("<option value=\"1\">Gob Bluth</option>"));
    assert!(html.contains("name=\"aom_nonce\" value=\""));
    assert!(!html.contains("Rollo"));
}

#[tokio::test]
async fn settings_page_other_slug_is_not_found() {
    let site = spawn_site(magicians()).await;
    let resp = reqwest::Client::new()
        .get(format!("{}/wp-admin/options-general.php?page=general", site.base))
        .bearer_auth("admin-token")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn save_with_valid_token_redirects() {
    let site = spawn_site(magicians()).await;
    let token = site.state.plugin.nonces().create(FEATURED_NONCE_ACTION, 1);

    let resp = no_redirects()
        .post(format!("{}/wp-admin/admin-post.php", site.base))
        .bearer_auth("admin-token")
        .form(&[("action", "aom_featured"), ("aom_nonce", token.as_str()), ("magician", "2")])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 303);
    let location = resp.headers().get("location").unwrap().to_str().unwrap();
    assert_eq!(
        location,
        "https://aom.test/wp-admin/options-general.php?page=featured-magician&saved=1"
    );
    assert_eq!(site.store.get_option(FEATURED_OPTION).unwrap().as_deref(), Some("2"));
}

#[tokio::test]
async fn save_with_forged_token_is_rejected() {
    let site = spawn_site(magicians()).await;
    site.store.set_option(FEATURED_OPTION, "1").unwrap();

    let resp = no_redirects()
        .post(format!("{}/wp-admin/admin-post.php", site.base))
        .bearer_auth("admin-token")
        .form(&[("action", "aom_featured"), ("aom_nonce", "0123456789abcdef0123"), ("magician", "2")])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 403);
    assert_eq!(resp.text().await.unwrap(), REJECTED_MESSAGE);
    assert_eq!(site.store.get_option(FEATURED_OPTION).unwrap().as_deref(), Some("1"));
}

#[tokio::test]
async fn save_with_another_users_token_is_rejected() {
    let site = spawn_site(magicians()).await;
    let token = site.state.plugin.nonces().create(FEATURED_NONCE_ACTION, 1);

    let resp = no_redirects()
        .post(format!("{}/wp-admin/admin-post.php", site.base))
        .bearer_auth("editor-token")
        .form(&[("action", "aom_featured"), ("aom_nonce", token.as_str()), ("magician", "2")])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 403);
    assert_eq!(site.store.get_option(FEATURED_OPTION).unwrap(), None);
}

#[tokio::test]
async fn save_with_unknown_action_is_bad_request() {
    let site = spawn_site(magicians()).await;
    let resp = no_redirects()
        .post(format!("{}/wp-admin/admin-post.php", site.base))
        .bearer_auth("admin-token")
        .form(&[("action", "something_else")])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn shortcode_preview_uses_featured_magician() {
    let site = spawn_site(magicians()).await;
    site.store.set_option(FEATURED_OPTION, "2").unwrap();

    let html = reqwest::Client::new()
        .get(format!("{}/shortcode", site.base))
        .query(&[("content", "Today: [magician]")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert_eq!(
        html,
        "Today: <a href=\"https://aom.test/alliance-approved-magician/tony-wonder/\">Tony Wonder</a>"
    );
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let site = spawn_site(magicians()).await;
    let resp = reqwest::get(format!("{}/wp-json/magicians/v1/nonexistent", site.base))
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
}
