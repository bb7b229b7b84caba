//! The `[magician]` shortcode.
//!
//! `[magician]` renders the featured magician and `[magician id="12"]` a
//! specific one, as a link to its permalink. Output passes through the
//! registered [`ShortcodeFilter`]s so themes can replace the markup.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use aom_model::Record;
use aom_model::url::esc_url;
use aom_storage::RecordStore;
use fancy_regex::Regex;
use maud::html;
use tracing::warn;

/// Shortcode tag name.
pub const SHORTCODE_TAG: &str = "magician";

/// Name of the output filter hook.
pub const SHORTCODE_FILTER: &str = "aom_magician_shortcode";

static SHORTCODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(\[?)magician(?![\w-])([^\]]*?)/?\](\]?)").expect("shortcode pattern is valid")
});

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([\w-]+)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s'"]+))"#)
        .expect("attribute pattern is valid")
});

/// The `id` attribute of a shortcode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdAttribute {
    /// No `id` given. The featured magician is shown.
    #[default]
    Absent,
    /// A non-negative integer. Zero behaves like [`IdAttribute::Absent`].
    Given(u64),
    /// Given but not an id, e.g. `id="gob"`, `id="-3"` or `id=""`. Never
    /// resolves to anything.
    Invalid,
}

impl IdAttribute {
    fn parse(value: &str) -> Self {
        match value.trim().parse::<u64>() {
            Ok(id) => Self::Given(id),
            Err(_) => Self::Invalid,
        }
    }
}

/// Attributes given to a shortcode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortcodeAtts {
    pub id: IdAttribute,
    /// Every attribute as written, for filters that want more.
    pub raw: BTreeMap<String, String>,
}

impl ShortcodeAtts {
    /// Attributes selecting one magician by id.
    pub fn with_id(id: u64) -> Self {
        let mut raw = BTreeMap::new();
        raw.insert("id".to_string(), id.to_string());
        Self {
            id: IdAttribute::Given(id),
            raw,
        }
    }

    /// Parses the attribute text between the tag name and the closing
    /// bracket, e.g. ` id="7" class='big'`.
    pub fn parse(text: &str) -> Self {
        let mut raw = BTreeMap::new();
        for caps in ATTRIBUTE.captures_iter(text) {
            let caps = match caps {
                Ok(caps) => caps,
                Err(e) => {
                    warn!(error = %e, "Stopped parsing shortcode attributes");
                    break;
                }
            };
            let Some(name) = caps.get(1) else { continue };
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str())
                .unwrap_or_default();
            raw.insert(name.as_str().to_lowercase(), value.to_string());
        }
        let id = raw
            .get("id")
            .map_or(IdAttribute::Absent, |v| IdAttribute::parse(v));
        Self { id, raw }
    }
}

/// Output hook for the shortcode. Receives the escaped markup the plugin
/// built and returns the markup to use instead.
pub trait ShortcodeFilter: Send + Sync {
    fn filter(&self, output: String, record: &Record, atts: &ShortcodeAtts) -> String;
}

impl<F> ShortcodeFilter for F
where
    F: Fn(String, &Record, &ShortcodeAtts) -> String + Send + Sync,
{
    fn filter(&self, output: String, record: &Record, atts: &ShortcodeAtts) -> String {
        self(output, record, atts)
    }
}

/// Default markup: a link to the magician titled with its name.
pub fn render_link(record: &Record, records: &dyn RecordStore) -> String {
    html! { a href=(esc_url(&records.permalink(record))) { (record.title) } }.into_string()
}

/// Runs `record` through the default renderer and every filter in order.
pub fn render(
    record: &Record,
    atts: &ShortcodeAtts,
    records: &dyn RecordStore,
    filters: &[Box<dyn ShortcodeFilter>],
) -> String {
    filters
        .iter()
        .fold(render_link(record, records), |output, f| {
            f.filter(output, record, atts)
        })
}

/// Replaces every `[magician ...]` tag in `content` with the output of
/// `render`. `[[magician]]` is an escaped tag and renders as `[magician]`.
pub fn expand<E>(content: &str, mut render: impl FnMut(&ShortcodeAtts) -> Result<String, E>) -> Result<String, E> {
    let mut out = String::with_capacity(content.len());
    let mut last = 0;

    for found in SHORTCODE.captures_iter(content) {
        let caps = match found {
            Ok(caps) => caps,
            Err(e) => {
                warn!(error = %e, "Shortcode expansion gave up, leaving the rest unchanged");
                break;
            }
        };
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&content[last..whole.start()]);
        last = whole.end();

        let open_escape = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
        let close_escape = caps.get(3).is_some_and(|m| !m.as_str().is_empty());
        if open_escape && close_escape {
            let inner = whole.as_str();
            out.push_str(&inner[1..inner.len() - 1]);
            continue;
        }

        let attr_text = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
        if open_escape {
            out.push('[');
        }
        out.push_str(&render(&ShortcodeAtts::parse(attr_text))?);
        if close_escape {
            out.push(']');
        }
    }

    out.push_str(&content[last..]);
    Ok(out)
}
