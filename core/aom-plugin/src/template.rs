//! Template selection and the plugin's single-magician template.
//!
//! The article is wrapped by the [`BEFORE_OUTPUT_ACTION`] and
//! [`AFTER_OUTPUT_ACTION`] hooks so themes can add markup around it.

use aom_model::Record;
use aom_model::url::esc_url;
use aom_storage::{ImageSize, RecordStore};
use maud::{PreEscaped, html};

/// Name of the template the plugin ships.
pub const SINGLE_TEMPLATE: &str = "single-magician";

/// Hook run before the single-magician article.
pub const BEFORE_OUTPUT_ACTION: &str = "before_output_magician";

/// Hook run after the single-magician article.
pub const AFTER_OUTPUT_ACTION: &str = "after_output_magician";

/// Which template renders a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Template {
    /// Whatever the host picked.
    Host(String),
    /// The plugin's [`SINGLE_TEMPLATE`].
    SingleMagician,
}

/// Substitutes the plugin template when a single magician is being shown and
/// the host would otherwise fall back to its generic single template.
///
/// A theme keeps control by providing a more specific template (anything not
/// ending in `single.php`).
pub fn select_template(queried: Option<&Record>, host_template: &str) -> Template {
    let singular_magician = queried.is_some_and(Record::is_managed);
    if singular_magician && (host_template.is_empty() || host_template.ends_with("single.php")) {
        Template::SingleMagician
    } else {
        Template::Host(host_template.to_string())
    }
}

/// Markup emitted around the single-magician article. Output is inserted
/// verbatim.
pub trait OutputAction: Send + Sync {
    fn output(&self, record: &Record) -> String;
}

impl<F> OutputAction for F
where
    F: Fn(&Record) -> String + Send + Sync,
{
    fn output(&self, record: &Record) -> String {
        self(record)
    }
}

/// Registered [`OutputAction`]s, run in the order added.
#[derive(Default)]
pub struct OutputActions {
    before: Vec<Box<dyn OutputAction>>,
    after: Vec<Box<dyn OutputAction>>,
}

impl OutputActions {
    pub fn add_before(&mut self, action: impl OutputAction + 'static) {
        self.before.push(Box::new(action));
    }

    pub fn add_after(&mut self, action: impl OutputAction + 'static) {
        self.after.push(Box::new(action));
    }

    fn run(actions: &[Box<dyn OutputAction>], record: &Record) -> String {
        actions.iter().map(|action| action.output(record)).collect()
    }
}

/// Renders the single-magician template: the before hooks, the article, then
/// the after hooks.
///
/// `content` must already have been through the content filters.
pub fn render_single(
    record: &Record,
    content: &str,
    records: &dyn RecordStore,
    actions: &OutputActions,
) -> String {
    let thumbnail = records.thumbnail_markup(record, ImageSize::Medium);
    html! {
        (PreEscaped(OutputActions::run(&actions.before, record)))
        article id={ "magician-" (record.id.get()) } class={ "magician type-magician status-" (record.status.as_str()) } {
            @if !thumbnail.is_empty() {
                div.post-thumbnail {
                    a href=(esc_url(&records.permalink(record))) { (PreEscaped(&thumbnail)) }
                }
            }
            header.entry-header {
                h1.entry-title { (record.title) }
            }
            div.entry-content { (PreEscaped(content)) }
        }
        (PreEscaped(OutputActions::run(&actions.after, record)))
    }
    .into_string()
}
