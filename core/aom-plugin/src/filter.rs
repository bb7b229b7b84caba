//! Content filter that corrects "trick" to "illusion".
//!
//! Matches the whole word `trick`, case-insensitively, optionally followed by
//! a plural `s`. Only the four-letter root is replaced, so a plural suffix
//! stays where it was. The phrase "trick(s) for money" is left alone.
//!
//! Word boundaries are ASCII: only `[A-Za-z0-9_]` count as word characters,
//! so `étrick` still contains the word.

use std::sync::LazyLock;

use fancy_regex::Regex;
use tracing::warn;

static TRICK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?<![A-Za-z0-9_])trick(?=s|(?![A-Za-z0-9_]))(?!s? for money)")
        .expect("trick pattern is valid")
});

/// Rewrites every eligible "trick" in `content`.
///
/// The replacement mirrors only the case of the first letter: a lowercase
/// match becomes `illusion`, anything else `Illusion`.
pub fn illusions_dangit(content: &str) -> String {
    let mut out = String::with_capacity(content.len() + 16);
    let mut last = 0;

    for found in TRICK.find_iter(content) {
        let m = match found {
            Ok(m) => m,
            Err(e) => {
                warn!(error = %e, "Trick filter gave up, leaving content unchanged");
                return content.to_string();
            }
        };
        out.push_str(&content[last..m.start()]);
        out.push_str(replacement_for(m.as_str()));
        last = m.end();
    }

    out.push_str(&content[last..]);
    out
}

fn replacement_for(matched: &str) -> &'static str {
    if matched.starts_with(|c: char| c.is_lowercase()) {
        "illusion"
    } else {
        "Illusion"
    }
}
