//! Capability map and the gate that derives `manage_magicians`.
//!
//! The host hands the plugin a map of capability name to granted flag. The
//! gate only ever adds `manage_magicians` when `manage_options` is granted; it
//! never removes anything, so applying it twice is the same as applying it
//! once.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The host's generic "manage site settings" capability.
pub const MANAGE_OPTIONS: &str = "manage_options";

/// Capability required to change the featured magician.
pub const MANAGE_MAGICIANS: &str = "manage_magicians";

/// Capabilities granted to a caller.
///
/// A capability counts as held only when present and `true`; a `false`
/// entry is an explicit denial the host may carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capabilities(BTreeMap<String, bool>);

impl Capabilities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map granting every name in `names`.
    pub fn granting<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(|n| (n.into(), true)).collect())
    }

    pub fn grant(&mut self, capability: &str) {
        self.0.insert(capability.to_string(), true);
    }

    /// Records an explicit value for a capability.
    pub fn set(&mut self, capability: &str, granted: bool) {
        self.0.insert(capability.to_string(), granted);
    }

    pub fn has(&self, capability: &str) -> bool {
        self.0.get(capability).copied().unwrap_or(false)
    }

    /// Raw entry, including explicit `false` values.
    pub fn get(&self, capability: &str) -> Option<bool> {
        self.0.get(capability).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Grants `manage_magicians` to anyone who can `manage_options`.
#[must_use]
pub fn apply_gate(mut caps: Capabilities) -> Capabilities {
    if caps.has(MANAGE_OPTIONS) {
        caps.grant(MANAGE_MAGICIANS);
    }
    caps
}

/// Checks a capability after the gate has been applied.
pub fn current_user_can(caps: &Capabilities, capability: &str) -> bool {
    apply_gate(caps.clone()).has(capability)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manage_options_grants_manage_magicians() {
        let caps = apply_gate(Capabilities::granting([MANAGE_OPTIONS]));
        assert!(caps.has(MANAGE_MAGICIANS));
        assert!(caps.has(MANAGE_OPTIONS));
        assert_eq!(caps.len(), 2);
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(apply_gate(Capabilities::new()), Capabilities::new());
    }

    #[test]
    fn false_manage_options_grants_nothing() {
        let mut caps = Capabilities::new();
        caps.set(MANAGE_OPTIONS, false);
        let gated = apply_gate(caps.clone());
        assert_eq!(gated, caps);
        assert!(!gated.has(MANAGE_MAGICIANS));
    }

    #[test]
    fn gate_overrides_explicit_denial_of_manage_magicians() {
        let mut caps = Capabilities::granting([MANAGE_OPTIONS]);
        caps.set(MANAGE_MAGICIANS, false);
        assert!(apply_gate(caps).has(MANAGE_MAGICIANS));
    }

    #[test]
    fn unrelated_caps_untouched() {
        let caps = Capabilities::granting(["edit_posts", "read"]);
        assert_eq!(apply_gate(caps.clone()), caps);
    }

    #[test]
    fn current_user_can_uses_gate() {
        let admin = Capabilities::granting([MANAGE_OPTIONS]);
        let editor = Capabilities::granting(["edit_posts"]);
        assert!(current_user_can(&admin, MANAGE_MAGICIANS));
        assert!(!current_user_can(&editor, MANAGE_MAGICIANS));
    }

    #[test]
    fn serializes_as_plain_map() {
        let caps = Capabilities::granting([MANAGE_OPTIONS]);
        assert_eq!(
            serde_json::to_string(&caps).unwrap(),
            r#"{"manage_options":true}"#
        );
    }
}
