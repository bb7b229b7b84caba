//! Property tests for the pure transforms: the capability gate and the
//! trick filter.

use aom_plugin::{Capabilities, MANAGE_MAGICIANS, MANAGE_OPTIONS, apply_gate, illusions_dangit};
use proptest::prelude::*;

fn capability_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(MANAGE_OPTIONS.to_string()),
        Just(MANAGE_MAGICIANS.to_string()),
        "[a-z_]{1,16}",
    ]
}

fn capabilities() -> impl Strategy<Value = Capabilities> {
    prop::collection::vec((capability_name(), any::<bool>()), 0..8).prop_map(|entries| {
        let mut caps = Capabilities::new();
        for (name, granted) in entries {
            caps.set(&name, granted);
        }
        caps
    })
}

/// Text that cannot contain "trick" in any case.
fn trickless_text() -> impl Strategy<Value = String> {
    "[a-hj-zA-HJ-Z0-9 .,!]{0,80}"
}

mod gate_properties {
    use super::*;

    proptest! {
        #[test]
        fn gate_is_idempotent(caps in capabilities()) {
            let once = apply_gate(caps);
            let twice = apply_gate(once.clone());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn gate_never_removes_grants(caps in capabilities()) {
            let gated = apply_gate(caps.clone());
            for (name, granted) in caps.iter() {
                if granted {
                    prop_assert!(gated.has(name));
                }
            }
        }

        #[test]
        fn gate_only_adds_manage_magicians(caps in capabilities()) {
            let gated = apply_gate(caps.clone());
            for (name, value) in gated.iter() {
                if name != MANAGE_MAGICIANS {
                    prop_assert_eq!(caps.get(name), Some(value));
                }
            }
        }

        #[test]
        fn manage_magicians_follows_manage_options(caps in capabilities()) {
            let gated = apply_gate(caps.clone());
            if caps.has(MANAGE_OPTIONS) {
                prop_assert!(gated.has(MANAGE_MAGICIANS));
            } else {
                prop_assert_eq!(gated.has(MANAGE_MAGICIANS), caps.has(MANAGE_MAGICIANS));
            }
        }
    }
}

mod filter_properties {
    use super::*;

    proptest! {
        #[test]
        fn text_without_trick_is_unchanged(text in trickless_text()) {
            prop_assert_eq!(illusions_dangit(&text), text);
        }

        #[test]
        fn standalone_trick_is_always_replaced(
            before in trickless_text(),
            after in trickless_text(),
        ) {
            prop_assume!(!after.to_lowercase().starts_with("for money"));
            let text = format!("{before} trick {after}");
            let out = illusions_dangit(&text);
            prop_assert_eq!(out, format!("{before} illusion {after}"));
        }

        #[test]
        fn for_money_phrases_survive(before in trickless_text()) {
            let text = format!("{before} tricks for money");
            prop_assert_eq!(illusions_dangit(&text), text);
        }

        #[test]
        fn filter_is_idempotent(text in "[a-zA-Z .]{0,60}") {
            let once = illusions_dangit(&text);
            prop_assert_eq!(illusions_dangit(&once), once.clone());
        }
    }
}
