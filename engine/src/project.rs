//! The Order-Preserving Projector.
//!
//! After a reconciliation cycle the remote API is re-read and the result
//! has to be reported back in a shape the caller recognizes: items the
//! caller declared keep their declared position, items the server
//! discovered on its own are appended, items that no longer exist
//! disappear. Projecting the same observation twice with the same hint
//! yields identical output, so an unchanged resource produces no diff
//! noise on the next cycle.

use crate::item::Keyed;
use std::collections::HashSet;

/// Rebuild the caller-visible collection from an observation.
///
/// For each key in `order_hint` that exists in `observed`, the observed
/// item is emitted at that position - the server-returned payload wins
/// over whatever the caller supplied, since the server is authoritative
/// after a write. Observed items whose key is not in the hint (for
/// example auto-provisioned network memberships) follow in observed
/// order. An empty hint, the first read with no prior configuration,
/// returns the observation unchanged.
///
/// A key appearing twice in the hint is a caller error caught by the
/// differ; the projector emits the item once, at the first occurrence.
pub fn project<T>(observed: &[T], order_hint: &[T::Key]) -> Vec<T>
where
    T: Keyed + Clone,
{
    if order_hint.is_empty() {
        return observed.to_vec();
    }

    let mut out = Vec::with_capacity(observed.len());
    let mut emitted: HashSet<&T::Key> = HashSet::with_capacity(order_hint.len());

    for key in order_hint {
        if !emitted.insert(key) {
            continue;
        }
        if let Some(item) = observed.iter().find(|item| item.key() == key) {
            out.push(item.clone());
        }
    }

    for item in observed {
        if !emitted.contains(item.key()) {
            out.push(item.clone());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::keys_of;
    use crate::resources::{PrivateNetworkAttachment, TagAssignment};

    fn tag(name: &str, value: &str) -> TagAssignment {
        TagAssignment::new(name, Some(value))
    }

    #[test]
    fn matched_items_keep_caller_position() {
        let observed = vec![tag("team", "x"), tag("env", "prod")];
        let hint = vec!["env".to_string(), "team".to_string()];

        let out = project(&observed, &hint);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].name, "env");
        assert_eq!(out[1].name, "team");
    }

    #[test]
    fn server_payload_wins_over_caller_payload() {
        // The caller asked for env=prod; the server reports env=prod with
        // an id and creator filled in. The reported item is the server's.
        let mut server_tag = tag("env", "prod");
        server_tag.id = Some("tag-123".into());
        server_tag.created_by = Some("USER".into());
        let observed = vec![server_tag.clone()];

        let out = project(&observed, &["env".to_string()]);
        assert_eq!(out, vec![server_tag]);
    }

    #[test]
    fn server_discovered_items_are_appended_in_observed_order() {
        let observed = vec![
            PrivateNetworkAttachment::new("auto-1"),
            PrivateNetworkAttachment::new("mine"),
            PrivateNetworkAttachment::new("auto-2"),
        ];
        let hint = vec!["mine".to_string()];

        let out = project(&observed, &hint);
        let ids: Vec<_> = out.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["mine", "auto-1", "auto-2"]);
    }

    #[test]
    fn removed_keys_disappear() {
        let observed = vec![tag("team", "x")];
        let hint = vec!["env".to_string(), "team".to_string()];

        let out = project(&observed, &hint);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "team");
    }

    #[test]
    fn empty_hint_returns_observation_as_is() {
        let observed = vec![tag("b", "2"), tag("a", "1")];
        let out = project(&observed, &[]);
        assert_eq!(out, observed);
    }

    #[test]
    fn empty_observation_projects_to_empty() {
        let observed: Vec<TagAssignment> = vec![];
        let out = project(&observed, &["env".to_string()]);
        assert!(out.is_empty());
    }

    #[test]
    fn duplicate_hint_key_emits_once_at_first_occurrence() {
        let observed = vec![tag("env", "prod"), tag("team", "x")];
        let hint = vec!["team".to_string(), "env".to_string(), "team".to_string()];

        let out = project(&observed, &hint);
        let names: Vec<_> = out.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["team", "env"]);
    }

    #[test]
    fn projection_is_idempotent() {
        let observed = vec![tag("c", "3"), tag("a", "1"), tag("b", "2")];
        let hint = vec!["a".to_string(), "b".to_string()];

        let first = project(&observed, &hint);
        let second = project(&observed, &hint);
        assert_eq!(first, second);

        // Re-projecting the projection with its own keys changes nothing.
        let third = project(&first, &keys_of(&first));
        assert_eq!(first, third);
    }

    // Property-based tests using proptest
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_tags() -> impl Strategy<Value = Vec<TagAssignment>> {
            proptest::collection::hash_set("[a-e][0-9]", 0..12).prop_map(|keys| {
                keys.into_iter()
                    .map(|k| TagAssignment::new(k, None))
                    .collect()
            })
        }

        fn arb_hint() -> impl Strategy<Value = Vec<String>> {
            proptest::collection::vec("[a-e][0-9]", 0..12)
        }

        proptest! {
            #[test]
            fn prop_projection_idempotent(
                observed in arb_tags(),
                hint in arb_hint(),
            ) {
                let first = project(&observed, &hint);
                let second = project(&observed, &hint);
                prop_assert_eq!(first, second);
            }

            #[test]
            fn prop_projection_preserves_observed_items(
                observed in arb_tags(),
                hint in arb_hint(),
            ) {
                // Projection is a permutation of the observation: nothing
                // is invented, nothing observed is lost.
                let out = project(&observed, &hint);
                prop_assert_eq!(out.len(), observed.len());
                for item in &observed {
                    prop_assert!(out.iter().any(|t| t.name == item.name));
                }
            }

            #[test]
            fn prop_hinted_keys_come_first_in_hint_order(
                observed in arb_tags(),
                hint in arb_hint(),
            ) {
                let out = project(&observed, &hint);
                let hinted: Vec<_> = out
                    .iter()
                    .map(|t| t.name.clone())
                    .filter(|k| hint.contains(k))
                    .collect();
                let expected: Vec<_> = {
                    let mut seen = std::collections::HashSet::new();
                    hint.iter()
                        .filter(|k| seen.insert((*k).clone()))
                        .filter(|k| observed.iter().any(|t| &t.name == *k))
                        .cloned()
                        .collect()
                };
                prop_assert_eq!(hinted, expected);
            }
        }
    }
}
