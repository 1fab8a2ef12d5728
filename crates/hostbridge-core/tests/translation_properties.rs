//! Property-based tests for the translation cache.
//!
//! Arbitrary interleavings of lookups, preloads and replies must never issue a
//! second request for a key that is still pending, and must never leave a key
//! both pending and resolved.

use std::collections::HashMap;

use hostbridge_core::{PendingPolicy, TranslationCache};
use hostbridge_proto::{
    Outbound,
    payloads::{TranslationBatch, TranslationReply},
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Resolve(usize),
    ResolveMany(Vec<usize>),
    Reply(usize),
    Batch(Vec<usize>),
    Clear,
}

const KEYS: [&str; 6] = ["Back", "Level", "Status", "Premium", "days", "N/A"];

fn op_strategy() -> impl Strategy<Value = Op> {
    let index = 0..KEYS.len();
    prop_oneof![
        4 => index.clone().prop_map(Op::Resolve),
        2 => prop::collection::vec(index.clone(), 0..4).prop_map(Op::ResolveMany),
        2 => index.clone().prop_map(Op::Reply),
        1 => prop::collection::vec(index, 0..4).prop_map(Op::Batch),
        1 => Just(Op::Clear),
    ]
}

fn policy_strategy() -> impl Strategy<Value = PendingPolicy> {
    prop_oneof![Just(PendingPolicy::ClearAll), Just(PendingPolicy::ClearReplied)]
}

fn requested(outgoing: Vec<Outbound>) -> Vec<String> {
    outgoing
        .into_iter()
        .flat_map(|message| match message {
            Outbound::Translate { key } => vec![key],
            Outbound::TranslateMultiple { keys } => keys,
            Outbound::JsLoaded | Outbound::LoginComplete(_) => vec![],
        })
        .collect()
}

proptest! {
    #[test]
    fn pending_keys_are_never_requested_twice(
        policy in policy_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..60),
    ) {
        let mut cache = TranslationCache::with_policy(policy);
        // Keys requested and not yet answered, as seen from the wire.
        let mut in_flight: HashMap<String, usize> = HashMap::new();

        for op in ops {
            match op {
                Op::Resolve(i) => {
                    let _ = cache.resolve(KEYS[i]);
                },
                Op::ResolveMany(indices) => {
                    cache.resolve_many(indices.iter().map(|&i| KEYS[i]));
                },
                Op::Reply(i) => {
                    cache.apply_reply(TranslationReply { key: KEYS[i].into(), value: "v".into() });
                    in_flight.remove(KEYS[i]);
                },
                Op::Batch(indices) => {
                    let batch: TranslationBatch =
                        indices.iter().map(|&i| (KEYS[i].to_owned(), "v".to_owned())).collect();
                    for key in batch.keys() {
                        in_flight.remove(key);
                    }
                    if policy == PendingPolicy::ClearAll {
                        in_flight.clear();
                    }
                    cache.apply_batch(batch);
                },
                Op::Clear => {
                    cache.clear();
                    in_flight.clear();
                },
            }

            for key in requested(cache.take_outgoing()) {
                let count = in_flight.entry(key.clone()).or_insert(0);
                *count += 1;
                prop_assert_eq!(*count, 1, "key {} requested twice while pending", key);
            }

            for key in cache.pending() {
                prop_assert!(!cache.has_translation(key), "key {} pending and resolved", key);
            }
        }
    }

    #[test]
    fn resolved_lookups_never_request(key in "[A-Za-z ]{1,16}", value in "[A-Za-z ]{1,16}") {
        let mut cache = TranslationCache::new();
        cache.apply_reply(TranslationReply { key: key.clone(), value: value.clone() });

        prop_assert_eq!(cache.resolve(&key), value);
        prop_assert!(!cache.has_outgoing());
    }
}
